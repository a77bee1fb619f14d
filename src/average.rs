use crate::models::{Grade, SemesterId};

/// Anything that carries a grade value scoped to a semester.
pub trait Scored {
    fn value(&self) -> f64;
    fn semester_id(&self) -> SemesterId;
}

impl Scored for Grade {
    fn value(&self) -> f64 {
        self.value
    }

    fn semester_id(&self) -> SemesterId {
        self.semester_id
    }
}

/// Unrounded arithmetic mean of the entries recorded in `semester`.
pub fn scoped_average<T: Scored>(grades: &[T], semester: SemesterId) -> Option<f64> {
    let (sum, count) = grades
        .iter()
        .filter(|grade| grade.semester_id() == semester)
        .fold((0.0, 0usize), |(sum, count), grade| (sum + grade.value(), count + 1));

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
