//! Builders shared by the unit tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    ExtraFields, Grade, PassingCriteria, SchoolConfig, Semester, SemesterId, Settings,
    SubCategory, Subject, UpcomingExam,
};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

pub fn grade(value: f64, semester: SemesterId) -> Grade {
    Grade {
        id: Uuid::new_v4().to_string(),
        value,
        date: date(1, 15),
        name: "Test".to_string(),
        semester_id: semester,
        extra: ExtraFields::new(),
    }
}

pub fn grades(values: &[f64], semester: SemesterId) -> Vec<Grade> {
    values.iter().map(|value| grade(*value, semester)).collect()
}

pub fn upcoming(name: &str, semester: SemesterId, on: NaiveDate) -> UpcomingExam {
    UpcomingExam {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        date: on,
        semester_id: semester,
    }
}

pub fn subject(id: &str, rounding: &str, semesters: &[SemesterId], grades: Vec<Grade>) -> Subject {
    Subject {
        id: id.to_string(),
        name: id.to_string(),
        weight: 1.0,
        rounding: rounding.to_string(),
        has_final_exam: false,
        final_exam_weight: None,
        final_exam_rounding: None,
        semesters: semesters.to_vec(),
        grades,
        upcoming: Vec::new(),
        sub_categories: Vec::new(),
        final_exam_grades: BTreeMap::new(),
        extra: ExtraFields::new(),
    }
}

pub fn sub_category(
    name: &str,
    weight: f64,
    rounding: &str,
    semesters: &[SemesterId],
    grades: Vec<Grade>,
) -> SubCategory {
    SubCategory {
        id: None,
        name: name.to_string(),
        weight,
        rounding: rounding.to_string(),
        semesters: semesters.to_vec(),
        grades,
        upcoming: Vec::new(),
        has_final_exam: None,
        final_exam_weight: None,
        final_exam_rounding: None,
        final_exam_grades: BTreeMap::new(),
        extra: ExtraFields::new(),
    }
}

pub fn with_final_exam(
    mut subject: Subject,
    weight: f64,
    rounding: Option<&str>,
    exams: &[(SemesterId, f64)],
) -> Subject {
    subject.has_final_exam = true;
    subject.final_exam_weight = Some(weight);
    subject.final_exam_rounding = rounding.map(str::to_string);
    subject.final_exam_grades = exams.iter().copied().collect();
    subject
}

pub fn config(semesters: &[SemesterId], subjects: Vec<Subject>) -> SchoolConfig {
    SchoolConfig {
        id: "test-config".to_string(),
        name: "Test School".to_string(),
        semesters: semesters
            .iter()
            .map(|id| Semester {
                id: *id,
                name: format!("{id}. Semester"),
            })
            .collect(),
        subjects,
        passing_criteria: PassingCriteria::default(),
        settings: Settings::default(),
        extra: ExtraFields::new(),
    }
}
