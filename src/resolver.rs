use crate::average::scoped_average;
use crate::models::{Coursework, SemesterId, SubCategory, SubCategoryAverage, Subject};
use crate::rounding::round_grade;

/// Resolves a subject's average for one semester.
///
/// Each aggregate is rounded with its own grid before it feeds the next level:
/// sub-category averages, the pre-exam subject average, then the exam blend.
pub fn resolve_subject_average(subject: &Subject, semester: SemesterId) -> Option<f64> {
    if !subject.is_active_in(semester) {
        return None;
    }

    let pre_exam = match subject.coursework() {
        Coursework::Partitioned(sub_categories) => {
            // A recorded exam grade is not used when no sub-category has grades.
            let weighted = weighted_sub_category_average(sub_categories, semester)?;
            round_grade(weighted, &subject.rounding)
        }
        Coursework::Flat(grades) => match scoped_average(grades, semester) {
            Some(average) => round_grade(average, &subject.rounding),
            None => {
                let exam = subject.final_exam_grade(semester)?;
                tracing::trace!(subject = %subject.id, semester, "average from final exam alone");
                return Some(round_grade(exam, subject.final_exam_grid()));
            }
        },
    };

    Some(apply_final_exam(subject, pre_exam, semester))
}

/// Rounded average of a single sub-category, if it has grades in `semester`.
pub fn sub_category_average(sub_category: &SubCategory, semester: SemesterId) -> Option<f64> {
    if !sub_category.is_active_in(semester) {
        return None;
    }
    scoped_average(&sub_category.grades, semester)
        .map(|average| round_grade(average, &sub_category.rounding))
}

/// Per sub-category breakdown for every sub-category active in `semester`.
pub fn sub_category_breakdown(subject: &Subject, semester: SemesterId) -> Vec<SubCategoryAverage> {
    subject
        .sub_categories
        .iter()
        .filter(|sub| sub.is_active_in(semester))
        .map(|sub| SubCategoryAverage {
            name: sub.name.clone(),
            average: sub_category_average(sub, semester),
        })
        .collect()
}

fn weighted_sub_category_average(
    sub_categories: &[SubCategory],
    semester: SemesterId,
) -> Option<f64> {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for sub in sub_categories {
        if let Some(average) = sub_category_average(sub, semester) {
            weighted_sum += average * sub.weight;
            weight_total += sub.weight;
        }
    }

    if weight_total == 0.0 {
        None
    } else {
        Some(weighted_sum / weight_total)
    }
}

fn apply_final_exam(subject: &Subject, pre_exam: f64, semester: SemesterId) -> f64 {
    let (Some(exam), Some(weight)) = (
        subject.final_exam_grade(semester),
        subject.final_exam_share(),
    ) else {
        return pre_exam;
    };

    let exam_share = weight / 100.0;
    let blended = pre_exam * (1.0 - exam_share) + exam * exam_share;
    round_grade(blended, subject.final_exam_grid())
}
