use crate::models::{FailureReason, PassingCriteria, Verdict};

/// Checks an aggregated average and insufficient count against the criteria.
///
/// Without any graded subject the verdict is a pass. Reasons keep a fixed
/// order: minimum average, insufficient count, below-four count.
pub fn evaluate(
    average: f64,
    insufficient_count: usize,
    criteria: &PassingCriteria,
    has_any_grade: bool,
) -> Verdict {
    let mut reasons = Vec::new();

    if has_any_grade {
        if average < criteria.min_average_grade {
            reasons.push(FailureReason::MinAverage);
        }
        if insufficient_count > criteria.max_insufficient_grades {
            reasons.push(FailureReason::MaxInsufficient);
        }
        // Both limits count the same subjects; the second only reports when it differs.
        if insufficient_count > criteria.max_below_four
            && criteria.max_below_four != criteria.max_insufficient_grades
        {
            reasons.push(FailureReason::MaxBelowFour);
        }
    }

    Verdict {
        passed: reasons.is_empty(),
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(min_average_grade: f64, max_insufficient: usize, max_below_four: usize) -> PassingCriteria {
        PassingCriteria {
            max_insufficient_grades: max_insufficient,
            max_below_four,
            min_average_grade,
        }
    }

    #[test]
    fn no_grades_always_passes() {
        let verdict = evaluate(0.0, 9, &criteria(4.0, 0, 0), false);
        assert!(verdict.passed);
        assert!(verdict.reasons.is_empty());
    }

    #[test]
    fn reasons_follow_fixed_order() {
        let verdict = evaluate(3.5, 3, &criteria(4.0, 2, 2), true);
        assert!(!verdict.passed);
        assert_eq!(
            verdict.reasons,
            vec![FailureReason::MinAverage, FailureReason::MaxInsufficient]
        );
    }

    #[test]
    fn distinct_below_four_limit_reports_separately() {
        let verdict = evaluate(4.5, 2, &criteria(4.0, 3, 1), true);
        assert_eq!(verdict.reasons, vec![FailureReason::MaxBelowFour]);

        let verdict = evaluate(3.9, 4, &criteria(4.0, 3, 1), true);
        assert_eq!(
            verdict.reasons,
            vec![
                FailureReason::MinAverage,
                FailureReason::MaxInsufficient,
                FailureReason::MaxBelowFour
            ]
        );
    }

    #[test]
    fn limits_are_inclusive() {
        let verdict = evaluate(4.0, 2, &criteria(4.0, 2, 2), true);
        assert!(verdict.passed);
    }
}
