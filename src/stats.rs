use crate::criteria;
use crate::models::{
    CalculatedSubject, OverallStats, SchoolConfig, SemesterId, SemesterStats, Subject,
    PASSING_GRADE,
};
use crate::resolver::{resolve_subject_average, sub_category_breakdown};
use crate::rounding::{round_grade, STATS_GRID};

pub fn calculate_subject(subject: &Subject, semester: SemesterId) -> CalculatedSubject {
    let average = resolve_subject_average(subject, semester);
    CalculatedSubject {
        id: subject.id.clone(),
        name: subject.name.clone(),
        average,
        is_passing: average.map_or(true, |value| value >= PASSING_GRADE),
        sub_category_averages: sub_category_breakdown(subject, semester),
    }
}

/// Standing of one semester across every subject active in it.
pub fn semester_stats(config: &SchoolConfig, semester: SemesterId) -> SemesterStats {
    let subjects: Vec<CalculatedSubject> = config
        .subjects
        .iter()
        .filter(|subject| subject.is_active_in(semester))
        .map(|subject| calculate_subject(subject, semester))
        .collect();

    let averages: Vec<f64> = subjects.iter().filter_map(|subject| subject.average).collect();
    let insufficient_count = averages
        .iter()
        .filter(|average| **average < PASSING_GRADE)
        .count();

    let average = if averages.is_empty() {
        None
    } else {
        let raw = averages.iter().sum::<f64>() / averages.len() as f64;
        Some(round_grade(raw, STATS_GRID))
    };

    let verdict = criteria::evaluate(
        average.unwrap_or(0.0),
        insufficient_count,
        &config.passing_criteria,
        average.is_some(),
    );

    tracing::debug!(
        semester,
        graded = averages.len(),
        insufficient_count,
        passed = verdict.passed,
        "semester stats computed"
    );

    SemesterStats::new(semester, average, insufficient_count, verdict, subjects)
}

/// Stats for every configured semester, in configuration order.
pub fn all_semester_stats(config: &SchoolConfig) -> Vec<SemesterStats> {
    config
        .semesters
        .iter()
        .map(|semester| semester_stats(config, semester.id))
        .collect()
}

/// Lifetime average over semesters with data; fails if any semester fails.
pub fn overall_stats(config: &SchoolConfig) -> OverallStats {
    let semesters = all_semester_stats(config);
    let passed = semesters.iter().all(|stats| stats.passed);
    let averages: Vec<f64> = semesters.iter().filter_map(SemesterStats::average).collect();

    let average = if averages.is_empty() {
        None
    } else {
        let raw = averages.iter().sum::<f64>() / averages.len() as f64;
        Some(round_grade(raw, STATS_GRID))
    };

    OverallStats::new(average, passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{config, grades, sub_category, subject, with_final_exam};
    use crate::models::FailureReason;

    #[test]
    fn semester_without_grades_passes_with_no_data() {
        let school = config(&[1], vec![subject("m", "0.5", &[1], Vec::new())]);
        let stats = semester_stats(&school, 1);
        assert!(stats.passed);
        assert!(!stats.has_data());
        assert_eq!(stats.average(), None);
        assert!(stats.failure_reasons.is_empty());
        assert_eq!(stats.subjects.len(), 1);
        assert!(stats.subjects[0].is_passing);
    }

    #[test]
    fn semester_average_is_mean_of_subjects_rounded_to_tenth() {
        let school = config(
            &[1],
            vec![
                subject("d", "0.5", &[1], grades(&[5.0], 1)),
                subject("e", "0.5", &[1], grades(&[4.5], 1)),
                subject("f", "0.5", &[1], grades(&[4.0], 1)),
            ],
        );
        let stats = semester_stats(&school, 1);
        assert_eq!(stats.average(), Some(4.5));
        assert_eq!(stats.insufficient_count, 0);
        assert!(stats.passed);
    }

    #[test]
    fn inactive_subjects_are_not_listed() {
        let school = config(
            &[1, 2],
            vec![
                subject("d", "0.5", &[1, 2], grades(&[5.0], 1)),
                subject("idpa", "0.5", &[2], grades(&[6.0], 2)),
            ],
        );
        let stats = semester_stats(&school, 1);
        assert_eq!(stats.subjects.len(), 1);
        assert_eq!(stats.subjects[0].id, "d");
    }

    #[test]
    fn insufficient_subjects_fail_the_semester() {
        let school = config(
            &[1],
            vec![
                subject("d", "0.5", &[1], grades(&[3.5], 1)),
                subject("e", "0.5", &[1], grades(&[3.0], 1)),
                subject("f", "0.5", &[1], grades(&[3.5], 1)),
                subject("m", "0.5", &[1], grades(&[6.0], 1)),
            ],
        );
        let stats = semester_stats(&school, 1);
        assert_eq!(stats.insufficient_count, 3);
        assert_eq!(stats.average(), Some(4.0));
        assert!(!stats.passed);
        assert_eq!(stats.failure_reasons, vec![FailureReason::MaxInsufficient]);
        assert!(!stats.subjects[0].is_passing);
        assert!(stats.subjects[3].is_passing);
    }

    #[test]
    fn calculated_subject_carries_breakdown() {
        let mut science = with_final_exam(subject("nw", "0.5", &[1], Vec::new()), 50.0, None, &[]);
        science.sub_categories = vec![
            sub_category("Physik", 50.0, "0.5", &[1], grades(&[5.0], 1)),
            sub_category("Chemie", 50.0, "0.5", &[1], Vec::new()),
        ];
        let calculated = calculate_subject(&science, 1);
        assert_eq!(calculated.average, Some(5.0));
        assert_eq!(calculated.sub_category_averages.len(), 2);
        assert_eq!(calculated.sub_category_averages[1].average, None);
    }

    #[test]
    fn overall_fails_when_any_semester_fails() {
        let mut school = config(
            &[1, 2],
            vec![
                subject("d", "0.5", &[1, 2], [grades(&[6.0], 1), grades(&[3.5], 2)].concat()),
                subject("m", "0.5", &[1, 2], [grades(&[6.0], 1), grades(&[3.5], 2)].concat()),
            ],
        );
        school.passing_criteria.max_insufficient_grades = 1;
        school.passing_criteria.max_below_four = 1;

        assert!(semester_stats(&school, 1).passed);
        assert!(!semester_stats(&school, 2).passed);

        let overall = overall_stats(&school);
        assert!(!overall.passed);
        assert_eq!(overall.average(), Some(4.8));
    }

    #[test]
    fn overall_skips_semesters_without_data() {
        let school = config(
            &[1, 2, 3],
            vec![subject("d", "0.5", &[1, 2, 3], grades(&[5.0], 1))],
        );
        let overall = overall_stats(&school);
        assert!(overall.passed);
        assert_eq!(overall.average(), Some(5.0));
    }

    #[test]
    fn overall_without_any_grade_has_no_data() {
        let school = config(&[1, 2], vec![subject("d", "0.5", &[1, 2], Vec::new())]);
        let overall = overall_stats(&school);
        assert!(overall.passed);
        assert!(!overall.has_data());
    }
}
