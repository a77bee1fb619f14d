use std::fmt::Write;

use crate::models::{
    CalculatedSubject, GradeDistribution, SchoolConfig, SemesterId, TrendPoint, UpcomingExam,
};
use crate::stats::{all_semester_stats, calculate_subject, overall_stats, semester_stats};

/// Semester averages in configuration order, skipping semesters without grades.
pub fn semester_trend(config: &SchoolConfig) -> Vec<TrendPoint> {
    config
        .semesters
        .iter()
        .zip(all_semester_stats(config))
        .filter_map(|(semester, stats)| {
            stats.average().map(|average| TrendPoint {
                semester_id: semester.id,
                name: semester.name.clone(),
                average,
            })
        })
        .collect()
}

/// Graded subjects of a semester, best average first.
pub fn subject_comparison(config: &SchoolConfig, semester: SemesterId) -> Vec<CalculatedSubject> {
    let mut subjects: Vec<CalculatedSubject> = config
        .subjects
        .iter()
        .filter(|subject| subject.is_active_in(semester))
        .map(|subject| calculate_subject(subject, semester))
        .filter(|subject| subject.average.is_some())
        .collect();

    subjects.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    subjects
}

/// Buckets every recorded grade across all semesters.
pub fn grade_distribution(config: &SchoolConfig) -> GradeDistribution {
    let mut distribution = GradeDistribution::default();

    for grade in config.subjects.iter().flat_map(|subject| subject.all_grades()) {
        match grade.value {
            v if v < 4.0 => distribution.insufficient += 1,
            v if v < 5.0 => distribution.passing += 1,
            v if v < 5.5 => distribution.good += 1,
            _ => distribution.excellent += 1,
        }
    }

    distribution
}

/// Upcoming exams of a semester with their subject name, soonest first.
pub fn upcoming_exams(config: &SchoolConfig, semester: SemesterId) -> Vec<(&str, &UpcomingExam)> {
    let mut exams: Vec<(&str, &UpcomingExam)> = config
        .subjects
        .iter()
        .flat_map(|subject| {
            subject
                .all_upcoming()
                .map(move |exam| (subject.name.as_str(), exam))
        })
        .filter(|(_, exam)| exam.semester_id == semester)
        .collect();

    exams.sort_by(|a, b| a.1.date.cmp(&b.1.date));
    exams
}

pub fn build_report(config: &SchoolConfig, semester: SemesterId) -> String {
    let stats = semester_stats(config, semester);
    let overall = overall_stats(config);
    let comparison = subject_comparison(config, semester);
    let trend = semester_trend(config);
    let distribution = grade_distribution(config);
    let upcoming = upcoming_exams(config, semester);
    let criteria = &config.passing_criteria;

    let mut output = String::new();

    let _ = writeln!(output, "# Grade Standing Report");
    let _ = writeln!(
        output,
        "Generated for {} ({})",
        config.name,
        config.semester_name(semester)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Semester Standing");

    match stats.average() {
        Some(average) => {
            let _ = writeln!(output, "- Average: {average:.1}");
        }
        None => {
            let _ = writeln!(output, "- Average: no grades recorded for this semester");
        }
    }
    let _ = writeln!(output, "- Result: {}", verdict_label(stats.passed));
    let _ = writeln!(
        output,
        "- Insufficient subjects: {} (max {})",
        stats.insufficient_count, criteria.max_insufficient_grades
    );
    for reason in &stats.failure_reasons {
        let _ = writeln!(output, "- Failed: {}", reason.describe(criteria));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subjects");

    if stats.subjects.is_empty() {
        let _ = writeln!(output, "No subjects scheduled for this semester.");
    } else {
        for subject in &stats.subjects {
            let marker = if subject.is_passing { "" } else { " (insufficient)" };
            let _ = writeln!(
                output,
                "- {}: {}{}",
                subject.name,
                subject.display_average(),
                marker
            );
            for sub in &subject.sub_category_averages {
                let average = sub
                    .average
                    .map_or_else(|| "-".to_string(), |value| format!("{value:.2}"));
                let _ = writeln!(output, "  - {}: {}", sub.name, average);
            }
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Comparison");

    match (comparison.first(), comparison.last()) {
        (Some(best), Some(worst)) => {
            let _ = writeln!(output, "- Best subject: {} ({})", best.name, best.display_average());
            let _ = writeln!(
                output,
                "- Weakest subject: {} ({})",
                worst.name,
                worst.display_average()
            );
        }
        _ => {
            let _ = writeln!(output, "Not enough data for statistics.");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Trend");

    if trend.is_empty() {
        let _ = writeln!(output, "No semester has grades yet.");
    } else {
        for point in &trend {
            let _ = writeln!(output, "- {}: {:.1}", point.name, point.average);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");

    if distribution.total() == 0 {
        let _ = writeln!(output, "No grades recorded.");
    } else {
        let _ = writeln!(output, "- Insufficient (< 4.0): {}", distribution.insufficient);
        let _ = writeln!(output, "- Passing (4.0 - 4.9): {}", distribution.passing);
        let _ = writeln!(output, "- Good (5.0 - 5.4): {}", distribution.good);
        let _ = writeln!(output, "- Excellent (>= 5.5): {}", distribution.excellent);
        let _ = writeln!(output, "- Total grades: {}", distribution.total());
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Overall Standing");

    match overall.average() {
        Some(average) => {
            let _ = writeln!(output, "- Overall average: {average:.1}");
        }
        None => {
            let _ = writeln!(output, "- Overall average: no grades recorded");
        }
    }
    let _ = writeln!(output, "- Result: {}", verdict_label(overall.passed));

    let _ = writeln!(output);
    let _ = writeln!(output, "## Upcoming Exams");

    if upcoming.is_empty() {
        let _ = writeln!(output, "No upcoming exams.");
    } else {
        for (subject, exam) in &upcoming {
            let _ = writeln!(output, "- {} {}: {}", exam.date, subject, exam.name);
        }
    }

    output
}

fn verdict_label(passed: bool) -> &'static str {
    if passed {
        "Passed"
    } else {
        "Failed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{config, date, grades, sub_category, subject, upcoming};

    fn school() -> SchoolConfig {
        let mut science = subject("nw", "0.5", &[1, 2], Vec::new());
        science.name = "Naturwissenschaften".to_string();
        science.sub_categories = vec![
            sub_category("Physik", 50.0, "0.5", &[1, 2], grades(&[5.5, 6.0], 1)),
            sub_category("Chemie", 50.0, "0.5", &[1, 2], grades(&[3.0], 1)),
        ];
        science.sub_categories[1]
            .upcoming
            .push(upcoming("Stoechiometrie", 1, date(3, 20)));

        let mut german = subject("d", "0.5", &[1, 2], grades(&[3.5, 3.0], 1));
        german.name = "Deutsch".to_string();
        german.upcoming.push(upcoming("Aufsatz", 1, date(2, 11)));
        german.upcoming.push(upcoming("Vortrag", 2, date(9, 1)));

        config(&[1, 2], vec![science, german])
    }

    #[test]
    fn trend_skips_semesters_without_grades() {
        let trend = semester_trend(&school());
        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].semester_id, 1);
        assert_eq!(trend[0].name, "1. Semester");
    }

    #[test]
    fn comparison_orders_best_first() {
        let comparison = subject_comparison(&school(), 1);
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison[0].id, "nw");
        assert_eq!(comparison[1].id, "d");
        assert!(subject_comparison(&school(), 2).is_empty());
    }

    #[test]
    fn distribution_counts_sub_category_grades() {
        let distribution = grade_distribution(&school());
        assert_eq!(distribution.insufficient, 3);
        assert_eq!(distribution.passing, 0);
        assert_eq!(distribution.good, 0);
        assert_eq!(distribution.excellent, 2);
        assert_eq!(distribution.total(), 5);
    }

    #[test]
    fn upcoming_exams_are_scoped_and_sorted() {
        let config = school();
        let exams = upcoming_exams(&config, 1);
        let names: Vec<&str> = exams.iter().map(|(_, exam)| exam.name.as_str()).collect();
        assert_eq!(names, vec!["Aufsatz", "Stoechiometrie"]);
        assert_eq!(exams[1].0, "Naturwissenschaften");
    }

    #[test]
    fn report_includes_all_sections() {
        let report = build_report(&school(), 1);
        assert!(report.contains("# Grade Standing Report"));
        assert!(report.contains("Generated for Test School (1. Semester)"));
        assert!(report.contains("- Average: 4.0"));
        assert!(report.contains("- Naturwissenschaften: 4.50"));
        assert!(report.contains("  - Physik: 6.00"));
        assert!(report.contains("- Deutsch: 3.50 (insufficient)"));
        assert!(report.contains("- Best subject: Naturwissenschaften (4.50)"));
        assert!(report.contains("- Total grades: 5"));
        assert!(report.contains("- 2026-02-11 Deutsch: Aufsatz"));
    }

    #[test]
    fn empty_semester_report_uses_placeholders() {
        let report = build_report(&school(), 2);
        assert!(report.contains("no grades recorded for this semester"));
        assert!(report.contains("Not enough data for statistics."));
        assert!(report.contains("- Result: Passed"));
    }
}
