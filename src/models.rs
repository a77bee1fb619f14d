use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordinal semester identifier, unique within one configuration.
pub type SemesterId = u32;

/// Grade value below which a grade or an average counts as insufficient.
pub const PASSING_GRADE: f64 = 4.0;

/// Keys the engine does not model, kept so a load/save cycle is lossless.
pub type ExtraFields = Map<String, Value>;

/// Reads a `{"1": 4.5}` object into semester-keyed grades.
///
/// Flattened structs buffer their input, so integer keys have to be parsed by hand.
fn semester_keyed<'de, D>(deserializer: D) -> Result<BTreeMap<SemesterId, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, f64>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|(key, grade)| {
            key.trim()
                .parse::<SemesterId>()
                .map(|semester| (semester, grade))
                .map_err(|_| de::Error::custom(format!("invalid semester key '{key}'")))
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: String,
    pub value: f64,
    pub date: NaiveDate,
    pub name: String,
    pub semester_id: SemesterId,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Placeholder for an exam that has been announced but not graded yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingExam {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub semester_id: SemesterId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub id: SemesterId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    /// Percentage share within the parent subject (e.g. 33).
    pub weight: f64,
    #[serde(default)]
    pub rounding: String,
    #[serde(default)]
    pub semesters: Vec<SemesterId>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(rename = "commingGrades", default)]
    pub upcoming: Vec<UpcomingExam>,
    // Exam settings on a sub-category are stored but take no part in averaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_final_exam: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_exam_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_exam_rounding: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "semester_keyed"
    )]
    pub final_exam_grades: BTreeMap<SemesterId, f64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SubCategory {
    pub fn is_active_in(&self, semester: SemesterId) -> bool {
        self.semesters.contains(&semester)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    /// Reserved for cross-subject weighting; every subject currently counts once.
    #[serde(default = "default_subject_weight")]
    pub weight: f64,
    pub rounding: String,
    #[serde(default)]
    pub has_final_exam: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_exam_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_exam_rounding: Option<String>,
    pub semesters: Vec<SemesterId>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(rename = "commingGrades", default)]
    pub upcoming: Vec<UpcomingExam>,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
    #[serde(
        default,
        skip_serializing_if = "BTreeMap::is_empty",
        deserialize_with = "semester_keyed"
    )]
    pub final_exam_grades: BTreeMap<SemesterId, f64>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

fn default_subject_weight() -> f64 {
    1.0
}

/// The two shapes a subject's coursework can take.
///
/// A subject with at least one sub-category is partitioned and its direct
/// grades take no part in averaging.
#[derive(Debug, Clone, Copy)]
pub enum Coursework<'a> {
    Flat(&'a [Grade]),
    Partitioned(&'a [SubCategory]),
}

impl Subject {
    pub fn is_active_in(&self, semester: SemesterId) -> bool {
        self.semesters.contains(&semester)
    }

    pub fn coursework(&self) -> Coursework<'_> {
        if self.sub_categories.is_empty() {
            Coursework::Flat(&self.grades)
        } else {
            Coursework::Partitioned(&self.sub_categories)
        }
    }

    /// Recorded final-exam grade for `semester`, only when the subject has a final exam.
    pub fn final_exam_grade(&self, semester: SemesterId) -> Option<f64> {
        if !self.has_final_exam {
            return None;
        }
        self.final_exam_grades.get(&semester).copied()
    }

    /// Exam weight in percent; an unset or zero weight disables blending.
    pub fn final_exam_share(&self) -> Option<f64> {
        self.final_exam_weight.filter(|weight| *weight != 0.0 && !weight.is_nan())
    }

    /// Grid used for exam results, falling back to the subject grid.
    pub fn final_exam_grid(&self) -> &str {
        self.final_exam_rounding
            .as_deref()
            .filter(|grid| !grid.is_empty())
            .unwrap_or(&self.rounding)
    }

    /// Every recorded grade, whether attached directly or to a sub-category.
    pub fn all_grades(&self) -> impl Iterator<Item = &Grade> {
        self.grades
            .iter()
            .chain(self.sub_categories.iter().flat_map(|sub| sub.grades.iter()))
    }

    pub fn all_upcoming(&self) -> impl Iterator<Item = &UpcomingExam> {
        self.upcoming
            .iter()
            .chain(self.sub_categories.iter().flat_map(|sub| sub.upcoming.iter()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassingCriteria {
    pub max_insufficient_grades: usize,
    pub max_below_four: usize,
    pub min_average_grade: f64,
}

impl Default for PassingCriteria {
    fn default() -> Self {
        Self {
            max_insufficient_grades: 2,
            max_below_four: 2,
            min_average_grade: PASSING_GRADE,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
    Fr,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Presentation settings, carried through untouched by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_file_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_semester_id: Option<SemesterId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolConfig {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub semesters: Vec<Semester>,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub passing_criteria: PassingCriteria,
    #[serde(default)]
    pub settings: Settings,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SchoolConfig {
    /// Semester shown by default: the configured one, else the first, else 1.
    pub fn active_semester(&self) -> SemesterId {
        self.settings
            .active_semester_id
            .or_else(|| self.semesters.first().map(|semester| semester.id))
            .unwrap_or(1)
    }

    pub fn semester(&self, id: SemesterId) -> Option<&Semester> {
        self.semesters.iter().find(|semester| semester.id == id)
    }

    pub fn semester_name(&self, id: SemesterId) -> String {
        self.semester(id)
            .map(|semester| semester.name.clone())
            .unwrap_or_else(|| format!("Semester {id}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryAverage {
    pub name: String,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedSubject {
    pub id: String,
    pub name: String,
    pub average: Option<f64>,
    pub is_passing: bool,
    pub sub_category_averages: Vec<SubCategoryAverage>,
}

impl CalculatedSubject {
    pub fn display_average(&self) -> String {
        match self.average {
            Some(average) => format!("{average:.2}"),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureReason {
    MinAverage,
    MaxInsufficient,
    MaxBelowFour,
}

impl FailureReason {
    pub fn tag(self) -> &'static str {
        match self {
            FailureReason::MinAverage => "minAverage",
            FailureReason::MaxInsufficient => "maxInsufficient",
            FailureReason::MaxBelowFour => "maxBelowFour",
        }
    }

    /// Human readable explanation including the threshold that was crossed.
    pub fn describe(self, criteria: &PassingCriteria) -> String {
        match self {
            FailureReason::MinAverage => {
                format!("Average too low (< {})", criteria.min_average_grade)
            }
            FailureReason::MaxInsufficient => format!(
                "Too many insufficient grades (> {})",
                criteria.max_insufficient_grades
            ),
            FailureReason::MaxBelowFour => {
                format!("Too many grades below 4.0 (> {})", criteria.max_below_four)
            }
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub passed: bool,
    pub reasons: Vec<FailureReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterStats {
    pub semester_id: SemesterId,
    // Serialized as null when no subject has an average.
    average: Option<f64>,
    has_data: bool,
    pub insufficient_count: usize,
    pub passed: bool,
    pub failure_reasons: Vec<FailureReason>,
    pub subjects: Vec<CalculatedSubject>,
}

impl SemesterStats {
    pub(crate) fn new(
        semester_id: SemesterId,
        average: Option<f64>,
        insufficient_count: usize,
        verdict: Verdict,
        subjects: Vec<CalculatedSubject>,
    ) -> Self {
        Self {
            semester_id,
            average,
            has_data: average.is_some(),
            insufficient_count,
            passed: verdict.passed,
            failure_reasons: verdict.reasons,
            subjects,
        }
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    average: Option<f64>,
    has_data: bool,
    pub passed: bool,
}

impl OverallStats {
    pub(crate) fn new(average: Option<f64>, passed: bool) -> Self {
        Self {
            average,
            has_data: average.is_some(),
            passed,
        }
    }

    pub fn has_data(&self) -> bool {
        self.has_data
    }

    pub fn average(&self) -> Option<f64> {
        self.average
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub semester_id: SemesterId,
    pub name: String,
    pub average: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GradeDistribution {
    pub insufficient: usize,
    pub passing: usize,
    pub good: usize,
    pub excellent: usize,
}

impl GradeDistribution {
    pub fn total(&self) -> usize {
        self.insufficient + self.passing + self.good + self.excellent
    }
}
