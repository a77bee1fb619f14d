use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{ExtraFields, Grade, SchoolConfig, SemesterId};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read grade rows: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unknown subject '{subject_id}'")]
    UnknownSubject { row: usize, subject_id: String },

    #[error("row {row}: subject '{subject_id}' has no sub-category '{sub_category}'")]
    UnknownSubCategory {
        row: usize,
        subject_id: String,
        sub_category: String,
    },
}

#[derive(Debug, Deserialize)]
struct GradeRow {
    subject_id: String,
    sub_category: Option<String>,
    value: f64,
    name: String,
    date: NaiveDate,
    semester_id: SemesterId,
    id: Option<String>,
}

struct Placement {
    subject: usize,
    sub_category: Option<usize>,
    grade: Grade,
}

/// Appends the grades from `csv_path` to the configuration.
pub fn import_csv(config: &mut SchoolConfig, csv_path: &Path) -> Result<usize, ImportError> {
    let reader = csv::Reader::from_path(csv_path)?;
    import_rows(config, reader)
}

pub fn import_reader<R: Read>(config: &mut SchoolConfig, input: R) -> Result<usize, ImportError> {
    import_rows(config, csv::Reader::from_reader(input))
}

/// Every row is resolved before anything is appended, so a bad row leaves the
/// configuration untouched. Rows whose `id` already exists on the target are skipped.
fn import_rows<R: Read>(
    config: &mut SchoolConfig,
    mut reader: csv::Reader<R>,
) -> Result<usize, ImportError> {
    let mut placements = Vec::new();

    for (index, result) in reader.deserialize::<GradeRow>().enumerate() {
        let row = result?;
        placements.push(place(config, index + 1, row)?);
    }

    let mut inserted = 0usize;
    for placement in placements {
        let subject = &mut config.subjects[placement.subject];
        let grades = match placement.sub_category {
            Some(index) => &mut subject.sub_categories[index].grades,
            None => &mut subject.grades,
        };

        if grades.iter().any(|grade| grade.id == placement.grade.id) {
            tracing::debug!(id = %placement.grade.id, "grade already recorded, skipping");
            continue;
        }
        grades.push(placement.grade);
        inserted += 1;
    }

    Ok(inserted)
}

fn place(config: &SchoolConfig, row_number: usize, row: GradeRow) -> Result<Placement, ImportError> {
    let subject = config
        .subjects
        .iter()
        .position(|subject| subject.id == row.subject_id)
        .ok_or_else(|| ImportError::UnknownSubject {
            row: row_number,
            subject_id: row.subject_id.clone(),
        })?;

    let sub_category = match row.sub_category.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(
            config.subjects[subject]
                .sub_categories
                .iter()
                .position(|sub| sub.name == name)
                .ok_or_else(|| ImportError::UnknownSubCategory {
                    row: row_number,
                    subject_id: row.subject_id.clone(),
                    sub_category: name.to_string(),
                })?,
        ),
        _ => None,
    };

    if !(1.0..=6.0).contains(&row.value) {
        tracing::warn!(row = row_number, value = row.value, "grade outside the 1-6 scale");
    }

    Ok(Placement {
        subject,
        sub_category,
        grade: Grade {
            id: row
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            value: row.value,
            date: row.date,
            name: row.name,
            semester_id: row.semester_id,
            extra: ExtraFields::new(),
        },
    })
}
