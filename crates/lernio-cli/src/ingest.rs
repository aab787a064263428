//! CSV ingestion and identifier normalization.
//!
//! Reads the enrollment export format produced by the learning platform: a
//! `UserID` column (values may carry a `"UserID: "` label prefix) and a
//! `CourseIDs` column holding a comma-separated list. Identifiers are
//! normalized here so the engine receives clean records.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use lernio_core::EnrollmentRecord;
use serde::Deserialize;

const USER_ID_PREFIX: &str = "UserID:";

#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(rename = "UserID")]
    user_id: String,
    #[serde(rename = "CourseIDs")]
    course_ids: Option<String>,
}

/// Loads and normalizes enrollment records from a CSV export file.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<EnrollmentRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_records(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Parses and normalizes records from any CSV source.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<EnrollmentRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<ExportRow>().enumerate() {
        // Header occupies line 1; data starts on line 2.
        let line = index + 2;
        let row = row.with_context(|| format!("malformed row at line {line}"))?;

        let user_id = normalize_user_id(&row.user_id);
        ensure!(!user_id.is_empty(), "row at line {line} has an empty user id");

        let course_ids = row
            .course_ids
            .as_deref()
            .map(split_course_list)
            .unwrap_or_default();

        records.push(EnrollmentRecord {
            user_id,
            course_ids,
        });
    }

    Ok(records)
}

/// Strips the export's `UserID:` label prefix and surrounding whitespace.
fn normalize_user_id(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix(USER_ID_PREFIX).unwrap_or(trimmed);
    stripped.trim().to_owned()
}

/// Splits a comma-separated course cell, dropping empty fragments.
fn split_course_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|course| !course.is_empty())
        .map(str::to_owned)
        .collect()
}
