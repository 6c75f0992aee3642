//! Export start-date and classification results.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON form carries run metadata for audits.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{ClassifiedEntry, StartDateRecord};
use crate::error::AppError;

/// Write one row per (person, role) with the reconciled start date.
pub fn write_start_dates_csv(path: &Path, records: &[StartDateRecord]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::output(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writeln!(file, "person_id,role,start_date,resolution")
        .map_err(|e| AppError::output(format!("Failed to write CSV header: {e}")))?;

    for r in records {
        writeln!(
            file,
            "{},{},{},{}",
            r.person_id,
            r.role.display_name(),
            r.start_date.as_deref().unwrap_or(""),
            serde_label(&r.resolution),
        )
        .map_err(|e| AppError::output(format!("Failed to write CSV row: {e}")))?;
    }

    Ok(())
}

/// Write one row per classified entry (role + confidence per record).
pub fn write_classified_csv(path: &Path, classified: &[ClassifiedEntry]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::output(format!("Failed to create CSV '{}': {e}", path.display()))
    })?;

    writer
        .write_record([
            "person_id",
            "document_id",
            "year",
            "job_title",
            "institution",
            "role",
            "confidence",
        ])
        .map_err(|e| AppError::output(format!("Failed to write CSV header: {e}")))?;

    for c in classified {
        let confidence = c.confidence.map(|v| format!("{v:.1}")).unwrap_or_default();
        writer
            .write_record([
                c.entry.person_id.as_str(),
                c.entry.document_id.as_str(),
                c.entry.year.as_str(),
                c.entry.job_title.as_str(),
                c.entry.institution.as_str(),
                c.role.display_name(),
                confidence.as_str(),
            ])
            .map_err(|e| AppError::output(format!("Failed to write CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush CSV '{}': {e}", path.display())))
}

/// The JSON export schema: run metadata + the start-date records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFile {
    pub tool: String,
    pub generated: String,
    pub records: Vec<StartDateRecord>,
}

/// Write the start-date records as pretty JSON with run metadata.
pub fn write_records_json(path: &Path, records: &[StartDateRecord]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::output(format!("Failed to create JSON '{}': {e}", path.display()))
    })?;

    let run = RunFile {
        tool: "escalafon".to_string(),
        generated: chrono::Local::now().to_rfc3339(),
        records: records.to_vec(),
    };

    serde_json::to_writer_pretty(file, &run)
        .map_err(|e| AppError::output(format!("Failed to write JSON '{}': {e}", path.display())))
}

/// Read a previously written JSON export.
pub fn read_records_json(path: &Path) -> Result<RunFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid records JSON: {e}")))
}

fn serde_label(r: &crate::domain::Resolution) -> String {
    // snake_case, matching the JSON serialization of `Resolution`.
    serde_json::to_string(r)
        .map(|s| s.trim_matches('"').to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Resolution, Role};

    fn records() -> Vec<StartDateRecord> {
        vec![
            StartDateRecord {
                person_id: "0912345678".to_string(),
                role: Role::Judge,
                start_date: Some("201301".to_string()),
                resolution: Resolution::ExactMode,
            },
            StartDateRecord {
                person_id: "0800404923".to_string(),
                role: Role::Prosecutor,
                start_date: None,
                resolution: Resolution::Unresolved,
            },
        ]
    }

    #[test]
    fn start_dates_csv_round_trips_absence_as_empty_cell() {
        let path = std::env::temp_dir().join("escalafon_test_dates.csv");
        write_start_dates_csv(&path, &records()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("person_id,role,start_date,resolution\n"));
        assert!(text.contains("0912345678,judge,201301,exact_mode"));
        assert!(text.contains("0800404923,prosecutor,,unresolved"));
    }

    #[test]
    fn json_export_round_trips() {
        let path = std::env::temp_dir().join("escalafon_test_records.json");
        write_records_json(&path, &records()).unwrap();
        let run = read_records_json(&path).unwrap();
        assert_eq!(run.tool, "escalafon");
        assert_eq!(run.records.len(), 2);
        assert_eq!(run.records[0].start_date.as_deref(), Some("201301"));
        assert_eq!(run.records[1].start_date, None);
    }
}
