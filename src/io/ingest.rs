//! CSV ingest for scraped disclosure rows.
//!
//! This module turns the scraper/OCR collaborator's export into
//! [`DisclosureEntry`] values that are safe to classify.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (input order preserved)
//! - **Separation of concerns**: no classification logic here

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{DisclosureEntry, Role};
use crate::error::AppError;

/// Accepted header spellings per logical column. The scraper historically
/// exported Spanish column names; both generations are recognized.
const PERSON_ID_ALIASES: &[&str] = &["person_id", "cedula", "id"];
const NAME_ALIASES: &[&str] = &["full_name", "name", "nombre"];
const JOB_TITLE_ALIASES: &[&str] = &["job_title", "cargo", "title"];
const INSTITUTION_ALIASES: &[&str] = &["institution", "institucion"];
const DOCUMENT_ALIASES: &[&str] = &["document_id", "iddoc", "doc_id"];
const YEAR_ALIASES: &[&str] = &["year", "anio"];
const FROM_ALIASES: &[&str] = &["from", "desde", "from_date"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub person_id: Option<String>,
    pub message: String,
}

/// Ingest output: entries + row errors + accounting.
#[derive(Debug, Clone)]
pub struct IngestedRecords {
    pub entries: Vec<DisclosureEntry>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

struct Columns {
    person_id: usize,
    full_name: Option<usize>,
    job_title: usize,
    institution: usize,
    document_id: Option<usize>,
    year: Option<usize>,
    from_field: Option<usize>,
}

/// Load disclosure rows from a CSV file.
pub fn load_entries(path: &Path) -> Result<IngestedRecords, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let columns = resolve_columns(&headers)?;

    let mut entries = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, record) in reader.records().enumerate() {
        // Line 1 is the header row.
        let line = idx + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    person_id: None,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };

        match entry_from_record(&record, &columns) {
            Ok(entry) => entries.push(entry),
            Err(message) => row_errors.push(RowError {
                line,
                person_id: field(&record, Some(columns.person_id)),
                message,
            }),
        }
    }

    let rows_used = entries.len();
    Ok(IngestedRecords {
        entries,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Load a per-(person, role) year override CSV.
///
/// Schema: `person_id,role,year` with role in {judge, prosecutor} (Spanish
/// labels accepted). These patch irrecoverable OCR years for specific
/// identifiers and are deliberately not built in.
pub fn load_override_table(path: &Path) -> Result<Vec<(String, Role, String)>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open overrides CSV '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut out = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 2;
        let record = record
            .map_err(|e| AppError::input(format!("Overrides line {line}: unreadable row: {e}")))?;

        let person_id = record
            .get(0)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::input(format!("Overrides line {line}: missing person_id")))?;
        let role = record
            .get(1)
            .and_then(Role::parse_label)
            .filter(|r| r.is_official())
            .ok_or_else(|| {
                AppError::input(format!(
                    "Overrides line {line}: role must be judge or prosecutor"
                ))
            })?;
        let year = record
            .get(2)
            .filter(|s| s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| {
                AppError::input(format!("Overrides line {line}: year must be 4 digits"))
            })?;

        out.push((person_id.to_string(), role, year.to_string()));
    }
    Ok(out)
}

fn resolve_columns(headers: &StringRecord) -> Result<Columns, AppError> {
    let find = |aliases: &[&str]| {
        headers
            .iter()
            .position(|h| aliases.contains(&h.trim().to_ascii_lowercase().as_str()))
    };
    let require = |aliases: &[&str]| {
        find(aliases).ok_or_else(|| {
            AppError::input(format!(
                "Missing required CSV column (accepted names: {})",
                aliases.join(", ")
            ))
        })
    };

    Ok(Columns {
        person_id: require(PERSON_ID_ALIASES)?,
        full_name: find(NAME_ALIASES),
        job_title: require(JOB_TITLE_ALIASES)?,
        institution: require(INSTITUTION_ALIASES)?,
        document_id: find(DOCUMENT_ALIASES),
        year: find(YEAR_ALIASES),
        from_field: find(FROM_ALIASES),
    })
}

fn entry_from_record(record: &StringRecord, columns: &Columns) -> Result<DisclosureEntry, String> {
    let person_id =
        field(record, Some(columns.person_id)).ok_or_else(|| "Empty person_id".to_string())?;

    Ok(DisclosureEntry {
        person_id,
        full_name: field(record, columns.full_name),
        job_title: field(record, Some(columns.job_title)).unwrap_or_default(),
        institution: field(record, Some(columns.institution)).unwrap_or_default(),
        document_id: field(record, columns.document_id)
            .unwrap_or_else(|| crate::group::NO_DATA_SENTINEL.to_string()),
        year: field(record, columns.year).unwrap_or_default(),
        from_field: field(record, columns.from_field).unwrap_or_default(),
    })
}

fn field(record: &StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("escalafon_test_{name}.csv"));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn ingests_spanish_and_english_headers() {
        let path = write_temp(
            "spanish",
            "cedula,nombre,cargo,institucion,iddoc,year,desde\n\
             0912345678,PEREZ JUAN,JUEZ,CORTE SUPERIOR,d1,2010,2010-01-01\n",
        );
        let out = load_entries(&path).unwrap();
        assert_eq!(out.rows_read, 1);
        assert_eq!(out.rows_used, 1);
        let e = &out.entries[0];
        assert_eq!(e.person_id, "0912345678");
        assert_eq!(e.full_name.as_deref(), Some("PEREZ JUAN"));
        assert_eq!(e.year_value(), Some(2010));
        assert_eq!(e.from_field, "2010-01-01");
    }

    #[test]
    fn missing_required_column_is_an_input_error() {
        let path = write_temp("nocol", "cedula,institucion\n1,X\n");
        let err = load_entries(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn rows_without_person_id_become_row_errors() {
        let path = write_temp(
            "rowerr",
            "person_id,job_title,institution\n\
             ,JUEZ,CORTE\n\
             77,FISCAL,MINISTERIO PUBLICO\n",
        );
        let out = load_entries(&path).unwrap();
        assert_eq!(out.rows_read, 2);
        assert_eq!(out.rows_used, 1);
        assert_eq!(out.row_errors.len(), 1);
        assert_eq!(out.row_errors[0].line, 2);
    }

    #[test]
    fn optional_columns_fall_back_to_sentinels() {
        let path = write_temp("optional", "person_id,job_title,institution\n77,JUEZ,CORTE\n");
        let out = load_entries(&path).unwrap();
        let e = &out.entries[0];
        assert_eq!(e.document_id, crate::group::NO_DATA_SENTINEL);
        assert_eq!(e.year, "");
        assert_eq!(e.from_field, "");
    }

    #[test]
    fn override_table_parses_and_validates() {
        let path = write_temp(
            "overrides",
            "person_id,role,year\n0912345678,judge,2013\n0800404923,fiscal,2015\n",
        );
        let table = load_override_table(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].1, Role::Judge);
        assert_eq!(table[1].1, Role::Prosecutor);

        let bad = write_temp("overrides_bad", "person_id,role,year\n77,other,2013\n");
        assert!(load_override_table(&bad).is_err());
    }
}
