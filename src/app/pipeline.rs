//! Shared pipeline logic used by the `run` and `classify` subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> classify -> filter/group -> reconcile
//!
//! The subcommands can then focus on presentation and exports.
//!
//! Classification is per-record and reconciliation is per-group with no
//! shared mutable state, so both stages run data-parallel under rayon. Record
//! and group outputs are sorted afterwards so runs are byte-for-byte
//! reproducible regardless of scheduling.

use rayon::prelude::*;

use crate::classify::Classifier;
use crate::domain::{ClassifiedEntry, RoleGroup, RunConfig, StartDateRecord};
use crate::error::AppError;
use crate::group;
use crate::io::ingest::{self, IngestedRecords};
use crate::reconcile::{self, RepairTable};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedRecords,
    pub classified: Vec<ClassifiedEntry>,
    pub groups: Vec<RoleGroup>,
    pub records: Vec<StartDateRecord>,
}

/// Execute the classification half only (used by `escalafon classify`).
pub fn run_classification(config: &RunConfig) -> Result<(IngestedRecords, Vec<ClassifiedEntry>), AppError> {
    let mut ingested = ingest::load_entries(&config.input_path)?;
    if ingested.entries.is_empty() {
        return Err(AppError::data("No usable rows in input."));
    }

    // The raw entries move into the classifier output; `ingested` keeps the
    // row accounting for the summary.
    let entries = group::drop_undocumented_duplicates(std::mem::take(&mut ingested.entries));

    let classifier = Classifier::builtin();
    let classified: Vec<ClassifiedEntry> = entries
        .par_iter()
        .map(|e| classifier.classify_entry(e))
        .collect();

    Ok((ingested, classified))
}

/// Execute the full pipeline and return the computed outputs.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    let (ingest, classified) = run_classification(config)?;

    let groups = group::build_groups(&classified);

    let table = match &config.overrides_path {
        Some(path) => RepairTable::with_person_overrides(ingest::load_override_table(path)?),
        None => RepairTable::default(),
    };

    let mut records: Vec<StartDateRecord> = groups
        .par_iter()
        .map(|g| {
            let r = reconcile::reconcile(g, &table);
            StartDateRecord {
                person_id: g.person_id.clone(),
                role: g.role,
                start_date: r.start_date,
                resolution: r.resolution,
            }
        })
        .collect();

    records.sort_by(|a, b| {
        (a.person_id.as_str(), a.role.display_name())
            .cmp(&(b.person_id.as_str(), b.role.display_name()))
    });

    Ok(RunOutput {
        ingest,
        classified,
        groups,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Resolution, Role};
    use std::io::Write;

    fn write_input(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("escalafon_pipeline_{name}.csv"));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn config(input: std::path::PathBuf) -> RunConfig {
        RunConfig {
            input_path: input,
            overrides_path: None,
            export_dates: None,
            export_classified: None,
            export_json: None,
        }
    }

    #[test]
    fn end_to_end_small_batch() {
        let path = write_input(
            "e2e",
            "cedula,cargo,institucion,iddoc,year,desde\n\
             11,JUEZ DE LO CIVIL,CORTE SUPERIOR,d1,2013,2013-01-15\n\
             11,JUEZ DE LO CIVIL,CORTE SUPERIOR,d2,2014,2013~01~20\n\
             11,JUEZ DE LO CIVIL,CORTE SUPERIOR,d3,2014,2013-05-02\n\
             22,FISCAL DE LO PENAL,MINISTERIO PUBLICO,d4,2009,2o13-04-15\n\
             33,ASISTENTE ADMINISTRATIVO,CONTRALORIA,d5,2010,2010-01-01\n\
             44,,MINISTERIO PUBLICO,d6,2010,\n",
        );
        let out = run_pipeline(&config(path)).unwrap();

        assert_eq!(out.ingest.rows_read, 6);
        // Only the judge and prosecutor survive grouping.
        assert_eq!(out.groups.len(), 2);
        assert_eq!(out.records.len(), 2);

        let judge = out.records.iter().find(|r| r.role == Role::Judge).unwrap();
        assert_eq!(judge.person_id, "11");
        assert_eq!(judge.start_date.as_deref(), Some("201301"));
        assert_eq!(judge.resolution, Resolution::ExactMode);

        // The prosecutor's only reading is future-dated vs min_year 2009, so
        // the min-year + month-mode fallback applies.
        let prosecutor = out.records.iter().find(|r| r.role == Role::Prosecutor).unwrap();
        assert_eq!(prosecutor.start_date.as_deref(), Some("200904"));
        assert_eq!(prosecutor.resolution, Resolution::MinYearMonth);
    }

    #[test]
    fn empty_input_is_a_data_error() {
        let path = write_input("empty", "cedula,cargo,institucion\n");
        let err = run_pipeline(&config(path)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn records_are_sorted_for_reproducibility() {
        let path = write_input(
            "sorted",
            "cedula,cargo,institucion,iddoc,year,desde\n\
             9,JUEZ,CORTE,d1,2010,2010-01-01\n\
             1,JUEZ,CORTE,d2,2011,2011-02-01\n\
             5,FISCAL,MINISTERIO PUBLICO,d3,2012,2012-03-01\n",
        );
        let out = run_pipeline(&config(path)).unwrap();
        let ids: Vec<&str> = out.records.iter().map(|r| r.person_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "5", "9"]);
    }
}
