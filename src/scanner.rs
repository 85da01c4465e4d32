use std::path::Path;

use chrono::Local;

use crate::adapters;
use crate::config::Config;
use crate::error::AppError;
use crate::last_use::resolve_last_used;
use crate::model::{AppRecord, ScanReport};
use crate::normalize::{dedup_by_name, is_valid, normalize};
use crate::scorer::{Scorer, Weights};
use crate::size::estimate_size;

/// Runs the full discovery pipeline: adapter, normalizer, dedup, validity
/// filter, size estimation, last-use resolution, scoring. Holds no state
/// across scans; every call is a fresh pass over the host.
pub struct Scanner {
    scorer: Scorer,
    exclude: Option<globset::GlobSet>,
}

impl Scanner {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let exclude = config.compile_excludes()?;
        Ok(Self { scorer: Scorer::new(Weights::from(&config)), exclude })
    }

    pub fn scan(&self, verbose: bool) -> Result<ScanReport, AppError> {
        let natives = adapters::enumerate_native(verbose);
        let records = natives.into_iter().map(normalize).collect();
        Ok(self.process(records, verbose))
    }

    /// Everything downstream of the adapter, shared so tests can feed in
    /// synthetic records.
    fn process(&self, records: Vec<AppRecord>, verbose: bool) -> ScanReport {
        let mut records: Vec<AppRecord> = records
            .into_iter()
            .map(|mut record| {
                // The source reported no usable size; fall back to walking
                // the install tree.
                if record.size_bytes == 0 && !record.install_location.is_empty() {
                    record.size_bytes = estimate_size(Path::new(&record.install_location));
                }
                record
            })
            .collect();

        records = dedup_by_name(records);
        records.retain(|record| {
            if !is_valid(record) {
                if verbose {
                    eprintln!("Skipping '{}': not a removable user application", record.name);
                }
                return false;
            }
            if self.is_excluded(&record.name) {
                if verbose {
                    eprintln!("Skipping '{}': excluded by configuration", record.name);
                }
                return false;
            }
            true
        });

        let now = Local::now();
        for record in &mut records {
            let last_used = resolve_last_used(record, now);
            let scored = self.scorer.score(record.size_bytes, last_used, now);
            record.last_used_at = Some(last_used);
            record.days_idle = scored.days_idle;
            record.size_gb = scored.size_gb;
            record.score = scored.score;
            record.verdict = Some(scored.verdict);
        }

        ScanReport::new(records)
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.exclude.as_ref().map(|set| set.is_match(name)).unwrap_or(false)
    }
}
