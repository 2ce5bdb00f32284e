//! Load an index history from CSV
//!
//! Expects the two-column layout FRED exports (`DATE,GS1` or
//! `observation_date,GS1`): a header row, then one `YYYY-MM-DD,rate` row per
//! observation. Rows whose rate is blank or `.` are missing values and are
//! dropped. Rows may appear in any order.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::ReaderBuilder;

use super::{RateHistory, RateHistorySource, RateObservation};
use crate::error::HistoryError;

/// Load a rate history from a CSV file
pub fn load_history<P: AsRef<Path>>(path: P) -> Result<RateHistory, HistoryError> {
    let file = File::open(path)?;
    load_history_from_reader(file)
}

/// Load a rate history from any reader (e.g., string buffer, network stream)
pub fn load_history_from_reader<R: std::io::Read>(reader: R) -> Result<RateHistory, HistoryError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut observations = Vec::new();

    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        let date_field = record.get(0).unwrap_or("");
        let rate_field = record.get(1).unwrap_or("");

        if rate_field.is_empty() || rate_field == "." {
            continue;
        }

        let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d").map_err(|_| HistoryError::Date {
            row,
            value: date_field.to_string(),
        })?;
        let rate_percent: f64 = rate_field.parse().map_err(|_| HistoryError::Rate {
            row,
            value: rate_field.to_string(),
        })?;

        observations.push(RateObservation::new(date, rate_percent));
    }

    if observations.is_empty() {
        return Err(HistoryError::Empty);
    }

    RateHistory::from_unsorted(observations)
}

/// History source backed by a CSV file on disk
#[derive(Debug, Clone)]
pub struct CsvHistory {
    path: PathBuf,
}

impl CsvHistory {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl RateHistorySource for CsvHistory {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self) -> Result<RateHistory, HistoryError> {
        load_history(&self.path)
    }
}
