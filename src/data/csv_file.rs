//! Headlines from a previously exported CSV.
//!
//! The file only needs `date` and `headline` columns (any order, any case);
//! the `sentiment` column written by the export is ignored because headlines
//! are always re-classified. Rows are not filtered by the lookback window.

use std::collections::HashMap;
use std::fs::File;
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::warn;

use crate::data::{HeadlineSource, LookbackWindow};
use crate::domain::HeadlineRecord;
use crate::error::AppError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%SZ"];

pub struct CsvHeadlineSource {
    path: PathBuf,
}

impl CsvHeadlineSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HeadlineSource for CsvHeadlineSource {
    fn name(&self) -> &str {
        "CSV"
    }

    fn fetch(
        &self,
        _symbol: &str,
        window: &LookbackWindow,
    ) -> Result<Vec<HeadlineRecord>, AppError> {
        let file = File::open(&self.path).map_err(|e| {
            AppError::fetch(format!("Failed to open input CSV '{}': {e}", self.path.display()))
        })?;
        read_headlines(file, window.now())
    }
}

/// Read headline rows from any CSV reader.
pub fn read_headlines<R: std::io::Read>(
    input: R,
    now: NaiveDateTime,
) -> Result<Vec<HeadlineRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::fetch(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get("date")
        .ok_or_else(|| AppError::config("Input CSV is missing a `date` column."))?;
    let text_idx = *header_map
        .get("headline")
        .ok_or_else(|| AppError::config("Input CSV is missing a `headline` column."))?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // records() starts after the header line; CSV lines are 1-based.
        let line = idx + 2;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable CSV row");
                continue;
            }
        };

        let raw_date = row.get(date_idx).unwrap_or("");
        let timestamp = parse_date(raw_date).unwrap_or_else(|| {
            warn!(line, raw = raw_date, "unparseable date, using current time");
            now
        });
        let text = row.get(text_idx).map(str::to_string);
        records.push(HeadlineRecord::new(timestamp, text));
    }

    Ok(records)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase(), idx))
        .collect()
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
