//! Export classified headlines to CSV.
//!
//! One row per headline, columns `date,headline,sentiment`. The file can be
//! fed back in with `--source csv`.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::{ClassifiedRecord, SentimentCategory};
use crate::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    date: String,
    headline: &'a str,
    sentiment: SentimentCategory,
}

/// Default export location for a symbol: `{SYMBOL}_sentiment.csv`.
pub fn default_export_path(symbol: &str) -> PathBuf {
    PathBuf::from(format!("{symbol}_sentiment.csv"))
}

/// Write classified records to a CSV file.
pub fn write_classified_csv(path: &Path, records: &[ClassifiedRecord]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::export(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_classified(file, records)
}

/// Write classified records as CSV to any writer.
pub fn write_classified<W: std::io::Write>(
    out: W,
    records: &[ClassifiedRecord],
) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    for r in records {
        writer
            .serialize(ExportRow {
                date: r.timestamp.format(DATE_FORMAT).to_string(),
                headline: &r.text,
                sentiment: r.category,
            })
            .map_err(|e| AppError::export(format!("Failed to write export CSV row: {e}")))?;
    }

    // With zero rows serde never emits the header; write it explicitly.
    if records.is_empty() {
        writer
            .write_record(["date", "headline", "sentiment"])
            .map_err(|e| AppError::export(format!("Failed to write export CSV header: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::export(format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::data::csv_file::read_headlines;

    fn record(h: u32, text: &str, category: SentimentCategory) -> ClassifiedRecord {
        ClassifiedRecord {
            timestamp: NaiveDate::from_ymd_opt(2025, 2, 18)
                .unwrap()
                .and_hms_opt(h, 5, 0)
                .unwrap(),
            text: text.to_string(),
            category,
        }
    }

    fn render(records: &[ClassifiedRecord]) -> String {
        let mut buf = Vec::new();
        write_classified(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn writes_header_and_rows() {
        let text = render(&[
            record(9, "Stock surges on strong earnings", SentimentCategory::Bullish),
            record(11, "Profit warning, shares slide", SentimentCategory::Bearish),
        ]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "date,headline,sentiment");
        assert_eq!(lines[1], "2025-02-18 09:05:00,Stock surges on strong earnings,bullish");
        assert_eq!(lines[2], "2025-02-18 11:05:00,\"Profit warning, shares slide\",bearish");
    }

    #[test]
    fn empty_export_still_has_header() {
        assert_eq!(render(&[]), "date,headline,sentiment\n");
    }

    #[test]
    fn export_reads_back_as_headlines() {
        let records = vec![record(9, "Markets shrug off mixed data", SentimentCategory::Neutral)];
        let text = render(&records);
        let now = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let back = read_headlines(text.as_bytes(), now).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].timestamp, records[0].timestamp);
        assert_eq!(back[0].text, records[0].text);
    }

    #[test]
    fn writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(default_export_path("AAPL"));
        write_classified_csv(&path, &[record(9, "x", SentimentCategory::Neutral)]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("date,headline,sentiment\n"));
        assert!(path.ends_with("AAPL_sentiment.csv"));
    }
}
