//! Shared domain types.
//!
//! Every value here is built once per run and never mutated after it is handed
//! to the next stage:
//!
//! - raw input (`HeadlineRecord`)
//! - classifier output (`SentimentCategory`, `ClassifiedRecord`)
//! - per-day reductions (`DailyAggregate`, `BaselineStats`, `Spike`)
//! - the run's configuration (`RunConfig`)

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Substituted for a headline whose title is missing or blank.
pub const MISSING_TEXT_PLACEHOLDER: &str = "No title available";

/// Longest accepted `--days` lookback (about ten years).
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

/// Sentiment polarity label. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentCategory {
    Bullish,
    Bearish,
    Neutral,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Bullish,
        SentimentCategory::Bearish,
        SentimentCategory::Neutral,
    ];

    /// Categories evaluated by the spike detector, in report order.
    pub const SPIKE_CANDIDATES: [SentimentCategory; 2] =
        [SentimentCategory::Bullish, SentimentCategory::Bearish];

    /// Lowercase label used in exports.
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentCategory::Bullish => "bullish",
            SentimentCategory::Bearish => "bearish",
            SentimentCategory::Neutral => "neutral",
        }
    }

    /// Capitalized label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            SentimentCategory::Bullish => "Bullish",
            SentimentCategory::Bearish => "Bearish",
            SentimentCategory::Neutral => "Neutral",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bullish" => Some(SentimentCategory::Bullish),
            "bearish" => Some(SentimentCategory::Bearish),
            "neutral" => Some(SentimentCategory::Neutral),
            _ => None,
        }
    }
}

impl std::fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A total mapping from every `SentimentCategory` to a value.
///
/// One field per category means a slot can never be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryMap<T> {
    pub bullish: T,
    pub bearish: T,
    pub neutral: T,
}

impl<T> CategoryMap<T> {
    pub fn from_fn(mut f: impl FnMut(SentimentCategory) -> T) -> Self {
        Self {
            bullish: f(SentimentCategory::Bullish),
            bearish: f(SentimentCategory::Bearish),
            neutral: f(SentimentCategory::Neutral),
        }
    }

    pub fn get(&self, category: SentimentCategory) -> &T {
        match category {
            SentimentCategory::Bullish => &self.bullish,
            SentimentCategory::Bearish => &self.bearish,
            SentimentCategory::Neutral => &self.neutral,
        }
    }

    pub fn get_mut(&mut self, category: SentimentCategory) -> &mut T {
        match category {
            SentimentCategory::Bullish => &mut self.bullish,
            SentimentCategory::Bearish => &mut self.bearish,
            SentimentCategory::Neutral => &mut self.neutral,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (SentimentCategory, &T)> {
        SentimentCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// A headline as delivered by a source.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlineRecord {
    pub timestamp: NaiveDateTime,
    pub text: String,
}

impl HeadlineRecord {
    /// Build a record, substituting the placeholder for an absent or blank title.
    pub fn new(timestamp: NaiveDateTime, text: Option<String>) -> Self {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => MISSING_TEXT_PLACEHOLDER.to_string(),
        };
        Self { timestamp, text }
    }
}

/// A headline with its sentiment label attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecord {
    pub timestamp: NaiveDateTime,
    pub text: String,
    pub category: SentimentCategory,
}

/// Sentiment distribution for a single calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    /// Share of the day's headlines per category, in percent.
    pub percentages: CategoryMap<f64>,
    pub counts: CategoryMap<usize>,
    /// Headlines on this date, all categories combined.
    pub count: usize,
}

/// Cross-day mean and sample standard deviation of one category's percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineStats {
    pub mean: f64,
    pub stddev: f64,
}

impl BaselineStats {
    /// Values strictly above this are spikes.
    pub fn threshold(&self) -> f64 {
        self.mean + self.stddev
    }
}

/// A day whose share of one category strictly exceeded mean + stddev.
#[derive(Debug, Clone, PartialEq)]
pub struct Spike {
    pub date: NaiveDate,
    pub category: SentimentCategory,
    pub percentage: f64,
    pub baseline_mean: f64,
    pub baseline_stddev: f64,
    pub headline_count: usize,
}

/// Where headlines come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// NewsAPI `everything` endpoint over major financial outlets (needs `NEWSAPI_KEY`).
    Newsapi,
    /// CryptoCompare public news endpoint (no key).
    Cryptocompare,
    /// A previously exported CSV file (`--input`).
    Csv,
}

impl SourceKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SourceKind::Newsapi => "NewsAPI",
            SourceKind::Cryptocompare => "CryptoCompare",
            SourceKind::Csv => "CSV",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub symbol: String,
    pub source: SourceKind,
    /// CSV file to read when `source = csv`.
    pub input: Option<PathBuf>,
    pub lookback_days: i64,
    /// Where to write classified records; `None` disables the export.
    pub export: Option<PathBuf>,
    pub lexicon_path: PathBuf,
    pub lexicon_url: String,
}

impl RunConfig {
    /// The span the printed report describes.
    ///
    /// Remote sources fetch the lookback window; a CSV input is analysed in
    /// full, whatever dates it covers.
    pub fn report_period(&self) -> ReportPeriod {
        match self.source {
            SourceKind::Csv => ReportPeriod::WholeInput,
            SourceKind::Newsapi | SourceKind::Cryptocompare => {
                ReportPeriod::Lookback(self.lookback_days)
            }
        }
    }
}

/// Time span covered by a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPeriod {
    /// The last N days ending at run time.
    Lookback(i64),
    /// Every record of an input file.
    WholeInput,
}
