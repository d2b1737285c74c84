//! Headline sources.
//!
//! - `newsapi`: equities/general news from major financial outlets
//! - `cryptocompare`: crypto news by category
//! - `csv_file`: re-analysis of a previously exported CSV
//!
//! Every source yields the same `HeadlineRecord` contract, so the analysis
//! pipeline never knows which one it is talking to. An empty result is a valid
//! answer, not an error.

use chrono::{DateTime, Local, NaiveDateTime, TimeDelta};
use reqwest::blocking::Client;

use crate::domain::{HeadlineRecord, MAX_LOOKBACK_DAYS, RunConfig, SourceKind};
use crate::error::AppError;

pub mod cryptocompare;
pub mod csv_file;
pub mod newsapi;

pub use cryptocompare::CryptoCompareClient;
pub use csv_file::CsvHeadlineSource;
pub use newsapi::NewsApiClient;

/// Supplies headlines for a symbol over a bounded lookback window.
pub trait HeadlineSource {
    /// Human-readable source name for logs.
    fn name(&self) -> &str;

    fn fetch(&self, symbol: &str, window: &LookbackWindow) -> Result<Vec<HeadlineRecord>, AppError>;
}

/// The `[now - days, now]` window a run covers.
///
/// `days` is clamped to `1..=MAX_LOOKBACK_DAYS`. `now` doubles as the
/// substitute timestamp for records whose own timestamp cannot be parsed.
#[derive(Debug, Clone, Copy)]
pub struct LookbackWindow {
    now: DateTime<Local>,
    days: i64,
}

impl LookbackWindow {
    pub fn new(now: DateTime<Local>, days: i64) -> Self {
        Self {
            now,
            days: days.clamp(1, MAX_LOOKBACK_DAYS),
        }
    }

    pub fn ending_now(days: i64) -> Self {
        Self::new(Local::now(), days)
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now.naive_local()
    }

    pub fn from(&self) -> NaiveDateTime {
        self.from_local().naive_local()
    }

    /// Window start as Unix seconds.
    pub fn from_timestamp(&self) -> i64 {
        self.from_local().timestamp()
    }

    /// Falls back to `now` if the subtraction leaves chrono's range.
    fn from_local(&self) -> DateTime<Local> {
        TimeDelta::try_days(self.days)
            .and_then(|span| self.now.checked_sub_signed(span))
            .unwrap_or(self.now)
    }
}

/// Build the source selected by `config.source`.
pub fn source_from_config(config: &RunConfig) -> Result<Box<dyn HeadlineSource>, AppError> {
    match config.source {
        SourceKind::Newsapi => Ok(Box::new(NewsApiClient::from_env()?)),
        SourceKind::Cryptocompare => Ok(Box::new(CryptoCompareClient::new()?)),
        SourceKind::Csv => {
            let path = config
                .input
                .clone()
                .ok_or_else(|| AppError::config("`--source csv` requires `--input <file.csv>`."))?;
            Ok(Box::new(CsvHeadlineSource::new(path)))
        }
    }
}

/// Shared HTTP client for the remote sources.
fn http_client() -> Result<Client, AppError> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))
}
