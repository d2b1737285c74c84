//! CryptoCompare news integration (public endpoint, no key).

use chrono::{DateTime, Local, NaiveDateTime};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::{HeadlineSource, LookbackWindow, http_client};
use crate::domain::HeadlineRecord;
use crate::error::AppError;

const BASE_URL: &str = "https://min-api.cryptocompare.com/data/v2/news/";

pub struct CryptoCompareClient {
    client: Client,
}

impl CryptoCompareClient {
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            client: http_client()?,
        })
    }
}

impl HeadlineSource for CryptoCompareClient {
    fn name(&self) -> &str {
        "CryptoCompare"
    }

    fn fetch(
        &self,
        symbol: &str,
        window: &LookbackWindow,
    ) -> Result<Vec<HeadlineRecord>, AppError> {
        let from_ts = window.from_timestamp().to_string();
        debug!(%symbol, lts = %from_ts, "requesting CryptoCompare headlines");

        let resp = self
            .client
            .get(BASE_URL)
            .query(&[("lang", "EN"), ("categories", symbol), ("lTs", from_ts.as_str())])
            .send()
            .map_err(|e| AppError::fetch(format!("CryptoCompare request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::fetch(format!(
                "CryptoCompare request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::fetch(format!("Failed to read CryptoCompare response: {e}")))?;

        parse_news(&body, window.now())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct NewsResponse {
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Vec<NewsItem>>,
}

#[derive(Debug, Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    published_on: Option<i64>,
}

/// Parse a news response body.
///
/// `Response: "Error"` is a fetch failure; a missing, null or empty `Data`
/// list is an empty result. `published_on` is Unix seconds, rendered in local
/// time; a missing or out-of-range value falls back to `now`.
pub fn parse_news(body: &str, now: NaiveDateTime) -> Result<Vec<HeadlineRecord>, AppError> {
    let parsed: NewsResponse = serde_json::from_str(body)
        .map_err(|e| AppError::fetch(format!("Failed to parse CryptoCompare response: {e}")))?;

    if parsed.response.as_deref() == Some("Error") {
        return Err(AppError::fetch(format!(
            "CryptoCompare returned an error: {}",
            parsed.message.unwrap_or_default()
        )));
    }

    let records = parsed
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|item| {
            let timestamp = item.published_on.and_then(local_from_epoch).unwrap_or_else(|| {
                warn!(raw = ?item.published_on, "unusable published_on, using current time");
                now
            });
            HeadlineRecord::new(timestamp, item.title)
        })
        .collect();

    Ok(records)
}

fn local_from_epoch(secs: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local).naive_local())
}
