//! NewsAPI `everything` integration.

use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::data::{HeadlineSource, LookbackWindow, http_client};
use crate::domain::HeadlineRecord;
use crate::error::AppError;

const BASE_URL: &str = "https://newsapi.org/v2/everything";
const API_KEY_VAR: &str = "NEWSAPI_KEY";
/// Outlets searched for headlines.
const DOMAINS: &str = "bloomberg.com,reuters.com,cnbc.com,wsj.com,marketwatch.com";
const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub struct NewsApiClient {
    client: Client,
    api_key: String,
}

impl NewsApiClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            AppError::config(format!("Missing {API_KEY_VAR} in environment (.env)."))
        })?;
        Ok(Self {
            client: http_client()?,
            api_key,
        })
    }
}

impl HeadlineSource for NewsApiClient {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    fn fetch(
        &self,
        symbol: &str,
        window: &LookbackWindow,
    ) -> Result<Vec<HeadlineRecord>, AppError> {
        let from = window.from().format("%Y-%m-%d").to_string();
        let to = window.now().format("%Y-%m-%d").to_string();
        debug!(%symbol, %from, %to, "requesting NewsAPI headlines");

        let resp = self
            .client
            .get(BASE_URL)
            .query(&[
                ("q", symbol),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("domains", DOMAINS),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .map_err(|e| AppError::fetch(format!("NewsAPI request failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| AppError::fetch(format!("Failed to read NewsAPI response: {e}")))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<EverythingResponse>(&body)
                .ok()
                .and_then(|r| r.message)
                .unwrap_or_default();
            return Err(AppError::fetch(format!(
                "NewsAPI request failed with status {status}. {detail}"
            )));
        }

        parse_everything(&body, window.now())
    }
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    #[serde(default)]
    articles: Option<Vec<Article>>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Article {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

/// Parse an `everything` response body.
///
/// A missing or null `articles` field is an empty result. Unparseable
/// `publishedAt` values fall back to `now`.
pub fn parse_everything(body: &str, now: NaiveDateTime) -> Result<Vec<HeadlineRecord>, AppError> {
    let parsed: EverythingResponse = serde_json::from_str(body)
        .map_err(|e| AppError::fetch(format!("Failed to parse NewsAPI response: {e}")))?;

    let records = parsed
        .articles
        .unwrap_or_default()
        .into_iter()
        .map(|article| {
            let timestamp = parse_published_at(article.published_at.as_deref()).unwrap_or_else(|| {
                warn!(
                    raw = article.published_at.as_deref().unwrap_or(""),
                    "unparseable publishedAt, using current time"
                );
                now
            });
            HeadlineRecord::new(timestamp, article.title)
        })
        .collect();

    Ok(records)
}

fn parse_published_at(raw: Option<&str>) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw?.trim(), PUBLISHED_AT_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::MISSING_TEXT_PLACEHOLDER;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 2, 21)
            .unwrap()
            .and_hms_opt(17, 45, 0)
            .unwrap()
    }

    #[test]
    fn parses_articles() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "Nvidia surges on strong earnings",
                 "publishedAt": "2025-02-18T14:03:11Z"},
                {"title": "Apple Vision Pro app shortage", "publishedAt": "2025-02-21T08:00:00Z"}
            ]
        }"#;
        let records = parse_everything(body, now()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text, "Nvidia surges on strong earnings");
        assert_eq!(records[0].timestamp.to_string(), "2025-02-18 14:03:11");
    }

    #[test]
    fn null_title_gets_placeholder() {
        let body = r#"{"articles": [{"title": null, "publishedAt": "2025-02-18T14:03:11Z"}]}"#;
        let records = parse_everything(body, now()).unwrap();
        assert_eq!(records[0].text, MISSING_TEXT_PLACEHOLDER);
    }

    #[test]
    fn malformed_timestamp_falls_back_to_now() {
        let body = r#"{"articles": [
            {"title": "a", "publishedAt": "18/02/2025"},
            {"title": "b"},
            {"title": "c", "publishedAt": "2025-02-18T14:03:11Z"}
        ]}"#;
        let records = parse_everything(body, now()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].timestamp, now());
        assert_eq!(records[1].timestamp, now());
        assert_ne!(records[2].timestamp, now());
    }

    #[test]
    fn missing_or_empty_articles_is_no_data() {
        assert!(parse_everything(r#"{"status": "ok", "articles": []}"#, now()).unwrap().is_empty());
        assert!(parse_everything(r#"{"status": "ok"}"#, now()).unwrap().is_empty());
        assert!(parse_everything(r#"{"articles": null}"#, now()).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_a_fetch_failure() {
        let err = parse_everything("<html>", now()).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
