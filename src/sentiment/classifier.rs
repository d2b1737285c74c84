//! Score → category decision rule.

use rayon::prelude::*;

use crate::domain::{ClassifiedRecord, HeadlineRecord, MISSING_TEXT_PLACEHOLDER, SentimentCategory};
use crate::sentiment::PolarityScorer;

/// Compound scores strictly above this are bullish.
///
/// Together with `BEARISH_THRESHOLD` this is the VADER neutral band. Every
/// daily percentage depends on both values; they are not configurable.
pub const BULLISH_THRESHOLD: f64 = 0.05;
/// Compound scores strictly below this are bearish.
pub const BEARISH_THRESHOLD: f64 = -0.05;

/// Map a compound score to a category. Non-finite scores are neutral.
pub fn category_for_score(score: f64) -> SentimentCategory {
    if score > BULLISH_THRESHOLD {
        SentimentCategory::Bullish
    } else if score < BEARISH_THRESHOLD {
        SentimentCategory::Bearish
    } else {
        SentimentCategory::Neutral
    }
}

/// Owns a scorer and labels headlines with it.
#[derive(Debug, Clone)]
pub struct Classifier<S> {
    scorer: S,
}

impl<S: PolarityScorer> Classifier<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Compound score for `text`; blank text is scored as the placeholder.
    pub fn score(&self, text: &str) -> f64 {
        let text = if text.trim().is_empty() {
            MISSING_TEXT_PLACEHOLDER
        } else {
            text
        };
        self.scorer.compound(text)
    }

    pub fn classify(&self, text: &str) -> SentimentCategory {
        category_for_score(self.score(text))
    }

    pub fn classify_record(&self, record: &HeadlineRecord) -> ClassifiedRecord {
        ClassifiedRecord {
            timestamp: record.timestamp,
            text: record.text.clone(),
            category: self.classify(&record.text),
        }
    }

    /// Classify a batch across the rayon pool; output order matches input order.
    pub fn classify_all(&self, records: &[HeadlineRecord]) -> Vec<ClassifiedRecord> {
        records
            .par_iter()
            .map(|record| self.classify_record(record))
            .collect()
    }
}
