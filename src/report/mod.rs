//! Reporting: the run summary and its terminal rendering.
//!
//! `summarize` builds a plain data structure; everything that produces text
//! lives in `format`, so presentation changes never touch the analysis code.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::analysis::{baseline, headline_counts};
use crate::domain::{CategoryMap, DailyAggregate, Spike};

pub mod format;

pub use format::*;

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    /// Mean daily percentage per category across all observed dates.
    pub overall_mean_per_category: CategoryMap<f64>,
    pub spikes: Vec<Spike>,
    pub headline_counts_per_date: BTreeMap<NaiveDate, usize>,
}

impl ReportSummary {
    pub fn total_headlines(&self) -> usize {
        self.headline_counts_per_date.values().sum()
    }

    pub fn day_count(&self) -> usize {
        self.headline_counts_per_date.len()
    }
}

/// Assemble the summary from daily aggregates and the detected spikes.
pub fn summarize(
    aggregates: &BTreeMap<NaiveDate, DailyAggregate>,
    spikes: &[Spike],
) -> ReportSummary {
    ReportSummary {
        overall_mean_per_category: CategoryMap::from_fn(|c| baseline(aggregates, c).mean),
        spikes: spikes.to_vec(),
        headline_counts_per_date: headline_counts(aggregates),
    }
}
