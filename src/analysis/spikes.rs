//! Baseline statistics and spike detection.
//!
//! For each of bullish and bearish, a day is a spike when its share strictly
//! exceeds the cross-day `mean + stddev` of that share. Neutral is never
//! evaluated.
//!
//! With a single day the sample stddev is 0 and the mean equals that day's
//! share, so one-day batches never produce a spike.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{BaselineStats, CategoryMap, DailyAggregate, SentimentCategory, Spike};
use crate::math::{mean, sample_stddev};

/// Mean and sample stddev of one category's daily percentage.
pub fn baseline(
    aggregates: &BTreeMap<NaiveDate, DailyAggregate>,
    category: SentimentCategory,
) -> BaselineStats {
    let values: Vec<f64> = aggregates
        .values()
        .map(|agg| *agg.percentages.get(category))
        .collect();
    BaselineStats {
        mean: mean(&values),
        stddev: sample_stddev(&values),
    }
}

/// Baselines for every category.
pub fn baselines(aggregates: &BTreeMap<NaiveDate, DailyAggregate>) -> CategoryMap<BaselineStats> {
    CategoryMap::from_fn(|c| baseline(aggregates, c))
}

/// Days whose bullish or bearish share strictly exceeds mean + stddev.
///
/// Ordered by ascending date; bullish before bearish within a date.
pub fn detect_spikes(aggregates: &BTreeMap<NaiveDate, DailyAggregate>) -> Vec<Spike> {
    let stats = baselines(aggregates);
    detect_spikes_with(aggregates, &stats)
}

/// Spike detection against precomputed baselines.
pub fn detect_spikes_with(
    aggregates: &BTreeMap<NaiveDate, DailyAggregate>,
    stats: &CategoryMap<BaselineStats>,
) -> Vec<Spike> {
    let mut spikes = Vec::new();
    for (date, agg) in aggregates {
        for category in SentimentCategory::SPIKE_CANDIDATES {
            let base = stats.get(category);
            let percentage = *agg.percentages.get(category);
            if percentage > base.threshold() {
                spikes.push(Spike {
                    date: *date,
                    category,
                    percentage,
                    baseline_mean: base.mean,
                    baseline_stddev: base.stddev,
                    headline_count: agg.count,
                });
            }
        }
    }
    spikes
}
