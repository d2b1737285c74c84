//! Per-date sentiment distributions.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CategoryMap, ClassifiedRecord, DailyAggregate};

/// Bucket records by calendar date and compute each bucket's category shares.
///
/// Only dates present in `records` appear in the output. The result depends
/// solely on the multiset of `(date, category)` pairs, not on input order.
pub fn aggregate(records: &[ClassifiedRecord]) -> BTreeMap<NaiveDate, DailyAggregate> {
    let mut counts: BTreeMap<NaiveDate, CategoryMap<usize>> = BTreeMap::new();
    for record in records {
        let day = counts.entry(record.timestamp.date()).or_default();
        *day.get_mut(record.category) += 1;
    }

    counts
        .into_iter()
        .map(|(date, counts)| (date, daily_aggregate(date, counts)))
        .collect()
}

/// Headline counts per date.
pub fn headline_counts(
    aggregates: &BTreeMap<NaiveDate, DailyAggregate>,
) -> BTreeMap<NaiveDate, usize> {
    aggregates.iter().map(|(date, agg)| (*date, agg.count)).collect()
}

fn daily_aggregate(date: NaiveDate, counts: CategoryMap<usize>) -> DailyAggregate {
    let count: usize = counts.iter().map(|(_, n)| *n).sum();
    let percentages = CategoryMap::from_fn(|c| {
        if count == 0 {
            0.0
        } else {
            100.0 * *counts.get(c) as f64 / count as f64
        }
    });
    DailyAggregate {
        date,
        percentages,
        counts,
        count,
    }
}
