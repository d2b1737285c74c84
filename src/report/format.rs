//! Terminal rendering of run results.
//!
//! We keep formatting code in one place so the analysis stays free of strings
//! and output changes are localized.

use crate::domain::{ReportPeriod, SentimentCategory, Spike};
use crate::report::ReportSummary;

/// Format the full run summary: averages followed by the spike list.
pub fn format_summary(symbol: &str, period: ReportPeriod, summary: &ReportSummary) -> String {
    let mut out = String::new();

    let span = match period {
        ReportPeriod::Lookback(days) => format!("Past {days} Days"),
        ReportPeriod::WholeInput => match (
            summary.headline_counts_per_date.keys().next(),
            summary.headline_counts_per_date.keys().next_back(),
        ) {
            (Some(first), Some(last)) if first != last => format!("{first} to {last}"),
            (Some(first), _) => first.to_string(),
            _ => "Input File".to_string(),
        },
    };
    out.push_str(&format!("Sentiment Analysis Summary for {symbol} ({span}):\n"));
    out.push_str(&format!(
        "Headlines: {} across {} day(s)\n",
        summary.total_headlines(),
        summary.day_count()
    ));

    let means = &summary.overall_mean_per_category;
    out.push_str(&format!(
        "Average sentiment: {:.2}% bullish, {:.2}% bearish, {:.2}% neutral\n",
        means.bullish, means.bearish, means.neutral
    ));

    out.push('\n');
    out.push_str(&format_spikes(&summary.spikes));

    out
}

/// Format only the spike list (or the "none" line).
pub fn format_spikes(spikes: &[Spike]) -> String {
    if spikes.is_empty() {
        return "No significant sentiment spikes detected.\n".to_string();
    }

    let mut out = String::from("Notable Sentiment Spikes:\n");
    for spike in spikes {
        out.push_str(&format!(
            "- {}: {} sentiment spiked to {:.2}% ({} headline{}) [baseline {:.2}% ± {:.2}]\n",
            spike.date,
            spike.category.display_name(),
            spike.percentage,
            spike.headline_count,
            if spike.headline_count == 1 { "" } else { "s" },
            spike.baseline_mean,
            spike.baseline_stddev,
        ));
    }
    out
}

/// Message for a run whose source returned nothing.
pub fn format_no_data(symbol: &str, period: ReportPeriod) -> String {
    match period {
        ReportPeriod::Lookback(days) => {
            format!("No articles found for {symbol} in the past {days} days.")
        }
        ReportPeriod::WholeInput => format!("No articles found for {symbol} in the input file."),
    }
}

/// One line per ad-hoc scored text: `compound  category  text`.
pub fn format_scores(rows: &[(String, f64, SentimentCategory)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>8} {:<8} {}\n", "compound", "label", "text"));
    for (text, score, category) in rows {
        out.push_str(&format!("{score:>8.4} {:<8} {}\n", category.as_str(), truncate(text, 80)));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::domain::CategoryMap;

    fn spike(d: u32, category: SentimentCategory, percentage: f64, count: usize) -> Spike {
        Spike {
            date: NaiveDate::from_ymd_opt(2025, 2, d).unwrap(),
            category,
            percentage,
            baseline_mean: 26.11,
            baseline_stddev: 20.0,
            headline_count: count,
        }
    }

    #[test]
    fn summary_lists_averages_and_spikes() {
        let summary = ReportSummary {
            overall_mean_per_category: CategoryMap {
                bullish: 26.111,
                bearish: 24.1666,
                neutral: 49.7222,
            },
            spikes: vec![
                spike(18, SentimentCategory::Bullish, 66.666_666, 3),
                spike(21, SentimentCategory::Bearish, 100.0, 1),
            ],
            headline_counts_per_date: BTreeMap::from([
                (NaiveDate::from_ymd_opt(2025, 2, 18).unwrap(), 3),
                (NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(), 1),
            ]),
        };

        let text = format_summary("NVDA", ReportPeriod::Lookback(7), &summary);
        assert!(text.starts_with("Sentiment Analysis Summary for NVDA (Past 7 Days):"));
        assert!(text.contains("Headlines: 4 across 2 day(s)"));
        assert!(text.contains("Average sentiment: 26.11% bullish, 24.17% bearish, 49.72% neutral"));
        assert!(text.contains("- 2025-02-18: Bullish sentiment spiked to 66.67% (3 headlines)"));
        assert!(text.contains("- 2025-02-21: Bearish sentiment spiked to 100.00% (1 headline)"));
    }

    #[test]
    fn whole_input_summary_names_its_date_span() {
        let mut summary = ReportSummary {
            overall_mean_per_category: CategoryMap::default(),
            spikes: Vec::new(),
            headline_counts_per_date: BTreeMap::from([
                (NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(), 4),
                (NaiveDate::from_ymd_opt(2025, 2, 21).unwrap(), 1),
            ]),
        };

        let text = format_summary("NVDA", ReportPeriod::WholeInput, &summary);
        assert!(
            text.starts_with("Sentiment Analysis Summary for NVDA (2024-11-02 to 2025-02-21):")
        );
        assert!(!text.contains("Past"));

        summary.headline_counts_per_date.remove(&NaiveDate::from_ymd_opt(2024, 11, 2).unwrap());
        let text = format_summary("NVDA", ReportPeriod::WholeInput, &summary);
        assert!(text.starts_with("Sentiment Analysis Summary for NVDA (2025-02-21):"));
    }

    #[test]
    fn no_spikes_message() {
        assert_eq!(format_spikes(&[]), "No significant sentiment spikes detected.\n");
    }

    #[test]
    fn no_data_message() {
        assert_eq!(
            format_no_data("BTC", ReportPeriod::Lookback(7)),
            "No articles found for BTC in the past 7 days."
        );
        assert_eq!(
            format_no_data("NVDA", ReportPeriod::WholeInput),
            "No articles found for NVDA in the input file."
        );
    }

    #[test]
    fn score_rows_are_aligned() {
        let rows = [("Stocks rally".to_string(), 0.4404, SentimentCategory::Bullish)];
        let text = format_scores(&rows);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "  0.4404 bullish  Stocks rally");
    }
}
