//! Shared analysis pipeline used by the `analyze` and `spikes` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> classify -> aggregate by day -> baselines -> spikes -> summary
//!
//! Front-ends only decide what to print and whether to export.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::info;

use crate::analysis::{aggregate, baselines, detect_spikes_with};
use crate::data::{HeadlineSource, LookbackWindow, source_from_config};
use crate::domain::{
    BaselineStats, CategoryMap, ClassifiedRecord, DailyAggregate, HeadlineRecord, RunConfig,
};
use crate::error::AppError;
use crate::report::{ReportSummary, summarize};
use crate::sentiment::{Classifier, PolarityScorer, init_lexicon_scorer};

/// All computed outputs of a completed run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub classified: Vec<ClassifiedRecord>,
    pub aggregates: BTreeMap<NaiveDate, DailyAggregate>,
    pub baselines: CategoryMap<BaselineStats>,
    pub summary: ReportSummary,
}

/// How a run ended. An empty source is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    NoData,
    Completed(RunOutput),
}

/// Execute the full pipeline for a configuration.
///
/// The scorer is initialized before anything is fetched so a missing lexicon
/// fails the run early.
pub fn run_analysis(config: &RunConfig) -> Result<RunOutcome, AppError> {
    let scorer = init_lexicon_scorer(&config.lexicon_path, &config.lexicon_url)?;
    let classifier = Classifier::new(scorer);
    let source = source_from_config(config)?;
    let window = LookbackWindow::ending_now(config.lookback_days);

    run_with_source(source.as_ref(), &classifier, &config.symbol, &window)
}

/// Execute the pipeline against an explicit source and classifier.
pub fn run_with_source<S: PolarityScorer>(
    source: &dyn HeadlineSource,
    classifier: &Classifier<S>,
    symbol: &str,
    window: &LookbackWindow,
) -> Result<RunOutcome, AppError> {
    // 1) Fetch.
    let headlines = source.fetch(symbol, window)?;
    info!(
        source = source.name(),
        %symbol,
        headlines = headlines.len(),
        days = window.days(),
        "fetched headlines"
    );

    if headlines.is_empty() {
        return Ok(RunOutcome::NoData);
    }

    Ok(RunOutcome::Completed(analyze(classifier, &headlines)))
}

/// Classify, aggregate and detect spikes over an in-memory batch.
pub fn analyze<S: PolarityScorer>(
    classifier: &Classifier<S>,
    headlines: &[HeadlineRecord],
) -> RunOutput {
    // 2) Classify (parallel); everything below waits for the full batch.
    let classified = classifier.classify_all(headlines);

    // 3) Daily distributions.
    let aggregates = aggregate(&classified);

    // 4) Baselines and spikes.
    let stats = baselines(&aggregates);
    let spikes = detect_spikes_with(&aggregates, &stats);
    info!(days = aggregates.len(), spikes = spikes.len(), "analysis complete");

    // 5) Summary.
    let summary = summarize(&aggregates, &spikes);

    RunOutput {
        classified,
        aggregates,
        baselines: stats,
        summary,
    }
}
