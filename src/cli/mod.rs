//! Command-line parsing for the headline sentiment tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! analysis code; `app` turns these structs into a `RunConfig`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::SourceKind;
use crate::logging::DEFAULT_LEVEL;
use crate::sentiment::DEFAULT_LEXICON_URL;

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sentiment", version, about = "Daily headline sentiment and spike detection")]
pub struct Cli {
    /// Log verbosity (error, warn, info, debug, trace). `RUST_LOG` overrides it.
    #[arg(long, global = true, default_value = DEFAULT_LEVEL)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch headlines, classify them, print the daily summary and export a CSV.
    Analyze(AnalyzeArgs),
    /// Same pipeline as `analyze`, printing only the spike list (useful for scripting).
    Spikes(AnalyzeArgs),
    /// Score ad-hoc texts with the polarity lexicon.
    Score(ScoreArgs),
}

/// Options shared by `analyze` and `spikes`.
#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    /// Ticker or crypto symbol (e.g. AAPL, BTC). Prompted for when omitted.
    #[arg(short = 's', long)]
    pub symbol: Option<String>,

    /// Where headlines come from.
    #[arg(long, value_enum, default_value_t = SourceKind::Newsapi)]
    pub source: SourceKind,

    /// CSV file to read with `--source csv` (columns `date,headline`).
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Lookback window in days.
    #[arg(short = 'd', long, default_value_t = 7)]
    pub days: i64,

    /// Export classified headlines to this CSV (default `{SYMBOL}_sentiment.csv`).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Skip the CSV export.
    #[arg(long, conflicts_with = "export")]
    pub no_export: bool,

    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

/// Options for ad-hoc scoring.
#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Texts to score.
    #[arg(required = true, value_name = "TEXT")]
    pub texts: Vec<String>,

    #[command(flatten)]
    pub lexicon: LexiconArgs,
}

/// Where the polarity lexicon lives and where to fetch it from when missing.
#[derive(Debug, Args, Clone)]
pub struct LexiconArgs {
    /// VADER-format lexicon file.
    #[arg(long = "lexicon", value_name = "PATH", default_value = "data/vader_lexicon.txt")]
    pub path: PathBuf,

    /// Download URL used once if the lexicon file is missing.
    #[arg(long = "lexicon-url", value_name = "URL", default_value = DEFAULT_LEXICON_URL)]
    pub url: String,
}
