//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and installs logging
//! - resolves the symbol (flag or prompt)
//! - runs the analysis pipeline
//! - prints the report
//! - writes the optional CSV export

use clap::Parser;
use tracing::info;

use crate::cli::{AnalyzeArgs, Command, LexiconArgs, ScoreArgs};
use crate::domain::{MAX_LOOKBACK_DAYS, RunConfig, SourceKind};
use crate::error::AppError;
use crate::sentiment::{Classifier, category_for_score, init_lexicon_scorer};

pub mod pipeline;

use pipeline::RunOutcome;

/// Entry point for the `sentiment` binary.
pub fn run() -> Result<(), AppError> {
    // `sentiment` and `sentiment -s BTC` behave like `sentiment analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init(&cli.log_level);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Spikes(args) => handle_analyze(args, OutputMode::SpikesOnly),
        Command::Score(args) => handle_score(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SpikesOnly,
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    info!(symbol = %config.symbol, source = config.source.display_name(), "starting run");

    let output = match pipeline::run_analysis(&config)? {
        RunOutcome::NoData => {
            println!(
                "{}",
                crate::report::format_no_data(&config.symbol, config.report_period())
            );
            return Ok(());
        }
        RunOutcome::Completed(output) => output,
    };

    if let Some(path) = &config.export {
        crate::io::write_classified_csv(path, &output.classified)?;
        if mode == OutputMode::Full {
            println!("Sentiment data saved to {}", path.display());
        }
    }

    match mode {
        OutputMode::Full => {
            println!();
            print!(
                "{}",
                crate::report::format_summary(
                    &config.symbol,
                    config.report_period(),
                    &output.summary,
                )
            );
        }
        OutputMode::SpikesOnly => {
            print!("{}", crate::report::format_spikes(&output.summary.spikes));
        }
    }

    Ok(())
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let scorer = init_lexicon_scorer(&args.lexicon.path, &args.lexicon.url)?;
    let classifier = Classifier::new(scorer);

    let rows: Vec<_> = args
        .texts
        .iter()
        .map(|text| {
            let score = classifier.score(text);
            (text.clone(), score, category_for_score(score))
        })
        .collect();

    print!("{}", crate::report::format_scores(&rows));
    Ok(())
}

/// Build a `RunConfig`, prompting for the symbol when it was not given.
pub fn run_config_from_args(args: &AnalyzeArgs) -> Result<RunConfig, AppError> {
    let symbol = match args.symbol.as_deref().and_then(crate::cli::prompt::normalize_symbol) {
        Some(symbol) => symbol,
        None => match (args.source, &args.input) {
            (SourceKind::Csv, Some(input)) => symbol_from_path(input),
            _ => crate::cli::prompt::prompt_for_symbol()?,
        },
    };
    build_run_config(args, symbol)
}

/// Assemble a `RunConfig` for an already-resolved symbol.
pub fn build_run_config(args: &AnalyzeArgs, symbol: String) -> Result<RunConfig, AppError> {
    if !(1..=MAX_LOOKBACK_DAYS).contains(&args.days) {
        return Err(AppError::config(format!(
            "`--days` must be between 1 and {MAX_LOOKBACK_DAYS} (got {}).",
            args.days
        )));
    }
    if args.source == SourceKind::Csv && args.input.is_none() {
        return Err(AppError::config("`--source csv` requires `--input <file.csv>`."));
    }

    // Re-analysing a CSV never overwrites files unless asked to.
    let export = if args.no_export {
        None
    } else {
        match (&args.export, args.source) {
            (Some(path), _) => Some(path.clone()),
            (None, SourceKind::Csv) => None,
            (None, _) => Some(crate::io::default_export_path(&symbol)),
        }
    };

    let LexiconArgs { path, url } = args.lexicon.clone();

    Ok(RunConfig {
        symbol,
        source: args.source,
        input: args.input.clone(),
        lookback_days: args.days,
        export,
        lexicon_path: path,
        lexicon_url: url,
    })
}

fn symbol_from_path(path: &std::path::Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.trim_end_matches("_sentiment"))
        .and_then(crate::cli::prompt::normalize_symbol)
        .unwrap_or_else(|| "CSV".to_string())
}

/// Rewrite argv so `sentiment` defaults to `sentiment analyze`.
///
/// Rules:
/// - `sentiment`                     -> `sentiment analyze`
/// - `sentiment -s BTC ...`          -> `sentiment analyze -s BTC ...`
/// - `sentiment --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "spikes" | "score");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "analyze".to_string());
        return argv;
    }

    argv
}
