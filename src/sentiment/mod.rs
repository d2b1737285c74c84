//! Headline polarity scoring and classification.
//!
//! - `PolarityScorer` is the seam: anything that maps text to a compound score
//!   in `[-1, 1]`
//! - `lexicon` provides the VADER-style scorer used by the binary
//! - `classifier` turns scores into `SentimentCategory` labels
//!
//! Scorer construction is the only fallible step. `init_scorer` gives it one
//! remediation attempt (fetching the lexicon) before giving up.

use std::path::Path;

use tracing::{info, warn};

use crate::error::AppError;

pub mod classifier;
pub mod lexicon;

pub use classifier::*;
pub use lexicon::*;

/// Maps text to a compound polarity score in `[-1, 1]`.
///
/// Implementations are shared read-only across classification threads.
pub trait PolarityScorer: Send + Sync {
    fn compound(&self, text: &str) -> f64;
}

impl<S: PolarityScorer + ?Sized> PolarityScorer for Box<S> {
    fn compound(&self, text: &str) -> f64 {
        (**self).compound(text)
    }
}

/// Why a scorer could not be constructed.
#[derive(Debug, Clone, PartialEq)]
pub enum ScorerError {
    /// A required resource (e.g. the lexicon file) does not exist yet.
    MissingResource(String),
    /// The resource exists but is unusable.
    Invalid(String),
}

impl std::fmt::Display for ScorerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScorerError::MissingResource(what) => write!(f, "missing resource: {what}"),
            ScorerError::Invalid(why) => write!(f, "invalid resource: {why}"),
        }
    }
}

impl std::error::Error for ScorerError {}

/// Construct a scorer, remediating a missing resource at most once.
///
/// - `load` is attempted; success returns immediately
/// - `MissingResource` runs `remediate` and retries `load` exactly once
/// - any other failure, a failed remediation, or a second failure is fatal
pub fn init_scorer<S, L, R>(mut load: L, remediate: R) -> Result<S, AppError>
where
    L: FnMut() -> Result<S, ScorerError>,
    R: FnOnce() -> Result<(), AppError>,
{
    match load() {
        Ok(scorer) => Ok(scorer),
        Err(ScorerError::MissingResource(what)) => {
            warn!(%what, "polarity scorer resource not found, attempting remediation");
            remediate()?;
            load().map_err(|e| {
                AppError::scorer_init(format!("Polarity scorer unavailable after remediation: {e}"))
            })
        }
        Err(e) => Err(AppError::scorer_init(format!(
            "Polarity scorer could not be initialized: {e}"
        ))),
    }
}

/// Load the lexicon scorer from `path`, downloading it from `url` once if the
/// file is missing.
pub fn init_lexicon_scorer(path: &Path, url: &str) -> Result<LexiconScorer, AppError> {
    let scorer = init_scorer(|| LexiconScorer::from_path(path), || download_lexicon(url, path))?;
    info!(path = %path.display(), entries = scorer.len(), "polarity lexicon loaded");
    Ok(scorer)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn first_success_skips_remediation() {
        let remediated = Cell::new(false);
        let out = init_scorer(
            || Ok::<_, ScorerError>(7),
            || {
                remediated.set(true);
                Ok(())
            },
        );
        assert_eq!(out.unwrap(), 7);
        assert!(!remediated.get());
    }

    #[test]
    fn missing_resource_is_remediated_and_retried_once() {
        let attempts = Cell::new(0);
        let out = init_scorer(
            || {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Err(ScorerError::MissingResource("lexicon".to_string()))
                } else {
                    Ok(42)
                }
            },
            || Ok(()),
        );
        assert_eq!(out.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn second_failure_is_fatal() {
        let attempts = Cell::new(0);
        let out: Result<u8, AppError> = init_scorer(
            || {
                attempts.set(attempts.get() + 1);
                Err(ScorerError::MissingResource("lexicon".to_string()))
            },
            || Ok(()),
        );
        let err = out.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScorerInit);
        assert_eq!(attempts.get(), 2);
    }

    #[test]
    fn invalid_resource_is_not_remediated() {
        let remediated = Cell::new(false);
        let out: Result<u8, AppError> = init_scorer(
            || Err(ScorerError::Invalid("empty lexicon".to_string())),
            || {
                remediated.set(true);
                Ok(())
            },
        );
        assert_eq!(out.unwrap_err().kind(), ErrorKind::ScorerInit);
        assert!(!remediated.get());
    }

    #[test]
    fn lexicon_scorer_loads_existing_file_without_downloading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vader_lexicon.txt");
        std::fs::write(&path, "rally\t2.0\t0.5\t[2, 2]\n").unwrap();

        // The URL is never contacted when the file is present.
        let scorer = init_lexicon_scorer(&path, "http://127.0.0.1:9/unreachable").unwrap();
        assert_eq!(scorer.len(), 1);
    }

    #[test]
    fn lexicon_scorer_fails_when_download_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vader_lexicon.txt");
        let err = init_lexicon_scorer(&path, "http://127.0.0.1:9/unreachable").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScorerInit);
        assert!(!path.exists());
    }

    #[test]
    fn failed_remediation_aborts_without_retry() {
        let attempts = Cell::new(0);
        let out: Result<u8, AppError> = init_scorer(
            || {
                attempts.set(attempts.get() + 1);
                Err(ScorerError::MissingResource("lexicon".to_string()))
            },
            || Err(AppError::scorer_init("download failed")),
        );
        assert_eq!(out.unwrap_err().to_string(), "download failed");
        assert_eq!(attempts.get(), 1);
    }
}
