//! VADER-style lexicon scorer.
//!
//! The lexicon file uses the VADER layout: one entry per line,
//! `token<TAB>mean_valence<TAB>...`. Only the first two columns are read.
//!
//! Scoring is rule-based and deterministic:
//!
//! ```text
//! valence(token)   lexicon lookup (lowercase)
//!   + booster      "very", "slightly", ... within the three preceding tokens
//!   + emphasis     ALL-CAPS token in otherwise mixed-case text
//!   × negation     "not", "never", "n't", ... within the three preceding tokens
//!   × contrast     0.5 before "but", 1.5 after
//! sum += '!' emphasis (up to four)
//! compound = sum / sqrt(sum² + 15)
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::AppError;
use crate::sentiment::{PolarityScorer, ScorerError};

/// Upstream location of the VADER lexicon.
pub const DEFAULT_LEXICON_URL: &str =
    "https://raw.githubusercontent.com/cjhutto/vaderSentiment/master/vaderSentiment/vader_lexicon.txt";

/// Normalization constant: approximates the max expected raw sum.
const ALPHA: f64 = 15.0;
const BOOSTER_INCR: f64 = 0.293;
const BOOSTER_DECR: f64 = -0.293;
const CAPS_INCR: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const EXCLAMATION_INCR: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Booster damping by distance (1, 2, 3 tokens back).
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

const BOOSTERS_UP: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
    "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
    "greatly", "highly", "hugely", "incredibly", "intensely", "majorly", "more", "most",
    "particularly", "purely", "quite", "really", "remarkably", "so", "substantially",
    "thoroughly", "totally", "tremendously", "uber", "unbelievably", "unusually", "utterly",
    "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost", "barely", "hardly", "less", "little", "marginally", "occasionally", "partly",
    "scarcely", "slightly", "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent",
    "without", "wont", "wouldnt",
];

/// Lexicon-backed polarity scorer.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    valences: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Build from in-memory `(token, valence)` pairs.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, ScorerError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let valences: HashMap<String, f64> = entries
            .into_iter()
            .map(|(k, v)| (k.into().to_lowercase(), v))
            .filter(|(_, v)| v.is_finite())
            .collect();
        if valences.is_empty() {
            return Err(ScorerError::Invalid("lexicon has no entries".to_string()));
        }
        Ok(Self { valences })
    }

    /// Load a VADER-format lexicon file.
    pub fn from_path(path: &Path) -> Result<Self, ScorerError> {
        if !path.exists() {
            return Err(ScorerError::MissingResource(path.display().to_string()));
        }
        let raw = fs::read_to_string(path).map_err(|e| {
            ScorerError::Invalid(format!("failed to read '{}': {e}", path.display()))
        })?;
        Self::parse(&raw)
    }

    /// Parse lexicon text; malformed lines are skipped.
    pub fn parse(raw: &str) -> Result<Self, ScorerError> {
        let mut skipped = 0usize;
        let mut entries = Vec::new();
        for line in raw.lines() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            let token = cols.next().unwrap_or("").trim();
            let value = cols.next().and_then(|v| v.trim().parse::<f64>().ok());
            match value {
                Some(v) if !token.is_empty() => entries.push((token.to_string(), v)),
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "skipped malformed lexicon lines");
        }
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }

    fn valence(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    /// Raw (unnormalized) valence sum for a text.
    fn raw_sum(&self, text: &str) -> f64 {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return 0.0;
        }

        let caps_differential = {
            let caps = tokens.iter().filter(|t| is_all_caps(&t.raw)).count();
            caps > 0 && caps < tokens.len()
        };

        let mut sentiments = vec![0.0; tokens.len()];
        for (i, token) in tokens.iter().enumerate() {
            if booster_kind(&token.lower).is_some() {
                continue;
            }
            let Some(mut v) = self.valence(&token.lower) else {
                continue;
            };

            if caps_differential && is_all_caps(&token.raw) {
                v += CAPS_INCR * v.signum();
            }

            for (dist, damping) in BOOSTER_DAMPING.iter().enumerate() {
                let Some(j) = i.checked_sub(dist + 1) else {
                    break;
                };
                let prev = &tokens[j];
                if self.valence(&prev.lower).is_none() {
                    if let Some(incr) = booster_kind(&prev.lower) {
                        v += incr * v.signum() * damping;
                    }
                }
                if is_negation(&prev.lower) {
                    v *= NEGATION_SCALAR;
                }
            }

            sentiments[i] = v;
        }

        if let Some(but) = tokens.iter().position(|t| t.lower == "but") {
            for (i, s) in sentiments.iter_mut().enumerate() {
                if i < but {
                    *s *= 0.5;
                } else if i > but {
                    *s *= 1.5;
                }
            }
        }

        let mut sum: f64 = sentiments.iter().sum();
        let bangs = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAMATIONS);
        let emphasis = bangs as f64 * EXCLAMATION_INCR;
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        sum
    }
}

impl PolarityScorer for LexiconScorer {
    fn compound(&self, text: &str) -> f64 {
        normalize(self.raw_sum(text))
    }
}

/// Download the lexicon to `path`.
pub fn download_lexicon(url: &str, path: &Path) -> Result<(), AppError> {
    info!(%url, path = %path.display(), "downloading polarity lexicon");

    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| AppError::scorer_init(format!("Lexicon download failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(AppError::scorer_init(format!(
            "Lexicon download failed with status {}.",
            resp.status()
        )));
    }

    let body = resp
        .text()
        .map_err(|e| AppError::scorer_init(format!("Failed to read lexicon body: {e}")))?;

    store_lexicon(path, &body)
}

/// Write `body` to `path` through a sibling `.part` file and a rename, so an
/// interrupted write never leaves a truncated lexicon at `path`.
///
/// A body with no usable entries is rejected and `path` is left untouched.
pub fn store_lexicon(path: &Path, body: &str) -> Result<(), AppError> {
    LexiconScorer::parse(body)
        .map_err(|e| AppError::scorer_init(format!("Downloaded lexicon is unusable: {e}")))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::scorer_init(format!("Failed to create lexicon dir '{}': {e}", dir.display()))
        })?;
    }

    let mut part_name = path.file_name().unwrap_or_default().to_os_string();
    part_name.push(".part");
    let part = path.with_file_name(part_name);

    fs::write(&part, body).map_err(|e| {
        AppError::scorer_init(format!("Failed to write lexicon '{}': {e}", part.display()))
    })?;
    fs::rename(&part, path).map_err(|e| {
        let _ = fs::remove_file(&part);
        AppError::scorer_init(format!("Failed to move lexicon into '{}': {e}", path.display()))
    })?;

    debug!(path = %path.display(), bytes = body.len(), "lexicon stored");
    Ok(())
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 || !sum.is_finite() {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

struct Token {
    raw: String,
    lower: String,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > 1)
        .map(|w| Token {
            raw: w.to_string(),
            lower: w.to_lowercase(),
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(|c| c.is_alphabetic()) && !word.chars().any(|c| c.is_lowercase())
}

fn booster_kind(word: &str) -> Option<f64> {
    if BOOSTERS_UP.contains(&word) {
        Some(BOOSTER_INCR)
    } else if BOOSTERS_DOWN.contains(&word) {
        Some(BOOSTER_DECR)
    } else {
        None
    }
}

fn is_negation(word: &str) -> bool {
    let bare: String = word.chars().filter(|c| *c != '\'' && *c != '\u{2019}').collect();
    NEGATIONS.contains(&bare.as_str()) || word.ends_with("n't") || word.ends_with("n\u{2019}t")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::from_entries([
            ("surges", 1.8),
            ("strong", 2.3),
            ("record", 1.2),
            ("cheer", 2.3),
            ("crash", -2.7),
            ("losses", -1.6),
            ("good", 1.9),
        ])
        .unwrap()
    }

    #[test]
    fn unknown_words_score_zero() {
        let s = scorer();
        assert_eq!(s.compound("Markets shrug off mixed data"), 0.0);
        assert_eq!(s.compound(""), 0.0);
    }

    #[test]
    fn polarity_follows_lexicon_sign() {
        let s = scorer();
        assert!(s.compound("Stock surges on strong earnings") > 0.05);
        assert!(s.compound("Shares crash after losses") < -0.05);
    }

    #[test]
    fn single_word_matches_vader_normalization() {
        let s = scorer();
        let expected = 1.9 / (1.9f64 * 1.9 + 15.0).sqrt();
        assert!((s.compound("good news") - expected).abs() < 1e-12);
    }

    #[test]
    fn negation_flips_polarity() {
        let s = scorer();
        assert!(s.compound("results were good") > 0.0);
        assert!(s.compound("results were not good") < 0.0);
        assert!(s.compound("results weren't good") < 0.0);
    }

    #[test]
    fn boosters_scale_magnitude() {
        let s = scorer();
        let plain = s.compound("results were good");
        let boosted = s.compound("results were very good");
        let damped = s.compound("results were slightly good");
        assert!(boosted > plain);
        assert!(damped < plain);
    }

    #[test]
    fn contrast_weights_clause_after_but() {
        let s = scorer();
        let score = s.compound("good quarter but crash looms");
        assert!(score < 0.0, "later clause should dominate, got {score}");
    }

    #[test]
    fn exclamations_and_caps_add_emphasis() {
        let s = scorer();
        let plain = s.compound("Stock surges");
        assert!(s.compound("Stock surges!!") > plain);
        assert!(s.compound("Stock SURGES") > plain);
    }

    #[test]
    fn compound_is_bounded() {
        let s = scorer();
        let text = "good good good good good good good good good good!!!!";
        let score = s.compound(text);
        assert!(score <= 1.0 && score > 0.9);
    }

    #[test]
    fn parses_vader_layout_and_skips_bad_lines() {
        let raw = "good\t1.9\t0.9434\t[2, 1, 2]\nbroken line\n\nbad\t-2.5\t0.7\t[-3, -2]\n";
        let s = LexiconScorer::parse(raw).unwrap();
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn empty_lexicon_is_invalid() {
        assert!(matches!(LexiconScorer::parse("\n\n"), Err(ScorerError::Invalid(_))));
    }

    #[test]
    fn missing_file_is_a_missing_resource() {
        let dir = tempfile::tempdir().unwrap();
        let err = LexiconScorer::from_path(&dir.path().join("vader_lexicon.txt")).unwrap_err();
        assert!(matches!(err, ScorerError::MissingResource(_)));
    }

    #[test]
    fn stored_lexicon_replaces_target_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("vader_lexicon.txt");

        store_lexicon(&path, "rally\t2.0\t0.5\t[2, 2]\n").unwrap();
        store_lexicon(&path, "slump\t-2.0\t0.5\t[-2, -2]\n").unwrap();

        let s = LexiconScorer::from_path(&path).unwrap();
        assert_eq!(s.len(), 1);
        assert!(s.compound("Stocks slump") < -0.05);
        let names: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("vader_lexicon.txt")]);
    }

    #[test]
    fn unusable_download_leaves_existing_lexicon_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vader_lexicon.txt");
        std::fs::write(&path, "rally\t2.0\t0.5\t[2, 2]\n").unwrap();

        let err = store_lexicon(&path, "<html>rate limited</html>").unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert_eq!(LexiconScorer::from_path(&path).unwrap().len(), 1);
        assert!(!dir.path().join("vader_lexicon.txt.part").exists());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rally\t2.0\t0.5\t[2, 2]").unwrap();
        let s = LexiconScorer::from_path(file.path()).unwrap();
        assert!(s.compound("Bitcoin rally continues") > 0.05);
    }
}
