use serde::{Deserialize, Serialize};
use spanlight_core::{Error, Result};

pub const DEFAULT_MIN_SIMILARITY: f64 = 0.75;
pub const DEFAULT_WINDOW_SCALE: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Minimum word-set Jaccard score a fuzzy window needs to count as a match.
    pub min_similarity: f64,
    /// Fuzzy window length as a multiple of the term's word count.
    pub window_scale: f64,
    /// If false, terms without a literal occurrence stay unmatched.
    pub fuzzy: bool,
    /// Drop common function words from both word sets before scoring.
    pub ignore_stopwords: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            window_scale: DEFAULT_WINDOW_SCALE,
            fuzzy: true,
            ignore_stopwords: true,
        }
    }
}

fn env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_f64(key: &str, default: f64) -> f64 {
    env(key)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    match env(key).map(|s| s.to_ascii_lowercase()) {
        Some(s) if matches!(s.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(s) if matches!(s.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}

impl HighlightConfig {
    /// Defaults, overridden by `SPANLIGHT_*` environment variables.
    ///
    /// Unparseable values are ignored rather than rejected.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            min_similarity: env_f64("SPANLIGHT_MIN_SIMILARITY", d.min_similarity),
            window_scale: env_f64("SPANLIGHT_WINDOW_SCALE", d.window_scale),
            fuzzy: env_bool("SPANLIGHT_FUZZY", d.fuzzy),
            ignore_stopwords: env_bool("SPANLIGHT_IGNORE_STOPWORDS", d.ignore_stopwords),
        }
    }

    pub fn with_min_similarity(mut self, v: f64) -> Self {
        self.min_similarity = v;
        self
    }

    pub fn with_window_scale(mut self, v: f64) -> Self {
        self.window_scale = v;
        self
    }

    pub fn with_fuzzy(mut self, on: bool) -> Self {
        self.fuzzy = on;
        self
    }

    pub fn with_ignore_stopwords(mut self, on: bool) -> Self {
        self.ignore_stopwords = on;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(Error::InvalidConfig(format!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            )));
        }
        if !self.window_scale.is_finite() || self.window_scale < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "window_scale must be >= 1, got {}",
                self.window_scale
            )));
        }
        Ok(())
    }
}
