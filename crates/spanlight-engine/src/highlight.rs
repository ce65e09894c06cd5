//! Per-message highlighting pipeline: exact matches for every term, fuzzy fallback for terms
//! with none, merge, then segment.

use crate::config::HighlightConfig;
use crate::exact::find_exact;
use crate::fuzzy::{find_fuzzy_scored, FuzzyParams};
use crate::merge::merge_ranges;
use crate::segment::build_segments;
use serde::Serialize;
use spanlight_core::{MatchRange, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TermOutcome {
    Exact { count: usize },
    Fuzzy { score: f64 },
    Unmatched,
    /// Blank after trimming.
    Skipped,
}

impl TermOutcome {
    /// Combine outcomes for the same term across several leaves of one tree.
    pub fn combine(self, other: TermOutcome) -> TermOutcome {
        use TermOutcome::*;
        match (self, other) {
            (Exact { count: a }, Exact { count: b }) => Exact { count: a + b },
            (e @ Exact { .. }, _) | (_, e @ Exact { .. }) => e,
            (Fuzzy { score: a }, Fuzzy { score: b }) => Fuzzy { score: a.max(b) },
            (f @ Fuzzy { .. }, _) | (_, f @ Fuzzy { .. }) => f,
            (Unmatched, _) | (_, Unmatched) => Unmatched,
            (Skipped, Skipped) => Skipped,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, TermOutcome::Exact { .. } | TermOutcome::Fuzzy { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermReport {
    pub index: usize,
    pub term: String,
    #[serde(flatten)]
    pub outcome: TermOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightOutcome {
    pub segments: Vec<Segment>,
    /// Merged ranges the segments were cut from.
    pub ranges: Vec<MatchRange>,
    pub terms: Vec<TermReport>,
}

impl HighlightOutcome {
    pub fn matched_terms(&self) -> usize {
        self.terms.iter().filter(|t| t.outcome.is_match()).count()
    }
}

impl From<&HighlightConfig> for FuzzyParams {
    fn from(c: &HighlightConfig) -> Self {
        FuzzyParams {
            min_similarity: c.min_similarity,
            window_scale: c.window_scale,
            ignore_stopwords: c.ignore_stopwords,
        }
    }
}

/// Candidate ranges for every term (unmerged) plus what happened to each term.
pub fn collect_ranges<S: AsRef<str>>(
    text: &str,
    terms: &[S],
    config: &HighlightConfig,
) -> (Vec<MatchRange>, Vec<TermReport>) {
    let params = FuzzyParams::from(config);
    let mut ranges = Vec::new();
    let mut reports = Vec::with_capacity(terms.len());

    for (index, raw) in terms.iter().enumerate() {
        let term = raw.as_ref().trim();
        let outcome = if term.is_empty() {
            TermOutcome::Skipped
        } else {
            let exact = find_exact(text, term, index);
            if !exact.is_empty() {
                let count = exact.len();
                ranges.extend(exact);
                TermOutcome::Exact { count }
            } else if !config.fuzzy {
                TermOutcome::Unmatched
            } else {
                tracing::debug!(term, "no literal occurrence; trying fuzzy match");
                match find_fuzzy_scored(text, term, index, &params) {
                    Some(m) => {
                        ranges.push(m.range);
                        TermOutcome::Fuzzy { score: m.score }
                    }
                    None => TermOutcome::Unmatched,
                }
            }
        };
        reports.push(TermReport {
            index,
            term: raw.as_ref().to_string(),
            outcome,
        });
    }
    (ranges, reports)
}

/// Highlight `terms` in a flat string.
pub fn highlight_text<S: AsRef<str>>(
    text: &str,
    terms: &[S],
    config: &HighlightConfig,
) -> HighlightOutcome {
    let (candidates, terms) = collect_ranges(text, terms, config);
    let ranges = merge_ranges(&candidates);
    let segments = build_segments(text, &ranges);
    HighlightOutcome {
        segments,
        ranges,
        terms,
    }
}
