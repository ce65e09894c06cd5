//! Fallback matching for terms that do not occur literally.
//!
//! Two stages: a substring search in normalized space (absorbs case, spacing, quote and dash
//! differences), then a sliding word window scored by word-set Jaccard similarity.

use crate::config::{DEFAULT_MIN_SIMILARITY, DEFAULT_WINDOW_SCALE};
use crate::mapper::map_to_original;
use crate::normalize::{normalize, words};
use crate::similarity::{jaccard, word_set};
use serde::Serialize;
use spanlight_core::MatchRange;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyParams {
    pub min_similarity: f64,
    pub window_scale: f64,
    pub ignore_stopwords: bool,
}

impl Default for FuzzyParams {
    fn default() -> Self {
        Self {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            window_scale: DEFAULT_WINDOW_SCALE,
            ignore_stopwords: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FuzzyMatch {
    pub range: MatchRange,
    /// 1.0 for a normalized substring hit, otherwise the window's Jaccard score.
    pub score: f64,
}

/// Best fuzzy span for `term` in `text`, or `None` if nothing clears the threshold.
pub fn find_fuzzy(
    text: &str,
    term: &str,
    term_index: usize,
    params: &FuzzyParams,
) -> Option<MatchRange> {
    find_fuzzy_scored(text, term, term_index, params).map(|m| m.range)
}

pub fn find_fuzzy_scored(
    text: &str,
    term: &str,
    term_index: usize,
    params: &FuzzyParams,
) -> Option<FuzzyMatch> {
    let norm_text = normalize(text);
    let norm_term = normalize(term);
    if norm_term.is_empty() {
        return None;
    }

    if let Some(byte_at) = norm_text.find(&norm_term) {
        let start = norm_text[..byte_at].chars().count();
        let len = norm_term.chars().count();
        return match map_to_original(text, start, len) {
            Some(span) => Some(FuzzyMatch {
                range: MatchRange::new(span.start, span.end, term_index),
                score: 1.0,
            }),
            None => {
                tracing::debug!(term, "normalized hit could not be mapped back");
                None
            }
        };
    }

    let hay = words(&norm_text);
    let needle = words(&norm_term);
    if hay.is_empty() || needle.is_empty() {
        return None;
    }

    let mut drop_stopwords = params.ignore_stopwords;
    let mut needle_set = word_set(&needle, drop_stopwords);
    if needle_set.is_empty() {
        // All function words: score them as-is.
        drop_stopwords = false;
        needle_set = word_set(&needle, false);
    }

    let n = needle.len();
    // A huge scale saturates the cast; no window is longer than the text anyway.
    let window_len = n
        .max((n as f64 * params.window_scale).floor() as usize)
        .min(hay.len());

    // (word index, window word count, score)
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..hay.len() {
        let end = i.saturating_add(window_len).min(hay.len());
        let window = &hay[i..end];
        let score = jaccard(&needle_set, &word_set(window, drop_stopwords));
        if score < params.min_similarity {
            continue;
        }
        if best.map_or(true, |(_, _, b)| score > b) {
            best = Some((i, window.len(), score));
        }
    }

    let (i, count, score) = best?;
    tracing::trace!(term, window_start = i, window_words = count, score, "best fuzzy window");

    let preceding: usize = hay[..i].iter().map(|w| w.chars().count()).sum::<usize>() + i;
    let span_len: usize =
        hay[i..i + count].iter().map(|w| w.chars().count()).sum::<usize>() + count - 1;

    match map_to_original(text, preceding, span_len) {
        Some(span) => Some(FuzzyMatch {
            range: MatchRange::new(span.start, span.end, term_index),
            score,
        }),
        None => {
            tracing::debug!(term, score, "fuzzy window could not be mapped back; dropping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(s: &str, r: MatchRange) -> String {
        s.chars().skip(r.start).take(r.len()).collect()
    }

    #[test]
    fn irregular_spacing_recovers_original_span() {
        let text = "The quick brown fox jumps";
        let r = find_fuzzy(text, "quick  brown   fox", 0, &FuzzyParams::default()).unwrap();
        assert_eq!(slice(text, r), "quick brown fox");
    }

    #[test]
    fn smart_quotes_and_dashes_match_ascii_terms() {
        let text = "He said \u{201C}don\u{2019}t\u{201D} \u{2014} twice.";
        let r = find_fuzzy(text, "\"don't\" - twice", 1, &FuzzyParams::default()).unwrap();
        assert_eq!(slice(text, r), "\u{201C}don\u{2019}t\u{201D} \u{2014} twice");
        assert_eq!(r.term_index, 1);
    }

    #[test]
    fn reordered_words_match_at_default_threshold() {
        let text = "errors were handled gracefully by the system";
        let term = "system handled errors gracefully";
        let m = find_fuzzy_scored(text, term, 0, &FuzzyParams::default()).unwrap();
        assert!(m.score >= 0.75);
        assert_eq!(slice(text, m.range), "errors were handled gracefully by the");
    }

    #[test]
    fn reordered_words_miss_at_strict_threshold() {
        let text = "errors were handled gracefully by the system";
        let term = "system handled errors gracefully";
        let params = FuzzyParams {
            min_similarity: 0.99,
            ..FuzzyParams::default()
        };
        assert_eq!(find_fuzzy(text, term, 0, &params), None);
    }

    #[test]
    fn ties_keep_the_leftmost_window() {
        let text = "alpha beta gamma alpha beta gamma";
        let params = FuzzyParams {
            min_similarity: 0.5,
            ..FuzzyParams::default()
        };
        let r = find_fuzzy(text, "gamma beta alpha", 0, &params).unwrap();
        assert_eq!(r.start, 0);
    }

    #[test]
    fn unrelated_text_yields_none() {
        let text = "nothing in common here";
        assert_eq!(
            find_fuzzy(text, "quantum chromodynamics", 0, &FuzzyParams::default()),
            None
        );
    }

    #[test]
    fn empty_inputs_yield_none() {
        let p = FuzzyParams::default();
        assert_eq!(find_fuzzy("", "term", 0, &p), None);
        assert_eq!(find_fuzzy("text", "   ", 0, &p), None);
    }

    #[test]
    fn stopword_only_terms_still_score() {
        let text = "one of the best";
        let params = FuzzyParams {
            min_similarity: 0.5,
            ..FuzzyParams::default()
        };
        // "the of" is not a substring, and is all stopwords.
        let r = find_fuzzy(text, "the of", 0, &params).unwrap();
        assert!(slice(text, r).contains("of"));
    }

    #[test]
    fn window_near_the_end_is_clamped() {
        let text = "lorem ipsum dolor sit amet consectetur";
        let params = FuzzyParams {
            min_similarity: 0.6,
            ignore_stopwords: false,
            ..FuzzyParams::default()
        };
        let r = find_fuzzy(text, "consectetur amet", 0, &params).unwrap();
        assert_eq!(slice(text, r), "amet consectetur");
    }

    #[test]
    fn reordered_words_miss_under_plain_jaccard() {
        let text = "errors were handled gracefully by the system";
        let term = "system handled errors gracefully";
        let plain = FuzzyParams {
            ignore_stopwords: false,
            ..FuzzyParams::default()
        };
        assert_eq!(find_fuzzy(text, term, 0, &plain), None);

        let loose = FuzzyParams {
            min_similarity: 0.5,
            ..plain
        };
        let m = find_fuzzy_scored(text, term, 0, &loose).unwrap();
        assert_eq!(m.score, 0.5);
        assert_eq!(slice(text, m.range), "handled gracefully by the system");
    }

    #[test]
    fn huge_window_scale_covers_the_rest_of_the_text() {
        let text = "alpha beta gamma delta";
        let huge = FuzzyParams {
            window_scale: 1e300,
            ..FuzzyParams::default()
        };
        assert_eq!(find_fuzzy(text, "gamma alpha", 0, &huge), None);

        let loose = FuzzyParams {
            min_similarity: 0.5,
            ..huge
        };
        let r = find_fuzzy(text, "gamma alpha", 0, &loose).unwrap();
        assert_eq!(slice(text, r), text);
    }
}
