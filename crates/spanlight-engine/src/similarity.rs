use std::collections::BTreeSet;

// Function words that carry little evidence on their own. English only; matching never splits
// beyond whitespace.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "been", "being", "but", "by", "for", "from", "if",
    "in", "into", "is", "it", "its", "of", "on", "or", "so", "than", "that", "the", "their",
    "then", "there", "these", "this", "those", "to", "was", "were", "will", "with",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}

pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let inter = a.intersection(b).count();
    inter as f64 / (a.len() + b.len() - inter) as f64
}

/// Word set, optionally without stopwords.
pub fn word_set<'a>(words: &[&'a str], drop_stopwords: bool) -> BTreeSet<&'a str> {
    words
        .iter()
        .copied()
        .filter(|w| !(drop_stopwords && is_stopword(w)))
        .collect()
}
