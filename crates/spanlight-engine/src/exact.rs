use spanlight_core::MatchRange;

// One-to-one case folding keeps char offsets stable; chars whose lowercase form expands are
// compared as-is.
fn fold_case(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

/// Every non-overlapping, case-insensitive literal occurrence of `term` in `text`, left to right.
///
/// Whitespace and punctuation in `term` must match exactly; callers pass trimmed, non-empty terms.
pub fn find_exact(text: &str, term: &str, term_index: usize) -> Vec<MatchRange> {
    let needle: Vec<char> = term.chars().map(fold_case).collect();
    if needle.is_empty() {
        return Vec::new();
    }
    let hay: Vec<char> = text.chars().map(fold_case).collect();
    let mut out = Vec::new();
    let mut i = 0usize;
    while i + needle.len() <= hay.len() {
        if hay[i..i + needle.len()] == needle[..] {
            out.push(MatchRange::new(i, i + needle.len(), term_index));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    out
}
