use crate::normalize::{fold_char, normalize};

/// Char span in original text, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalSpan {
    pub start: usize,
    pub end: usize,
}

/// Map a `(start, len)` char span in `normalize(original)` back to original char offsets.
///
/// Walks the original and normalized text in lock-step. An original char is consumed only when
/// its own folding equals the next expected normalized chars; anything else (leading/trailing
/// whitespace, the tail of a whitespace run) is skipped. Returns `None` when the walk does not
/// reach both ends of the requested span.
pub fn map_to_original(original: &str, norm_start: usize, norm_len: usize) -> Option<OriginalSpan> {
    if norm_len == 0 {
        return None;
    }
    let norm: Vec<char> = normalize(original).chars().collect();
    let last = norm_start.checked_add(norm_len - 1)?;
    if last >= norm.len() {
        return None;
    }

    let mut cursor = 0usize;
    let mut found_start: Option<usize> = None;
    let mut found_end: Option<usize> = None;
    let mut buf = String::with_capacity(4);

    for (i, ch) in original.chars().enumerate() {
        if cursor >= norm.len() {
            break;
        }
        buf.clear();
        fold_char(ch, &mut buf);
        let k = buf.chars().count();
        let consumed = cursor + k <= norm.len()
            && buf.chars().zip(&norm[cursor..cursor + k]).all(|(a, b)| a == *b);
        if !consumed {
            continue;
        }
        if found_start.is_none() && (cursor..cursor + k).contains(&norm_start) {
            found_start = Some(i);
        }
        if (cursor..cursor + k).contains(&last) {
            found_end = Some(i + 1);
            break;
        }
        cursor += k;
    }

    match (found_start, found_end) {
        (Some(start), Some(end)) if end > start => Some(OriginalSpan { start, end }),
        _ => None,
    }
}
