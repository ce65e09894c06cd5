use spanlight_core::{MatchRange, Segment};

/// Char offset -> byte offset table, with one trailing entry for `text.len()`.
fn char_boundaries(text: &str) -> Vec<usize> {
    let mut out: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
    out.push(text.len());
    out
}

/// Cut `text` into alternating plain/highlighted segments.
///
/// `ranges` must be sorted and non-overlapping (see [`crate::merge::merge_ranges`]). Every char
/// of `text` lands in exactly one segment; out-of-bounds range ends are clamped.
pub fn build_segments(text: &str, ranges: &[MatchRange]) -> Vec<Segment> {
    let bounds = char_boundaries(text);
    let total = bounds.len() - 1;
    if ranges.is_empty() {
        return vec![Segment::plain(text, 0, total)];
    }

    let slice = |a: usize, b: usize| &text[bounds[a]..bounds[b]];
    let mut out = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0usize;
    for r in ranges {
        let start = r.start.max(cursor).min(total);
        let end = r.end.min(total);
        if end <= start {
            continue;
        }
        if start > cursor {
            out.push(Segment::plain(slice(cursor, start), cursor, start));
        }
        out.push(Segment::highlighted(
            slice(start, end),
            MatchRange::new(start, end, r.term_index),
        ));
        cursor = end;
    }
    if cursor < total || out.is_empty() {
        out.push(Segment::plain(slice(cursor, total), cursor, total));
    }
    out
}

/// Render segments as a single string, wrapping highlighted text in `open`/`close`.
pub fn marked_text(segments: &[Segment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for s in segments {
        if s.is_highlighted() {
            out.push_str(open);
            out.push_str(&s.text);
            out.push_str(close);
        } else {
            out.push_str(&s.text);
        }
    }
    out
}
