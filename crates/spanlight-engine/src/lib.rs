//! Evidence highlighting: find where short reference terms occur (literally or approximately)
//! in message text, and cut the text, or a rendered tree of it, into plain/highlighted segments.
//!
//! Everything here is synchronous and stateless; the same input always yields the same output.

pub mod classify;
pub mod config;
pub mod exact;
pub mod fuzzy;
pub mod highlight;
pub mod mapper;
pub mod markup;
pub mod merge;
pub mod normalize;
pub mod render;
pub mod segment;
pub mod similarity;
pub mod tree;

pub use classify::classify;
pub use config::HighlightConfig;
pub use exact::find_exact;
pub use fuzzy::{find_fuzzy, find_fuzzy_scored, FuzzyMatch, FuzzyParams};
pub use highlight::{collect_ranges, highlight_text, HighlightOutcome, TermOutcome, TermReport};
pub use mapper::{map_to_original, OriginalSpan};
pub use markup::markdown_to_tree;
pub use merge::merge_ranges;
pub use normalize::normalize;
pub use render::{pretty_json, Highlighter, RenderedBody, RenderedMessage};
pub use segment::{build_segments, marked_text};
pub use tree::{apply_to_tree, apply_to_tree_with_report};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn engine_types_are_send_and_sync() {
        assert_send_sync::<Highlighter>();
        assert_send_sync::<HighlightOutcome>();
        assert_send_sync::<RenderedMessage>();
    }

    #[test]
    fn messages_can_be_highlighted_in_parallel() {
        let hl = Highlighter::default();
        let texts = ["the cat sat", "a dog ran", "the cat ran"];
        let outs: Vec<HighlightOutcome> = std::thread::scope(|s| {
            let handles: Vec<_> = texts
                .iter()
                .map(|t| {
                    let hl = &hl;
                    s.spawn(move || hl.highlight(t, &["cat"]))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(outs[0], hl.highlight(texts[0], &["cat"]));
        assert_eq!(outs[1].ranges.len(), 0);
        assert_eq!(outs[2].ranges.len(), 1);
    }
}
