//! Public facade crate for `spanlight`.
//!
//! Re-exports the shared types from `spanlight-core` and the highlighting engine from
//! `spanlight-engine`, so embedders depend on one crate.

pub use spanlight_core::*;
pub use spanlight_engine as engine;
pub use spanlight_engine::{
    apply_to_tree, build_segments, classify, highlight_text, merge_ranges, normalize,
    HighlightConfig, HighlightOutcome, Highlighter, RenderedBody, RenderedMessage, TermOutcome,
    TermReport,
};
