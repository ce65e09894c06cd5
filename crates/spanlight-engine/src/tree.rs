use crate::config::HighlightConfig;
use crate::highlight::{highlight_text, TermReport};
use spanlight_core::{HighlightedNode, RenderNode, Segment};

/// Highlight every leaf of `node`, keeping wrappers, child order, and child counts intact.
///
/// Terms are matched per leaf; a term spanning two leaves (e.g. across an emphasis boundary)
/// does not match.
pub fn apply_to_tree<S: AsRef<str>>(
    node: RenderNode,
    terms: &[S],
    config: &HighlightConfig,
) -> HighlightedNode {
    apply_to_tree_with_report(node, terms, config).0
}

/// Like [`apply_to_tree`], plus one report per term combined across all leaves.
pub fn apply_to_tree_with_report<S: AsRef<str>>(
    node: RenderNode,
    terms: &[S],
    config: &HighlightConfig,
) -> (HighlightedNode, Vec<TermReport>) {
    let mut reports: Option<Vec<TermReport>> = None;
    let out = walk(node, terms, config, &mut reports);
    let reports = reports.unwrap_or_else(|| {
        // No leaves: nothing could match.
        highlight_text("", terms, config).terms
    });
    (out, reports)
}

fn walk<S: AsRef<str>>(
    node: RenderNode,
    terms: &[S],
    config: &HighlightConfig,
    reports: &mut Option<Vec<TermReport>>,
) -> HighlightedNode {
    match node {
        RenderNode::Leaf { text } => {
            if terms.is_empty() {
                let total = text.chars().count();
                return HighlightedNode::Leaf {
                    segments: vec![Segment::plain(text, 0, total)],
                };
            }
            let outcome = highlight_text(&text, terms, config);
            match reports {
                Some(acc) => {
                    for (a, b) in acc.iter_mut().zip(outcome.terms) {
                        a.outcome = a.outcome.combine(b.outcome);
                    }
                }
                None => *reports = Some(outcome.terms),
            }
            HighlightedNode::Leaf {
                segments: outcome.segments,
            }
        }
        RenderNode::Children { children } => HighlightedNode::Children {
            children: children
                .into_iter()
                .map(|c| walk(c, terms, config, reports))
                .collect(),
        },
        RenderNode::Wrapper { kind, child } => HighlightedNode::Wrapper {
            kind,
            child: Box::new(walk(*child, terms, config, reports)),
        },
    }
}
