use once_cell::sync::Lazy;
use regex::Regex;
use spanlight_core::ContentKind;

// Emphasis/code markers, headings, list items, blockquotes, links.
static MARKDOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)\*\*|__|\*[^\s*]|_[^\s_]|`|^[ \t]{0,3}#{1,6}[ \t]|^[ \t]*[-*+][ \t]|^[ \t]*\d+[.)][ \t]|^[ \t]{0,3}>|\[[^\]\n]+\]\([^)\n]*\)",
    )
    .expect("valid markdown pattern")
});

// Display math or a backslash command; single `$` is deliberately not a trigger.
static LATEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\$[\s\S]+?\$\$|\\[A-Za-z]+\{").expect("valid latex pattern"));

fn looks_like_json(trimmed: &str) -> bool {
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}

/// Pick the renderer for a block of content.
///
/// Only the outer bracket pair is checked for `Json`; the renderer falls back to verbatim text
/// when the content does not actually parse.
pub fn classify(content: &str) -> ContentKind {
    let trimmed = content.trim();
    if looks_like_json(trimmed) {
        return ContentKind::Json;
    }
    if MARKDOWN.is_match(content) || LATEX.is_match(content) {
        return ContentKind::Markup;
    }
    ContentKind::Plain
}
