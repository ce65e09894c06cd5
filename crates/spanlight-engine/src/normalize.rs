//! Comparison-only text normalization.
//!
//! The output is used for matching and scoring, never for display. Positions found in normalized
//! space are mapped back with [`crate::mapper::map_to_original`].

/// Fold a single character into the string it normalizes to (before whitespace collapsing).
///
/// Usually one char; lowercase expansion (e.g. `İ`) can yield more.
pub(crate) fn fold_char(ch: char, out: &mut String) {
    if ch.is_whitespace() {
        out.push(' ');
        return;
    }
    match ch {
        // single quote variants
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{02BC}' => {
            out.push('\'')
        }
        // double quote variants
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{00AB}'
        | '\u{00BB}' => out.push('"'),
        // dash variants
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2015}'
        | '\u{2212}' => out.push('-'),
        _ => out.extend(ch.to_lowercase()),
    }
}

/// Lowercase, collapse whitespace runs, fold quote and dash variants, trim.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut buf = String::with_capacity(4);
    let mut last_space = true;
    for ch in text.chars() {
        buf.clear();
        fold_char(ch, &mut buf);
        if buf == " " {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
            continue;
        }
        out.push_str(&buf);
        last_space = false;
    }
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Whitespace-delimited words of an already-normalized string.
pub(crate) fn words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  Hello \t\n  World  "), "hello world");
        assert_eq!(normalize("a\u{00A0}\u{00A0}b"), "a b");
    }

    #[test]
    fn folds_quotes_and_dashes() {
        assert_eq!(
            normalize("\u{201C}It\u{2019}s\u{201D} \u{2014} fine \u{2013} ok"),
            "\"it's\" - fine - ok"
        );
    }

    #[test]
    fn empty_and_blank_inputs_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn normalize_is_idempotent_on_samples() {
        for s in ["The  Quick\u{2014}Brown", "  ‘x’  “y”  ", "İstanbul"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn words_split_on_single_spaces() {
        let n = normalize("  one   two\tthree ");
        assert_eq!(words(&n), vec!["one", "two", "three"]);
        assert!(words("").is_empty());
    }
}
