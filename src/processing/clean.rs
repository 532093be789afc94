//! Whitespace, punctuation, and acronym-casing normalization
//!
//! `clean_text` is a pure function with order-sensitive steps; paren spacing
//! can reintroduce double spaces, so space collapsing runs again afterward.

use once_cell::sync::Lazy;
use regex::Regex;

/// Normalizes one paragraph of report text.
pub fn clean_text(text: &str) -> String {
    let mut cleaned = collapse_spaces(text);
    cleaned = normalize_comma_spacing(&cleaned);
    cleaned = space_before_parens(&cleaned);
    cleaned = collapse_spaces(&cleaned);
    capitalize_acronyms_before_parens(&cleaned)
}

/// Collapses runs of two or more spaces down to one, to fixpoint.
fn collapse_spaces(input: &str) -> String {
    let mut out = input.to_string();
    while out.contains("  ") {
        out = out.replace("  ", " ");
    }
    out
}

/// Rewrites a comma plus any following whitespace to exactly `", "`.
fn normalize_comma_spacing(input: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r",\s*").unwrap());
    RE.replace_all(input, ", ").into_owned()
}

fn space_before_parens(input: &str) -> String {
    input.replace('(', " (")
}

/// Rewrites an all-caps token directly before `(` to capitalized form,
/// e.g. `SAND (40%)` becomes `Sand (40%)`.
fn capitalize_acronyms_before_parens(input: &str) -> String {
    static RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]+)\s*\(").unwrap());
    RE.replace_all(input, |caps: &regex::Captures| {
        let token = &caps[1];
        let mut chars = token.chars();
        match chars.next() {
            Some(first) => format!("{}{} (", first, chars.as_str().to_lowercase()),
            None => String::from(" ("),
        }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_runs_of_spaces() {
        assert_eq!(clean_text("grey   silty    clay"), "grey silty clay");
    }

    #[test]
    fn normalizes_comma_spacing() {
        assert_eq!(clean_text("clay,silt,  sand"), "clay, silt, sand");
    }

    #[test]
    fn inserts_space_before_parens() {
        assert_eq!(clean_text("clay(40%)"), "clay (40%)");
    }

    #[test]
    fn does_not_double_existing_paren_spacing() {
        assert_eq!(clean_text("clay (40%)"), "clay (40%)");
    }

    #[test]
    fn capitalizes_all_caps_token_before_paren() {
        assert_eq!(clean_text("ABC (40%)"), "Abc (40%)");
        assert_eq!(clean_text("SANDSTONE(60%)"), "Sandstone (60%)");
    }

    #[test]
    fn leaves_all_caps_token_alone_without_paren() {
        assert_eq!(clean_text("ABC sample"), "ABC sample");
    }

    #[test]
    fn single_letter_token_is_unchanged_by_capitalization() {
        assert_eq!(clean_text("A (1%)"), "A (1%)");
    }

    #[test]
    fn clean_is_idempotent() {
        let samples = [
            "grey,silty   clay(40%)",
            "SAND (100%)",
            "  leading and trailing  ",
            "no changes needed",
            "",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once, "not idempotent for {sample:?}");
        }
    }
}
