//! Percentage-composition validation
//!
//! Lithology lines carry parenthesized composition percentages like
//! `(40%)`. When any are present they are expected to sum to 100.

use once_cell::sync::Lazy;
use regex::Regex;

static PERCENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((\d+)%\)").unwrap());

/// Sums every `(<int>%)` token in the line. Returns `None` when the line
/// makes no percentage claims at all.
pub fn percentage_sum(text: &str) -> Option<u32> {
    let mut total: u32 = 0;
    let mut seen = false;
    for caps in PERCENT_RE.captures_iter(text) {
        if let Ok(value) = caps[1].parse::<u32>() {
            total = total.saturating_add(value);
            seen = true;
        }
    }
    seen.then_some(total)
}

/// True when the line claims percentages that do not sum to 100.
pub fn has_percentage_mismatch(text: &str) -> bool {
    percentage_sum(text).is_some_and(|total| total != 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complete_composition_is_not_flagged() {
        assert!(!has_percentage_mismatch("(40%) sand (60%) clay"));
    }

    #[test]
    fn short_sum_is_flagged() {
        assert!(has_percentage_mismatch("(40%) sand (50%) clay"));
        assert_eq!(percentage_sum("(40%) sand (50%) clay"), Some(90));
    }

    #[test]
    fn oversum_is_flagged() {
        assert!(has_percentage_mismatch("(70%) sand (60%) clay"));
    }

    #[test]
    fn line_without_percentages_makes_no_claim() {
        assert!(!has_percentage_mismatch("no percentages here"));
        assert_eq!(percentage_sum("no percentages here"), None);
    }

    #[test]
    fn single_hundred_percent_is_accepted() {
        assert!(!has_percentage_mismatch("sandstone (100%)"));
    }

    #[test]
    fn tokens_need_the_full_parenthesized_form() {
        // Bare numbers and unparenthesized percents are not claims.
        assert_eq!(percentage_sum("40% sand, 60 clay"), None);
    }
}
