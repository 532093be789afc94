//! Paragraph reconstruction
//!
//! Turns cleaned text plus the anomaly flags into the run sequence that the
//! writer will serialize: a depth segment split onto its own line with a
//! hard break, and highlight markers placed on the segment each flag
//! belongs to.

use crate::document::models::{Highlight, ParagraphResult, Segment};
use crate::processing::depth::DepthInterval;

/// Rebuilds one paragraph.
///
/// When the text literally starts with the parsed depth substring, the
/// result is the depth segment (yellow when discontinuous), a hard line
/// break, then the left-trimmed remainder (red on a percentage mismatch),
/// omitted entirely when empty. Otherwise the full text becomes a single
/// segment carrying only the percentage flag. A line can show both
/// highlights at once, on different segments.
pub fn rebuild_paragraph(
    text: &str,
    depth: Option<&DepthInterval>,
    depth_flag: bool,
    pct_flag: bool,
) -> ParagraphResult {
    let pct_highlight = if pct_flag {
        Highlight::PercentageMismatch
    } else {
        Highlight::None
    };

    if let Some(interval) = depth {
        if let Some(rest) = text.strip_prefix(interval.matched_text.as_str()) {
            let depth_highlight = if depth_flag {
                Highlight::DepthDiscontinuity
            } else {
                Highlight::None
            };
            let mut segments = vec![Segment::new(interval.matched_text.clone(), depth_highlight)];
            let rest = rest.trim_start();
            if !rest.is_empty() {
                segments.push(Segment::new(rest, pct_highlight));
            }
            return ParagraphResult {
                segments,
                break_after_first: true,
            };
        }
    }

    if text.is_empty() {
        return ParagraphResult::empty();
    }
    ParagraphResult {
        segments: vec![Segment::new(text, pct_highlight)],
        break_after_first: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::depth::parse_depth_interval;

    #[test]
    fn splits_depth_prefix_onto_its_own_line() {
        let text = "100-150 sandy clay (40%)";
        let depth = parse_depth_interval(text);
        let result = rebuild_paragraph(text, depth.as_ref(), true, true);

        assert!(result.break_after_first);
        assert_eq!(result.segments.len(), 2);
        assert_eq!(
            result.segments[0],
            Segment::new("100-150", Highlight::DepthDiscontinuity)
        );
        assert_eq!(
            result.segments[1],
            Segment::new("sandy clay (40%)", Highlight::PercentageMismatch)
        );
    }

    #[test]
    fn unflagged_split_carries_no_highlights() {
        let text = "150-200 silt";
        let depth = parse_depth_interval(text);
        let result = rebuild_paragraph(text, depth.as_ref(), false, false);

        assert_eq!(result.segments[0], Segment::new("150-200", Highlight::None));
        assert_eq!(result.segments[1], Segment::new("silt", Highlight::None));
    }

    #[test]
    fn depth_only_line_keeps_the_break_and_drops_the_remainder() {
        let text = "100-150";
        let depth = parse_depth_interval(text);
        let result = rebuild_paragraph(text, depth.as_ref(), false, false);

        assert!(result.break_after_first);
        assert_eq!(result.segments.len(), 1);
    }

    #[test]
    fn line_without_depth_is_a_single_segment() {
        let result = rebuild_paragraph("grey clay (90%)", None, false, true);

        assert!(!result.break_after_first);
        assert_eq!(
            result.segments,
            vec![Segment::new("grey clay (90%)", Highlight::PercentageMismatch)]
        );
    }

    #[test]
    fn depth_that_is_not_a_literal_prefix_falls_back_to_one_segment() {
        let depth = parse_depth_interval("100-150 clay");
        let result = rebuild_paragraph("clay bed", depth.as_ref(), true, false);

        assert!(!result.break_after_first);
        assert_eq!(result.segments, vec![Segment::new("clay bed", Highlight::None)]);
    }

    #[test]
    fn empty_text_rebuilds_to_an_empty_paragraph() {
        let result = rebuild_paragraph("", None, false, false);
        assert!(result.is_empty());
        assert!(result.segments.is_empty());
    }
}
