//! Document traversal and per-paragraph processing pipeline
//!
//! The walker visits every paragraph-bearing region in a fixed order: all
//! body paragraphs, then every table (document order, row-major), then each
//! section's header followed by its footer. One `WalkState` is threaded
//! through the whole walk, so depth continuity is checked across region
//! boundaries. The walker is pure with respect to the document container;
//! serialization and styling belong to the writer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::document::models::{
    DocumentElement, ParagraphResult, ProcessedCell, ProcessedDocument, ProcessedElement,
    ProcessedSection, Region, WellDocument,
};
use crate::processing::clean::clean_text;
use crate::processing::depth::{parse_depth_interval, WalkState};
use crate::processing::percent::percentage_sum;
use crate::processing::rebuild::rebuild_paragraph;
use crate::report::AnomalyReport;
use crate::rules::ReplacementRules;

/// Runs the full walk and returns the processed document with the anomaly
/// report.
pub fn process_document(
    document: &WellDocument,
    rules: &ReplacementRules,
) -> (ProcessedDocument, AnomalyReport) {
    let mut walker = Walker::new(rules);

    // Body paragraphs first, in element order, leaving table slots behind.
    let mut elements: Vec<ProcessedElement> = document
        .elements
        .iter()
        .map(|element| match element {
            DocumentElement::Paragraph { text } => {
                ProcessedElement::Paragraph(walker.process_paragraph(text, Region::Body))
            }
            DocumentElement::Table { .. } => ProcessedElement::Table { rows: Vec::new() },
        })
        .collect();

    // Then every table, row-major.
    for (element, slot) in document.elements.iter().zip(elements.iter_mut()) {
        if let (DocumentElement::Table { rows }, ProcessedElement::Table { rows: out }) =
            (element, slot)
        {
            *out = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| ProcessedCell {
                            paragraphs: cell
                                .paragraphs
                                .iter()
                                .map(|text| walker.process_paragraph(text, Region::Table))
                                .collect(),
                        })
                        .collect()
                })
                .collect();
        }
    }

    // Finally headers then footers, per section.
    let sections = document
        .sections
        .iter()
        .map(|section| ProcessedSection {
            header: section
                .header
                .iter()
                .map(|text| walker.process_paragraph(text, Region::Header))
                .collect(),
            footer: section
                .footer
                .iter()
                .map(|text| walker.process_paragraph(text, Region::Footer))
                .collect(),
        })
        .collect();

    collapse_blank_paragraphs(&mut elements);

    (ProcessedDocument { elements, sections }, walker.report)
}

struct Walker<'a> {
    rules: &'a ReplacementRules,
    state: WalkState,
    report: AnomalyReport,
}

impl<'a> Walker<'a> {
    fn new(rules: &'a ReplacementRules) -> Self {
        Self {
            rules,
            state: WalkState::new(),
            report: AnomalyReport::new(),
        }
    }

    fn process_paragraph(&mut self, raw: &str, region: Region) -> ParagraphResult {
        let replaced = self.rules.apply(raw);
        let cleaned = clean_text(&replaced);
        let text = if region == Region::Body {
            finalize_body_text(&cleaned)
        } else {
            cleaned.trim().to_string()
        };

        let depth = parse_depth_interval(&text);
        let mut depth_flag = false;
        if let Some(interval) = &depth {
            let expected = self.state.previous_end;
            depth_flag = self.state.advance(interval);
            if depth_flag {
                if let Some(expected) = expected {
                    self.report
                        .record_depth(region, &text, expected, interval.start);
                }
            }
        }

        let mut pct_flag = false;
        if let Some(sum) = percentage_sum(&text) {
            if sum != 100 {
                pct_flag = true;
                self.report.record_percentage(region, &text, sum);
            }
        }

        rebuild_paragraph(&text, depth.as_ref(), depth_flag, pct_flag)
    }
}

static TRAILING_NON_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+$").unwrap());

/// Body paragraphs only: trim, drop trailing non-alphanumerics, and close
/// with a single period. Empty paragraphs stay empty. Table and
/// header/footer paragraphs are only trimmed.
fn finalize_body_text(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut out = TRAILING_NON_ALNUM_RE.replace(trimmed, "").into_owned();
    out.push('.');
    out
}

/// Collapses runs of two or more consecutive fully-empty body paragraphs
/// down to one. Adjacency is judged over the body paragraph sequence;
/// interleaved tables neither separate a run nor are touched. Idempotent.
fn collapse_blank_paragraphs(elements: &mut Vec<ProcessedElement>) {
    let mut previous_empty = false;
    elements.retain(|element| match element {
        ProcessedElement::Paragraph(paragraph) => {
            let empty = paragraph.is_empty();
            let keep = !(empty && previous_empty);
            previous_empty = empty;
            keep
        }
        ProcessedElement::Table { .. } => true,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::models::{
        DocumentMetadata, Highlight, Section, Segment, TableCell as SourceCell,
    };

    fn document(elements: Vec<DocumentElement>, sections: Vec<Section>) -> WellDocument {
        WellDocument {
            title: "test-well".to_string(),
            metadata: DocumentMetadata {
                file_path: "test.docx".to_string(),
                file_size: 0,
                paragraph_count: 0,
                table_count: 0,
                word_count: 0,
            },
            elements,
            sections,
        }
    }

    fn paragraph(text: &str) -> DocumentElement {
        DocumentElement::Paragraph {
            text: text.to_string(),
        }
    }

    fn body_result(processed: &ProcessedDocument, index: usize) -> &ParagraphResult {
        match &processed.elements[index] {
            ProcessedElement::Paragraph(result) => result,
            ProcessedElement::Table { .. } => panic!("expected paragraph at index {index}"),
        }
    }

    #[test]
    fn end_to_end_three_paragraph_body() {
        let mut rules = ReplacementRules::new();
        rules.insert("gry", "grey");

        let doc = document(
            vec![
                paragraph("100-150 gry clay"),
                paragraph("160-200 sand"),
                paragraph("200-250 silt (40%) and clay (50%) throughout"),
            ],
            vec![],
        );
        let (processed, report) = process_document(&doc, &rules);

        // Rule applied, cleaned, terminal period appended.
        let first = body_result(&processed, 0);
        assert_eq!(first.segments[0], Segment::new("100-150", Highlight::None));
        assert_eq!(first.segments[1], Segment::new("grey clay.", Highlight::None));
        assert!(first.break_after_first);

        // Depth jump flagged on the depth segment only.
        let second = body_result(&processed, 1);
        assert_eq!(
            second.segments[0],
            Segment::new("160-200", Highlight::DepthDiscontinuity)
        );
        assert_eq!(second.segments[1], Segment::new("sand.", Highlight::None));

        // Percentage shortfall flagged on the remainder segment only.
        let third = body_result(&processed, 2);
        assert_eq!(third.segments[0], Segment::new("200-250", Highlight::None));
        assert_eq!(
            third.segments[1],
            Segment::new("silt (40%) and clay (50%) throughout.", Highlight::PercentageMismatch)
        );

        assert_eq!(report.depth_discontinuities.len(), 1);
        assert_eq!(report.depth_discontinuities[0].expected_start, 150);
        assert_eq!(report.depth_discontinuities[0].found_start, 160);
        assert_eq!(report.percentage_mismatches.len(), 1);
        assert_eq!(report.percentage_mismatches[0].sum, 90);
    }

    #[test]
    fn depth_state_threads_from_body_into_tables_and_sections() {
        let doc = document(
            vec![
                paragraph("100-150 clay"),
                DocumentElement::Table {
                    rows: vec![vec![SourceCell {
                        paragraphs: vec!["150-200 sand".to_string()],
                    }]],
                },
            ],
            vec![Section {
                header: vec!["210-260 silt".to_string()],
                footer: vec![],
            }],
        );
        let (processed, report) = process_document(&doc, &ReplacementRules::new());

        // The table cell continues the body's interval, so no flag there.
        let ProcessedElement::Table { rows } = &processed.elements[1] else {
            panic!("expected table");
        };
        assert_eq!(
            rows[0][0].paragraphs[0].segments[0],
            Segment::new("150-200", Highlight::None)
        );

        // The header jumps from 200 to 210 and is flagged.
        assert_eq!(
            processed.sections[0].header[0].segments[0],
            Segment::new("210-260", Highlight::DepthDiscontinuity)
        );
        assert_eq!(report.depth_discontinuities.len(), 1);
        assert_eq!(report.depth_discontinuities[0].region, Region::Header);
    }

    #[test]
    fn body_gets_terminal_punctuation_but_tables_do_not() {
        let doc = document(
            vec![
                paragraph("grey clay , "),
                DocumentElement::Table {
                    rows: vec![vec![SourceCell {
                        paragraphs: vec!["grey clay , ".to_string()],
                    }]],
                },
            ],
            vec![],
        );
        let (processed, _) = process_document(&doc, &ReplacementRules::new());

        assert_eq!(body_result(&processed, 0).full_text(), "grey clay.");
        let ProcessedElement::Table { rows } = &processed.elements[1] else {
            panic!("expected table");
        };
        assert_eq!(rows[0][0].paragraphs[0].full_text(), "grey clay ,");
    }

    #[test]
    fn consecutive_blank_body_paragraphs_collapse_to_one() {
        let doc = document(
            vec![
                paragraph(""),
                paragraph("   "),
                paragraph(""),
                paragraph("text"),
            ],
            vec![],
        );
        let (processed, _) = process_document(&doc, &ReplacementRules::new());

        assert_eq!(processed.elements.len(), 2);
        assert!(body_result(&processed, 0).is_empty());
        assert_eq!(body_result(&processed, 1).full_text(), "text.");
    }

    #[test]
    fn blank_collapse_is_idempotent() {
        let doc = document(
            vec![paragraph(""), paragraph(""), paragraph("a"), paragraph("")],
            vec![],
        );
        let (processed, _) = process_document(&doc, &ReplacementRules::new());
        let mut again = processed.elements.clone();
        collapse_blank_paragraphs(&mut again);
        assert_eq!(again.len(), processed.elements.len());
    }

    #[test]
    fn line_final_percentage_loses_its_claim_to_body_punctuation() {
        // The trailing "%)" is stripped before validation, so the claim
        // disappears. Mirrors the fixed processing order.
        let doc = document(vec![paragraph("silt (40%)")], vec![]);
        let (processed, report) = process_document(&doc, &ReplacementRules::new());

        assert_eq!(body_result(&processed, 0).full_text(), "silt (40.");
        assert!(report.percentage_mismatches.is_empty());
    }
}
