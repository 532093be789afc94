//! Core data structures for document representation
//!
//! This module defines the types used to represent a loaded well report
//! and the processed form produced by the walker, including paragraph
//! segments, highlights, and tables.

use serde::{Deserialize, Serialize};

/// A loaded well-report document, ready for processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellDocument {
    pub title: String,
    pub metadata: DocumentMetadata,
    pub elements: Vec<DocumentElement>,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub file_path: String,
    pub file_size: u64,
    pub paragraph_count: usize,
    pub table_count: usize,
    pub word_count: usize,
}

/// Body-level content in document order. Keeping paragraphs and tables
/// interleaved preserves the input's shape through to the writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DocumentElement {
    Paragraph { text: String },
    Table { rows: Vec<Vec<TableCell>> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    pub paragraphs: Vec<String>,
}

/// Header and footer paragraph texts for one document section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Section {
    pub header: Vec<String>,
    pub footer: Vec<String>,
}

/// Visual marker attached to a rebuilt text segment. Rendered as a
/// highlight color by the writer, never persisted as document data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Highlight {
    #[default]
    None,
    /// Depth interval does not continue from the previous one (yellow).
    DepthDiscontinuity,
    /// Parenthesized percentages do not sum to 100 (red).
    PercentageMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub highlight: Highlight,
}

impl Segment {
    pub fn new(text: impl Into<String>, highlight: Highlight) -> Self {
        Self {
            text: text.into(),
            highlight,
        }
    }
}

/// The rebuilt run sequence for one paragraph: ordered segments plus an
/// optional hard line break between the depth segment and the remainder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphResult {
    pub segments: Vec<Segment>,
    pub break_after_first: bool,
}

impl ParagraphResult {
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when the paragraph carries no visible text at all.
    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| s.text.trim().is_empty())
    }

    /// Concatenated text of all segments, without break markers.
    pub fn full_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Processed mirror of [`WellDocument`], ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub elements: Vec<ProcessedElement>,
    pub sections: Vec<ProcessedSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProcessedElement {
    Paragraph(ParagraphResult),
    Table { rows: Vec<Vec<ProcessedCell>> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedCell {
    pub paragraphs: Vec<ParagraphResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedSection {
    pub header: Vec<ParagraphResult>,
    pub footer: Vec<ParagraphResult>,
}

/// Paragraph-bearing area of the document, used in anomaly records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    Body,
    Table,
    Header,
    Footer,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::Body => write!(f, "body"),
            Region::Table => write!(f, "table"),
            Region::Header => write!(f, "header"),
            Region::Footer => write!(f, "footer"),
        }
    }
}
