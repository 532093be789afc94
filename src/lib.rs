//! wellform: normalizer and anomaly checker for geological well-report
//! .docx files
//!
//! This library rewrites a well report with a dictionary of term
//! replacements, normalizes whitespace and punctuation, flags depth-interval
//! discontinuities and percentage compositions that do not sum to 100, and
//! re-applies the uniform report formatting (Times New Roman 10 pt, 1.5
//! spacing, fixed margins, standard header).

pub mod document;
pub mod processing;
pub mod report;
pub mod rules;

// Re-export commonly used types
pub use document::{load_document, write_document, ProcessedDocument, WellDocument};
pub use processing::walker::process_document;
pub use report::AnomalyReport;
pub use rules::ReplacementRules;
