//! Document loading
//!
//! Reads a .docx report into the flat [`WellDocument`] representation the
//! walker consumes: body paragraphs and tables in document order, plus
//! header/footer paragraph texts per section. Run formatting is not kept;
//! the writer re-applies the uniform report style to everything.

use std::path::Path;

use anyhow::Result;

use super::io::{read_header_footer_sections, validate_docx_file};
use super::models::{DocumentElement, DocumentMetadata, TableCell, WellDocument};

/// Loads and flattens a well-report document.
pub fn load_document(file_path: &Path) -> Result<WellDocument> {
    validate_docx_file(file_path)?;

    let file_size = std::fs::metadata(file_path)?.len();
    let file_data = std::fs::read(file_path)?;
    let docx = docx_rs::read_docx(&file_data)?;

    let title = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Report")
        .to_string();

    let mut elements = Vec::new();
    let mut paragraph_count = 0;
    let mut table_count = 0;
    let mut word_count = 0;

    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let text = paragraph_text(para);
                paragraph_count += 1;
                word_count += text.split_whitespace().count();
                // Empty paragraphs are kept; blank-run collapse needs them.
                elements.push(DocumentElement::Paragraph { text });
            }
            docx_rs::DocumentChild::Table(table) => {
                table_count += 1;
                elements.push(extract_table(table));
            }
            _ => {}
        }
    }

    let sections = read_header_footer_sections(file_path)?;

    let metadata = DocumentMetadata {
        file_path: file_path.to_string_lossy().to_string(),
        file_size,
        paragraph_count,
        table_count,
        word_count,
    };

    Ok(WellDocument {
        title,
        metadata,
        elements,
        sections,
    })
}

/// Concatenates the text of every run in a paragraph.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(text_elem) = run_child {
                    text.push_str(&text_elem.text);
                }
            }
        }
    }
    text
}

/// Extracts a table cell-by-cell, keeping each cell's paragraph list.
fn extract_table(table: &docx_rs::Table) -> DocumentElement {
    let mut rows = Vec::new();

    for table_child in &table.rows {
        let docx_rs::TableChild::TableRow(row) = table_child;
        let mut cells = Vec::new();

        for row_child in &row.cells {
            let docx_rs::TableRowChild::TableCell(cell) = row_child;
            let mut paragraphs = Vec::new();

            for content in &cell.children {
                match content {
                    docx_rs::TableCellContent::Paragraph(para) => {
                        paragraphs.push(paragraph_text(para));
                    }
                    _ => {
                        // Nested tables are out of scope.
                    }
                }
            }

            cells.push(TableCell { paragraphs });
        }

        rows.push(cells);
    }

    DocumentElement::Table { rows }
}
