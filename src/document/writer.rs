//! Document serialization
//!
//! Builds the output .docx from a [`ProcessedDocument`]: one run per
//! segment in the uniform report style, a hard line break after depth
//! segments, highlight colors for flagged runs, fixed page margins, and the
//! well-name header template when a name was supplied. The document is
//! built whole and written once; nothing is mutated in place.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, Header, LineSpacing, LineSpacingType, Paragraph, Run,
    RunFonts, Table, TableCell, TableRow,
};

use super::models::{
    Highlight, ParagraphResult, ProcessedCell, ProcessedDocument, ProcessedElement, Segment,
};

const FONT_NAME: &str = "Times New Roman";

/// Serializes the processed document to `out_path`. When `well_name` is
/// given, the header is replaced by the fixed template and the footer is
/// cleared; otherwise the processed header/footer paragraphs are written.
pub fn write_document(
    document: &ProcessedDocument,
    well_name: Option<&str>,
    out_path: &Path,
) -> Result<()> {
    let file = File::create(out_path)
        .with_context(|| format!("failed to create {}", out_path.display()))?;
    let docx = build_docx(document, well_name);
    docx.build()
        .pack(file)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    Ok(())
}

/// Assembles the full document object. Split from [`write_document`] so
/// tests can pack into an in-memory buffer.
pub fn build_docx(document: &ProcessedDocument, well_name: Option<&str>) -> Docx {
    // Document defaults mirror the per-run style, so anything Word adds
    // later inherits the same look.
    let mut docx = Docx::new()
        .default_fonts(report_fonts())
        .default_size(20) // 10 pt, in half-points
        .page_margin(page_margins());

    for element in &document.elements {
        match element {
            ProcessedElement::Paragraph(result) => {
                docx = docx.add_paragraph(build_paragraph(result));
            }
            ProcessedElement::Table { rows } => {
                docx = docx.add_table(build_table(rows));
            }
        }
    }

    match well_name {
        Some(name) => {
            docx = docx.header(template_header(name)).footer(Footer::new());
        }
        None => {
            if let Some(section) = document.sections.first() {
                if !section.header.is_empty() {
                    let mut header = Header::new();
                    for paragraph in &section.header {
                        header = header.add_paragraph(build_paragraph(paragraph));
                    }
                    docx = docx.header(header);
                }
                if !section.footer.is_empty() {
                    let mut footer = Footer::new();
                    for paragraph in &section.footer {
                        footer = footer.add_paragraph(build_paragraph(paragraph));
                    }
                    docx = docx.footer(footer);
                }
            }
        }
    }

    docx
}

/// Page margins in twips: top 2.29 cm, bottom 1.27 cm, sides 2.54 cm.
fn page_margins() -> docx_rs::PageMargin {
    docx_rs::PageMargin::new()
        .top(1298)
        .bottom(720)
        .left(1440)
        .right(1440)
}

fn report_fonts() -> RunFonts {
    RunFonts::new()
        .ascii(FONT_NAME)
        .hi_ansi(FONT_NAME)
        .east_asia(FONT_NAME)
        .cs(FONT_NAME)
}

fn base_run() -> Run {
    Run::new().fonts(report_fonts()).size(20)
}

/// 1.5 line spacing with zero spacing before and after.
fn body_spacing() -> LineSpacing {
    LineSpacing::new()
        .before(0)
        .after(0)
        .line_rule(LineSpacingType::Auto)
        .line(360)
}

fn single_spacing() -> LineSpacing {
    LineSpacing::new().line_rule(LineSpacingType::Auto).line(240)
}

fn styled_run(segment: &Segment) -> Run {
    let run = base_run().add_text(segment.text.as_str());
    match segment.highlight {
        Highlight::None => run,
        Highlight::DepthDiscontinuity => run.highlight("yellow"),
        Highlight::PercentageMismatch => run.highlight("red"),
    }
}

fn build_paragraph(result: &ParagraphResult) -> Paragraph {
    let mut paragraph = Paragraph::new().line_spacing(body_spacing());
    let mut segments = result.segments.iter();

    if let Some(first) = segments.next() {
        paragraph = paragraph.add_run(styled_run(first));
        if result.break_after_first {
            paragraph = paragraph.add_run(base_run().add_break(BreakType::TextWrapping));
        }
        for segment in segments {
            paragraph = paragraph.add_run(styled_run(segment));
        }
    }

    paragraph
}

fn build_table(rows: &[Vec<ProcessedCell>]) -> Table {
    let table_rows = rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.iter()
                    .map(|cell| {
                        let mut out = TableCell::new();
                        // A cell must hold at least one paragraph.
                        if cell.paragraphs.is_empty() {
                            out = out.add_paragraph(build_paragraph(&ParagraphResult::empty()));
                        }
                        for paragraph in &cell.paragraphs {
                            out = out.add_paragraph(build_paragraph(paragraph));
                        }
                        out
                    })
                    .collect(),
            )
        })
        .collect();
    Table::new(table_rows)
}

/// Fixed 3-line header: centered upper-cased well name, centered underlined
/// "SAMPLE DESCRIPTIONS", left-aligned "Depth (m)", with blank spacer lines
/// between, all single-spaced.
fn template_header(well_name: &str) -> Header {
    Header::new()
        .add_paragraph(header_line(
            &well_name.to_uppercase(),
            AlignmentType::Center,
            false,
        ))
        .add_paragraph(spacer_line())
        .add_paragraph(header_line("SAMPLE DESCRIPTIONS", AlignmentType::Center, true))
        .add_paragraph(spacer_line())
        .add_paragraph(header_line("Depth (m)", AlignmentType::Left, false))
        .add_paragraph(spacer_line())
}

fn header_line(text: &str, align: AlignmentType, underlined: bool) -> Paragraph {
    let mut run = base_run().add_text(text);
    if underlined {
        run = run.underline("single");
    }
    Paragraph::new()
        .align(align)
        .line_spacing(single_spacing())
        .add_run(run)
}

fn spacer_line() -> Paragraph {
    Paragraph::new().line_spacing(single_spacing())
}
