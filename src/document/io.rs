//! File validation and raw .docx part access
//!
//! Validates that an input file is a real Word document, and pulls
//! header/footer paragraph texts straight out of the archive's
//! `word/header*.xml` / `word/footer*.xml` parts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use super::models::Section;

/// Validates that the file is a legitimate .docx file
pub(crate) fn validate_docx_file(file_path: &Path) -> Result<()> {
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");

    if extension != "docx" {
        bail!(
            "Invalid file format. Expected .docx file, got .{}\n\
            Note: wellform only supports Word .docx reports (not .doc, .xlsx, .zip, etc.)",
            extension
        );
    }

    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    if archive.by_name("word/document.xml").is_err() {
        // A replacement table passed in place of the report is a likely mixup
        if archive.by_name("xl/workbook.xml").is_ok() {
            bail!(
                "This appears to be an Excel file (.xlsx).\n\
                wellform only processes Word documents (.docx); \
                pass the replacement table via --rules instead."
            );
        }

        bail!(
            "Invalid .docx file: missing word/document.xml\n\
            This file may be corrupted or is not a valid Word document."
        );
    }

    Ok(())
}

/// Reads header and footer paragraph texts from the archive. All header
/// parts are aggregated ahead of all footer parts, in entry-name order,
/// into a single section.
pub(crate) fn read_header_footer_sections(file_path: &Path) -> Result<Vec<Section>> {
    static HEADER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/header\d*\.xml$").unwrap());
    static FOOTER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^word/footer\d*\.xml$").unwrap());

    let file = File::open(file_path)?;
    let mut archive = ZipArchive::new(file)?;

    let mut header_names: Vec<String> = Vec::new();
    let mut footer_names: Vec<String> = Vec::new();
    for name in archive.file_names() {
        if HEADER_NAME.is_match(name) {
            header_names.push(name.to_string());
        } else if FOOTER_NAME.is_match(name) {
            footer_names.push(name.to_string());
        }
    }
    header_names.sort();
    footer_names.sort();

    let mut section = Section::default();
    for name in &header_names {
        let xml = read_entry(&mut archive, name)?;
        section.header.extend(extract_paragraph_texts(&xml));
    }
    for name in &footer_names {
        let xml = read_entry(&mut archive, name)?;
        section.footer.extend(extract_paragraph_texts(&xml));
    }

    Ok(vec![section])
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<String> {
    let mut entry = archive.by_name(name)?;
    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}

/// Splits part XML on `</w:p>` and concatenates the `<w:t>` contents of
/// each paragraph. Empty paragraphs are kept so spacing survives the walk.
fn extract_paragraph_texts(xml: &str) -> Vec<String> {
    static TEXT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<w:t[^>]*>(.*?)</w:t>").unwrap());

    let mut paragraphs = Vec::new();
    for chunk in xml.split("</w:p>") {
        if !chunk.contains("<w:p") {
            continue;
        }
        let text: String = TEXT_RE
            .captures_iter(chunk)
            .map(|caps| unescape_xml(&caps[1]))
            .collect();
        paragraphs.push(text);
    }
    paragraphs
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
