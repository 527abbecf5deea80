use std::io::{Cursor, Read};

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, StructuredDataTag,
    StructuredDataTagChild, Table, TableCellContent, TableChild, TableRowChild,
};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{ExtractionError, ExtractionStrategy};

/// Structured DOCX reader. Walks paragraphs, hyperlinks, tables and content controls.
pub struct DocxRsStrategy;

impl ExtractionStrategy for DocxRsStrategy {
    fn name(&self) -> &'static str {
        "docx-rs"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let mut lines = Vec::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
                DocumentChild::Table(t) => table_lines(t, &mut lines),
                DocumentChild::StructuredDataTag(tag) => sdt_lines(tag, &mut lines),
                _ => {}
            }
        }
        Ok(lines.join("\n"))
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut line = String::new();
    push_inline(&paragraph.children, &mut line);
    line
}

fn push_inline(children: &[ParagraphChild], line: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => {
                for run_child in &run.children {
                    match run_child {
                        RunChild::Text(t) => line.push_str(&t.text),
                        RunChild::Tab(_) => line.push('\t'),
                        _ => {}
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => push_inline(&link.children, line),
            ParagraphChild::StructuredDataTag(tag) => {
                let mut nested = Vec::new();
                sdt_lines(tag, &mut nested);
                line.push_str(&nested.join(" "));
            }
            _ => {}
        }
    }
}

/// One line per cell paragraph, row by row.
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for TableChild::TableRow(row) in &table.rows {
        for TableRowChild::TableCell(cell) in &row.cells {
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => lines.push(paragraph_text(p)),
                    TableCellContent::Table(t) => table_lines(t, lines),
                    TableCellContent::StructuredDataTag(tag) => sdt_lines(tag, lines),
                    _ => {}
                }
            }
        }
    }
}

fn sdt_lines(tag: &StructuredDataTag, lines: &mut Vec<String>) {
    let mut inline = String::new();
    for child in &tag.children {
        match child {
            StructuredDataTagChild::Run(run) => {
                for run_child in &run.children {
                    if let RunChild::Text(t) = run_child {
                        inline.push_str(&t.text);
                    }
                }
            }
            StructuredDataTagChild::Paragraph(p) => lines.push(paragraph_text(p)),
            StructuredDataTagChild::Table(t) => table_lines(t, lines),
            StructuredDataTagChild::StructuredDataTag(nested) => sdt_lines(nested, lines),
            _ => {}
        }
    }
    if !inline.is_empty() {
        lines.push(inline);
    }
}

static PARAGRAPH_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"</w:p>|<w:br\s*/>").unwrap());
static TAB: Lazy<Regex> = Lazy::new(|| Regex::new(r"<w:tab\s*/>").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Raw `word/document.xml` reader; picks up text boxes and anything else the
/// structured reader does not model.
pub struct DocxXmlStrategy;

impl ExtractionStrategy for DocxXmlStrategy {
    fn name(&self) -> &'static str {
        "docx-xml"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .map_err(|e| ExtractionError::Parse(e.to_string()))?
            .read_to_string(&mut xml)?;

        Ok(xml_to_text(&xml))
    }
}

fn xml_to_text(xml: &str) -> String {
    let text = PARAGRAPH_END.replace_all(xml, "\n");
    let text = TAB.replace_all(&text, "\t");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");

    text.lines()
        .map(str::trim)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
