use std::io::Write;
use std::path::PathBuf;
use std::process::Command;

use lopdf::Document;

use super::{ExtractionError, ExtractionStrategy};

/// Primary PDF parser.
pub struct PdfExtractStrategy;

impl ExtractionStrategy for PdfExtractStrategy {
    fn name(&self) -> &'static str {
        "pdf-extract"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))
    }
}

/// Page-by-page extraction with lopdf. Pages that fail are skipped.
pub struct LopdfStrategy;

impl ExtractionStrategy for LopdfStrategy {
    fn name(&self) -> &'static str {
        "lopdf"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let doc = Document::load_mem(bytes).map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let pages: Vec<String> = doc
            .get_pages()
            .keys()
            .filter_map(|page_num| doc.extract_text(&[*page_num]).ok())
            .filter(|t| !t.trim().is_empty())
            .collect();

        Ok(pages.join("\n"))
    }
}

/// Poppler's `pdftotext`, run against a temp copy of the upload.
pub struct PdftotextStrategy {
    pub bin: PathBuf,
}

impl ExtractionStrategy for PdftotextStrategy {
    fn name(&self) -> &'static str {
        "pdftotext"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let mut input = tempfile::Builder::new().suffix(".pdf").tempfile()?;
        input.write_all(bytes)?;
        input.flush()?;

        let output = Command::new(&self.bin)
            .arg("-layout")
            .arg(input.path())
            .arg("-")
            .output()?;

        if !output.status.success() {
            return Err(ExtractionError::Tool {
                tool: self.bin.display().to_string(),
                status: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
