//! OCR for scanned PDFs: rasterize with `pdftoppm`, then read each page with `tesseract`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, warn};

use super::{ExtractionError, ExtractionStrategy};

const RENDER_DPI: &str = "300";
const MAX_PAGES: usize = 10;

/// Resolved OCR binaries.
#[derive(Debug, Clone)]
pub struct OcrTools {
    pub pdftoppm: PathBuf,
    pub tesseract: PathBuf,
}

pub struct OcrStrategy {
    tools: OcrTools,
}

impl OcrStrategy {
    pub fn new(tools: OcrTools) -> Self {
        Self { tools }
    }

    fn rasterize(&self, pdf: &Path, out_prefix: &Path) -> Result<(), ExtractionError> {
        let status = Command::new(&self.tools.pdftoppm)
            .args(["-r", RENDER_DPI, "-png", "-l"])
            .arg(MAX_PAGES.to_string())
            .arg(pdf)
            .arg(out_prefix)
            .status()?;
        if !status.success() {
            return Err(ExtractionError::Tool {
                tool: self.tools.pdftoppm.display().to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }

    fn read_page(&self, image: &Path) -> Result<String, ExtractionError> {
        let output = Command::new(&self.tools.tesseract)
            .arg(image)
            .arg("stdout")
            .output()?;
        if !output.status.success() {
            return Err(ExtractionError::Tool {
                tool: self.tools.tesseract.display().to_string(),
                status: output.status.to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl ExtractionStrategy for OcrStrategy {
    fn name(&self) -> &'static str {
        "ocr"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let workdir = tempfile::tempdir()?;
        let pdf_path = workdir.path().join("input.pdf");
        fs::write(&pdf_path, bytes)?;

        self.rasterize(&pdf_path, &workdir.path().join("page"))?;

        let pages = page_images(workdir.path())?;
        debug!("OCR rasterized {} pages", pages.len());

        Ok(self.read_pages(&pages))
    }
}

impl OcrStrategy {
    /// Pages tesseract cannot read are skipped.
    fn read_pages(&self, pages: &[PathBuf]) -> String {
        let mut text = Vec::with_capacity(pages.len());
        for page in pages {
            match self.read_page(page) {
                Ok(page_text) => text.push(page_text),
                Err(e) => warn!("OCR skipped {}: {e}", page.display()),
            }
        }
        text.join("\n")
    }
}

/// `pdftoppm` names pages `page-1.png`, `page-01.png`, ... depending on page count.
fn page_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractionError> {
    let mut pages: Vec<(u32, PathBuf)> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            let number = stem.strip_prefix("page-")?.parse::<u32>().ok()?;
            (path.extension()? == "png").then_some((number, path))
        })
        .collect();
    pages.sort_by_key(|(number, _)| *number);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}
