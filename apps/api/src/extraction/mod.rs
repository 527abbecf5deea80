//! Document text extraction.
//!
//! Each document kind has an ordered list of strategies. They run one after
//! another until one yields non-blank text; every attempt is recorded so the
//! caller can explain a failure. Extraction itself never errors: the worst
//! outcome is an empty `Extraction`.

pub mod docx;
pub mod ocr;
pub mod pdf;

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::capabilities::{Capabilities, Capability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
    Unknown,
}

impl DocumentKind {
    /// Resolves the kind from the file extension, then the content type, then magic bytes.
    pub fn detect(file_name: &str, content_type: Option<&str>, bytes: &[u8]) -> Self {
        let name = file_name.to_ascii_lowercase();
        if name.ends_with(".pdf") {
            return DocumentKind::Pdf;
        }
        if name.ends_with(".docx") {
            return DocumentKind::Docx;
        }
        if name.ends_with(".txt") || name.ends_with(".md") {
            return DocumentKind::PlainText;
        }

        match content_type.map(|c| c.to_ascii_lowercase()) {
            Some(ct) if ct == "application/pdf" => return DocumentKind::Pdf,
            Some(ct) if ct.contains("wordprocessingml") => return DocumentKind::Docx,
            Some(ct) if ct.starts_with("text/plain") => return DocumentKind::PlainText,
            _ => {}
        }

        if bytes.starts_with(b"%PDF") {
            DocumentKind::Pdf
        } else if bytes.starts_with(b"PK\x03\x04") {
            DocumentKind::Docx
        } else {
            DocumentKind::Unknown
        }
    }
}

/// An uploaded file, consumed once by the extractor.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

impl RawDocument {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: Bytes) -> Self {
        let file_name = file_name.into();
        let kind = DocumentKind::detect(&file_name, content_type, &bytes);
        Self {
            file_name,
            kind,
            bytes,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool} exited with {status}")]
    Tool { tool: String, status: String },

    #[error("parser panicked")]
    Panicked,
}

/// What happened when a single strategy ran.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Succeeded { chars: usize },
    Empty,
    Failed { error: String },
    Unavailable { reason: String },
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Succeeded { chars } => write!(f, "extracted {chars} chars"),
            AttemptOutcome::Empty => f.write_str("no text found"),
            AttemptOutcome::Failed { error } => write!(f, "failed: {error}"),
            AttemptOutcome::Unavailable { reason } => write!(f, "not available: {reason}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StrategyAttempt {
    pub strategy: &'static str,
    #[serde(flatten)]
    pub outcome: AttemptOutcome,
}

/// Result of running the strategy chain. `text` is empty when every strategy failed.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub text: String,
    pub strategy: Option<&'static str>,
    pub attempts: Vec<StrategyAttempt>,
}

impl Extraction {
    pub fn succeeded(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// A single way of turning document bytes into text.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// UTF-8 text with lossy decoding; used for `.txt` job descriptions.
pub struct PlainTextStrategy;

impl ExtractionStrategy for PlainTextStrategy {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

struct PlannedStrategy {
    name: &'static str,
    strategy: Capability<Box<dyn ExtractionStrategy>>,
}

impl PlannedStrategy {
    fn builtin(strategy: impl ExtractionStrategy + 'static) -> Self {
        Self {
            name: strategy.name(),
            strategy: Capability::Available(Box::new(strategy)),
        }
    }
}

fn pdf_plan(capabilities: &Capabilities) -> Vec<PlannedStrategy> {
    let mut plan = vec![
        PlannedStrategy::builtin(pdf::PdfExtractStrategy),
        PlannedStrategy::builtin(pdf::LopdfStrategy),
    ];

    plan.push(PlannedStrategy {
        name: "pdftotext",
        strategy: match &capabilities.pdftotext {
            Capability::Available(bin) => Capability::Available(Box::new(pdf::PdftotextStrategy {
                bin: bin.clone(),
            })),
            Capability::Unavailable { reason } => Capability::unavailable(reason.clone()),
        },
    });

    plan.push(PlannedStrategy {
        name: "ocr",
        strategy: match &capabilities.ocr {
            Capability::Available(tools) => {
                Capability::Available(Box::new(ocr::OcrStrategy::new(tools.clone())))
            }
            Capability::Unavailable { reason } => Capability::unavailable(reason.clone()),
        },
    });

    plan
}

fn docx_plan() -> Vec<PlannedStrategy> {
    vec![
        PlannedStrategy::builtin(docx::DocxRsStrategy),
        PlannedStrategy::builtin(docx::DocxXmlStrategy),
    ]
}

fn plan_for(kind: DocumentKind, capabilities: &Capabilities) -> Vec<PlannedStrategy> {
    match kind {
        DocumentKind::Pdf => pdf_plan(capabilities),
        DocumentKind::Docx => docx_plan(),
        DocumentKind::PlainText => vec![PlannedStrategy::builtin(PlainTextStrategy)],
        DocumentKind::Unknown => {
            let mut plan = pdf_plan(capabilities);
            plan.extend(docx_plan());
            plan
        }
    }
}

/// Runs the strategy chain for the document's kind until one yields text.
pub fn extract_text(document: &RawDocument, capabilities: &Capabilities) -> Extraction {
    run_plan(
        plan_for(document.kind, capabilities),
        &document.file_name,
        &document.bytes,
    )
}

fn run_plan(plan: Vec<PlannedStrategy>, file_name: &str, bytes: &[u8]) -> Extraction {
    let mut attempts = Vec::with_capacity(plan.len());

    for planned in plan {
        let strategy = match planned.strategy {
            Capability::Available(strategy) => strategy,
            Capability::Unavailable { reason } => {
                debug!("Skipping {} for {file_name}: {reason}", planned.name);
                attempts.push(StrategyAttempt {
                    strategy: planned.name,
                    outcome: AttemptOutcome::Unavailable { reason },
                });
                continue;
            }
        };

        let result = catch_unwind(AssertUnwindSafe(|| strategy.extract(bytes)))
            .unwrap_or(Err(ExtractionError::Panicked));

        match result {
            Ok(text) if !text.trim().is_empty() => {
                info!(
                    "Extracted {} chars from {file_name} with {}",
                    text.len(),
                    planned.name
                );
                attempts.push(StrategyAttempt {
                    strategy: planned.name,
                    outcome: AttemptOutcome::Succeeded { chars: text.len() },
                });
                return Extraction {
                    text,
                    strategy: Some(planned.name),
                    attempts,
                };
            }
            Ok(_) => {
                debug!("{} produced no text for {file_name}", planned.name);
                attempts.push(StrategyAttempt {
                    strategy: planned.name,
                    outcome: AttemptOutcome::Empty,
                });
            }
            Err(e) => {
                debug!("{} failed for {file_name}: {e}", planned.name);
                attempts.push(StrategyAttempt {
                    strategy: planned.name,
                    outcome: AttemptOutcome::Failed {
                        error: e.to_string(),
                    },
                });
            }
        }
    }

    warn!(
        "All {} extraction strategies failed for {file_name}",
        attempts.len()
    );
    Extraction {
        text: String::new(),
        strategy: None,
        attempts,
    }
}

/// Runs `extract_text` on the blocking pool; parsers and OCR subprocesses are synchronous.
pub async fn extract_text_blocking(
    document: RawDocument,
    capabilities: Capabilities,
) -> Extraction {
    let file_name = document.file_name.clone();
    match tokio::task::spawn_blocking(move || extract_text(&document, &capabilities)).await {
        Ok(extraction) => extraction,
        Err(e) => {
            warn!("Extraction task for {file_name} aborted: {e}");
            Extraction {
                text: String::new(),
                strategy: None,
                attempts: vec![],
            }
        }
    }
}
