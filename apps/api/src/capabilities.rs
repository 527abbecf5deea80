//! Optional capabilities, probed once at startup.
//!
//! Call sites never check for binaries or credentials themselves; they match on
//! the `Capability` stored in `AppState` and skip the step when it is unavailable.

use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::ner::{EntityRecognizer, HttpEntityRecognizer};
use crate::config::Config;
use crate::extraction::ocr::OcrTools;
use crate::interview::polish::{LlmPolisher, TextPolisher};
use crate::llm_client::LlmClient;

/// A feature that is either usable with its handle or absent with a reason.
#[derive(Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Capability::Available(handle) => Some(handle),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    fn status(&self, name: &'static str, kind: CapabilityKind) -> CapabilityStatus {
        match self {
            Capability::Available(_) => CapabilityStatus {
                name,
                kind,
                available: true,
                reason: None,
            },
            Capability::Unavailable { reason } => CapabilityStatus {
                name,
                kind,
                available: false,
                reason: Some(reason.clone()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    Parser,
    Ocr,
    Nlp,
    Polish,
}

#[derive(Debug, Clone, Serialize)]
pub struct CapabilityStatus {
    pub name: &'static str,
    pub kind: CapabilityKind,
    pub available: bool,
    pub reason: Option<String>,
}

/// Everything optional the analysis pipeline may use.
#[derive(Clone)]
pub struct Capabilities {
    pub pdftotext: Capability<PathBuf>,
    pub ocr: Capability<OcrTools>,
    pub ner: Capability<Arc<dyn EntityRecognizer>>,
    pub polisher: Capability<Arc<dyn TextPolisher>>,
}

impl Capabilities {
    /// Probes external binaries and configured backends. Never fails.
    pub fn probe(config: &Config) -> Self {
        let pdftotext = match probe_binary(&config.pdftotext_bin, "-v") {
            Some(path) => Capability::Available(path),
            None => Capability::unavailable(format!("{} not found", config.pdftotext_bin)),
        };

        let ocr = if !config.ocr_enabled {
            Capability::unavailable("disabled by OCR_ENABLED")
        } else {
            match (
                probe_binary(&config.pdftoppm_bin, "-v"),
                probe_binary(&config.tesseract_bin, "--version"),
            ) {
                (Some(pdftoppm), Some(tesseract)) => Capability::Available(OcrTools {
                    pdftoppm,
                    tesseract,
                }),
                (None, _) => Capability::unavailable(format!("{} not found", config.pdftoppm_bin)),
                (_, None) => {
                    Capability::unavailable(format!("{} not found", config.tesseract_bin))
                }
            }
        };

        let ner: Capability<Arc<dyn EntityRecognizer>> = match &config.ner_url {
            Some(url) => Capability::Available(Arc::new(HttpEntityRecognizer::new(url.clone()))),
            None => Capability::unavailable("NER_URL not set"),
        };

        let polisher: Capability<Arc<dyn TextPolisher>> =
            match (&config.anthropic_api_key, config.polish_enabled) {
                (Some(key), true) => {
                    Capability::Available(Arc::new(LlmPolisher::new(LlmClient::new(key.clone()))))
                }
                (Some(_), false) => Capability::unavailable("disabled by POLISH_ENABLED"),
                (None, _) => Capability::unavailable("ANTHROPIC_API_KEY not set"),
            };

        let capabilities = Self {
            pdftotext,
            ocr,
            ner,
            polisher,
        };
        for status in capabilities.report() {
            if status.available {
                info!("Capability {}: available", status.name);
            } else {
                warn!(
                    "Capability {}: unavailable ({})",
                    status.name,
                    status.reason.as_deref().unwrap_or("unknown")
                );
            }
        }
        capabilities
    }

    /// Only the compiled-in parsers; used by tests and when probing is undesired.
    pub fn builtin_only() -> Self {
        Self {
            pdftotext: Capability::unavailable("not probed"),
            ocr: Capability::unavailable("not probed"),
            ner: Capability::unavailable("not probed"),
            polisher: Capability::unavailable("not probed"),
        }
    }

    /// The "parsers detected" listing shown in the sidebar and the capabilities endpoint.
    pub fn report(&self) -> Vec<CapabilityStatus> {
        let builtin = |name: &'static str| CapabilityStatus {
            name,
            kind: CapabilityKind::Parser,
            available: true,
            reason: None,
        };
        vec![
            builtin("pdf-extract"),
            builtin("lopdf"),
            builtin("docx-rs"),
            builtin("docx-xml"),
            self.pdftotext.status("pdftotext", CapabilityKind::Parser),
            self.ocr.status("ocr", CapabilityKind::Ocr),
            self.ner.status("ner", CapabilityKind::Nlp),
            self.polisher.status("polisher", CapabilityKind::Polish),
        ]
    }
}

/// Runs `<bin> <version_flag>` and returns the binary path when it launches.
fn probe_binary(bin: &str, version_flag: &str) -> Option<PathBuf> {
    Command::new(bin)
        .arg(version_flag)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .ok()
        .map(|_| PathBuf::from(bin))
}
