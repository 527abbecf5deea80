//! Per-upload orchestration: resolve resume and JD text, run the analysis
//! for one of the two apps, and assemble the report the UI and API return.
//!
//! Each request runs one linear chain. Blocking extraction happens on the
//! blocking pool; the only other awaits are the optional NER and polish calls.

pub mod ats;
pub mod coaching;
pub mod review;

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::sanitizer::sanitize_text;
use crate::analysis::skills::{detect_skills, SkillSet};
use crate::capabilities::Capabilities;
use crate::extraction::{extract_text_blocking, RawDocument, StrategyAttempt};
use crate::scoring::ats::ExperienceLevel;

/// Resume and job description as submitted, before extraction.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub resume_file: Option<RawDocument>,
    pub resume_text: Option<String>,
    pub jd_file: Option<RawDocument>,
    pub jd_text: Option<String>,
    pub role: String,
    pub experience_level: Option<ExperienceLevel>,
    pub polish: bool,
}

/// Where the analysed resume text came from.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TextSource {
    pub file_name: Option<String>,
    pub strategy: Option<&'static str>,
    pub chars: usize,
}

#[derive(Debug, Clone)]
pub struct ResolvedResume {
    pub text: String,
    pub source: TextSource,
}

/// Outcome of turning a submission into resume text.
#[derive(Debug, Clone)]
pub enum ResumeResolution {
    Ready(ResolvedResume),
    /// A file was uploaded but no strategy produced text and nothing was pasted.
    ExtractionFailed {
        file_name: String,
        attempts: Vec<StrategyAttempt>,
    },
    /// Neither a file nor pasted text was supplied.
    Missing,
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

impl Submission {
    /// Uploaded file first; pasted text when there is no file or it yields nothing.
    pub async fn resolve_resume(&self, capabilities: &Capabilities) -> ResumeResolution {
        let pasted = non_blank(self.resume_text.as_deref());

        let Some(document) = self.resume_file.clone() else {
            return match pasted {
                Some(text) => ResumeResolution::Ready(pasted_resume(text)),
                None => ResumeResolution::Missing,
            };
        };

        let file_name = document.file_name.clone();
        let extraction = extract_text_blocking(document, capabilities.clone()).await;
        if extraction.succeeded() {
            info!(
                "Resume {} extracted by {:?} ({} chars)",
                file_name,
                extraction.strategy,
                extraction.text.len()
            );
            return ResumeResolution::Ready(ResolvedResume {
                source: TextSource {
                    file_name: Some(file_name),
                    strategy: extraction.strategy,
                    chars: extraction.text.chars().count(),
                },
                text: extraction.text,
            });
        }

        match pasted {
            Some(text) => {
                info!("Resume {file_name} yielded no text, using pasted text");
                ResumeResolution::Ready(pasted_resume(text))
            }
            None => {
                warn!("No text could be extracted from {file_name}");
                ResumeResolution::ExtractionFailed {
                    file_name,
                    attempts: extraction.attempts,
                }
            }
        }
    }

    /// Job description text; a JD that cannot be read is treated as absent.
    pub async fn resolve_jd(&self, capabilities: &Capabilities) -> Option<String> {
        if let Some(document) = self.jd_file.clone() {
            let file_name = document.file_name.clone();
            let extraction = extract_text_blocking(document, capabilities.clone()).await;
            if extraction.succeeded() {
                return Some(extraction.text);
            }
            warn!("Job description {file_name} yielded no text, ignoring it");
        }
        non_blank(self.jd_text.as_deref()).map(str::to_string)
    }
}

fn pasted_resume(text: &str) -> ResolvedResume {
    ResolvedResume {
        source: TextSource {
            file_name: None,
            strategy: None,
            chars: text.chars().count(),
        },
        text: text.to_string(),
    }
}

/// Skills detected in the sanitized resume, unioned with recognizer hits when
/// a recognizer is available. Recognizer failures leave the lexicon result.
pub async fn detect_enriched_skills(
    resume_text: &str,
    capabilities: &Capabilities,
) -> (SkillSet, usize) {
    let clean = sanitize_text(resume_text);
    let mut skills = detect_skills(&clean);

    let Some(recognizer) = capabilities.ner.get() else {
        return (skills, 0);
    };
    match recognizer.recognize(&clean).await {
        Ok(entities) => {
            let added = skills.merge_recognized(&entities);
            info!("NER added {added} skills");
            (skills, added)
        }
        Err(e) => {
            warn!("NER enhancement skipped: {e}");
            (skills, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::analysis::ner::{Entity, EntityRecognizer, NerError};
    use crate::capabilities::Capability;

    struct StaticRecognizer(Vec<Entity>);

    #[async_trait]
    impl EntityRecognizer for StaticRecognizer {
        async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, NerError> {
            Ok(self.0.clone())
        }
    }

    struct BrokenRecognizer;

    #[async_trait]
    impl EntityRecognizer for BrokenRecognizer {
        async fn recognize(&self, _text: &str) -> Result<Vec<Entity>, NerError> {
            Err(NerError::Status(503))
        }
    }

    fn text_file(name: &str, body: &str) -> RawDocument {
        RawDocument::new(name, None, Bytes::from(body.to_string()))
    }

    #[tokio::test]
    async fn test_pasted_text_without_file() {
        let submission = Submission {
            resume_text: Some("Python developer".into()),
            ..Submission::default()
        };
        match submission.resolve_resume(&Capabilities::builtin_only()).await {
            ResumeResolution::Ready(resume) => {
                assert_eq!(resume.text, "Python developer");
                assert!(resume.source.file_name.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blank_submission_is_missing() {
        let submission = Submission {
            resume_text: Some("   ".into()),
            ..Submission::default()
        };
        assert!(matches!(
            submission.resolve_resume(&Capabilities::builtin_only()).await,
            ResumeResolution::Missing
        ));
    }

    #[tokio::test]
    async fn test_unparseable_file_reports_attempts() {
        let submission = Submission {
            resume_file: Some(RawDocument::new(
                "resume.pdf",
                None,
                Bytes::from_static(b"not really a pdf"),
            )),
            ..Submission::default()
        };
        match submission.resolve_resume(&Capabilities::builtin_only()).await {
            ResumeResolution::ExtractionFailed {
                file_name,
                attempts,
            } => {
                assert_eq!(file_name, "resume.pdf");
                assert!(!attempts.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_file_falls_back_to_pasted_text() {
        let submission = Submission {
            resume_file: Some(RawDocument::new(
                "resume.pdf",
                None,
                Bytes::from_static(b"not really a pdf"),
            )),
            resume_text: Some("Pasted resume".into()),
            ..Submission::default()
        };
        match submission.resolve_resume(&Capabilities::builtin_only()).await {
            ResumeResolution::Ready(resume) => assert_eq!(resume.text, "Pasted resume"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_text_file_resume_and_jd() {
        let submission = Submission {
            resume_file: Some(text_file("resume.txt", "Rust engineer")),
            jd_file: Some(text_file("jd.txt", "Senior Rust engineer")),
            ..Submission::default()
        };
        let caps = Capabilities::builtin_only();
        match submission.resolve_resume(&caps).await {
            ResumeResolution::Ready(resume) => {
                assert_eq!(resume.source.strategy, Some("plain-text"));
                assert_eq!(resume.source.chars, 13);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            submission.resolve_jd(&caps).await.as_deref(),
            Some("Senior Rust engineer")
        );
    }

    #[tokio::test]
    async fn test_enriched_skills_union_recognizer_hits() {
        let mut caps = Capabilities::builtin_only();
        caps.ner = Capability::Available(Arc::new(StaticRecognizer(vec![Entity {
            text: "Snowflake".into(),
            label: "PRODUCT".into(),
        }])));
        let (skills, added) = detect_enriched_skills("Python and Snowflake", &caps).await;
        assert_eq!(added, 1);
        assert!(skills.contains("Python"));
        assert!(skills.contains("Snowflake"));
    }

    #[tokio::test]
    async fn test_recognizer_failure_keeps_lexicon_skills() {
        let mut caps = Capabilities::builtin_only();
        caps.ner = Capability::Available(Arc::new(BrokenRecognizer));
        let (skills, added) = detect_enriched_skills("Python and Docker", &caps).await;
        assert_eq!(added, 0);
        assert_eq!(skills, detect_skills("Python and Docker"));
    }
}
