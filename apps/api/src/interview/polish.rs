//! Optional rewrite of generated answers by a language model.
//!
//! The polisher is a seam: `Capabilities` carries an `Arc<dyn TextPolisher>`
//! when an API key is configured. Whatever comes back is checked before it
//! replaces the template; a rewrite that is blank or mentions a number the
//! template did not contain is discarded.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::analysis::sanitizer::strip_placeholders;
use crate::capabilities::Capability;
use crate::interview::answers::QuestionAnswerPair;
use crate::llm_client::prompts::{coach_rewrite_prompt, sample_answer_prompt, POLISH_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)*").unwrap());

/// What is being polished; backends may prompt differently per task.
#[derive(Debug, Clone, Copy)]
pub enum PolishTask<'a> {
    SampleAnswer { question: &'a str, draft: &'a str },
    CoachRewrite { rewrite: &'a str },
}

impl PolishTask<'_> {
    fn draft(&self) -> &str {
        match self {
            PolishTask::SampleAnswer { draft, .. } => draft,
            PolishTask::CoachRewrite { rewrite } => rewrite,
        }
    }
}

#[async_trait]
pub trait TextPolisher: Send + Sync {
    async fn polish(&self, task: PolishTask<'_>) -> Result<String, LlmError>;
}

/// Polishes through the Anthropic Messages API.
pub struct LlmPolisher {
    llm: LlmClient,
}

impl LlmPolisher {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl TextPolisher for LlmPolisher {
    async fn polish(&self, task: PolishTask<'_>) -> Result<String, LlmError> {
        let prompt = match task {
            PolishTask::SampleAnswer { question, draft } => sample_answer_prompt(question, draft),
            PolishTask::CoachRewrite { rewrite } => coach_rewrite_prompt(rewrite),
        };
        self.llm.call_text(&prompt, POLISH_SYSTEM).await
    }
}

fn numbers(text: &str) -> HashSet<&str> {
    NUMBER.find_iter(text).map(|m| m.as_str()).collect()
}

/// Returns the candidate when it is safe to show in place of `template`.
pub fn accept_polished(template: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() {
        return None;
    }
    let allowed = numbers(template);
    if let Some(invented) = numbers(candidate).into_iter().find(|n| !allowed.contains(n)) {
        debug!("Rejecting polished text: introduces number {invented}");
        return None;
    }
    Some(candidate.to_string())
}

/// Runs the polisher when available and asked for. `None` means keep the draft.
async fn try_polish(
    polisher: &Capability<Arc<dyn TextPolisher>>,
    requested: bool,
    task: PolishTask<'_>,
) -> Option<String> {
    if !requested {
        return None;
    }
    let polisher = polisher.get()?;
    match polisher.polish(task).await {
        Ok(candidate) => {
            let accepted = accept_polished(task.draft(), &candidate);
            if accepted.is_none() {
                warn!("Polished text rejected, keeping template");
            }
            accepted
        }
        Err(e) => {
            warn!("Polish step failed, keeping template: {e}");
            None
        }
    }
}

/// Final form of a sample answer: polished when possible, placeholders stripped.
pub async fn finish_answer(
    polisher: &Capability<Arc<dyn TextPolisher>>,
    requested: bool,
    question: &str,
    draft: String,
) -> QuestionAnswerPair {
    let task = PolishTask::SampleAnswer {
        question,
        draft: &draft,
    };
    let candidate = try_polish(polisher, requested, task).await;
    let (answer, polished) = match candidate {
        Some(text) => (text, true),
        None => (draft, false),
    };
    QuestionAnswerPair {
        question: question.to_string(),
        answer: strip_placeholders(&answer),
        polished,
    }
}

/// Polished variant of the coach's STAR rewrite, if one was produced and accepted.
pub async fn polish_rewrite(
    polisher: &Capability<Arc<dyn TextPolisher>>,
    requested: bool,
    rewrite: &str,
) -> Option<String> {
    if rewrite.trim().is_empty() {
        return None;
    }
    try_polish(polisher, requested, PolishTask::CoachRewrite { rewrite }).await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Returns a fixed string for every task.
    pub(crate) struct FixedPolisher(pub &'static str);

    #[async_trait]
    impl TextPolisher for FixedPolisher {
        async fn polish(&self, _task: PolishTask<'_>) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingPolisher;

    #[async_trait]
    impl TextPolisher for FailingPolisher {
        async fn polish(&self, _task: PolishTask<'_>) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn available(p: impl TextPolisher + 'static) -> Capability<Arc<dyn TextPolisher>> {
        Capability::Available(Arc::new(p))
    }

    #[test]
    fn test_accepts_rewrite_with_same_numbers() {
        let out = accept_polished(
            "Cut costs by 40% for 1,200 clients.",
            "Reduced cost 40% (1,200 clients).",
        );
        assert_eq!(out.as_deref(), Some("Reduced cost 40% (1,200 clients)."));
    }

    #[test]
    fn test_rejects_invented_numbers_and_blank() {
        assert!(accept_polished("Cut costs by 40%.", "Cut costs by 45%.").is_none());
        assert!(accept_polished("Led the team.", "Led a team of 12.").is_none());
        assert!(accept_polished("Led the team.", "   ").is_none());
    }

    #[tokio::test]
    async fn test_finish_answer_uses_accepted_polish() {
        let polisher = available(FixedPolisher("I led the migration to Kubernetes."));
        let pair =
            finish_answer(&polisher, true, "Q?", "I led the migration [PHONE].".into()).await;
        assert!(pair.polished);
        assert_eq!(pair.answer, "I led the migration to Kubernetes.");
    }

    #[tokio::test]
    async fn test_finish_answer_keeps_template_when_polish_invents_numbers() {
        let polisher = available(FixedPolisher("I led 3 migrations."));
        let pair =
            finish_answer(&polisher, true, "Q?", "I led the migration [NUMBER].".into()).await;
        assert!(!pair.polished);
        assert_eq!(pair.answer, "I led the migration .");
    }

    #[tokio::test]
    async fn test_finish_answer_skips_when_not_requested_or_unavailable() {
        let polisher = available(FixedPolisher("polished"));
        let pair = finish_answer(&polisher, false, "Q?", "draft".into()).await;
        assert!(!pair.polished);
        assert_eq!(pair.answer, "draft");

        let missing: Capability<Arc<dyn TextPolisher>> = Capability::unavailable("no key");
        let pair = finish_answer(&missing, true, "Q?", "draft".into()).await;
        assert!(!pair.polished);
    }

    #[tokio::test]
    async fn test_backend_errors_keep_template() {
        let polisher = available(FailingPolisher);
        let pair = finish_answer(&polisher, true, "Q?", "draft".into()).await;
        assert!(!pair.polished);
        assert_eq!(pair.answer, "draft");
        assert!(polish_rewrite(&polisher, true, "Situation: [context].").await.is_none());
    }

    #[tokio::test]
    async fn test_polish_rewrite_returns_accepted_text() {
        let polisher = available(FixedPolisher("Situation: a legacy system."));
        assert_eq!(
            polish_rewrite(&polisher, true, "Situation: [context].").await.as_deref(),
            Some("Situation: a legacy system.")
        );
        assert!(polish_rewrite(&polisher, true, "").await.is_none());
    }
}
