use serde::Serialize;

use crate::analysis::sanitizer::sanitize_lines;
use crate::capabilities::Capabilities;
use crate::interview::answers::{generate_sample_answer, QuestionAnswerPair};
use crate::interview::polish::{finish_answer, polish_rewrite};
use crate::scoring::coach::{score_answer, AnswerScore};

/// Sample answer for one question, grounded in the sanitized resume.
pub async fn answer_question(
    question: &str,
    resume_text: &str,
    role: &str,
    polish: bool,
    capabilities: &Capabilities,
) -> QuestionAnswerPair {
    let clean = sanitize_lines(resume_text).join("\n");
    let draft = generate_sample_answer(question, &clean, role);
    finish_answer(&capabilities.polisher, polish, question.trim(), draft).await
}

#[derive(Debug, Clone, Serialize)]
pub struct CoachReport {
    #[serde(flatten)]
    pub score: AnswerScore,
    /// Polished form of `improved`, when requested and accepted.
    pub polished: Option<String>,
}

pub async fn coach_answer(answer: &str, polish: bool, capabilities: &Capabilities) -> CoachReport {
    let score = score_answer(answer);
    let polished = polish_rewrite(&capabilities.polisher, polish, &score.improved).await;
    CoachReport { score, polished }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::capabilities::Capability;
    use crate::interview::polish::tests::FixedPolisher;

    #[tokio::test]
    async fn test_answer_never_leaks_contact_details() {
        let resume = "Jane Doe jane@example.com +1 415 555 0123\n\
                      Built a churn model in Python that lifted retention by 12%";
        let pair = answer_question(
            "Tell me about yourself.",
            resume,
            "",
            false,
            &Capabilities::builtin_only(),
        )
        .await;
        assert!(!pair.polished);
        assert!(!pair.answer.contains('@'));
        assert!(!pair.answer.contains("[PHONE]"));
        assert!(!pair.answer.contains("555"));
        assert!(pair.answer.contains("12%"));
    }

    #[tokio::test]
    async fn test_coach_with_polisher() {
        let mut caps = Capabilities::builtin_only();
        caps.polisher = Capability::Available(Arc::new(FixedPolisher(
            "Situation: a slow report. Action: I rewrote it.",
        )));
        let report = coach_answer("I rewrote the report.", true, &caps).await;
        assert_eq!(report.score.score, 4);
        assert_eq!(
            report.polished.as_deref(),
            Some("Situation: a slow report. Action: I rewrote it.")
        );
    }

    #[tokio::test]
    async fn test_coach_blank_answer_has_nothing_to_polish() {
        let mut caps = Capabilities::builtin_only();
        caps.polisher = Capability::Available(Arc::new(FixedPolisher("anything")));
        let report = coach_answer("", true, &caps).await;
        assert_eq!(report.score.score, 0);
        assert!(report.polished.is_none());
    }
}
