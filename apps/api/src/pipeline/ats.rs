use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::fragments::word_count;
use crate::analysis::sanitizer::sanitize_for_output;
use crate::analysis::sections::{check_sections, Section};
use crate::capabilities::Capabilities;
use crate::pipeline::{detect_enriched_skills, ResolvedResume, TextSource};
use crate::scoring::ats::{
    score_resume_with_skills, AtsInput, ExperienceLevel, Rating, RecruiterView, ScoreBreakdown,
};

const TEXT_PREVIEW_CHARS: usize = 1500;

#[derive(Debug, Clone, Serialize)]
pub struct MissingSection {
    pub section: Section,
    pub label: &'static str,
    pub recommendation: &'static str,
}

/// Everything the ATS dashboard shows for one upload.
#[derive(Debug, Clone, Serialize)]
pub struct AtsReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: TextSource,
    pub breakdown: ScoreBreakdown,
    pub rating: Rating,
    pub missing_sections: Vec<MissingSection>,
    pub recruiter_view: RecruiterView,
    pub word_count: usize,
    pub job_description_used: bool,
    pub text_preview: String,
}

/// Scores resolved resume text against the 100-point rubric.
pub async fn build_ats_report(
    resume: ResolvedResume,
    jd_text: Option<&str>,
    experience_level: Option<ExperienceLevel>,
    capabilities: &Capabilities,
) -> AtsReport {
    let generated_at = Utc::now();
    let raw = resume.text.as_str();
    let input = AtsInput {
        resume_text: raw,
        job_description: jd_text,
        experience_level,
        as_of_year: generated_at.year(),
    };

    let (skills, _) = detect_enriched_skills(raw, capabilities).await;
    let breakdown = score_resume_with_skills(&input, &skills);
    let recruiter_view = RecruiterView::build(&input, &breakdown, &skills);

    let missing_sections = check_sections(raw)
        .missing
        .into_iter()
        .map(|section| MissingSection {
            section,
            label: section.label(),
            recommendation: section.recommendation(),
        })
        .collect();

    let head: String = raw.chars().take(TEXT_PREVIEW_CHARS).collect();

    AtsReport {
        analysis_id: Uuid::new_v4(),
        generated_at,
        source: resume.source,
        rating: breakdown.rating(),
        breakdown,
        missing_sections,
        recruiter_view,
        word_count: word_count(raw),
        job_description_used: jd_text.is_some_and(|jd| !jd.trim().is_empty()),
        text_preview: sanitize_for_output(&head),
    }
}
