use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::analysis::fragments::top_lines;
use crate::analysis::keywords::{keyword_coverage, KeywordCoverage};
use crate::analysis::sanitizer::{sanitize_for_output, sanitize_lines, sanitize_text};
use crate::analysis::sections::check_sections;
use crate::analysis::skills::SkillSet;
use crate::capabilities::Capabilities;
use crate::interview::questions::{generate_questions, QuestionSet};
use crate::pipeline::{detect_enriched_skills, ResolvedResume, TextSource};
use crate::scoring::role_match::{role_match_score_with, RoleMatch};

const SHORT_RESUME_CHARS: usize = 300;
const KEYWORD_SAMPLE: usize = 25;
const PREVIEW_CHARS: usize = 900;
const INSIGHT_LINES: usize = 6;
const TOP_SKILLS: usize = 8;

/// Everything the review dashboard shows for one upload.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewReport {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub source: TextSource,
    pub suggestions: Vec<String>,
    pub skills: SkillSet,
    pub recognized_skills_added: usize,
    /// Samples of covered and missing JD keywords. `None` without a JD.
    pub keyword_coverage: Option<KeywordCoverage>,
    /// `None` when no target role was given.
    pub role_match: Option<RoleMatch>,
    pub top_skills: Vec<String>,
    pub questions: QuestionSet,
    pub insights: ResumeInsights,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeInsights {
    /// Display-sanitized start of the resume.
    pub preview: String,
    pub top_lines: Vec<String>,
}

fn quick_fixes(raw: &str, sanitized: &str) -> Vec<String> {
    let mut suggestions = Vec::new();
    if sanitized.chars().count() < SHORT_RESUME_CHARS {
        suggestions
            .push("Resume text seems short: add more project details and outcomes.".to_string());
    }
    if !raw.to_lowercase().contains("linkedin") {
        suggestions.push("Consider adding a LinkedIn link in the contact section.".to_string());
    }
    for section in check_sections(raw).missing {
        suggestions.push(section.recommendation().to_string());
    }
    suggestions
}

fn preview(sanitized: &str) -> String {
    let head: String = sanitized.chars().take(PREVIEW_CHARS).collect();
    let mut preview = sanitize_for_output(&head);
    if sanitized.chars().count() > PREVIEW_CHARS {
        preview.push('…');
    }
    preview
}

fn sampled(coverage: KeywordCoverage) -> KeywordCoverage {
    KeywordCoverage {
        covered: coverage.covered_sample(KEYWORD_SAMPLE),
        missing: coverage.missing_sample(KEYWORD_SAMPLE),
        ..coverage
    }
}

/// Runs the interview-prep analysis over resolved resume text.
pub async fn build_review(
    resume: ResolvedResume,
    jd_text: Option<&str>,
    role: &str,
    capabilities: &Capabilities,
) -> ReviewReport {
    let raw = resume.text.as_str();
    let sanitized = sanitize_text(raw);
    let lines = sanitize_lines(raw).join("\n");

    let (skills, recognized_skills_added) = detect_enriched_skills(raw, capabilities).await;

    let keyword_coverage = jd_text
        .filter(|jd| !jd.trim().is_empty())
        .map(|jd| sampled(keyword_coverage(&sanitized, jd)));

    let role = role.trim();
    let role_match = (!role.is_empty())
        .then(|| RoleMatch::new(role, role_match_score_with(&sanitized, role, skills.len())));

    let questions = generate_questions(raw, &skills, role);

    ReviewReport {
        analysis_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        source: resume.source,
        suggestions: quick_fixes(raw, &sanitized),
        top_skills: skills.top(TOP_SKILLS),
        skills,
        recognized_skills_added,
        keyword_coverage,
        role_match,
        questions,
        insights: ResumeInsights {
            preview: preview(&sanitized),
            top_lines: top_lines(&lines, INSIGHT_LINES),
        },
    }
}
