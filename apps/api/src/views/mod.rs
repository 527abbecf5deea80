//! Server-rendered pages. Every page extends `base.html`, which shows the
//! capability sidebar, so each struct carries `capabilities`.

use askama::Template;

use crate::analysis::sanitizer::sanitize_lines;
use crate::capabilities::CapabilityStatus;
use crate::extraction::StrategyAttempt;
use crate::interview::answers::QuestionAnswerPair;
use crate::pipeline::ats::AtsReport;
use crate::pipeline::coaching::CoachReport;
use crate::pipeline::review::ReviewReport;
use crate::scoring::ats::ExperienceLevel;

/// Circumference of the score gauge circle (r = 54).
const GAUGE_CIRCUMFERENCE: f64 = 339.292;

pub struct LevelOption {
    pub value: String,
    pub label: &'static str,
    pub selected: bool,
}

pub fn level_options(selected: Option<ExperienceLevel>) -> Vec<LevelOption> {
    ExperienceLevel::ALL
        .iter()
        .map(|level| LevelOption {
            value: level.label().to_ascii_lowercase(),
            label: level.label(),
            selected: selected == Some(*level),
        })
        .collect()
}

/// Resume lines carried between pages in a hidden field; contact details are already masked.
pub fn answer_context(resume_text: &str) -> String {
    sanitize_lines(resume_text).join("\n")
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub levels: Vec<LevelOption>,
    pub polish_available: bool,
}

pub struct SkillGroup {
    pub label: &'static str,
    pub names: Vec<String>,
}

#[derive(Template)]
#[template(path = "review.html")]
pub struct ReviewPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub report: ReviewReport,
    pub skill_groups: Vec<SkillGroup>,
    pub questions: Vec<String>,
    pub answer_context: String,
    pub role: String,
    pub polish_available: bool,
}

impl ReviewPage {
    pub fn new(
        capabilities: Vec<CapabilityStatus>,
        report: ReviewReport,
        resume_text: &str,
        role: &str,
        polish_available: bool,
    ) -> Self {
        let skill_groups = report
            .skills
            .by_category()
            .iter()
            .map(|(category, names)| SkillGroup {
                label: category.label(),
                names: names.iter().cloned().collect(),
            })
            .collect();
        let questions = report.questions.all().map(str::to_string).collect();
        Self {
            capabilities,
            report,
            skill_groups,
            questions,
            answer_context: answer_context(resume_text),
            role: role.trim().to_string(),
            polish_available,
        }
    }
}

#[derive(Template)]
#[template(path = "ats.html")]
pub struct AtsPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub report: AtsReport,
    pub gauge_dash: String,
    pub gauge_gap: String,
    pub target_level: String,
    pub estimated_years: String,
}

impl AtsPage {
    pub fn new(capabilities: Vec<CapabilityStatus>, report: AtsReport) -> Self {
        let filled = GAUGE_CIRCUMFERENCE * f64::from(report.breakdown.total) / 100.0;
        let target_level = report
            .recruiter_view
            .target_level
            .map(|level| level.label().to_string())
            .unwrap_or_else(|| "Not specified".to_string());
        let estimated_years = report
            .recruiter_view
            .estimated_years
            .map(|years| format!("{years} years"))
            .unwrap_or_else(|| "Unknown".to_string());
        Self {
            capabilities,
            gauge_dash: format!("{filled:.1}"),
            gauge_gap: format!("{:.1}", GAUGE_CIRCUMFERENCE - filled),
            target_level,
            estimated_years,
            report,
        }
    }
}

/// Which app a fallback form posts back to.
pub struct FallbackTarget {
    pub title: &'static str,
    pub action: &'static str,
}

pub const REVIEW_TARGET: FallbackTarget = FallbackTarget {
    title: "Interview Prep",
    action: "/review",
};

pub const ATS_TARGET: FallbackTarget = FallbackTarget {
    title: "ATS Score",
    action: "/ats",
};

/// Shown when no resume text could be obtained: explains each attempt and asks for pasted text.
#[derive(Template)]
#[template(path = "fallback.html")]
pub struct FallbackPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub title: &'static str,
    pub action: &'static str,
    pub message: String,
    pub file_name: Option<String>,
    pub attempts: Vec<StrategyAttempt>,
    pub role: String,
    pub levels: Vec<LevelOption>,
    pub jd_text: String,
    pub polish: bool,
}

#[derive(Template)]
#[template(path = "answer.html")]
pub struct AnswerPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub pair: QuestionAnswerPair,
    pub answer_context: String,
    pub role: String,
    pub polish_available: bool,
}

#[derive(Template)]
#[template(path = "coach.html")]
pub struct CoachPage {
    pub capabilities: Vec<CapabilityStatus>,
    pub question: String,
    pub answer: String,
    pub report: CoachReport,
    pub score_percent: u32,
}

impl CoachPage {
    pub fn new(
        capabilities: Vec<CapabilityStatus>,
        question: String,
        answer: String,
        report: CoachReport,
    ) -> Self {
        Self {
            capabilities,
            question,
            answer,
            score_percent: u32::from(report.score.score) * 10,
            report,
        }
    }
}
