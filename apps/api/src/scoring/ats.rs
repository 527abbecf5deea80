//! ATS compatibility rubric: six weighted categories summing to 100.
//!
//! Every category is computed from the resume text alone, or from the resume
//! and the job description when one is supplied. The score is a pure function
//! of `AtsInput`; the reference year for "Present" is part of the input.
//!
//! | category                 | max |
//! |--------------------------|-----|
//! | formatting               | 15  |
//! | keyword_coverage         | 25  |
//! | skills_relevance         | 20  |
//! | experience_signals       | 15  |
//! | quantified_achievements  | 15  |
//! | seniority_alignment      | 10  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analysis::fragments::{
    action_verbs_used, estimate_years, first_metric, quantified_segments, word_count,
};
use crate::analysis::keywords::{jd_keyword_set, keyword_set};
use crate::analysis::lexicon::DEFAULT_LEXICON;
use crate::analysis::sanitizer::{contains_email, contains_phone, sanitize_text};
use crate::analysis::sections::{check_sections, Section, SectionReport};
use crate::analysis::skills::{detect_skills, SkillSet};

pub const MAX_TOTAL: u32 = 100;

/// A sub-score below this share of its maximum attaches the category's suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.6;

const EMPTY_RESUME_SUGGESTION: &str =
    "No resume text was found. Upload a text-based PDF/DOCX or paste your resume.";

// ────────────────────────────────────────────────────────────────────────────
// Experience level
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Lead,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "Entry",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead",
        }
    }

    /// Expected years of experience: inclusive lower bound, optional upper bound.
    pub fn band(&self) -> (u32, Option<u32>) {
        match self {
            ExperienceLevel::Entry => (0, Some(2)),
            ExperienceLevel::Mid => (2, Some(5)),
            ExperienceLevel::Senior => (5, Some(10)),
            ExperienceLevel::Lead => (8, None),
        }
    }

    /// Infers the target level from job description wording.
    /// Senior titles win over "lead", which JDs often use as a verb.
    pub fn infer_from_jd(jd: &str) -> Option<Self> {
        let lower = jd.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |candidates: &[&str]| words.iter().any(|w| candidates.contains(w));

        if has(&["senior", "sr"]) {
            Some(ExperienceLevel::Senior)
        } else if has(&["lead", "principal", "staff", "head", "manager"]) {
            Some(ExperienceLevel::Lead)
        } else if has(&["mid", "intermediate"]) {
            Some(ExperienceLevel::Mid)
        } else if has(&["intern", "internship", "junior", "jr", "entry", "graduate"]) {
            Some(ExperienceLevel::Entry)
        } else {
            None
        }
    }

    /// Years of distance from the band; 0 when inside it.
    fn distance(&self, years: u32) -> u32 {
        let (low, high) = self.band();
        if years < low {
            low - years
        } else {
            match high {
                Some(high) if years > high => years - high,
                _ => 0,
            }
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExperienceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entry" | "entry-level" | "entry level" | "junior" | "intern" | "graduate" => {
                Ok(ExperienceLevel::Entry)
            }
            "mid" | "mid-level" | "mid level" | "intermediate" => Ok(ExperienceLevel::Mid),
            "senior" | "sr" => Ok(ExperienceLevel::Senior),
            "lead" | "principal" | "staff" | "manager" => Ok(ExperienceLevel::Lead),
            other => Err(format!(
                "Unknown experience level '{other}'. Expected entry, mid, senior or lead"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Categories and results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Formatting,
    KeywordCoverage,
    SkillsRelevance,
    ExperienceSignals,
    QuantifiedAchievements,
    SeniorityAlignment,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 6] = [
        ScoreCategory::Formatting,
        ScoreCategory::KeywordCoverage,
        ScoreCategory::SkillsRelevance,
        ScoreCategory::ExperienceSignals,
        ScoreCategory::QuantifiedAchievements,
        ScoreCategory::SeniorityAlignment,
    ];

    pub fn max_points(&self) -> u32 {
        match self {
            ScoreCategory::Formatting => 15,
            ScoreCategory::KeywordCoverage => 25,
            ScoreCategory::SkillsRelevance => 20,
            ScoreCategory::ExperienceSignals => 15,
            ScoreCategory::QuantifiedAchievements => 15,
            ScoreCategory::SeniorityAlignment => 10,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreCategory::Formatting => "Formatting & Structure",
            ScoreCategory::KeywordCoverage => "Keyword Coverage",
            ScoreCategory::SkillsRelevance => "Skills Relevance",
            ScoreCategory::ExperienceSignals => "Experience Signals",
            ScoreCategory::QuantifiedAchievements => "Quantified Achievements",
            ScoreCategory::SeniorityAlignment => "Seniority Alignment",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            ScoreCategory::Formatting => {
                "Use standard headings (Summary, Skills, Experience, Education), keep the \
                 resume between 350 and 900 words and include an email or phone number."
            }
            ScoreCategory::KeywordCoverage => {
                "Mirror the job description's wording: reuse its tools and terms where they \
                 truthfully describe your work."
            }
            ScoreCategory::SkillsRelevance => {
                "List the technical skills the role asks for in a dedicated Skills section."
            }
            ScoreCategory::ExperienceSignals => {
                "Start experience bullets with strong action verbs such as built, led, \
                 launched or optimized."
            }
            ScoreCategory::QuantifiedAchievements => {
                "Quantify outcomes: add percentages, amounts, counts or time saved to your bullets."
            }
            ScoreCategory::SeniorityAlignment => {
                "Make your years of experience explicit (dates for each role or an \"N+ years\" \
                 line) and align it with the level you are targeting."
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubScore {
    pub category: ScoreCategory,
    pub label: &'static str,
    pub points: u32,
    pub max_points: u32,
}

impl SubScore {
    fn new(category: ScoreCategory, points: f64) -> Self {
        let max_points = category.max_points();
        let points = (points.max(0.0).round() as u32).min(max_points);
        Self {
            category,
            label: category.label(),
            points,
            max_points,
        }
    }

    pub fn percent(&self) -> u32 {
        if self.max_points == 0 {
            0
        } else {
            self.points * 100 / self.max_points
        }
    }

    fn is_weak(&self) -> bool {
        (self.points as f64) < self.max_points as f64 * SUGGESTION_THRESHOLD
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreBreakdown {
    pub sub_scores: Vec<SubScore>,
    pub total: u32,
    pub suggestions: Vec<String>,
}

impl ScoreBreakdown {
    fn from_sub_scores(sub_scores: Vec<SubScore>) -> Self {
        let total = sub_scores
            .iter()
            .map(|s| s.points)
            .sum::<u32>()
            .min(MAX_TOTAL);
        let suggestions = sub_scores
            .iter()
            .filter(|s| s.is_weak())
            .map(|s| s.category.suggestion().to_string())
            .collect();
        Self {
            sub_scores,
            total,
            suggestions,
        }
    }

    fn empty() -> Self {
        Self {
            sub_scores: ScoreCategory::ALL
                .iter()
                .map(|c| SubScore::new(*c, 0.0))
                .collect(),
            total: 0,
            suggestions: vec![EMPTY_RESUME_SUGGESTION.to_string()],
        }
    }

    pub fn get(&self, category: ScoreCategory) -> Option<&SubScore> {
        self.sub_scores.iter().find(|s| s.category == category)
    }

    pub fn rating(&self) -> Rating {
        rating(self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Excellent,
    Good,
    NeedsWork,
    Poor,
}

impl Rating {
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::NeedsWork => "Needs work",
            Rating::Poor => "Poor",
        }
    }

    /// Gauge colour.
    pub fn color(&self) -> &'static str {
        match self {
            Rating::Excellent => "#16a34a",
            Rating::Good => "#65a30d",
            Rating::NeedsWork => "#d97706",
            Rating::Poor => "#dc2626",
        }
    }

    fn verdict(&self) -> &'static str {
        match self {
            Rating::Excellent => "Strong candidate: likely to pass automated screening.",
            Rating::Good => "Solid resume: a few targeted edits would raise the match.",
            Rating::NeedsWork => "Borderline: at risk of being filtered before a human reads it.",
            Rating::Poor => "Unlikely to pass screening without significant revision.",
        }
    }
}

pub fn rating(total: u32) -> Rating {
    if total >= 80 {
        Rating::Excellent
    } else if total >= 60 {
        Rating::Good
    } else if total >= 40 {
        Rating::NeedsWork
    } else {
        Rating::Poor
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AtsInput<'a> {
    pub resume_text: &'a str,
    pub job_description: Option<&'a str>,
    pub experience_level: Option<ExperienceLevel>,
    pub as_of_year: i32,
}

impl<'a> AtsInput<'a> {
    fn jd(&self) -> Option<&'a str> {
        self.job_description.filter(|jd| !jd.trim().is_empty())
    }

    /// Declared level, else the level implied by the job description.
    pub fn target_level(&self) -> Option<ExperienceLevel> {
        self.experience_level
            .or_else(|| self.jd().and_then(ExperienceLevel::infer_from_jd))
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        (numerator as f64 / denominator as f64).min(1.0)
    }
}

fn length_points(words: usize) -> f64 {
    match words {
        0 => 0.0,
        350..=900 => 4.0,
        200..=349 | 901..=1200 => 2.0,
        _ => 1.0,
    }
}

fn formatting(raw: &str, sections: &SectionReport) -> SubScore {
    let section_points = sections.present_ratio() * 8.0;
    let contact_points = if contains_email(raw) || contains_phone(raw) {
        3.0
    } else {
        0.0
    };
    SubScore::new(
        ScoreCategory::Formatting,
        section_points + length_points(word_count(raw)) + contact_points,
    )
}

fn keyword_coverage(clean: &str, jd: Option<&str>, skills: &SkillSet) -> SubScore {
    let max = ScoreCategory::KeywordCoverage.max_points() as f64;
    let jd_keywords = jd.map(jd_keyword_set).unwrap_or_default();

    let points = if jd_keywords.is_empty() {
        ratio(skills.len(), 15) * max
    } else {
        let resume_keywords = keyword_set(clean);
        let covered = jd_keywords.intersection(&resume_keywords).count();
        ratio(covered, jd_keywords.len()) * max
    };
    SubScore::new(ScoreCategory::KeywordCoverage, points)
}

fn skills_relevance(jd: Option<&str>, skills: &SkillSet) -> SubScore {
    let max = ScoreCategory::SkillsRelevance.max_points() as f64;
    let jd_skills = jd.map(detect_skills).unwrap_or_default();

    let points = if jd_skills.is_empty() {
        ratio(skills.categories_hit(), DEFAULT_LEXICON.category_count()) * max
    } else {
        let required = jd_skills.names();
        let found = required.iter().filter(|s| skills.contains(s)).count();
        ratio(found, required.len()) * max
    };
    SubScore::new(ScoreCategory::SkillsRelevance, points)
}

fn experience_signals(raw: &str, sections: &SectionReport) -> SubScore {
    let verb_points = ratio(action_verbs_used(raw).len(), 6) * 10.0;
    let section_points = if sections.has(Section::Experience) {
        5.0
    } else {
        0.0
    };
    SubScore::new(
        ScoreCategory::ExperienceSignals,
        verb_points + section_points,
    )
}

fn quantified_achievements(raw: &str) -> SubScore {
    let max = ScoreCategory::QuantifiedAchievements.max_points() as f64;
    SubScore::new(
        ScoreCategory::QuantifiedAchievements,
        ratio(quantified_segments(raw).len(), 5) * max,
    )
}

fn seniority_alignment(target: Option<ExperienceLevel>, years: Option<u32>) -> SubScore {
    let points = match (target, years) {
        (None, _) => 5.0,
        (Some(_), None) => 3.0,
        (Some(level), Some(years)) => match level.distance(years) {
            0 => 10.0,
            1..=2 => 5.0,
            _ => 0.0,
        },
    };
    SubScore::new(ScoreCategory::SeniorityAlignment, points)
}

/// Scores a resume with the lexicon skills found in it.
pub fn score_resume(input: &AtsInput<'_>) -> ScoreBreakdown {
    let skills = detect_skills(&sanitize_text(input.resume_text));
    score_resume_with_skills(input, &skills)
}

/// Scores a resume against an already detected skill set (e.g. one enriched
/// by the entity recognizer).
pub fn score_resume_with_skills(input: &AtsInput<'_>, skills: &SkillSet) -> ScoreBreakdown {
    let raw = input.resume_text;
    if raw.trim().is_empty() {
        return ScoreBreakdown::empty();
    }

    let clean = sanitize_text(raw);
    let sections = check_sections(raw);
    let jd = input.jd();

    ScoreBreakdown::from_sub_scores(vec![
        formatting(raw, &sections),
        keyword_coverage(&clean, jd, skills),
        skills_relevance(jd, skills),
        experience_signals(raw, &sections),
        quantified_achievements(raw),
        seniority_alignment(input.target_level(), estimate_years(raw, input.as_of_year)),
    ])
}

// ────────────────────────────────────────────────────────────────────────────
// Recruiter view
// ────────────────────────────────────────────────────────────────────────────

/// What a recruiter skimming the resume would take away.
#[derive(Debug, Clone, Serialize)]
pub struct RecruiterView {
    pub verdict: String,
    pub estimated_years: Option<u32>,
    pub target_level: Option<ExperienceLevel>,
    pub top_skills: Vec<String>,
    pub sections_present: Vec<&'static str>,
    pub first_metric: Option<String>,
    pub achievements: Vec<String>,
}

impl RecruiterView {
    pub fn build(input: &AtsInput<'_>, breakdown: &ScoreBreakdown, skills: &SkillSet) -> Self {
        let raw = input.resume_text;
        let sections = check_sections(raw);
        Self {
            verdict: breakdown.rating().verdict().to_string(),
            estimated_years: estimate_years(raw, input.as_of_year),
            target_level: input.target_level(),
            top_skills: skills.top(8),
            sections_present: sections.present.iter().map(Section::label).collect(),
            first_metric: first_metric(raw),
            achievements: quantified_segments(raw).into_iter().take(3).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = "\
Jane Doe | jane@example.com | linkedin.com/in/janedoe
PROFESSIONAL SUMMARY
Senior backend engineer with 7+ years building data platforms.
SKILLS
Python, SQL, Docker, Kubernetes, AWS, PostgreSQL, Kafka, React, Terraform, Git
WORK EXPERIENCE
Acme Corp, Senior Engineer, 2019 - Present
• Led migration to Kubernetes, cutting infra costs by 35%.
• Built Kafka pipelines processing 2M events per day.
• Reduced p99 latency from 900ms to 120ms.
Beta Inc, Engineer, 2016 - 2019
• Designed a PostgreSQL schema serving 40 services.
• Automated releases, saving 10 hours per week.
• Mentored 4 engineers and launched the on-call rotation.
EDUCATION
BSc Computer Science";

    fn input(text: &str) -> AtsInput<'_> {
        AtsInput {
            resume_text: text,
            job_description: None,
            experience_level: None,
            as_of_year: 2024,
        }
    }

    fn assert_consistent(breakdown: &ScoreBreakdown) {
        let sum: u32 = breakdown.sub_scores.iter().map(|s| s.points).sum();
        assert_eq!(breakdown.total, sum);
        assert!(breakdown.total <= MAX_TOTAL);
        for sub in &breakdown.sub_scores {
            assert!(sub.points <= sub.max_points, "{sub:?}");
        }
    }

    #[test]
    fn test_category_maxima_sum_to_100() {
        let sum: u32 = ScoreCategory::ALL.iter().map(ScoreCategory::max_points).sum();
        assert_eq!(sum, MAX_TOTAL);
    }

    #[test]
    fn test_empty_resume_scores_zero_with_single_suggestion() {
        for text in ["", "   \n\t "] {
            let breakdown = score_resume(&input(text));
            assert_eq!(breakdown.total, 0);
            assert_eq!(breakdown.sub_scores.len(), 6);
            assert_eq!(breakdown.suggestions, vec![EMPTY_RESUME_SUGGESTION]);
            assert_consistent(&breakdown);
        }
    }

    #[test]
    fn test_total_is_bounded_sum_for_varied_inputs() {
        let jd = "Senior Python engineer with Kafka and Kubernetes";
        let repeated = STRONG_RESUME.repeat(5);
        let texts: [&str; 5] = [
            "x",
            "Python",
            "Experienced Python developer. Skills: Python, SQL, Docker. Education: BS.",
            STRONG_RESUME,
            repeated.as_str(),
        ];
        for text in texts {
            for job_description in [None, Some(jd), Some("")] {
                for experience_level in [None, Some(ExperienceLevel::Entry)] {
                    let breakdown = score_resume(&AtsInput {
                        resume_text: text,
                        job_description,
                        experience_level,
                        as_of_year: 2024,
                    });
                    assert_consistent(&breakdown);
                }
            }
        }
    }

    #[test]
    fn test_strong_resume_rates_well() {
        let breakdown = score_resume(&AtsInput {
            job_description: Some("Senior Python engineer: Kafka, Kubernetes, AWS"),
            ..input(STRONG_RESUME)
        });
        assert_consistent(&breakdown);
        let quantified = breakdown
            .get(ScoreCategory::QuantifiedAchievements)
            .unwrap();
        assert_eq!(quantified.points, 15);
        let seniority = breakdown.get(ScoreCategory::SeniorityAlignment).unwrap();
        assert_eq!(seniority.points, 10);
        assert!(breakdown.total >= 60, "total {}", breakdown.total);
        assert!(matches!(breakdown.rating(), Rating::Excellent | Rating::Good));
    }

    #[test]
    fn test_same_input_same_output() {
        let a = score_resume(&input(STRONG_RESUME));
        let b = score_resume(&input(STRONG_RESUME));
        assert_eq!(a, b);
    }

    #[test]
    fn test_weak_categories_attach_suggestions() {
        let breakdown = score_resume(&input("Python developer"));
        assert!(breakdown
            .suggestions
            .iter()
            .any(|s| s == ScoreCategory::QuantifiedAchievements.suggestion()));
        assert!(breakdown
            .suggestions
            .iter()
            .any(|s| s == ScoreCategory::Formatting.suggestion()));
    }

    #[test]
    fn test_jd_links_do_not_dilute_keyword_coverage() {
        let jd = "Rust engineer. Apply: https://jobs.example.com/rust-role or hr@example.com";
        let score = keyword_coverage("Rust engineer", Some(jd), &SkillSet::default());
        // rust and engineer out of rust, engineer, apply
        assert_eq!(score.points, 17);
    }

    #[test]
    fn test_seniority_alignment_rules() {
        let score = |level, years| seniority_alignment(level, years).points;
        assert_eq!(score(None, Some(3)), 5);
        assert_eq!(score(Some(ExperienceLevel::Mid), None), 3);
        assert_eq!(score(Some(ExperienceLevel::Mid), Some(4)), 10);
        assert_eq!(score(Some(ExperienceLevel::Mid), Some(7)), 5);
        assert_eq!(score(Some(ExperienceLevel::Entry), Some(9)), 0);
        assert_eq!(score(Some(ExperienceLevel::Lead), Some(20)), 10);
    }

    #[test]
    fn test_level_inference_from_jd() {
        assert_eq!(
            ExperienceLevel::infer_from_jd("Senior Data Engineer, you will lead a squad"),
            Some(ExperienceLevel::Senior)
        );
        assert_eq!(
            ExperienceLevel::infer_from_jd("Principal Engineer"),
            Some(ExperienceLevel::Lead)
        );
        assert_eq!(
            ExperienceLevel::infer_from_jd("Graduate programme 2025"),
            Some(ExperienceLevel::Entry)
        );
        assert_eq!(ExperienceLevel::infer_from_jd("Backend engineer"), None);
    }

    #[test]
    fn test_declared_level_overrides_jd() {
        let input = AtsInput {
            job_description: Some("Senior engineer"),
            experience_level: Some(ExperienceLevel::Entry),
            ..input("text")
        };
        assert_eq!(input.target_level(), Some(ExperienceLevel::Entry));
    }

    #[test]
    fn test_experience_level_parsing() {
        assert_eq!("SENIOR".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Senior));
        assert_eq!(" entry-level ".parse::<ExperienceLevel>(), Ok(ExperienceLevel::Entry));
        assert!("wizard".parse::<ExperienceLevel>().is_err());
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(rating(100), Rating::Excellent);
        assert_eq!(rating(80), Rating::Excellent);
        assert_eq!(rating(79), Rating::Good);
        assert_eq!(rating(40), Rating::NeedsWork);
        assert_eq!(rating(39), Rating::Poor);
        assert_eq!(rating(0), Rating::Poor);
    }

    #[test]
    fn test_recruiter_view_summarises_resume() {
        let input = input(STRONG_RESUME);
        let breakdown = score_resume(&input);
        let skills = detect_skills(&sanitize_text(STRONG_RESUME));
        let view = RecruiterView::build(&input, &breakdown, &skills);
        assert_eq!(view.estimated_years, Some(8));
        assert_eq!(view.top_skills.len(), 8);
        assert_eq!(view.first_metric.as_deref(), Some("35%"));
        assert_eq!(view.achievements.len(), 3);
        assert!(view.sections_present.contains(&"Education"));
    }
}
