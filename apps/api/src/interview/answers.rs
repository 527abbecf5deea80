//! Templated sample answers.
//!
//! An answer is assembled from facts already present in the resume: detected
//! skills, the line that best matches the role (reworded), and the first
//! metric. Nothing numeric is invented; missing facts fall back to neutral
//! wording.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::fragments::{find_best_project_line, first_metric, paraphrase_project_line};
use crate::analysis::lexicon::CORE_TOOLS;
use crate::analysis::skills::detect_skills;

const PARAPHRASE_CHARS: usize = 140;
const METRIC_FALLBACK: &str = "measurable improvements";
const SKILLS_FALLBACK: &str = "relevant technical skills";

static QUESTION_TOOL: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = CORE_TOOLS.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
});

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuestionAnswerPair {
    pub question: String,
    pub answer: String,
    pub polished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    WhyRole,
    AboutYourself,
    ToolExperience,
    Project,
    General,
}

impl Intent {
    /// First match wins. Walkthrough words come before tool phrasing, so
    /// "Describe your experience with X" is answered from the best project line.
    fn classify(question: &str) -> Self {
        let q = question.to_lowercase();
        if (q.contains("why") && q.contains("role")) || q.starts_with("why do you want") {
            Intent::WhyRole
        } else if q.contains("tell me about yourself") || q.starts_with("tell me") {
            Intent::AboutYourself
        } else if ["explain", "describe", "walk me through", "project", "responsibility"]
            .iter()
            .any(|w| q.contains(w))
        {
            Intent::Project
        } else if q.contains("experience with") || q.contains("how do you") {
            Intent::ToolExperience
        } else {
            Intent::General
        }
    }
}

/// Facts pulled from the resume once per answer.
struct AnswerFacts {
    skills: Vec<String>,
    paraphrase: Option<String>,
    metric: String,
}

impl AnswerFacts {
    fn gather(resume_text: &str, role: &str) -> Self {
        let skills = detect_skills(resume_text).top(6);
        let paraphrase = find_best_project_line(resume_text, role)
            .map(|line| paraphrase_project_line(&line, PARAPHRASE_CHARS))
            .filter(|p| !p.is_empty());
        let metric = first_metric(resume_text).unwrap_or_else(|| METRIC_FALLBACK.to_string());
        Self {
            skills,
            paraphrase,
            metric,
        }
    }

    fn skill_snippet(&self) -> String {
        if self.skills.is_empty() {
            SKILLS_FALLBACK.to_string()
        } else {
            self.skills
                .iter()
                .take(3)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn with_period(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

pub fn generate_sample_answer(question: &str, resume_text: &str, role: &str) -> String {
    let facts = AnswerFacts::gather(resume_text.trim(), role.trim());
    let skills = facts.skill_snippet();
    let metric = &facts.metric;

    match Intent::classify(question.trim()) {
        Intent::WhyRole => {
            let example = facts
                .paraphrase
                .as_deref()
                .map(|p| format!(" For example, I {}", with_period(&lowercase_first(p))))
                .unwrap_or_default();
            format!(
                "I'm excited about this role because it aligns with my experience in {skills} \
                 and the type of work described.{example} I'd love to bring that impact here \
                 and help the team ship measurable results."
            )
        }
        Intent::AboutYourself => {
            let projects = facts
                .paraphrase
                .as_deref()
                .unwrap_or("end-to-end data and software projects");
            format!(
                "I'm a practitioner with hands-on experience in {skills} and building \
                 data-driven solutions. Recently, I worked on projects such as {projects} that \
                 focused on delivering {metric}. I enjoy solving problems end-to-end and \
                 collaborating with cross-functional teams to turn insights into production \
                 outcomes."
            )
        }
        Intent::ToolExperience => {
            let q = question.to_lowercase();
            let tool = QUESTION_TOOL
                .find(&q)
                .map(|m| m.as_str().to_string())
                .or_else(|| facts.skills.first().cloned());
            match tool {
                Some(tool) => format!(
                    "I have practical experience with {tool}. On my recent project I used {tool} \
                     to build pipelines and evaluate results; this helped deliver {metric}."
                ),
                None => format!(
                    "I have hands-on experience with {skills}. I approach technical problems by \
                     clarifying requirements, prototyping, validating with metrics, and \
                     productionizing."
                ),
            }
        }
        Intent::Project => match facts.paraphrase.as_deref() {
            Some(p) => {
                let tools = facts
                    .skills
                    .first()
                    .map(String::as_str)
                    .unwrap_or("relevant tools");
                format!(
                    "{} I led this effort using {tools} and focused on improving outcomes; we \
                     achieved {metric}.",
                    with_period(p)
                )
            }
            None => format!(
                "I worked on projects relevant to this area using {skills}. I can walk through a \
                 specific example if you'd like."
            ),
        },
        Intent::General => match facts.paraphrase.as_deref() {
            Some(p) => format!(
                "{} I used {skills} to achieve {metric} and collaborated with cross-functional \
                 teams to measure impact and iterate quickly.",
                with_period(p)
            ),
            None => format!(
                "I have relevant experience in {skills} and can discuss a recent project where I \
                 delivered {metric}."
            ),
        },
    }
}
