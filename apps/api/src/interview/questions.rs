use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;

use crate::analysis::fragments::top_lines;
use crate::analysis::sanitizer::{sanitize_lines, sanitize_text};
use crate::analysis::skills::SkillSet;

const HR_QUESTIONS: [&str; 3] = [
    "Tell me about yourself.",
    "Why do you want this role?",
    "Describe a time you had a conflict at work and how you resolved it.",
];

const HR_LIMIT: usize = 3;
const RESUME_LIMIT: usize = 6;
const TECHNICAL_LIMIT: usize = 8;
const SKILL_QUESTIONS: usize = 12;
const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QuestionSet {
    pub hr: Vec<String>,
    pub resume_specific: Vec<String>,
    pub technical: Vec<String>,
}

impl QuestionSet {
    /// Every question, HR first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.hr
            .iter()
            .chain(&self.resume_specific)
            .chain(&self.technical)
            .map(String::as_str)
    }
}

/// 64-bit FNV-1a. Stable across processes and platforms, unlike `DefaultHasher`.
fn stable_seed(text: &str) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    text.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(PRIME))
}

fn preview(line: &str) -> String {
    if line.chars().count() < PREVIEW_CHARS {
        line.to_string()
    } else {
        let head: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", head.trim_end())
    }
}

/// Builds the three question groups for a resume. Equal input always yields
/// the same questions; different resumes get differently ordered groups.
pub fn generate_questions(resume_text: &str, skills: &SkillSet, role: &str) -> QuestionSet {
    let sanitized = sanitize_text(resume_text);
    let lines = sanitize_lines(resume_text).join("\n");
    let role = role.trim();

    let mut hr: Vec<String> = HR_QUESTIONS.iter().map(|q| q.to_string()).collect();

    let mut resume_specific: Vec<String> = top_lines(&lines, RESUME_LIMIT)
        .iter()
        .map(|line| format!("Explain this project/responsibility: \"{}\"", preview(line)))
        .collect();

    let mut technical: Vec<String> = skills
        .top(SKILL_QUESTIONS)
        .iter()
        .map(|skill| format!("Describe your experience with {skill}."))
        .collect();
    if role.chars().count() > 2 {
        technical.push(format!(
            "What makes you a good fit for the {role} role technically?"
        ));
    }

    let mut rng = StdRng::seed_from_u64(stable_seed(&sanitized));
    hr.shuffle(&mut rng);
    resume_specific.shuffle(&mut rng);
    technical.shuffle(&mut rng);

    hr.truncate(HR_LIMIT);
    resume_specific.truncate(RESUME_LIMIT);
    technical.truncate(TECHNICAL_LIMIT);

    QuestionSet {
        hr,
        resume_specific,
        technical,
    }
}
