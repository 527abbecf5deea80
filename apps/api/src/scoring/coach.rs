//! Answer coach: a 0–10 heuristic score for a practice interview answer plus a
//! STAR-shaped rewrite seeded with the answer's first sentence.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::CORE_TOOLS;

static NUMERIC_IMPACT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{1,3}%|\b\d+k?\b").unwrap());

static TOOL: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = CORE_TOOLS.iter().map(|t| regex::escape(t)).collect();
    Regex::new(&format!(r"\b(?:{})\b", alternatives.join("|"))).unwrap()
});

const BASE_SCORE: i32 = 5;
const MIN_WORDS: usize = 30;
const MAX_SEED_CHARS: usize = 120;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerScore {
    pub score: u8,
    pub feedback: String,
    pub improved: String,
}

pub fn score_answer(answer: &str) -> AnswerScore {
    let text = answer.trim();
    if text.is_empty() {
        return AnswerScore {
            score: 0,
            feedback: "No answer provided.".to_string(),
            improved: String::new(),
        };
    }

    let mut score = BASE_SCORE;
    let mut hints = Vec::new();

    if text.split_whitespace().count() < MIN_WORDS {
        score -= 1;
        hints.push("Short: add context and outcome.");
    }
    if NUMERIC_IMPACT.is_match(text) {
        score += 2;
    } else {
        hints.push("Add numeric impact if possible.");
    }
    if TOOL.is_match(&text.to_lowercase()) {
        score += 1;
    } else {
        hints.push("Mention tools used.");
    }

    let feedback = if hints.is_empty() {
        "Good".to_string()
    } else {
        hints.join(" ")
    };

    AnswerScore {
        score: score.clamp(0, 10) as u8,
        feedback,
        improved: star_template(text),
    }
}

fn star_template(text: &str) -> String {
    let first_sentence = text.split('.').next().unwrap_or(text).trim();
    let seed: String = first_sentence.chars().take(MAX_SEED_CHARS).collect();
    format!(
        "Situation: [context]. Task: [what]. Action: I used [tools] to {seed}. Result: [metric]."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_answer() {
        let result = score_answer("   ");
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "No answer provided.");
        assert!(result.improved.is_empty());
    }

    #[test]
    fn test_short_vague_answer_collects_all_hints() {
        let result = score_answer("I worked on a project.");
        assert_eq!(result.score, 4);
        assert_eq!(
            result.feedback,
            "Short: add context and outcome. Add numeric impact if possible. Mention tools used."
        );
        assert!(result.improved.contains("Action: I used [tools] to I worked on a project."));
    }

    #[test]
    fn test_complete_answer_scores_eight_and_is_good() {
        let answer = "I rebuilt our reporting pipeline in Python so that analysts could get \
                      daily numbers before the morning stand-up, which required reworking the \
                      ingestion jobs, the schema and the alerting we relied on. It cut runtime \
                      by 40%.";
        let result = score_answer(answer);
        assert_eq!(result.score, 8);
        assert_eq!(result.feedback, "Good");
    }

    #[test]
    fn test_seed_is_truncated() {
        let answer = "a".repeat(500);
        let result = score_answer(&answer);
        let seed = "a".repeat(MAX_SEED_CHARS);
        assert!(result.improved.contains(&format!("to {seed}. Result")));
    }

    #[test]
    fn test_score_stays_in_range() {
        let long = "word ".repeat(100);
        for answer in ["x", "Python 10% 5k", long.as_str()] {
            assert!(score_answer(answer).score <= 10);
        }
    }
}
