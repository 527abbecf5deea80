use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::STOPWORDS;
use crate::analysis::sanitizer::{sanitize_text, strip_placeholders};

static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z+#][a-z+#\-]+").unwrap());

/// Lowercase alphabetic tokens (plus `+`, `#`, `-`) with stopwords removed.
pub fn keyword_set(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().trim_matches('-'))
        .filter(|t| t.len() >= 2 && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Keywords of a job description after contact details and links are dropped.
pub fn jd_keyword_set(jd_text: &str) -> BTreeSet<String> {
    keyword_set(&strip_placeholders(&sanitize_text(jd_text)))
}

/// How much of a job description's vocabulary the resume repeats.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordCoverage {
    pub covered: Vec<String>,
    pub missing: Vec<String>,
    pub jd_keyword_count: usize,
    /// `covered / jd_keyword_count`, 0 when the JD has no keywords.
    pub ratio: f64,
}

impl KeywordCoverage {
    pub fn covered_sample(&self, limit: usize) -> Vec<String> {
        self.covered.iter().take(limit).cloned().collect()
    }

    pub fn missing_sample(&self, limit: usize) -> Vec<String> {
        self.missing.iter().take(limit).cloned().collect()
    }
}

pub fn keyword_coverage(resume_text: &str, jd_text: &str) -> KeywordCoverage {
    let jd = jd_keyword_set(jd_text);
    let resume = keyword_set(resume_text);

    let (covered, missing): (Vec<String>, Vec<String>) =
        jd.iter().cloned().partition(|k| resume.contains(k));

    let ratio = if jd.is_empty() {
        0.0
    } else {
        covered.len() as f64 / jd.len() as f64
    };

    KeywordCoverage {
        covered,
        missing,
        jd_keyword_count: jd.len(),
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_set_drops_stopwords_and_lowercases() {
        let set = keyword_set("We are looking for a Rust and C++ engineer with Kafka.");
        let expected: BTreeSet<String> = ["rust", "c++", "engineer", "kafka"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(set, expected);
    }

    #[test]
    fn test_coverage_partitions_jd_keywords() {
        let cov = keyword_coverage(
            "Built Kafka pipelines in Rust",
            "Rust engineer, Kafka, Kubernetes",
        );
        assert_eq!(cov.covered, vec!["kafka", "rust"]);
        assert_eq!(cov.missing, vec!["engineer", "kubernetes"]);
        assert_eq!(cov.jd_keyword_count, 4);
        assert!((cov.ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_jd_links_and_contacts_are_not_keywords() {
        let jd = "Rust engineer. Apply: https://jobs.example.com/rust-role \
                  or hr@example.com, +1 415 555 0123";
        let cov = keyword_coverage("Rust engineer", jd);
        assert_eq!(cov.covered, vec!["engineer", "rust"]);
        assert_eq!(cov.missing, vec!["apply"]);
        assert_eq!(cov.jd_keyword_count, 3);
    }

    #[test]
    fn test_empty_jd_has_zero_ratio() {
        let cov = keyword_coverage("Rust", "  ");
        assert_eq!(cov.jd_keyword_count, 0);
        assert_eq!(cov.ratio, 0.0);
    }

    #[test]
    fn test_samples_are_truncated() {
        let cov = keyword_coverage("", "alpha beta gamma delta");
        assert_eq!(cov.missing_sample(2), vec!["alpha", "beta"]);
        assert!(cov.covered_sample(5).is_empty());
    }
}
