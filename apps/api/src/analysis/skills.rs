//! Skill detection against the fixed lexicon, with an optional union of
//! entity-recognizer hits.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::lexicon::{Lexicon, SkillCategory, DEFAULT_LEXICON};
use crate::analysis::ner::Entity;

/// Entity labels treated as technical terms.
const TECHNICAL_LABELS: &[&str] = &["PRODUCT", "LANGUAGE", "SKILL", "TECH"];

/// Deduplicated skills grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillSet {
    by_category: BTreeMap<SkillCategory, BTreeSet<String>>,
}

impl SkillSet {
    pub fn insert(&mut self, category: SkillCategory, name: impl Into<String>) -> bool {
        self.by_category.entry(category).or_default().insert(name.into())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_category
            .values()
            .flatten()
            .any(|s| s.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.by_category.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All names, in category order then alphabetically.
    pub fn names(&self) -> Vec<String> {
        self.by_category.values().flatten().cloned().collect()
    }

    pub fn top(&self, limit: usize) -> Vec<String> {
        self.by_category.values().flatten().take(limit).cloned().collect()
    }

    pub fn by_category(&self) -> &BTreeMap<SkillCategory, BTreeSet<String>> {
        &self.by_category
    }

    /// Lexicon categories with at least one hit.
    pub fn categories_hit(&self) -> usize {
        self.by_category
            .iter()
            .filter(|(c, names)| **c != SkillCategory::Recognized && !names.is_empty())
            .count()
    }

    /// Adds technical entities not already present. Lexicon hits are never touched.
    pub fn merge_recognized(&mut self, entities: &[Entity]) -> usize {
        let mut added = 0;
        for entity in entities {
            let name = entity.text.trim();
            let label_ok = TECHNICAL_LABELS
                .iter()
                .any(|l| entity.label.eq_ignore_ascii_case(l));
            let len = name.chars().count();
            if !label_ok || !(2..=40).contains(&len) || self.contains(name) {
                continue;
            }
            if self.insert(SkillCategory::Recognized, name) {
                added += 1;
            }
        }
        added
    }
}

/// Compiled boundary-aware patterns for one lexicon.
pub struct SkillMatcher {
    patterns: Vec<(SkillCategory, &'static str, Regex)>,
}

impl SkillMatcher {
    pub fn new(lexicon: &Lexicon) -> Self {
        let mut patterns = Vec::new();
        for (category, entries) in &lexicon.categories {
            for entry in entries {
                let mut alternatives = Vec::new();
                if !entry.variants.is_empty() {
                    let variants: Vec<String> =
                        entry.variants.iter().map(|v| regex::escape(v)).collect();
                    alternatives.push(format!("(?i:{})", variants.join("|")));
                }
                alternatives.extend(entry.cased.iter().map(|v| regex::escape(v)));
                if alternatives.is_empty() {
                    continue;
                }
                // `+` and `#` count as word characters so c++ and c# stay intact.
                let pattern = format!(
                    r"(?:^|[^A-Za-z0-9+#])(?:{})(?:$|[^A-Za-z0-9+#])",
                    alternatives.join("|")
                );
                if let Ok(re) = Regex::new(&pattern) {
                    patterns.push((*category, entry.name, re));
                }
            }
        }
        Self { patterns }
    }

    pub fn detect(&self, text: &str) -> SkillSet {
        let mut skills = SkillSet::default();
        for (category, name, re) in &self.patterns {
            if re.is_match(text) {
                skills.insert(*category, *name);
            }
        }
        skills
    }
}

static DEFAULT_MATCHER: Lazy<SkillMatcher> = Lazy::new(|| SkillMatcher::new(&DEFAULT_LEXICON));

/// Detects lexicon skills in `text` with the default lexicon.
pub fn detect_skills(text: &str) -> SkillSet {
    DEFAULT_MATCHER.detect(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::lexicon::LexiconEntry;

    #[test]
    fn test_example_resume_yields_exact_skills() {
        let text = "Experienced Python developer. Skills: Python, SQL, Docker. \
                    Education: BS Computer Science.";
        let skills = detect_skills(text);
        let mut names = skills.names();
        names.sort();
        assert_eq!(names, vec!["Docker", "Python", "SQL"]);
    }

    #[test]
    fn test_unrelated_text_yields_nothing() {
        let skills = detect_skills("I enjoy hiking, cooking and reading novels on weekends.");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        let skills = detect_skills("Worked with MySQL and node.js; JavaScript daily.");
        assert!(skills.contains("MySQL"));
        assert!(skills.contains("Node.js"));
        assert!(skills.contains("JavaScript"));
        assert!(!skills.contains("SQL"));
        assert!(!skills.contains("Java"));
    }

    #[test]
    fn test_ambiguous_words_need_proper_casing() {
        let skills = detect_skills("We react quickly in spring; rust never sleeps on the node.");
        assert!(skills.is_empty(), "unexpected {:?}", skills.names());

        let skills = detect_skills("Skills: React, Node, Spring Boot, Spark, Rust");
        for name in ["React", "Node.js", "Spring", "Spark", "Rust"] {
            assert!(skills.contains(name), "missing {name}");
        }

        let skills = detect_skills("built dashboards in react.js and jobs in pyspark");
        assert!(skills.contains("React"));
        assert!(skills.contains("Spark"));
    }

    #[test]
    fn test_symbols_in_names() {
        let skills = detect_skills("Languages: C++, C# and CI/CD pipelines");
        assert!(skills.contains("C++"));
        assert!(skills.contains("C#"));
        assert!(skills.contains("CI/CD"));
    }

    #[test]
    fn test_case_insensitive_and_deduplicated() {
        let skills = detect_skills("PYTHON python Python sklearn scikit-learn");
        assert_eq!(skills.len(), 2);
        assert!(skills.contains("python"));
    }

    #[test]
    fn test_custom_lexicon() {
        let lexicon = Lexicon {
            categories: vec![(
                SkillCategory::Tools,
                vec![LexiconEntry {
                    name: "Figma",
                    variants: &["figma"],
                    cased: &[],
                }],
            )],
        };
        let skills = SkillMatcher::new(&lexicon).detect("Designed in Figma; shipped Python");
        assert_eq!(skills.names(), vec!["Figma"]);
    }

    #[test]
    fn test_categories_hit_ignores_recognized() {
        let mut skills = detect_skills("Python and Docker");
        skills.insert(SkillCategory::Recognized, "Snowflake");
        assert_eq!(skills.categories_hit(), 2);
    }

    #[test]
    fn test_merge_recognized_adds_only_new_technical_entities() {
        let mut skills = detect_skills("Python and Snowflake");
        let baseline = skills.clone();
        let entities = vec![
            Entity {
                text: "Snowflake".into(),
                label: "PRODUCT".into(),
            },
            Entity {
                text: "python".into(),
                label: "LANGUAGE".into(),
            },
            Entity {
                text: "Acme Corp".into(),
                label: "ORG".into(),
            },
        ];
        assert_eq!(skills.merge_recognized(&entities), 1);
        assert!(skills.contains("Snowflake"));
        assert!(!skills.contains("Acme Corp"));
        for (category, names) in baseline.by_category() {
            assert_eq!(skills.by_category().get(category), Some(names));
        }
    }
}
