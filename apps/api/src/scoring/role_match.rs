use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::analysis::skills::detect_skills;

static ROLE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z+#\-]{2,}").unwrap());

const ROLE_WEIGHT: f64 = 0.6;
const SKILL_WEIGHT: f64 = 0.4;
/// Skill count at which the skill component saturates.
const SKILL_SATURATION: f64 = 5.0;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoleMatch {
    pub role: String,
    /// 0.0 – 1.0, two decimals.
    pub score: f64,
    pub percent: u32,
}

impl RoleMatch {
    pub fn new(role: &str, score: f64) -> Self {
        Self {
            role: role.trim().to_string(),
            score,
            percent: (score * 100.0).round() as u32,
        }
    }
}

/// Share of role tokens present in the text blended with a skill-count signal.
/// Returns 0 for a blank role.
pub fn role_match_score(text: &str, role: &str) -> f64 {
    role_match_score_with(text, role, detect_skills(text).len())
}

/// Same as [`role_match_score`] with a precomputed skill count.
pub fn role_match_score_with(text: &str, role: &str, skill_count: usize) -> f64 {
    let role = role.trim().to_lowercase();
    if role.is_empty() {
        return 0.0;
    }
    let tokens: Vec<&str> = ROLE_TOKEN.find_iter(&role).map(|m| m.as_str()).collect();
    let haystack = text.to_lowercase();
    let matches = tokens.iter().filter(|t| haystack.contains(*t)).count();

    let role_part = matches as f64 / tokens.len().max(1) as f64;
    let skill_part = (skill_count as f64 / SKILL_SATURATION).min(1.0);
    let score = ROLE_WEIGHT * role_part + SKILL_WEIGHT * skill_part;
    (score * 100.0).round() / 100.0
}
