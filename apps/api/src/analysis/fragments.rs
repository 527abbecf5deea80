//! Line- and sentence-level heuristics over resume text: the longest lines,
//! the line that best matches a role, quantified achievements, the first
//! metric and an estimate of years of experience.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::lexicon::ACTION_VERBS;
use crate::analysis::sanitizer::sanitize_text;

static ROLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]{3,}").unwrap());

static COMPANY_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:private|limited|ltd|inc|llc|pvt|company|co)\b").unwrap());

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static EMPTY_PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*\)").unwrap());

static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s+#%.,()\-]").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,3}(?:\.\d+)?\s*%").unwrap());

static SMALL_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{1,3}(?:,\d{3})*\b").unwrap());

static SEGMENT_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•▪●◦]|[.;!?](?:\s+|$)").unwrap());

static EXPLICIT_YEARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b").unwrap());

static YEAR_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b((?:19|20)\d{2})\s*(?:-|–|—|to)\s*((?:19|20)\d{2}|present|current|now)\b")
        .unwrap()
});

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+").unwrap());

const MAX_EXPLICIT_YEARS: u32 = 50;

/// Non-blank trimmed lines, longest first. Equal lengths keep document order.
pub fn top_lines(text: &str, n: usize) -> Vec<String> {
    let mut lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    lines.sort_by_key(|l| std::cmp::Reverse(l.chars().count()));
    lines.into_iter().take(n).map(str::to_string).collect()
}

fn role_words(text: &str) -> HashSet<String> {
    ROLE_WORD
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Among the 12 longest lines, the one sharing the most words with `role`.
/// Without any overlap, lines of 80+ chars beat shorter ones.
pub fn find_best_project_line(text: &str, role: &str) -> Option<String> {
    let role_tokens = role_words(role);
    let mut best: Option<(usize, String)> = None;

    for line in top_lines(text, 12) {
        let overlap = role_words(&line).intersection(&role_tokens).count();
        let score = if overlap == 0 {
            (line.chars().count() / 80).min(1)
        } else {
            overlap
        };
        if best.as_ref().map_or(true, |(s, _)| score > *s) {
            best = Some((score, line));
        }
    }

    best.map(|(_, line)| line)
}

/// Generic rewording of a resume line: no contact details, company suffixes,
/// years or stray symbols. Longer results are cut at a word boundary with `…`.
pub fn paraphrase_project_line(line: &str, max_chars: usize) -> String {
    let s = sanitize_text(line);
    let s = COMPANY_WORDS.replace_all(&s, " ");
    let s = YEAR.replace_all(&s, " ");
    let s = EMPTY_PARENS.replace_all(&s, " ");
    let s = SYMBOLS.replace_all(&s, " ");
    let s = WHITESPACE.replace_all(&s, " ").trim().to_string();

    if s.chars().count() <= max_chars {
        return s;
    }
    let head: String = s.chars().take(max_chars).collect();
    let cut = match head.rfind(' ') {
        Some(idx) => &head[..idx],
        None => head.as_str(),
    };
    format!("{}…", cut.trim_end())
}

/// The first percentage in the text, else the first number below one million.
pub fn first_metric(text: &str) -> Option<String> {
    let t = sanitize_text(text);
    if let Some(m) = PERCENT.find(&t) {
        return Some(m.as_str().to_string());
    }
    SMALL_NUMBER
        .find_iter(&t)
        .find(|m| {
            m.as_str()
                .replace(',', "")
                .parse::<u64>()
                .map_or(false, |v| v < 1_000_000)
        })
        .map(|m| m.as_str().to_string())
}

/// Sentences and bullet items, sanitized. Line breaks, bullet glyphs and
/// sentence punctuation all end a segment.
pub fn segments(text: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| SEGMENT_BREAK.split(line))
        .map(sanitize_text)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A segment carries a number, percentage or currency amount that is not a year.
pub fn is_quantified(segment: &str) -> bool {
    let without_years = YEAR.replace_all(segment, "");
    without_years.chars().any(|c| c.is_ascii_digit())
        || without_years.contains('%')
        || without_years.contains(['$', '€', '£'])
}

pub fn quantified_segments(text: &str) -> Vec<String> {
    segments(text).into_iter().filter(|s| is_quantified(s)).collect()
}

/// Distinct action verbs used anywhere in the text, in lexicon order.
pub fn action_verbs_used(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    let words: HashSet<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();
    ACTION_VERBS
        .iter()
        .copied()
        .filter(|v| words.contains(v))
        .collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Years of experience: the larger of the biggest explicit "N years" mention
/// and the span covered by date ranges. `Present` resolves to `as_of_year`.
pub fn estimate_years(text: &str, as_of_year: i32) -> Option<u32> {
    let explicit = EXPLICIT_YEARS
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .filter(|n| *n <= MAX_EXPLICIT_YEARS)
        .max();

    let mut earliest: Option<i32> = None;
    let mut latest: Option<i32> = None;
    for caps in YEAR_RANGE.captures_iter(text) {
        let Ok(start) = caps[1].parse::<i32>() else {
            continue;
        };
        let end = caps[2].parse::<i32>().unwrap_or(as_of_year).min(as_of_year);
        if end < start {
            continue;
        }
        earliest = Some(earliest.map_or(start, |e| e.min(start)));
        latest = Some(latest.map_or(end, |l| l.max(end)));
    }
    let span = match (earliest, latest) {
        (Some(start), Some(end)) => u32::try_from(end - start).ok(),
        _ => None,
    };

    match (explicit, span) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_lines_longest_first() {
        let text = "short\n\n  a much longer line here  \nmid line";
        assert_eq!(
            top_lines(text, 2),
            vec!["a much longer line here", "mid line"]
        );
        assert!(top_lines("", 3).is_empty());
    }

    #[test]
    fn test_best_project_line_prefers_role_overlap() {
        let text = "Built a fraud detection model in Python for payments\n\
                    Designed a data warehouse for marketing analytics and dashboards at scale";
        let best = find_best_project_line(text, "Fraud Analyst").unwrap();
        assert!(best.starts_with("Built a fraud detection"));
    }

    #[test]
    fn test_best_project_line_without_role_takes_longest() {
        let text = "tiny\nThe longest line of the whole resume text";
        assert_eq!(
            find_best_project_line(text, "").as_deref(),
            Some("The longest line of the whole resume text")
        );
        assert!(find_best_project_line("", "Engineer").is_none());
    }

    #[test]
    fn test_paraphrase_strips_company_and_years() {
        let out =
            paraphrase_project_line("Acme Pvt Ltd (2019) — built ETL pipelines ★ in Spark", 140);
        assert_eq!(out, "Acme built ETL pipelines in Spark");
    }

    #[test]
    fn test_paraphrase_truncates_on_word_boundary() {
        let line = "word ".repeat(50);
        let out = paraphrase_project_line(&line, 22);
        assert!(out.ends_with('…'));
        assert_eq!(out, "word word word word…");
    }

    #[test]
    fn test_first_metric_prefers_percentage() {
        assert_eq!(
            first_metric("Served 300 clients and cut costs by 40 %").as_deref(),
            Some("40 %")
        );
        assert_eq!(first_metric("Served 1,200 clients").as_deref(), Some("1,200"));
        assert_eq!(first_metric("Joined in 2019"), None);
        assert_eq!(first_metric("no numbers"), None);
    }

    #[test]
    fn test_quantified_segments_ignore_years() {
        let text = "• Reduced latency by 40% through caching\n\
                    • Worked on backend infrastructure\n\
                    Acme Corp 2019 - 2022. Saved $50,000 annually.";
        let found = quantified_segments(text);
        assert_eq!(
            found,
            vec!["Reduced latency by 40% through caching", "Saved $50,000 annually"]
        );
    }

    #[test]
    fn test_action_verbs_are_distinct_whole_words() {
        let verbs = action_verbs_used("Led the team. Led again. Built things; rebuilt others.");
        assert_eq!(verbs, vec!["built", "led"]);
    }

    #[test]
    fn test_estimate_years_from_ranges_and_mentions() {
        assert_eq!(estimate_years("Acme 2015 – 2018\nBeta 2018 - Present", 2024), Some(9));
        assert_eq!(estimate_years("6+ years of experience, Acme 2020-2022", 2024), Some(6));
        assert_eq!(estimate_years("Over 99 years of passion", 2024), None);
        assert_eq!(estimate_years("No dates here", 2024), None);
    }
}
