//! Removal and masking of contact details and identifiers.
//!
//! All functions are total and idempotent: feeding their output back in
//! returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|\bwww\.\S+").unwrap());

static LONG_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{7,}\b").unwrap());

/// `+CC` with 2–4 further digit groups, or the 3-3-4 form with optional parentheses.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\+\d{1,3}(?:[\s.\-–—•]?\(?\d{2,4}\)?){2,4}\b",
        r"|(?:\(\d{3}\)|\b\d{3})[\s.\-–—•]?\d{3}[\s.\-–—•]?\d{4}\b",
    ))
    .unwrap()
});

static BULLETS_AND_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-—–]+").unwrap());

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static PLACEHOLDERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[PHONE\]|\[NUMBER\]").unwrap());

pub const PHONE_PLACEHOLDER: &str = "[PHONE]";
pub const NUMBER_PLACEHOLDER: &str = "[NUMBER]";

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Analysis-grade sanitization: drops emails and URLs, masks long numbers and
/// phone numbers, turns bullets and dashes into spaces, collapses whitespace.
pub fn sanitize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let t = EMAIL.replace_all(text, " ");
    let t = URL.replace_all(&t, " ");
    let t = BULLETS_AND_DASHES.replace_all(&t, " ");
    let t = collapse_whitespace(&t);
    let t = LONG_NUMBER.replace_all(&t, " [NUMBER] ");
    let t = PHONE.replace_all(&t, " [PHONE] ");
    collapse_whitespace(&t)
}

/// Display-grade sanitization: every detection becomes a visible placeholder.
pub fn sanitize_for_output(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let t = EMAIL.replace_all(text, " [EMAIL] ");
    let t = URL.replace_all(&t, " [URL] ");
    let t = collapse_whitespace(&t);
    let t = LONG_NUMBER.replace_all(&t, " [NUMBER] ");
    let t = PHONE.replace_all(&t, " [PHONE] ");
    collapse_whitespace(&t)
}

/// Sanitizes every non-blank line on its own so callers keep line structure.
pub fn sanitize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(sanitize_text)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Removes `[PHONE]` and `[NUMBER]` tokens left over from sanitization.
pub fn strip_placeholders(text: &str) -> String {
    collapse_whitespace(&PLACEHOLDERS.replace_all(text, ""))
}

pub fn contains_email(text: &str) -> bool {
    EMAIL.is_match(text)
}

pub fn contains_phone(text: &str) -> bool {
    PHONE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTACT: &str = "Jane Doe • jane.doe@example.com • +1 (415) 555-0123 • \
        https://linkedin.com/in/janedoe • ID 123456789";

    #[test]
    fn test_removes_email_and_url() {
        let out = sanitize_text(CONTACT);
        assert!(!out.contains('@'));
        assert!(!out.contains("linkedin.com"));
        assert!(!contains_email(&out));
    }

    #[test]
    fn test_masks_phone_and_long_number() {
        let out = sanitize_text(CONTACT);
        assert!(!contains_phone(&out), "phone survived: {out}");
        assert!(out.contains(PHONE_PLACEHOLDER));
        assert!(out.contains(NUMBER_PLACEHOLDER));
        assert!(!out.contains("123456789"));
    }

    #[test]
    fn test_us_phone_formats() {
        for phone in ["415-555-0123", "(415) 555 0123", "415.555.0123", "415–555–0123"] {
            let out = sanitize_text(&format!("Call {phone} today"));
            assert_eq!(out, "Call [PHONE] today", "input: {phone}");
        }
    }

    #[test]
    fn test_year_ranges_and_metrics_survive() {
        let out = sanitize_text("Data Engineer 2019-2022, cut costs 40% for 1,200 clients");
        assert_eq!(out, "Data Engineer 2019 2022, cut costs 40% for 1,200 clients");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let samples = [
            CONTACT,
            "call 555  -  123 4567 or www.site.io/x 5551234",
            "a–b@c.com 415–555–0123 — done",
            "Skills: Python, SQL • Docker",
            "",
        ];
        for sample in samples {
            let once = sanitize_text(sample);
            assert_eq!(sanitize_text(&once), once, "input: {sample}");
            let shown = sanitize_for_output(sample);
            assert_eq!(sanitize_for_output(&shown), shown, "input: {sample}");
        }
    }

    #[test]
    fn test_sanitize_for_output_uses_placeholders() {
        let out = sanitize_for_output("mail me@x.io or visit www.x.io");
        assert_eq!(out, "mail [EMAIL] or visit [URL]");
    }

    #[test]
    fn test_sanitize_lines_keeps_structure() {
        let lines = sanitize_lines("Summary\n\n  • Built APIs  \njane@x.com");
        assert_eq!(lines, vec!["Summary", "Built APIs"]);
    }

    #[test]
    fn test_strip_placeholders() {
        assert_eq!(
            strip_placeholders("Reach me at [PHONE] or [NUMBER] anytime"),
            "Reach me at or anytime"
        );
    }
}
