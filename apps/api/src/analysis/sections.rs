use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Summary,
    Skills,
    Experience,
    Education,
    Links,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Summary,
        Section::Skills,
        Section::Experience,
        Section::Education,
        Section::Links,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Summary => "Professional Summary",
            Section::Skills => "Skills",
            Section::Experience => "Work Experience",
            Section::Education => "Education",
            Section::Links => "Links",
        }
    }

    fn heading_keywords(&self) -> &'static [&'static str] {
        match self {
            Section::Summary => &["summary", "profile", "objective", "about me"],
            Section::Skills => &["skills", "technical skills", "competencies", "tech stack"],
            Section::Experience => &[
                "experience",
                "work experience",
                "employment",
                "work history",
                "professional experience",
            ],
            Section::Education => &["education", "academic", "qualifications"],
            Section::Links => &["linkedin", "github", "portfolio"],
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Section::Summary => "Add a 2-3 line professional summary at the top.",
            Section::Skills => "Add a dedicated Skills section listing your core tools.",
            Section::Experience => "Add a Work Experience section with role, company and dates.",
            Section::Education => "Add an Education section with degree and institution.",
            Section::Links => "Add a LinkedIn, GitHub or portfolio link to your contact details.",
        }
    }
}

static SECTION_PATTERNS: Lazy<Vec<(Section, Regex)>> = Lazy::new(|| {
    Section::ALL
        .iter()
        .map(|section| {
            let alternatives: Vec<String> = section
                .heading_keywords()
                .iter()
                .map(|k| regex::escape(k))
                .collect();
            let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
            (*section, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static LINK_HOSTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)linkedin\.com|github\.com|https?://|\bwww\.").unwrap());

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionReport {
    pub present: Vec<Section>,
    pub missing: Vec<Section>,
}

impl SectionReport {
    pub fn has(&self, section: Section) -> bool {
        self.present.contains(&section)
    }

    pub fn present_ratio(&self) -> f64 {
        self.present.len() as f64 / Section::ALL.len() as f64
    }
}

fn section_present(section: Section, pattern: &Regex, text: &str) -> bool {
    pattern.is_match(text) || (section == Section::Links && LINK_HOSTS.is_match(text))
}

/// Checks each expected section's heading keywords against raw (unsanitized) text.
pub fn check_sections(text: &str) -> SectionReport {
    let (present, missing) = SECTION_PATTERNS
        .iter()
        .partition::<Vec<_>, _>(|(section, pattern)| section_present(*section, pattern, text));

    SectionReport {
        present: present.into_iter().map(|(s, _)| *s).collect(),
        missing: missing.into_iter().map(|(s, _)| *s).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "\
        PROFESSIONAL SUMMARY\nBackend engineer.\n\
        SKILLS\nRust, SQL\n\
        WORK EXPERIENCE\nAcme 2019-2023\n\
        EDUCATION\nBSc Computer Science\n\
        linkedin.com/in/someone";

    #[test]
    fn test_full_resume_has_no_missing_sections() {
        let report = check_sections(FULL_RESUME);
        assert!(report.missing.is_empty(), "missing: {:?}", report.missing);
        assert_eq!(report.present.len(), 5);
        assert!((report.present_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_headings_reports_everything_missing() {
        let report = check_sections("Just some words about gardening.");
        assert_eq!(report.missing, Section::ALL.to_vec());
        assert!(report.present.is_empty());
    }

    #[test]
    fn test_example_resume_flags_summary() {
        let report = check_sections(
            "Experienced Python developer. Skills: Python, SQL, Docker. \
             Education: BS Computer Science.",
        );
        assert!(report.missing.contains(&Section::Summary));
        assert!(report.has(Section::Skills));
        assert!(report.has(Section::Education));
        // "Experienced" is not an Experience heading.
        assert!(!report.has(Section::Experience));
        assert_eq!(Section::Summary.label(), "Professional Summary");
    }

    #[test]
    fn test_links_detected_from_url() {
        let report = check_sections("Portfolio at https://jane.dev");
        assert!(report.has(Section::Links));
        let report = check_sections("see www.jane.dev");
        assert!(report.has(Section::Links));
    }

    #[test]
    fn test_order_independent() {
        let a = check_sections("Education\nSkills\nExperience");
        let b = check_sections("Experience\nSkills\nEducation");
        assert_eq!(a, b);
    }
}
