use serde::Serialize;

/// Minimum characters for a text blob to plausibly be a resume.
const MIN_RESUME_LEN: usize = 50;

/// A resume should mention at least this many of the common section keywords.
const MIN_KEYWORD_HITS: usize = 2;

const RESUME_KEYWORDS: &[&str] = &[
    "experience",
    "education",
    "skills",
    "work",
    "employment",
    "university",
    "college",
    "degree",
    "certification",
    "project",
];

/// Per-section presence flags surfaced to the client alongside the letter,
/// so a thin resume can be flagged before the user sends the result anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct SectionReport {
    pub has_contact_info: bool,
    pub has_experience: bool,
    pub has_education: bool,
    pub has_skills: bool,
}

/// Heuristic sanity check: long enough, and mentions at least two of the
/// usual resume section keywords.
pub fn validate_resume_text(resume_text: &str) -> bool {
    let trimmed = resume_text.trim();
    if trimmed.len() < MIN_RESUME_LEN {
        return false;
    }

    let text_lower = trimmed.to_lowercase();
    let hits = RESUME_KEYWORDS
        .iter()
        .filter(|kw| text_lower.contains(*kw))
        .count();

    hits >= MIN_KEYWORD_HITS
}

/// Scans for the usual resume sections by keyword.
pub fn section_report(resume_text: &str) -> SectionReport {
    let text_lower = resume_text.to_lowercase();
    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|kw| text_lower.contains(kw));

    SectionReport {
        has_contact_info: contains_any(&["email", "phone", "linkedin", "@"]),
        has_experience: contains_any(&["experience", "work", "employment", "job"]),
        has_education: contains_any(&["education", "university", "college", "degree"]),
        has_skills: contains_any(&["skills", "technology", "programming", "software"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESUME: &str = "Jane Doe — jane@example.com\n\
        Experience: 5 years building Rust services.\n\
        Education: BSc Computer Science, Example University.\n\
        Skills: Rust, Tokio, Axum.";

    #[test]
    fn test_valid_resume_passes() {
        assert!(validate_resume_text(SAMPLE_RESUME));
    }

    #[test]
    fn test_short_text_fails() {
        assert!(!validate_resume_text("Jane Doe"));
    }

    #[test]
    fn test_long_but_keywordless_text_fails() {
        let text = "lorem ipsum dolor sit amet ".repeat(10);
        assert!(!validate_resume_text(&text));
    }

    #[test]
    fn test_section_report_flags() {
        let report = section_report(SAMPLE_RESUME);
        assert!(report.has_contact_info);
        assert!(report.has_experience);
        assert!(report.has_education);
        assert!(report.has_skills);

        let empty = section_report("nothing of note");
        assert!(!empty.has_contact_info);
        assert!(!empty.has_experience);
    }
}
