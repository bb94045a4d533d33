//! Section boundary detection by keyword anchoring.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Education,
    Experience,
    Skills,
    Projects,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::Skills,
        SectionKind::Projects,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKind::Education => &["education", "university", "college", "academic background"],
            SectionKind::Experience => &["experience", "work experience", "employment", "work history"],
            SectionKind::Skills => &["skills", "technologies", "technical skills"],
            SectionKind::Projects => &["projects", "personal projects", "portfolio"],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Education => "education",
            SectionKind::Experience => "experience",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
        }
    }
}

/// Where a recognised section header begins in the raw text. Only used while
/// parsing; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionBoundary {
    pub kind: SectionKind,
    pub start: usize,
}

/// One case-insensitive, word-bounded alternation per section kind. The leftmost
/// match of the alternation is the earliest keyword hit for that kind.
static SECTION_PATTERNS: LazyLock<Vec<(SectionKind, Regex)>> = LazyLock::new(|| {
    SectionKind::ALL
        .iter()
        .map(|&kind| {
            let alternation = kind
                .keywords()
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{alternation})\b");
            (kind, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Returns the earliest boundary of each section kind found in `text`, sorted by
/// offset. Later keyword hits for an already-found kind are discarded.
pub fn find_section_boundaries(text: &str) -> Vec<SectionBoundary> {
    let mut boundaries: Vec<SectionBoundary> = SECTION_PATTERNS
        .iter()
        .filter_map(|(kind, re)| {
            re.find(text).map(|m| SectionBoundary {
                kind: *kind,
                start: m.start(),
            })
        })
        .collect();
    boundaries.sort_by_key(|b| b.start);
    boundaries
}

/// Splits `text` into per-section bodies. Each span runs to the next boundary
/// (or end of text) and has its header line removed.
pub fn split_sections(text: &str) -> BTreeMap<SectionKind, String> {
    let boundaries = find_section_boundaries(text);
    let mut sections = BTreeMap::new();

    for (i, boundary) in boundaries.iter().enumerate() {
        let end = boundaries.get(i + 1).map_or(text.len(), |next| next.start);
        let span = &text[boundary.start..end];
        let body = match span.split_once('\n') {
            Some((_header, rest)) => rest.trim(),
            None => span.trim(),
        };
        sections.insert(boundary.kind, body.to_string());
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "John Doe\n\
        Experience\n\
        Software Engineer June 2020 – Present\n\
        Google\n\
        Education\n\
        MIT\n\
        Skills\n\
        Languages: Python\n";

    #[test]
    fn test_boundaries_sorted_by_offset() {
        let kinds: Vec<_> = find_section_boundaries(SAMPLE)
            .iter()
            .map(|b| b.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Experience,
                SectionKind::Education,
                SectionKind::Skills
            ]
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "Work Experience\nAcme\nSkills\nmore experience here\n";
        let boundaries = find_section_boundaries(text);
        let experience = boundaries
            .iter()
            .find(|b| b.kind == SectionKind::Experience)
            .unwrap();
        assert_eq!(experience.start, 0);
        assert_eq!(boundaries.len(), 2);
    }

    #[test]
    fn test_header_line_stripped_from_span() {
        let sections = split_sections(SAMPLE);
        assert_eq!(
            sections[&SectionKind::Experience],
            "Software Engineer June 2020 – Present\nGoogle"
        );
        assert_eq!(sections[&SectionKind::Education], "MIT");
        assert_eq!(sections[&SectionKind::Skills], "Languages: Python");
    }

    #[test]
    fn test_keyword_requires_word_boundary() {
        assert!(find_section_boundaries("Inexperienced Skillset").is_empty());
    }

    #[test]
    fn test_no_keywords_yields_no_sections() {
        assert!(split_sections("Just some random text without headers.").is_empty());
        assert!(split_sections("").is_empty());
    }

    #[test]
    fn test_header_on_last_line_keeps_span() {
        let sections = split_sections("Name\nProjects");
        assert_eq!(sections[&SectionKind::Projects], "Projects");
    }
}
