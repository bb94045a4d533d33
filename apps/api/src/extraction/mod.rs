//! Heuristic resume extraction from plain document text.
//!
//! Everything here is total: any input, including empty or garbage text,
//! produces an [`Extraction`]. Unrecognised structure just means fewer entries.

pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod location;
pub mod projects;
pub mod sections;
pub mod skills;

use serde::Serialize;

use crate::models::resume::StructuredResume;
use sections::SectionKind;

/// Best-effort extraction output. `sections` lists the section kinds whose
/// headers were found, in document order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub resume: StructuredResume,
    pub sections: Vec<SectionKind>,
}

pub fn extract_resume(text: &str) -> Extraction {
    let mut resume = StructuredResume::default();
    contact::extract_contact(text, &mut resume);

    let sections: Vec<SectionKind> = sections::find_section_boundaries(text)
        .iter()
        .map(|b| b.kind)
        .collect();

    for (kind, body) in sections::split_sections(text) {
        match kind {
            SectionKind::Education => resume.education = education::parse_education(&body),
            SectionKind::Experience => resume.experience = experience::parse_experience(&body),
            SectionKind::Projects => resume.projects = projects::parse_projects(&body),
            SectionKind::Skills => resume.skills = skills::parse_skills(&body),
        }
    }

    Extraction { resume, sections }
}

/// Trimmed, non-empty lines.
pub(crate) fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty())
}

const BULLET_GLYPHS: [char; 3] = ['•', '-', '*'];

/// Strips a leading bullet glyph. `None` when the line is not a bullet; a bare
/// glyph yields an empty string.
pub(crate) fn strip_bullet(line: &str) -> Option<&str> {
    if !line.starts_with(BULLET_GLYPHS) {
        return None;
    }
    Some(
        line.trim_start_matches(|c: char| BULLET_GLYPHS.contains(&c) || c.is_whitespace())
            .trim(),
    )
}
