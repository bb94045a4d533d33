//! LaTeX template filling.
//!
//! A [`TemplateVariant`] pairs a bundled `.tex` skeleton with a
//! [`RegionBuilder`] that renders each named region from a
//! [`StructuredResume`]. Filling builds every region body, then splices them
//! into the skeleton; a region whose body is empty is removed outright, header
//! included.

pub mod contact;
pub mod dates;
pub mod escape;
pub mod harshibar;
pub mod jake;
pub mod regions;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ProjectEntry, SkillEntry, StructuredResume,
};
use contact::ContactLine;
use escape::escape_latex;
use regions::{splice_regions, Region};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FillError {
    #[error("Unknown template: {template_id}")]
    UnknownTemplate { template_id: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Variants
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Jake,
    Harshibar,
}

/// Listing entry for a variant.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 2] = [TemplateVariant::Jake, TemplateVariant::Harshibar];

    pub fn id(self) -> &'static str {
        match self {
            TemplateVariant::Jake => "jake",
            TemplateVariant::Harshibar => "harshibar",
        }
    }

    pub fn info(self) -> TemplateInfo {
        match self {
            TemplateVariant::Jake => TemplateInfo {
                id: self.id(),
                name: "Jake's Resume",
                description: "Single-column classic with small caps name and underlined links",
            },
            TemplateVariant::Harshibar => TemplateInfo {
                id: self.id(),
                name: "Harshibar",
                description: "Compact layout with FontAwesome contact icons, experience first",
            },
        }
    }

    pub fn skeleton(self) -> &'static str {
        match self {
            TemplateVariant::Jake => include_str!("../../templates/jake.tex"),
            TemplateVariant::Harshibar => include_str!("../../templates/harshibar.tex"),
        }
    }

    fn builder(self) -> &'static dyn RegionBuilder {
        match self {
            TemplateVariant::Jake => &jake::Jake,
            TemplateVariant::Harshibar => &harshibar::Harshibar,
        }
    }
}

impl FromStr for TemplateVariant {
    type Err = FillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateVariant::ALL
            .into_iter()
            .find(|v| v.id() == s)
            .ok_or_else(|| FillError::UnknownTemplate {
                template_id: s.to_string(),
            })
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Region builders
// ────────────────────────────────────────────────────────────────────────────

/// Variant-specific markup for each region. Every method is pure and returns
/// an empty string when the region has nothing to render.
pub trait RegionBuilder: Send + Sync {
    fn heading(&self, contact: &ContactLine) -> String;
    fn education(&self, entries: &[EducationEntry]) -> String;
    fn experience(&self, entries: &[ExperienceEntry]) -> String;
    fn projects(&self, entries: &[ProjectEntry]) -> String;
    fn skills(&self, entries: &[SkillEntry]) -> String;

    /// Adjusts the raw skeleton before any region is spliced.
    fn prepare_skeleton(&self, skeleton: &str) -> String {
        skeleton.to_string()
    }

    fn region(&self, region: Region, resume: &StructuredResume) -> String {
        match region {
            Region::Heading => self.heading(&ContactLine::from_resume(resume)),
            Region::Education => self.education(&resume.education),
            Region::Experience => self.experience(&resume.experience),
            Region::Projects => self.projects(&resume.projects),
            Region::Skills => self.skills(&resume.skills),
        }
    }
}

/// Fills the variant named `template_id` with its bundled skeleton.
pub fn fill_template(resume: &StructuredResume, template_id: &str) -> Result<String, FillError> {
    let variant: TemplateVariant = template_id.parse()?;
    Ok(fill_markup(resume, variant, variant.skeleton()))
}

/// Fills an arbitrary skeleton that uses the standard region markers.
pub fn fill_markup(resume: &StructuredResume, variant: TemplateVariant, skeleton: &str) -> String {
    let builder = variant.builder();
    let bodies: Vec<(Region, String)> = Region::ALL
        .into_iter()
        .map(|region| (region, builder.region(region, resume)))
        .collect();
    splice_regions(&builder.prepare_skeleton(skeleton), &bodies)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared fragments
// ────────────────────────────────────────────────────────────────────────────

/// Escaped, non-blank bullets.
pub(crate) fn escaped_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(escape_latex)
        .collect()
}

/// `\resumeItemListStart … \resumeItemListEnd`, or nothing without bullets.
pub(crate) fn item_list(bullets: &[String], indent: &str) -> String {
    let items = escaped_bullets(bullets);
    if items.is_empty() {
        return String::new();
    }
    let mut out = format!("{indent}\\resumeItemListStart\n");
    for item in items {
        out.push_str(&format!("{indent}  \\resumeItem{{{item}}}\n"));
    }
    out.push_str(&format!("{indent}\\resumeItemListEnd\n"));
    out
}

/// Skills entries with both a category and a skills string, escaped.
pub(crate) fn skill_pairs(entries: &[SkillEntry]) -> Vec<(String, String)> {
    entries
        .iter()
        .filter(|s| !s.category.trim().is_empty() && !s.skills.trim().is_empty())
        .map(|s| (escape_latex(s.category.trim()), escape_latex(s.skills.trim())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_resume() -> StructuredResume {
        StructuredResume {
            first_name: "Jake".to_string(),
            last_name: "Ryan".to_string(),
            email: "jake@su.edu".to_string(),
            phone_number: "123-456-7890".to_string(),
            linkedin: "jake".to_string(),
            education: vec![EducationEntry {
                institution: "Southwestern University".to_string(),
                degree: "Bachelor of Arts".to_string(),
                field: "Computer Science".to_string(),
                location: "Georgetown, TX".to_string(),
                end_month: Some("05".to_string()),
                end_year: Some(2021),
            }],
            experience: vec![ExperienceEntry {
                company: "Texas A&M University".to_string(),
                role: "Research Assistant".to_string(),
                location: "College Station, TX".to_string(),
                start: Some("2020-06".to_string()),
                end: None,
                bullets: vec!["Built a 50% faster API".to_string()],
            }],
            projects: vec![ProjectEntry {
                title: "Gitlytics".to_string(),
                skills: "Python, Flask".to_string(),
                bullets: vec![],
            }],
            skills: vec![SkillEntry {
                category: "Languages".to_string(),
                skills: "C#, Rust".to_string(),
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_template_names_identifier() {
        let err = fill_template(&sample_resume(), "nonexistent").unwrap_err();
        assert_eq!(
            err,
            FillError::UnknownTemplate {
                template_id: "nonexistent".to_string()
            }
        );
        assert_eq!(err.to_string(), "Unknown template: nonexistent");
    }

    #[test]
    fn test_variant_ids_parse() {
        for variant in TemplateVariant::ALL {
            assert_eq!(variant.id().parse::<TemplateVariant>(), Ok(variant));
        }
        assert!("Jake".parse::<TemplateVariant>().is_err());
    }

    #[test]
    fn test_every_variant_fills_all_regions() {
        for variant in TemplateVariant::ALL {
            let out = fill_template(&sample_resume(), variant.id()).unwrap();
            assert!(out.contains("Jake Ryan"), "{variant}");
            assert!(out.contains(r"Texas A\&M University"), "{variant}");
            assert!(out.contains(r"Built a 50\% faster API"), "{variant}");
            assert!(out.contains("June 2020 -- Present"), "{variant}");
            assert!(out.contains("Gitlytics"), "{variant}");
            assert!(out.contains(r"C\#, Rust"), "{variant}");
            assert!(out.contains("https://linkedin.com/in/jake"), "{variant}");
            assert!(out.contains(r"\end{document}"), "{variant}");
        }
    }

    #[test]
    fn test_empty_experience_omits_section_header() {
        let resume = StructuredResume {
            experience: vec![],
            ..sample_resume()
        };
        let jake = fill_template(&resume, "jake").unwrap();
        assert!(!jake.contains(r"\section{Experience}"));
        assert!(!jake.contains("%-----------EXPERIENCE"));
        assert!(jake.contains(r"\section{Education}"));

        let harshibar = fill_template(&resume, "harshibar").unwrap();
        assert!(!harshibar.contains(r"\section{EXPERIENCE}"));
    }

    #[test]
    fn test_unrenderable_entries_omit_section() {
        let resume = StructuredResume {
            skills: vec![SkillEntry {
                category: "Tools".to_string(),
                skills: String::new(),
            }],
            ..sample_resume()
        };
        let out = fill_template(&resume, "jake").unwrap();
        assert!(!out.contains(r"\section{Technical Skills}"));
    }

    #[test]
    fn test_hostile_urls_stay_inside_href() {
        let resume = StructuredResume {
            website: r"x.com}\input{/etc/passwd}\iffalse{".to_string(),
            email: r"a@b.c}\input{/etc/passwd}".to_string(),
            ..sample_resume()
        };
        for variant in TemplateVariant::ALL {
            let out = fill_template(&resume, variant.id()).unwrap();
            assert!(!out.contains(r"\input{/etc/passwd}"), "{variant}");
            assert!(out.contains("x.com%7D%5Cinput%7B/etc/passwd%7D"), "{variant}");
        }
    }

    #[test]
    fn test_marker_shaped_bullet_does_not_swallow_next_region() {
        let resume = StructuredResume {
            projects: vec![ProjectEntry {
                title: "Gitlytics".to_string(),
                skills: String::new(),
                bullets: vec!["%-----------PROGRAMMING SKILLS-----------".to_string()],
            }],
            ..sample_resume()
        };
        for variant in TemplateVariant::ALL {
            let out = fill_template(&resume, variant.id()).unwrap();
            assert!(
                out.contains(r"\%-----------PROGRAMMING SKILLS-----------"),
                "{variant}"
            );
            assert!(out.contains("Gitlytics"), "{variant}");
            assert!(out.contains(r"C\#, Rust"), "{variant}");
            assert_eq!(
                out.matches(r"\resumeSubHeadingListStart").count(),
                out.matches(r"\resumeSubHeadingListEnd").count(),
                "{variant}"
            );
        }
    }

    #[test]
    fn test_item_list_skips_blank_bullets() {
        assert_eq!(item_list(&[" ".to_string()], "  "), "");
        let list = item_list(&["a_b".to_string()], "");
        assert_eq!(
            list,
            "\\resumeItemListStart\n  \\resumeItem{a\\_b}\n\\resumeItemListEnd\n"
        );
    }
}
