use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::storage::ObjectHandle;

/// Category given to skills lines that carry no explicit label.
pub const DEFAULT_SKILL_CATEGORY: &str = "General";

/// End-date token reserved for ongoing experience entries.
pub const PRESENT: &str = "Present";

// ────────────────────────────────────────────────────────────────────────────
// Canonical resume schema
// ────────────────────────────────────────────────────────────────────────────

/// The canonical normalized resume. Both the PDF extractor and the form parser
/// produce this; the template filler only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredResume {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(alias = "LinkedIn")]
    pub linkedin: String,
    #[serde(alias = "Website")]
    pub website: String,
    pub professional_summary: String,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<SkillEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub institution: String,
    pub degree: String,
    /// Field of study when the degree line was split on " in ".
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,
    pub location: String,
    /// Two-digit month ("01".."12"). Absent means ongoing or unspecified.
    pub end_month: Option<String>,
    pub end_year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub location: String,
    /// "YYYY-MM"
    pub start: Option<String>,
    /// "YYYY-MM" or "Present"
    pub end: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub title: String,
    pub skills: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillEntry {
    pub category: String,
    pub skills: String,
}

impl EducationEntry {
    /// Degree text as it should appear on a rendered document.
    pub fn display_degree(&self) -> String {
        match (self.degree.is_empty(), self.field.is_empty()) {
            (_, true) => self.degree.clone(),
            (true, false) => self.field.clone(),
            (false, false) => format!("{} in {}", self.degree, self.field),
        }
    }
}

impl StructuredResume {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Applies the persistence invariants. Called once at the save boundary so
    /// everything downstream can treat the value as already valid.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.email,
            &mut self.phone_number,
            &mut self.linkedin,
            &mut self.website,
            &mut self.professional_summary,
        ] {
            *field = field.trim().to_string();
        }

        self.education.retain(|e| !e.institution.trim().is_empty());
        for edu in &mut self.education {
            edu.institution = edu.institution.trim().to_string();
            edu.degree = edu.degree.trim().to_string();
            edu.field = edu.field.trim().to_string();
            edu.location = edu.location.trim().to_string();
            edu.end_month = edu
                .end_month
                .take()
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .map(|m| format!("{m:0>2}"));
        }

        self.experience
            .retain(|e| !e.company.trim().is_empty() && !e.role.trim().is_empty());
        for exp in &mut self.experience {
            exp.company = exp.company.trim().to_string();
            exp.role = exp.role.trim().to_string();
            exp.location = exp.location.trim().to_string();
            exp.bullets = clean_bullets(&exp.bullets);
        }

        self.projects.retain(|p| !p.title.trim().is_empty());
        for proj in &mut self.projects {
            proj.title = proj.title.trim().to_string();
            proj.skills = proj.skills.trim().to_string();
            proj.bullets = clean_bullets(&proj.bullets);
        }

        self.skills
            .retain(|s| !s.category.trim().is_empty() || !s.skills.trim().is_empty());
        for skill in &mut self.skills {
            skill.category = skill.category.trim().to_string();
            skill.skills = skill.skills.trim().to_string();
            if skill.category.is_empty() {
                skill.category = DEFAULT_SKILL_CATEGORY.to_string();
            }
        }

        self
    }
}

fn clean_bullets(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .map(|b| b.trim())
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Persisted rows
// ────────────────────────────────────────────────────────────────────────────

/// One immutable snapshot of a resume. Edits append a new version under the
/// same `resume_id`; older versions are never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRecord {
    pub resume_id: Uuid,
    pub version: i32,
    pub user_id: Option<String>,
    pub title: String,
    pub data: Json<StructuredResume>,
    pub created_at: DateTime<Utc>,
}

/// A resume snapshot compiled against one template variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RenderRecord {
    pub resume_id: Uuid,
    pub version: i32,
    pub template_id: String,
    pub latex_handle: ObjectHandle,
    pub pdf_handle: ObjectHandle,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_contact_keys_deserialize() {
        let json = r#"{
            "first_name": "Jane",
            "LinkedIn": "linkedin.com/in/jane",
            "Website": "jane.dev"
        }"#;
        let resume: StructuredResume = serde_json::from_str(json).unwrap();
        assert_eq!(resume.linkedin, "linkedin.com/in/jane");
        assert_eq!(resume.website, "jane.dev");
        assert!(resume.education.is_empty());
    }

    #[test]
    fn test_normalized_drops_experience_without_company_or_role() {
        let resume = StructuredResume {
            experience: vec![
                ExperienceEntry {
                    company: "Google".to_string(),
                    role: "Engineer".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    company: "Nobody".to_string(),
                    role: "  ".to_string(),
                    ..Default::default()
                },
                ExperienceEntry {
                    role: "Orphan".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
        .normalized();

        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].company, "Google");
    }

    #[test]
    fn test_normalized_defaults_skill_category() {
        let resume = StructuredResume {
            skills: vec![
                SkillEntry {
                    category: String::new(),
                    skills: "Rust, Go".to_string(),
                },
                SkillEntry::default(),
            ],
            ..Default::default()
        }
        .normalized();

        assert_eq!(resume.skills.len(), 1);
        assert_eq!(resume.skills[0].category, DEFAULT_SKILL_CATEGORY);
    }

    #[test]
    fn test_normalized_pads_education_month_and_drops_untitled_projects() {
        let resume = StructuredResume {
            education: vec![EducationEntry {
                institution: "MIT".to_string(),
                end_month: Some("5".to_string()),
                end_year: Some(2020),
                ..Default::default()
            }],
            projects: vec![ProjectEntry {
                title: " ".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
        .normalized();

        assert_eq!(resume.education[0].end_month.as_deref(), Some("05"));
        assert!(resume.projects.is_empty());
    }

    #[test]
    fn test_display_degree_joins_field() {
        let edu = EducationEntry {
            degree: "Bachelor of Science".to_string(),
            field: "Computer Engineering".to_string(),
            ..Default::default()
        };
        assert_eq!(
            edu.display_degree(),
            "Bachelor of Science in Computer Engineering"
        );
    }

    #[test]
    fn test_full_name_trims() {
        let resume = StructuredResume {
            first_name: "Cher".to_string(),
            ..Default::default()
        };
        assert_eq!(resume.full_name(), "Cher");
    }
}
