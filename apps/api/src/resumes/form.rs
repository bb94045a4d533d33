//! Flattened edit-form fields ⇄ [`StructuredResume`].
//!
//! The form posts repeated groups as indexed keys (`experience_0_company`,
//! `experience_0_bullet_2`, …) with a `<group>_count` field per group.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::resume::{
    EducationEntry, ExperienceEntry, ProjectEntry, SkillEntry, StructuredResume,
    DEFAULT_SKILL_CATEGORY, PRESENT,
};

pub type FormFields = HashMap<String, String>;

fn field<'a>(fields: &'a FormFields, key: &str) -> &'a str {
    fields.get(key).map_or("", |v| v.trim())
}

fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// A posted group count, capped at the number of submitted fields since every
/// real entry needs at least one key of its own.
fn count(fields: &FormFields, key: &str) -> usize {
    field(fields, key)
        .parse::<usize>()
        .unwrap_or(0)
        .min(fields.len())
}

/// Reads `<prefix>_bullet_<j>` by the declared count, or sequentially until
/// the first blank when no numeric count was posted.
fn bullets(fields: &FormFields, prefix: &str) -> Vec<String> {
    let declared = field(fields, &format!("{prefix}_bullet_count"));
    let read = |j: usize| field(fields, &format!("{prefix}_bullet_{j}")).to_string();

    if is_digits(declared) {
        let n = count(fields, &format!("{prefix}_bullet_count"));
        (0..n).map(read).filter(|b| !b.is_empty()).collect()
    } else {
        (0..fields.len())
            .map(read)
            .take_while(|b| !b.is_empty())
            .collect()
    }
}

/// "YYYY-MM" from separate month/year inputs. Returns `None` without a numeric
/// year; a missing month becomes `default_month`.
fn year_month(month: &str, year: &str, default_month: &str) -> Option<String> {
    if !is_digits(year) {
        return None;
    }
    let month = if is_digits(month) { month } else { default_month };
    Some(format!("{year}-{month:0>2}"))
}

pub fn parse_form(fields: &FormFields) -> StructuredResume {
    let mut resume = StructuredResume {
        first_name: field(fields, "first_name").to_string(),
        last_name: field(fields, "last_name").to_string(),
        email: field(fields, "email").to_string(),
        phone_number: field(fields, "phone").to_string(),
        linkedin: field(fields, "linkedin").to_string(),
        website: field(fields, "website").to_string(),
        professional_summary: field(fields, "introduction").to_string(),
        ..Default::default()
    };

    for i in 0..count(fields, "education_count") {
        let get = |name: &str| field(fields, &format!("education_{i}_{name}"));
        let school = get("school");
        if school.is_empty() {
            continue;
        }
        let month = get("graduation_month");
        let year = get("graduation_year");
        resume.education.push(EducationEntry {
            institution: school.to_string(),
            degree: get("degree").to_string(),
            field: get("field").to_string(),
            location: get("location").to_string(),
            end_month: is_digits(month).then(|| month.to_string()),
            end_year: if is_digits(year) { year.parse().ok() } else { None },
        });
    }

    for i in 0..count(fields, "experience_count") {
        let prefix = format!("experience_{i}");
        let get = |name: &str| field(fields, &format!("{prefix}_{name}"));
        let (company, title) = (get("company"), get("title"));
        if company.is_empty() || title.is_empty() {
            continue;
        }
        let end = if get("currently_working") == "true" {
            Some(PRESENT.to_string())
        } else {
            year_month(get("end_month"), get("end_year"), "12")
        };
        resume.experience.push(ExperienceEntry {
            company: company.to_string(),
            role: title.to_string(),
            location: get("location").to_string(),
            start: year_month(get("start_month"), get("start_year"), "01"),
            end,
            bullets: bullets(fields, &prefix),
        });
    }

    for i in 0..count(fields, "skills_count") {
        let category = field(fields, &format!("skill_{i}_category"));
        let skills = field(fields, &format!("skill_{i}_skills"));
        if category.is_empty() && skills.is_empty() {
            continue;
        }
        resume.skills.push(SkillEntry {
            category: if category.is_empty() {
                DEFAULT_SKILL_CATEGORY.to_string()
            } else {
                category.to_string()
            },
            skills: skills.to_string(),
        });
    }

    for i in 0..count(fields, "projects_count") {
        let prefix = format!("project_{i}");
        let title = field(fields, &format!("{prefix}_title"));
        if title.is_empty() {
            continue;
        }
        resume.projects.push(ProjectEntry {
            title: title.to_string(),
            skills: field(fields, &format!("{prefix}_skills")).to_string(),
            bullets: bullets(fields, &prefix),
        });
    }

    resume
}

// ────────────────────────────────────────────────────────────────────────────
// Prefill
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormPrefill {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub website: String,
    pub introduction: String,
    pub education: Vec<EducationPrefill>,
    pub experience: Vec<ExperiencePrefill>,
    pub skills: Vec<SkillEntry>,
    pub projects: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationPrefill {
    pub school: String,
    pub location: String,
    pub degree: String,
    pub field: String,
    pub end_month: String,
    pub end_year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperiencePrefill {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_month: String,
    pub start_year: String,
    pub end_month: String,
    pub end_year: String,
    pub currently_working: bool,
    pub bullets: Vec<String>,
}

/// Splits a combined degree for the two form inputs: on " in ", else a short
/// leading abbreviation ("BS Computer Science").
fn split_degree(degree: &str) -> (String, String) {
    if let Some((d, f)) = degree.split_once(" in ") {
        return (d.to_string(), f.to_string());
    }
    match degree.split_once(' ') {
        Some((abbrev, rest)) if abbrev.chars().count() <= 5 => {
            (abbrev.to_string(), rest.to_string())
        }
        _ => (degree.to_string(), String::new()),
    }
}

/// "2020-06" → ("2020", "6").
fn split_year_month(value: Option<&str>) -> (String, String) {
    match value.and_then(|v| v.split_once('-')) {
        Some((year, month)) => {
            let month = if month.len() > 1 {
                month.trim_start_matches('0')
            } else {
                month
            };
            (year.to_string(), month.to_string())
        }
        None => (String::new(), String::new()),
    }
}

pub fn to_form_prefill(resume: &StructuredResume) -> FormPrefill {
    let education = resume
        .education
        .iter()
        .map(|edu| {
            let (degree, field) = if edu.field.is_empty() {
                split_degree(&edu.degree)
            } else {
                (edu.degree.clone(), edu.field.clone())
            };
            EducationPrefill {
                school: edu.institution.clone(),
                location: edu.location.clone(),
                degree,
                field,
                end_month: edu.end_month.clone().unwrap_or_default(),
                end_year: edu.end_year.map(|y| y.to_string()).unwrap_or_default(),
            }
        })
        .collect();

    let experience = resume
        .experience
        .iter()
        .map(|exp| {
            let currently_working = exp.end.as_deref().map_or(true, |e| e == PRESENT);
            let (start_year, start_month) = split_year_month(exp.start.as_deref());
            let (end_year, end_month) = if currently_working {
                (String::new(), String::new())
            } else {
                split_year_month(exp.end.as_deref())
            };
            ExperiencePrefill {
                title: exp.role.clone(),
                company: exp.company.clone(),
                location: exp.location.clone(),
                start_month,
                start_year,
                end_month,
                end_year,
                currently_working,
                bullets: exp.bullets.clone(),
            }
        })
        .collect();

    FormPrefill {
        first_name: resume.first_name.clone(),
        last_name: resume.last_name.clone(),
        email: resume.email.clone(),
        phone: resume.phone_number.clone(),
        linkedin: resume.linkedin.clone(),
        website: resume.website.clone(),
        introduction: resume.professional_summary.clone(),
        education,
        experience,
        skills: resume.skills.clone(),
        projects: resume.projects.clone(),
    }
}
