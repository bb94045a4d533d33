use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::StructuredResume;

static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static RE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static RE_LINKEDIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/in/[A-Za-z0-9_-]+").unwrap());

static RE_GITHUB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)github\.com/[A-Za-z0-9_-]+").unwrap());

/// Fills the identity fields of `resume` from anywhere in `text`.
///
/// The name is the first non-empty line: first token → first name, the rest →
/// last name. Documents that open with a title rather than a name get that
/// title as the name.
pub fn extract_contact(text: &str, resume: &mut StructuredResume) {
    if let Some(m) = RE_EMAIL.find(text) {
        resume.email = m.as_str().to_string();
    }
    if let Some(m) = RE_PHONE.find(text) {
        resume.phone_number = m.as_str().trim().to_string();
    }
    if let Some(m) = RE_LINKEDIN.find(text) {
        resume.linkedin = m.as_str().to_string();
    }
    if let Some(m) = RE_GITHUB.find(text) {
        resume.website = m.as_str().to_string();
    }

    if let Some(first_line) = text.lines().map(str::trim).find(|l| !l.is_empty()) {
        let mut tokens = first_line.split_whitespace();
        if let Some(first) = tokens.next() {
            resume.first_name = first.to_string();
        }
        resume.last_name = tokens.collect::<Vec<_>>().join(" ");
    }
}
