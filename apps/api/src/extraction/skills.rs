use crate::extraction::non_empty_lines;
use crate::models::resume::{SkillEntry, DEFAULT_SKILL_CATEGORY};

/// Parses a skills section: `Category: a, b, c` per line. Lines without a colon
/// land in the default category.
pub fn parse_skills(text: &str) -> Vec<SkillEntry> {
    non_empty_lines(text)
        .map(|line| match line.split_once(':') {
            Some((category, skills)) => {
                let category = category.trim();
                SkillEntry {
                    category: if category.is_empty() {
                        DEFAULT_SKILL_CATEGORY.to_string()
                    } else {
                        category.to_string()
                    },
                    skills: skills.trim().to_string(),
                }
            }
            None => SkillEntry {
                category: DEFAULT_SKILL_CATEGORY.to_string(),
                skills: line.to_string(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorised_lines() {
        let skills = parse_skills(
            "Languages: Python, Java, JavaScript\nFrameworks: React, Django, Flask\nTools: Git, Docker, AWS",
        );
        assert_eq!(skills.len(), 3);
        assert_eq!(skills[0].category, "Languages");
        assert_eq!(skills[0].skills, "Python, Java, JavaScript");
        assert_eq!(skills[2].category, "Tools");
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let skills = parse_skills("Web: http://example.com");
        assert_eq!(skills[0].category, "Web");
        assert_eq!(skills[0].skills, "http://example.com");
    }

    #[test]
    fn test_line_without_colon_is_general() {
        let skills = parse_skills("Rust, Go, Zig");
        assert_eq!(skills[0].category, DEFAULT_SKILL_CATEGORY);
        assert_eq!(skills[0].skills, "Rust, Go, Zig");
    }

    #[test]
    fn test_blank_lines_skipped() {
        assert!(parse_skills("\n  \n").is_empty());
    }
}
