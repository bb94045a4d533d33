use crate::extraction::dates::find_date_range;
use crate::extraction::{non_empty_lines, strip_bullet};
use crate::models::resume::ProjectEntry;

/// Lowercase technology names that mark a line (or the right side of a `|`
/// heading) as a tech stack rather than prose.
const TECH_KEYWORDS: &[&str] = &[
    "python",
    "java",
    "c++",
    "react",
    "sql",
    "docker",
    "flask",
    "node",
    "aws",
    "git",
    "html",
    "css",
    "javascript",
    "typescript",
];

fn mentions_tech(text: &str) -> bool {
    let lower = text.to_lowercase();
    TECH_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn looks_like_stack(text: &str) -> bool {
    text.contains(',') || mentions_tech(text)
}

/// Parses a projects section.
///
/// A date-range line opens an entry. Its heading is `Title | Stack` when the
/// right side of the pipe looks like a tech stack, otherwise the whole heading
/// is the title. Following lines are bullets, except the first stack-looking
/// plain line which fills `skills` when the heading did not.
pub fn parse_projects(text: &str) -> Vec<ProjectEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ProjectEntry> = None;

    for line in non_empty_lines(text) {
        if let Some(range) = find_date_range(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(project_from_heading(range.prefix));
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(bullet) = strip_bullet(line) {
            if !bullet.is_empty() {
                entry.bullets.push(bullet.to_string());
            }
        } else if entry.skills.is_empty() && looks_like_stack(line) {
            entry.skills = line.to_string();
        } else {
            entry.bullets.push(line.to_string());
        }
    }

    entries.extend(current);
    entries
}

fn project_from_heading(heading: &str) -> ProjectEntry {
    let Some((left, right)) = heading.split_once('|') else {
        return ProjectEntry {
            title: heading.to_string(),
            ..Default::default()
        };
    };

    let (left, right) = (left.trim(), right.trim());
    if looks_like_stack(right) {
        ProjectEntry {
            title: left.to_string(),
            skills: right.to_string(),
            ..Default::default()
        }
    } else {
        let title = if right.is_empty() {
            left.to_string()
        } else {
            format!("{left} | {right}")
        };
        ProjectEntry {
            title,
            ..Default::default()
        }
    }
}
