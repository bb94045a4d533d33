use crate::extraction::dates::find_date_range;
use crate::extraction::location::split_trailing_location;
use crate::extraction::{non_empty_lines, strip_bullet};
use crate::models::resume::ExperienceEntry;

/// Parses an experience section.
///
/// A date-range line opens an entry whose role is the text before the dates.
/// Bullet lines feed `bullets`; the first plain line after the title is
/// "company [City, ST]". Any further plain lines are dropped, so a company block
/// wrapped over several lines loses its tail. Lines before the first date-range
/// line are ignored.
pub fn parse_experience(text: &str) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;

    for line in non_empty_lines(text) {
        if let Some(range) = find_date_range(line) {
            if let Some(done) = current.take() {
                entries.push(done);
            }
            current = Some(ExperienceEntry {
                role: range.prefix.to_string(),
                start: Some(range.start.to_year_month()).filter(|s| !s.is_empty()),
                end: Some(range.end.to_end_string()).filter(|s| !s.is_empty()),
                ..Default::default()
            });
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(bullet) = strip_bullet(line) {
            if !bullet.is_empty() {
                entry.bullets.push(bullet.to_string());
            }
        } else if entry.company.is_empty() && entry.location.is_empty() {
            let (company, location) = split_trailing_location(line);
            entry.company = company;
            entry.location = location;
        }
    }

    entries.extend(current);
    entries
}
