use crate::extraction::dates::{find_date_range, RangeEnd};
use crate::extraction::location::split_trailing_location;
use crate::extraction::non_empty_lines;
use crate::models::resume::EducationEntry;

/// Parses an education section.
///
/// Lines are buffered until a date-range line closes an entry: the first
/// buffered line is "institution [City, ST]", the remaining buffered lines (or,
/// with a single buffered line, the text before the dates) form the degree.
/// Text without any date range falls back to one entry naming the first line.
pub fn parse_education(text: &str) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    let mut buffer: Vec<&str> = Vec::new();

    for line in non_empty_lines(text) {
        let Some(range) = find_date_range(line) else {
            buffer.push(line);
            continue;
        };

        let mut entry = EducationEntry::default();
        if let Some((first, rest)) = buffer.split_first() {
            let (institution, location) = split_trailing_location(first);
            entry.institution = institution;
            entry.location = location;

            let degree_text = if rest.is_empty() {
                range.prefix.to_string()
            } else {
                rest.join(" ")
            };
            let (degree, field) = split_degree(&degree_text);
            entry.degree = degree;
            entry.field = field;
        }

        if let RangeEnd::Date(end) = &range.end {
            entry.end_month = Some(end.month.clone()).filter(|m| !m.is_empty());
            entry.end_year = end.year.parse().ok();
        }

        entries.push(entry);
        buffer.clear();
    }

    if entries.is_empty() {
        if let Some(first) = buffer.first() {
            entries.push(EducationEntry {
                institution: (*first).to_string(),
                ..Default::default()
            });
        }
    }

    entries
}

/// "Bachelor of Arts in Computer Science, Minor in Math" →
/// ("Bachelor of Arts", "Computer Science").
fn split_degree(text: &str) -> (String, String) {
    match text.split_once(" in ") {
        Some((degree, field)) => {
            let field = field.split(',').next().unwrap_or_default();
            (degree.trim().to_string(), field.trim().to_string())
        }
        None => (text.trim().to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_institution_degree_and_dates_on_separate_lines() {
        let entries = parse_education("MIT\nBS in CS\nAug 2016 – May 2020");
        assert_eq!(entries.len(), 1);
        let edu = &entries[0];
        assert_eq!(edu.institution, "MIT");
        assert_eq!(edu.degree, "BS");
        assert_eq!(edu.field, "CS");
        assert_eq!(edu.end_month.as_deref(), Some("05"));
        assert_eq!(edu.end_year, Some(2020));
    }

    #[test]
    fn test_degree_taken_from_date_line_with_single_buffered_line() {
        let text = "Southwestern University Georgetown, TX\n\
                    Bachelor of Arts in Computer Science, Minor in Business Aug. 2018 – May 2021";
        let entries = parse_education(text);
        assert_eq!(entries.len(), 1);
        let edu = &entries[0];
        assert_eq!(edu.institution, "Southwestern");
        assert_eq!(edu.location, "University Georgetown, TX");
        assert_eq!(edu.degree, "Bachelor of Arts");
        assert_eq!(edu.field, "Computer Science");
        assert_eq!(edu.end_year, Some(2021));
    }

    #[test]
    fn test_ongoing_degree_has_no_end() {
        let entries = parse_education("State College\nPhD in Physics\nSep 2021 – Present");
        assert_eq!(entries[0].end_month, None);
        assert_eq!(entries[0].end_year, None);
    }

    #[test]
    fn test_one_entry_per_date_line() {
        let text = "MIT\nBS in CS\nAug 2016 – May 2020\nStanford\nMS in AI\nSep 2020 – Jun 2022";
        let entries = parse_education(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].institution, "Stanford");
        assert_eq!(entries[1].end_month.as_deref(), Some("06"));
    }

    #[test]
    fn test_fallback_without_dates_uses_first_line() {
        let entries = parse_education("Harvard University, Cambridge, MA\nSome Degree");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].institution, "Harvard University, Cambridge, MA");
        assert!(entries[0].degree.is_empty());
    }

    #[test]
    fn test_date_line_without_buffer_still_emits() {
        let entries = parse_education("Aug 2016 – May 2020");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].institution.is_empty());
        assert_eq!(entries[0].end_year, Some(2020));
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_education("").is_empty());
        assert!(parse_education("   \n\t\n").is_empty());
    }
}
