use crate::models::resume::{EducationEntry, PRESENT};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan.", "Feb.", "Mar.", "Apr.", "May", "June", "July", "Aug.", "Sept.", "Oct.", "Nov.", "Dec.",
];

/// "2019-08" → "Aug. 2019". A bare year or "Present" passes through; a month
/// outside 1..=12 falls back to the year.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() || date == PRESENT {
        return PRESENT.to_string();
    }

    let Some((year, month)) = date.split_once('-') else {
        return date.to_string();
    };

    match month.parse::<usize>() {
        Ok(m @ 1..=12) => format!("{} {year}", MONTH_ABBREVIATIONS[m - 1]),
        Ok(_) => year.to_string(),
        Err(_) => date.to_string(),
    }
}

/// "<start> -- <end>" with the end defaulting to "Present".
pub fn format_date_range(start: Option<&str>, end: Option<&str>) -> String {
    let start = start
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(format_date);
    let end = end
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| PRESENT.to_string(), format_date);

    match start {
        Some(start) => format!("{start} -- {end}"),
        None => end,
    }
}

/// Graduation date of an education entry, empty when no year is known.
pub fn graduation_date(edu: &EducationEntry) -> String {
    match (edu.end_year, edu.end_month.as_deref()) {
        (Some(year), Some(month)) => format_date(&format!("{year}-{month:0>2}")),
        (Some(year), None) => year.to_string(),
        (None, _) => String::new(),
    }
}

/// Converts a month number and year to "YYYY-MM".
pub fn to_year_month(month: u32, year: i32) -> String {
    format!("{year:04}-{month:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_valid_month_round_trips() {
        for month in 1..=12u32 {
            let formatted = format_date(&to_year_month(month, 2023));
            assert!(formatted.ends_with(" 2023"), "{formatted}");
            assert!(formatted.starts_with(MONTH_ABBREVIATIONS[month as usize - 1]));
        }
    }

    #[test]
    fn test_out_of_range_month_falls_back_to_year() {
        assert_eq!(format_date(&to_year_month(0, 2023)), "2023");
        assert_eq!(format_date(&to_year_month(13, 2023)), "2023");
    }

    #[test]
    fn test_passthrough_values() {
        assert_eq!(format_date("2023"), "2023");
        assert_eq!(format_date("Present"), "Present");
        assert_eq!(format_date(""), "Present");
        assert_eq!(format_date("2023-ab"), "2023-ab");
    }

    #[test]
    fn test_range_defaults_end_to_present() {
        assert_eq!(format_date_range(Some("2020-06"), None), "June 2020 -- Present");
        assert_eq!(
            format_date_range(Some("2020-01"), Some("2023-12")),
            "Jan. 2020 -- Dec. 2023"
        );
        assert_eq!(format_date_range(None, Some("2021-05")), "May 2021");
        assert_eq!(format_date_range(Some(" "), None), "Present");
    }

    #[test]
    fn test_graduation_date() {
        let mut edu = EducationEntry {
            end_month: Some("9".to_string()),
            end_year: Some(2021),
            ..Default::default()
        };
        assert_eq!(graduation_date(&edu), "Sept. 2021");
        edu.end_month = None;
        assert_eq!(graduation_date(&edu), "2021");
        edu.end_year = None;
        assert_eq!(graduation_date(&edu), "");
    }
}
