//! Date-range grammar shared by the education, experience and project parsers.
//!
//! A line carries a range when it contains `<Month> <Year> – <Month> <Year|Present>`
//! with an en-dash separator. Month tokens may be abbreviated or dotted ("Aug.",
//! "Sept", "June"); only the first three letters are looked up.

use std::sync::LazyLock;

use regex::Regex;

static RE_DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z.]*\s+\d{4})\s*–\s*((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z.]*\s+\d{4}|Present)",
    )
    .unwrap()
});

const MONTH_PREFIXES: [(&str, &str); 12] = [
    ("jan", "01"),
    ("feb", "02"),
    ("mar", "03"),
    ("apr", "04"),
    ("may", "05"),
    ("jun", "06"),
    ("jul", "07"),
    ("aug", "08"),
    ("sep", "09"),
    ("oct", "10"),
    ("nov", "11"),
    ("dec", "12"),
];

/// A month/year pair as written in the source text. `month` is the two-digit
/// month number, or empty when the token was not recognised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthYear {
    pub month: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeEnd {
    Date(MonthYear),
    Present,
}

/// A date range located inside a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeMatch<'a> {
    /// Trimmed text before the range on the same line.
    pub prefix: &'a str,
    pub start: MonthYear,
    pub end: RangeEnd,
}

impl MonthYear {
    /// "YYYY-MM", or the bare year when the month is unknown.
    pub fn to_year_month(&self) -> String {
        if self.month.is_empty() {
            self.year.clone()
        } else {
            format!("{}-{}", self.year, self.month)
        }
    }
}

impl RangeEnd {
    pub fn to_end_string(&self) -> String {
        match self {
            RangeEnd::Date(date) => date.to_year_month(),
            RangeEnd::Present => crate::models::resume::PRESENT.to_string(),
        }
    }
}

/// Looks up a month token by its first three letters.
pub fn month_number(token: &str) -> Option<&'static str> {
    let prefix: String = token.chars().take(3).collect::<String>().to_lowercase();
    MONTH_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, n)| *n)
}

/// Parses "Aug. 2018" style text. Anything that is not exactly two tokens
/// yields an empty pair.
pub fn parse_month_year(text: &str) -> MonthYear {
    let parts: Vec<&str> = text.split_whitespace().collect();
    match parts.as_slice() {
        [month, year] => MonthYear {
            month: month_number(month).unwrap_or_default().to_string(),
            year: (*year).to_string(),
        },
        _ => MonthYear::default(),
    }
}

/// Finds the first date range in `line`.
pub fn find_date_range(line: &str) -> Option<DateRangeMatch<'_>> {
    let caps = RE_DATE_RANGE.captures(line)?;
    let whole = caps.get(0)?;
    let start = parse_month_year(caps.get(1)?.as_str());
    let end_text = caps.get(2)?.as_str();
    let end = if end_text.eq_ignore_ascii_case("present") {
        RangeEnd::Present
    } else {
        RangeEnd::Date(parse_month_year(end_text))
    };

    Some(DateRangeMatch {
        prefix: line[..whole.start()].trim(),
        start,
        end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finds_range_with_dotted_months() {
        let m = find_date_range("Bachelor of Arts Aug. 2018 – May 2021").unwrap();
        assert_eq!(m.prefix, "Bachelor of Arts");
        assert_eq!(m.start.to_year_month(), "2018-08");
        assert_eq!(m.end, RangeEnd::Date(MonthYear {
            month: "05".to_string(),
            year: "2021".to_string(),
        }));
    }

    #[test]
    fn test_finds_range_ending_present_case_insensitive() {
        let m = find_date_range("Research Assistant june 2020 – present").unwrap();
        assert_eq!(m.prefix, "Research Assistant");
        assert_eq!(m.start.month, "06");
        assert_eq!(m.end, RangeEnd::Present);
        assert_eq!(m.end.to_end_string(), "Present");
    }

    #[test]
    fn test_hyphen_separator_is_not_a_range() {
        assert!(find_date_range("Engineer Jan 2020 - Present").is_none());
    }

    #[test]
    fn test_no_range_in_plain_text() {
        assert!(find_date_range("Languages: Python, Java").is_none());
        assert!(find_date_range("").is_none());
    }

    #[test]
    fn test_month_number_lookup() {
        assert_eq!(month_number("Sept."), Some("09"));
        assert_eq!(month_number("DECEMBER"), Some("12"));
        assert_eq!(month_number("Smarch"), None);
        assert_eq!(month_number(""), None);
    }

    #[test]
    fn test_parse_month_year_unrecognised_month_is_empty() {
        let parsed = parse_month_year("Foo 2019");
        assert_eq!(parsed.month, "");
        assert_eq!(parsed.year, "2019");
        assert_eq!(parsed.to_year_month(), "2019");
        assert_eq!(parse_month_year("2019"), MonthYear::default());
    }
}
