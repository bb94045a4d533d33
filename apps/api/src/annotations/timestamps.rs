use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::models::annotation::HighlightMap;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Leniently parses a client-supplied highlight timestamp.
///
/// Strings may be RFC 3339 (`Z` or offset), a naive date-time taken as UTC, or
/// a bare date taken as UTC midnight. Numbers are epoch milliseconds, the
/// form `Date.now()` produces. Anything else is `None`.
pub fn parse_created_at(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let millis = n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Earliest parseable `created_at` across every page. Unparseable or missing
/// values are skipped.
pub fn first_highlight_created_at(highlights: &HighlightMap) -> Option<DateTime<Utc>> {
    highlights
        .values()
        .flatten()
        .filter_map(|h| h.created_at.as_ref())
        .filter_map(parse_created_at)
        .min()
}
