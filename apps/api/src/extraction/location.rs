//! Trailing "City, ST" heuristic used to separate an organisation from its location.
//!
//! The city is a run of one or two capitalised words immediately before a comma
//! and a two-letter state code at the end of the line. The shortest possible
//! organisation prefix wins, which keeps two-word cities such as "College
//! Station, TX" whole but misreads "Southwestern University Georgetown, TX" as
//! "Southwestern" at "University Georgetown, TX". Header lines without a
//! comma are never split, so the institution then keeps the whole line.

use std::sync::LazyLock;

use regex::Regex;

static RE_TRAILING_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>.+?)\s+(?P<location>[A-Z][A-Za-z.'-]*(?:\s+[A-Z][A-Za-z.'-]*)?,\s*[A-Z]{2})$",
    )
    .unwrap()
});

/// Splits `line` into `(name, location)`. Lines without a recognisable trailing
/// location come back whole with an empty location.
pub fn split_trailing_location(line: &str) -> (String, String) {
    let line = line.trim();
    if !line.contains(',') {
        return (line.to_string(), String::new());
    }
    match RE_TRAILING_LOCATION.captures(line) {
        Some(caps) => (
            caps["name"].trim().to_string(),
            caps["location"].trim().to_string(),
        ),
        None => (line.to_string(), String::new()),
    }
}
