//! Lexical classification of single trimmed tokens.
//!
//! Every predicate is a best-effort parse test rather than a strict grammar:
//! a token compatible with an interpretation keeps that interpretation alive.
//! All predicates expect a token that has already been trimmed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

/// Check for missing-value tokens.
///
/// Matching is case-sensitive on the listed spellings, so `"NULL"` and
/// `"null"` are missing but `"Null"` is data.
#[inline]
pub fn is_missing(s: &str) -> bool {
    matches!(
        s,
        "" | "na"
            | "n/a"
            | "null"
            | "none"
            | "nan"
            | "NA"
            | "N/A"
            | "NULL"
            | "None"
            | "NaN"
    )
}

/// Base-10 signed integer of any length, no decimal point or exponent.
#[inline]
pub fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Real number that is not also an integer.
///
/// Accepts decimal and exponent notation as well as `inf`/`infinity`/`nan`
/// in any case, the same set `f64::from_str` accepts.
#[inline]
pub fn is_float(s: &str) -> bool {
    s.parse::<f64>().is_ok() && !is_integer(s)
}

/// Recognised boolean spellings, compared case-insensitively.
#[inline]
pub fn is_boolean(s: &str) -> bool {
    match s.len() {
        1 => {
            let b = s.as_bytes()[0].to_ascii_lowercase();
            matches!(b, b'1' | b'0' | b'y' | b'n' | b't' | b'f')
        }
        2 => s.eq_ignore_ascii_case("no"),
        3 => s.eq_ignore_ascii_case("yes"),
        4 => s.eq_ignore_ascii_case("true"),
        5 => s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Year-month without a day (`2023-07`, `2023/7`).
static YEAR_MONTH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})[-/](\d{1,2})$").expect("Invalid year-month pattern")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y%m%dT%H%M%S",
];

const ZONED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m-%d-%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%y",
    "%d/%m/%y",
    "%Y%m%d",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%a, %d %b %Y",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M", "%I:%M:%S %p", "%I:%M %p"];

/// Date, date-time or time of day in a common notation.
///
/// Matching is non-fuzzy: the whole token must parse, and any parse error
/// (malformed field, out-of-range component, overflow) rejects it. Bare
/// numbers are accepted only when they read as a day of month (`1`..`31`),
/// a four-digit year, or a compact `YYYYMMDD` date.
///
/// This is narrower than dateutil-style parsers, which read a bare two-digit
/// number above 31 or any three-digit number as a year. Those tokens are
/// rejected here so that columns of small integers do not keep datetime
/// candidacy.
pub fn is_datetime(s: &str) -> bool {
    if s.is_empty() || s.len() > 64 || !s.bytes().any(|b| b.is_ascii_digit()) {
        return false;
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return match s.len() {
            1 | 2 => matches!(s.parse::<u8>(), Ok(1..=31)),
            4 => true,
            8 => NaiveDate::parse_from_str(s, "%Y%m%d").is_ok(),
            _ => false,
        };
    }

    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    if ZONED_DATETIME_FORMATS
        .iter()
        .any(|fmt| DateTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }

    if DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }

    if DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }

    if TIME_FORMATS
        .iter()
        .any(|fmt| NaiveTime::parse_from_str(s, fmt).is_ok())
    {
        return true;
    }

    if let Some(caps) = YEAR_MONTH_PATTERN.captures(s) {
        return matches!(caps[2].parse::<u8>(), Ok(1..=12));
    }

    false
}

/// True when the token fits any typed interpretation.
///
/// Used by header detection to judge whether a row looks like data.
#[inline]
pub fn is_typed(s: &str) -> bool {
    is_integer(s) || is_float(s) || is_boolean(s) || is_datetime(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokens() {
        for token in ["", "na", "n/a", "null", "none", "nan", "NA", "N/A", "NULL", "None", "NaN"] {
            assert!(is_missing(token), "{token:?} should be missing");
        }
        assert!(!is_missing("Null"));
        assert!(!is_missing("NONE"));
        assert!(!is_missing("0"));
        assert!(!is_missing("-"));
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer("0"));
        assert!(is_integer("-42"));
        assert!(is_integer("+7"));
        assert!(is_integer("007"));
        assert!(is_integer("123456789012345678901234567890"));
        assert!(!is_integer("1.0"));
        assert!(!is_integer("1e3"));
        assert!(!is_integer("-"));
        assert!(!is_integer(""));
        assert!(!is_integer("12a"));
    }

    #[test]
    fn test_is_float_excludes_integers() {
        assert!(is_float("1.5"));
        assert!(is_float("-0.25"));
        assert!(is_float(".5"));
        assert!(is_float("5."));
        assert!(is_float("1e10"));
        assert!(is_float("inf"));
        assert!(is_float("-Infinity"));
        assert!(!is_float("42"));
        assert!(!is_float("-42"));
        assert!(!is_float("abc"));
        assert!(!is_float("1,5"));
    }

    #[test]
    fn test_is_boolean() {
        for token in ["true", "FALSE", "t", "F", "yes", "No", "y", "N", "0", "1"] {
            assert!(is_boolean(token), "{token:?} should be boolean");
        }
        assert!(!is_boolean("2"));
        assert!(!is_boolean("on"));
        assert!(!is_boolean("maybe"));
    }

    #[test]
    fn test_is_datetime() {
        assert!(is_datetime("2020-01-15"));
        assert!(is_datetime("2023-12-31T12:30:45"));
        assert!(is_datetime("2023-12-31T12:30:45Z"));
        assert!(is_datetime("2023-12-31T12:30:45+05:30"));
        assert!(is_datetime("2023-12-31 12:30:45.123"));
        assert!(is_datetime("12/31/2023"));
        assert!(is_datetime("31.12.2023"));
        assert!(is_datetime("Jan 15, 2020"));
        assert!(is_datetime("15 January 2020"));
        assert!(is_datetime("10:30"));
        assert!(is_datetime("2023-07"));
        assert!(is_datetime("2020"));
        assert!(is_datetime("20200115"));
        assert!(is_datetime("1"));
    }

    #[test]
    fn test_is_datetime_rejects() {
        assert!(!is_datetime("John Doe"));
        assert!(!is_datetime("hello"));
        assert!(!is_datetime("2023-13-01"));
        assert!(!is_datetime("2023-02-30"));
        assert!(!is_datetime("95.5"));
        assert!(!is_datetime("32"));
        assert!(!is_datetime("123"));
        assert!(!is_datetime("2023-13"));
        assert!(!is_datetime("99999999999999999999"));
        assert!(!is_datetime("yes"));
    }

    #[test]
    fn test_bare_numbers_are_not_years() {
        for token in ["32", "45", "99", "100", "500", "999"] {
            assert!(!is_datetime(token), "{token:?} should not be a date");
        }
        assert!(is_datetime("31"));
        assert!(is_datetime("0999"));
    }

    #[test]
    fn test_is_typed() {
        assert!(is_typed("1"));
        assert!(is_typed("95.5"));
        assert!(is_typed("true"));
        assert!(is_typed("2020-01-15"));
        assert!(!is_typed("John Doe"));
    }
}
