use std::fmt;
use std::str::FromStr;

use crate::error::ProfileError;

/// Delimiter and quoting convention of a delimited text file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field delimiter character.
    pub delimiter: u8,
    /// Quote character configuration.
    pub quote: Quote,
}

impl Default for Dialect {
    /// Comma delimiter with minimal double-quote quoting.
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: Quote::Some(b'"'),
        }
    }
}

impl Dialect {
    /// Create a new Dialect with the given parameters.
    pub const fn new(delimiter: u8, quote: Quote) -> Self {
        Self { delimiter, quote }
    }

    /// Build a `csv::ReaderBuilder` for this dialect.
    ///
    /// Readers are always flexible and headerless; row-length mismatches and
    /// header handling are the profiler's job.
    pub fn reader_builder(&self) -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .double_quote(true);
        match self.quote {
            Quote::None => {
                builder.quoting(false);
            }
            Quote::Some(q) => {
                builder.quoting(true).quote(q);
            }
        }
        builder
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "delimiter={} quote={}",
            printable_delimiter(self.delimiter),
            self.quote
        )
    }
}

/// Quote character configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quote {
    /// No quoting.
    None,
    /// Quote with the specified character.
    Some(u8),
}

impl Default for Quote {
    fn default() -> Self {
        Quote::Some(b'"')
    }
}

impl Quote {
    /// Returns the quote character if set.
    pub fn char(&self) -> Option<u8> {
        match self {
            Quote::None => None,
            Quote::Some(c) => Some(*c),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quote::None => write!(f, "none"),
            Quote::Some(c) => write!(f, "{}", *c as char),
        }
    }
}

impl FromStr for Quote {
    type Err = ProfileError;

    /// Parses a single ASCII character, or `none` to disable quoting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            return Ok(Quote::None);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(Quote::Some(c as u8)),
            _ => Err(ProfileError::InvalidConfig(format!(
                "quote must be a single ASCII character or 'none', got '{s}'"
            ))),
        }
    }
}

/// How the first row of a file is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderMode {
    /// The first row always holds column names.
    Present,
    /// The file has no header; columns are named `col_<n>`.
    Absent,
    /// Decide from the data.
    #[default]
    Auto,
}

impl FromStr for HeaderMode {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(HeaderMode::Auto),
            "present" | "true" | "yes" => Ok(HeaderMode::Present),
            "absent" | "false" | "no" => Ok(HeaderMode::Absent),
            _ => Err(ProfileError::InvalidHeaderMode(s.to_string())),
        }
    }
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderMode::Present => write!(f, "present"),
            HeaderMode::Absent => write!(f, "absent"),
            HeaderMode::Auto => write!(f, "auto"),
        }
    }
}

/// Render a delimiter byte for logs and reports.
pub fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        b' ' => "' '".to_string(),
        other => (other as char).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let dialect = Dialect::default();
        assert_eq!(dialect.delimiter, b',');
        assert_eq!(dialect.quote, Quote::Some(b'"'));
        assert_eq!(dialect.to_string(), "delimiter=, quote=\"");
    }

    #[test]
    fn test_header_mode_parse() {
        assert_eq!("auto".parse::<HeaderMode>().unwrap(), HeaderMode::Auto);
        assert_eq!("Present".parse::<HeaderMode>().unwrap(), HeaderMode::Present);
        assert_eq!("yes".parse::<HeaderMode>().unwrap(), HeaderMode::Present);
        assert_eq!("ABSENT".parse::<HeaderMode>().unwrap(), HeaderMode::Absent);
        assert_eq!("no".parse::<HeaderMode>().unwrap(), HeaderMode::Absent);
        assert!(matches!(
            "sometimes".parse::<HeaderMode>(),
            Err(ProfileError::InvalidHeaderMode(_))
        ));
    }

    #[test]
    fn test_quote_parse() {
        assert_eq!("'".parse::<Quote>().unwrap(), Quote::Some(b'\''));
        assert_eq!("\"".parse::<Quote>().unwrap(), Quote::Some(b'"'));
        assert_eq!("None".parse::<Quote>().unwrap(), Quote::None);
        for bad in ["", "''", "ab", "é"] {
            assert!(
                matches!(bad.parse::<Quote>(), Err(ProfileError::InvalidConfig(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_printable_delimiter() {
        assert_eq!(printable_delimiter(b'\t'), "\\t");
        assert_eq!(printable_delimiter(b';'), ";");
    }
}
