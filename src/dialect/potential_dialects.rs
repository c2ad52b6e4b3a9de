//! Generation of candidate dialects.

use crate::metadata::{Dialect, Quote};

/// Delimiters to test, most common first.
///
/// Colon and space are left out: both appear inside ordinary values
/// (times, names) far more often than they separate fields.
pub const DELIMITERS: &[u8] = b",;\t|^~";

/// Quote characters to test.
pub const QUOTES: &[Quote] = &[
    Quote::Some(b'"'),  // Double quote (most common)
    Quote::Some(b'\''), // Single quote
    Quote::None,        // No quoting
];

/// Every delimiter/quote combination.
pub fn generate_potential_dialects() -> Vec<Dialect> {
    candidates_for(None, None)
}

/// Candidates restricted by any forced delimiter or quote.
pub fn candidates_for(delimiter: Option<u8>, quote: Option<Quote>) -> Vec<Dialect> {
    let delimiters: Vec<u8> = match delimiter {
        Some(d) => vec![d],
        None => DELIMITERS.to_vec(),
    };
    let quotes: Vec<Quote> = match quote {
        Some(q) => vec![q],
        None => QUOTES.to_vec(),
    };

    let mut dialects = Vec::with_capacity(delimiters.len() * quotes.len());
    for &delimiter in &delimiters {
        for &quote in &quotes {
            dialects.push(Dialect::new(delimiter, quote));
        }
    }
    dialects
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_potential_dialects() {
        let dialects = generate_potential_dialects();
        assert_eq!(dialects.len(), DELIMITERS.len() * QUOTES.len());
        assert_eq!(dialects[0], Dialect::default());
    }

    #[test]
    fn test_forced_candidates() {
        assert_eq!(candidates_for(Some(b'\t'), None).len(), 3);
        assert_eq!(
            candidates_for(Some(b'\t'), Some(Quote::None)),
            vec![Dialect::new(b'\t', Quote::None)]
        );
        assert_eq!(candidates_for(None, Some(Quote::None)).len(), DELIMITERS.len());
    }
}
