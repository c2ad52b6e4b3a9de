//! Generic header-row heuristic.
//!
//! Each column gets a signature from the rows below the first one: numeric,
//! or a fixed value length. Columns whose signature varies are dropped. The
//! first row then votes per surviving column: a header cell that breaks the
//! signature counts for "header", one that fits it counts against.

use super::table::parse_table;
use crate::classify::{is_float, is_integer};
use crate::metadata::Dialect;

/// Rows below the candidate header that are inspected.
const MAX_CHECKED_ROWS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Signature {
    Unseen,
    Numeric,
    Length(usize),
    Mixed,
}

fn signature_of(cell: &str) -> Signature {
    let trimmed = cell.trim();
    if is_integer(trimmed) || is_float(trimmed) {
        Signature::Numeric
    } else {
        Signature::Length(cell.chars().count())
    }
}

/// Guess whether the sample starts with a header row.
///
/// Returns `None` when the sample holds no rows at all.
pub fn sniff_header(sample: &str, dialect: &Dialect) -> Option<bool> {
    let table = parse_table(sample, dialect, MAX_CHECKED_ROWS + 1);
    let (header, body) = table.rows.split_first()?;
    let columns = header.len();

    let mut signatures = vec![Signature::Unseen; columns];
    for row in body.iter().filter(|row| row.len() == columns) {
        for (signature, cell) in signatures.iter_mut().zip(row) {
            let observed = signature_of(cell);
            *signature = match *signature {
                Signature::Unseen => observed,
                Signature::Mixed => Signature::Mixed,
                current if current == observed => current,
                _ => Signature::Mixed,
            };
        }
    }

    let votes: i64 = signatures
        .iter()
        .zip(header)
        .map(|(signature, cell)| match *signature {
            Signature::Mixed => 0,
            // Nothing to compare against: lean towards a header.
            Signature::Unseen => 1,
            Signature::Numeric => {
                if signature_of(cell) == Signature::Numeric {
                    -1
                } else {
                    1
                }
            }
            Signature::Length(len) => {
                if cell.chars().count() == len {
                    -1
                } else {
                    1
                }
            }
        })
        .sum();

    Some(votes > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_over_numbers() {
        let sample = "id,score\n1,95.5\n2,88.25\n3,70\n";
        assert_eq!(sniff_header(sample, &Dialect::default()), Some(true));
    }

    #[test]
    fn test_numeric_first_row() {
        let sample = "1,2,3\n4,5,6\n7,8,9\n";
        assert_eq!(sniff_header(sample, &Dialect::default()), Some(false));
    }

    #[test]
    fn test_fixed_length_codes() {
        let sample = "country,code\nBelgium,BE\nFrance,FR\nGermany,DE\n";
        // "code" breaks the two-letter signature, the ragged country column is dropped.
        assert_eq!(sniff_header(sample, &Dialect::default()), Some(true));
    }

    #[test]
    fn test_single_row_leans_header() {
        assert_eq!(sniff_header("a,b,c\n", &Dialect::default()), Some(true));
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(sniff_header("", &Dialect::default()), None);
    }
}
