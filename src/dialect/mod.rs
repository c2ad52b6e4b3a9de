//! Dialect sniffing over a bounded text sample.
//!
//! Candidate dialects are scored by how uniform the parsed table is (consistent
//! field counts) and how consistent the value types are within each column,
//! following the table-uniformity idea from "Wrangling Messy CSV Files by
//! Detecting Row and Type Patterns" (van den Burg, Nazábal, Sutton, 2019).

pub mod header;
pub mod potential_dialects;
pub mod score;
pub mod table;

use log::debug;

use crate::metadata::{Dialect, Quote};
use potential_dialects::{candidates_for, generate_potential_dialects};
use score::{find_best_dialect, score_all_dialects};

/// Rows of the sample considered while scoring.
pub const SNIFF_MAX_ROWS: usize = 100;

/// Detect the dialect of a text sample.
///
/// A forced delimiter restricts the search to quote detection. Returns `None`
/// when the sample is blank or no candidate parses into a table.
pub fn sniff_dialect(
    sample: &str,
    forced_delimiter: Option<u8>,
    forced_quote: Option<Quote>,
) -> Option<Dialect> {
    if sample.trim().is_empty() {
        return None;
    }

    let dialects = match (forced_delimiter, forced_quote) {
        (None, None) => generate_potential_dialects(),
        _ => candidates_for(forced_delimiter, forced_quote),
    };

    let scores = score_all_dialects(sample, &dialects, SNIFF_MAX_ROWS);
    let best = find_best_dialect(&scores)?;
    debug!(
        "Best dialect {} scored {:.3} with {} field(s)",
        best.dialect, best.gamma, best.num_fields
    );
    Some(best.dialect)
}
