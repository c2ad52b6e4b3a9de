//! Combined scoring for dialect detection.
//!
//! The gamma score combines table uniformity with within-column type
//! consistency to rank candidate dialects.

use std::cmp::Ordering;

use super::table::{Table, parse_table};
use crate::classify::{is_datetime, is_float, is_integer, is_missing};
use crate::metadata::{Dialect, Quote};

/// Quote character counts for the sample, computed once per sniff.
#[derive(Debug, Clone, Copy)]
struct QuoteCounts {
    double: usize,
    single: usize,
    len: usize,
}

impl QuoteCounts {
    fn new(sample: &str) -> Self {
        let bytes = sample.as_bytes();
        Self {
            double: bytecount::count(bytes, b'"'),
            single: bytecount::count(bytes, b'\''),
            len: bytes.len(),
        }
    }
}

/// Score result for a dialect.
#[derive(Debug, Clone)]
pub struct DialectScore {
    /// The dialect that was scored.
    pub dialect: Dialect,
    /// Combined score (higher is better).
    pub gamma: f64,
    /// Modal field count.
    pub num_fields: usize,
    /// Whether every row has the same field count.
    pub is_uniform: bool,
}

impl DialectScore {
    fn new(dialect: Dialect, table: &Table) -> Self {
        Self {
            dialect,
            gamma: compute_gamma(table, dialect.delimiter),
            num_fields: table.modal_field_count(),
            is_uniform: table.is_uniform(),
        }
    }

    const fn zero(dialect: Dialect) -> Self {
        Self {
            dialect,
            gamma: 0.0,
            num_fields: 0,
            is_uniform: false,
        }
    }
}

/// Consistency: `1 / (1 + 2 * sigma)` over the field counts.
pub fn calculate_tau_0(table: &Table) -> f64 {
    if table.field_counts.is_empty() {
        return 0.0;
    }
    1.0 / 2.0f64.mul_add(table.field_count_std_dev(), 1.0)
}

/// Dispersion: share of rows that have the modal field count.
pub fn calculate_tau_1(table: &Table) -> f64 {
    if table.field_counts.is_empty() {
        return 0.0;
    }
    table.modal_field_count_freq() as f64 / table.num_rows() as f64
}

#[derive(Clone, Copy)]
enum CellClass {
    Integer,
    Float,
    Temporal,
    Text,
}

impl CellClass {
    const COUNT: usize = 4;

    fn of(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if is_missing(trimmed) {
            None
        } else if is_integer(trimmed) {
            Some(CellClass::Integer)
        } else if is_float(trimmed) {
            Some(CellClass::Float)
        } else if is_datetime(trimmed) {
            Some(CellClass::Temporal)
        } else {
            Some(CellClass::Text)
        }
    }
}

/// Average over columns of the share of cells holding the column's dominant
/// class. Missing cells are ignored; all-missing columns score neutral 0.5.
pub fn calculate_type_score(table: &Table) -> f64 {
    let num_cols = table.modal_field_count();
    if table.is_empty() || num_cols == 0 {
        return 0.0;
    }

    let mut counts = vec![[0usize; CellClass::COUNT]; num_cols];
    for row in &table.rows {
        for (col, cell) in row.iter().enumerate().take(num_cols) {
            if let Some(class) = CellClass::of(cell) {
                counts[col][class as usize] += 1;
            }
        }
    }

    let total: f64 = counts
        .iter()
        .map(|col| {
            let seen: usize = col.iter().sum();
            if seen == 0 {
                0.5
            } else {
                col.iter().copied().max().unwrap_or(0) as f64 / seen as f64
            }
        })
        .sum();
    total / num_cols as f64
}

fn compute_gamma(table: &Table, delimiter: u8) -> f64 {
    if table.is_empty() {
        return 0.0;
    }

    let uniformity = (calculate_tau_0(table) * calculate_tau_1(table)).sqrt();
    let type_contribution = calculate_type_score(table) * 0.3;

    let field_count = table.modal_field_count();
    let field_bonus = if field_count >= 2 {
        (field_count.min(10) as f64 / 10.0) * 0.2
    } else {
        0.0
    };

    // A single field usually means the delimiter never occurs.
    let single_field_penalty = if field_count <= 1 { 0.5 } else { 1.0 };

    let delimiter_penalty = match delimiter {
        b',' | b';' | b'\t' => 1.0,
        b'|' => 0.98,
        b'^' | b'~' => 0.80,
        _ => 0.70,
    };

    (uniformity.mul_add(0.5, type_contribution) + field_bonus)
        * single_field_penalty
        * delimiter_penalty
}

/// Multiplier from the density of quote characters in the sample.
///
/// Conservative about single quotes, which show up as apostrophes in text.
fn quote_evidence(counts: &QuoteCounts, quote: Quote) -> f64 {
    if counts.len == 0 {
        return 1.0;
    }
    // Quotes per 1000 bytes; 5 (0.5%) counts as significant.
    let double = counts.double * 1000 / counts.len;
    let single = counts.single * 1000 / counts.len;
    let threshold = 5;

    match quote {
        Quote::Some(b'"') if double >= threshold => 1.03,
        Quote::Some(b'\'') if single >= threshold * 2 && double < threshold => 1.05,
        Quote::Some(b'\'') if double >= threshold => 0.95,
        Quote::None if double >= threshold => 0.90,
        _ => 1.0,
    }
}

/// Score every candidate dialect against the sample.
pub fn score_all_dialects(sample: &str, dialects: &[Dialect], max_rows: usize) -> Vec<DialectScore> {
    let quote_counts = QuoteCounts::new(sample);
    dialects
        .iter()
        .map(|&dialect| {
            let table = parse_table(sample, &dialect, max_rows);
            if table.is_empty() {
                return DialectScore::zero(dialect);
            }
            let mut score = DialectScore::new(dialect, &table);
            score.gamma *= quote_evidence(&quote_counts, dialect.quote);
            score
        })
        .collect()
}

/// Pick the best dialect.
///
/// Scores within 10% of each other are ranked by delimiter, then quote
/// preference, so common conventions win near-ties.
pub fn find_best_dialect(scores: &[DialectScore]) -> Option<&DialectScore> {
    scores.iter().filter(|s| s.gamma > 0.0).max_by(|a, b| {
        let ratio = a.gamma.min(b.gamma) / a.gamma.max(b.gamma);
        if ratio > 0.90 {
            delimiter_priority(a.dialect.delimiter)
                .cmp(&delimiter_priority(b.dialect.delimiter))
                .then_with(|| quote_priority(a.dialect.quote).cmp(&quote_priority(b.dialect.quote)))
                .then_with(|| a.gamma.partial_cmp(&b.gamma).unwrap_or(Ordering::Equal))
        } else {
            a.gamma.partial_cmp(&b.gamma).unwrap_or(Ordering::Equal)
        }
    })
}

const fn delimiter_priority(delimiter: u8) -> u8 {
    match delimiter {
        b',' => 10,
        b';' => 9,
        b'\t' => 8,
        b'|' => 7,
        b'^' | b'~' => 3,
        _ => 0,
    }
}

const fn quote_priority(quote: Quote) -> u8 {
    match quote {
        Quote::Some(b'"') => 3,
        Quote::Some(b'\'') => 2,
        Quote::None => 1,
        Quote::Some(_) => 0,
    }
}
