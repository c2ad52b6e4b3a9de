//! Parsing a text sample into a table for analysis.

use foldhash::{HashMap, HashMapExt};

use crate::metadata::Dialect;

/// A parsed sample table.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// The rows of the table (each row is a vector of field values).
    pub rows: Vec<Vec<String>>,
    /// Number of fields in each row.
    pub field_counts: Vec<usize>,
    modal_field_count: usize,
    modal_frequency: usize,
}

impl Table {
    /// Create a new empty table.
    pub const fn new() -> Self {
        Self {
            rows: Vec::new(),
            field_counts: Vec::new(),
            modal_field_count: 0,
            modal_frequency: 0,
        }
    }

    /// Build a table from rows, computing the field-count statistics.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let field_counts = rows.iter().map(Vec::len).collect();
        let mut table = Self {
            rows,
            field_counts,
            modal_field_count: 0,
            modal_frequency: 0,
        };
        table.update_modal_field_count();
        table
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The most common field count.
    #[inline]
    pub fn modal_field_count(&self) -> usize {
        self.modal_field_count
    }

    /// How many rows have the modal field count.
    #[inline]
    pub fn modal_field_count_freq(&self) -> usize {
        self.modal_frequency
    }

    /// Recompute the cached modal statistics after editing `field_counts`.
    pub fn update_modal_field_count(&mut self) {
        let mut counts: HashMap<usize, usize> = HashMap::with_capacity(self.field_counts.len());
        for &fc in &self.field_counts {
            *counts.entry(fc).or_insert(0) += 1;
        }

        // Ties go to the higher field count so results do not depend on
        // HashMap iteration order.
        let (mode, freq) = counts
            .into_iter()
            .max_by(|(fc_a, count_a), (fc_b, count_b)| {
                count_a.cmp(count_b).then_with(|| fc_a.cmp(fc_b))
            })
            .unwrap_or((0, 0));
        self.modal_field_count = mode;
        self.modal_frequency = freq;
    }

    /// Population standard deviation of the field counts.
    pub fn field_count_std_dev(&self) -> f64 {
        if self.field_counts.is_empty() {
            return 0.0;
        }
        let n = self.field_counts.len() as f64;
        let mean = self.field_counts.iter().sum::<usize>() as f64 / n;
        let variance = self
            .field_counts
            .iter()
            .map(|&v| {
                let diff = v as f64 - mean;
                diff * diff
            })
            .sum::<f64>()
            / n;
        variance.sqrt()
    }

    /// True when every row has the same number of fields.
    pub fn is_uniform(&self) -> bool {
        self.field_counts.windows(2).all(|w| w[0] == w[1])
    }
}

/// Parse a sample into a table using the given dialect.
///
/// Blank lines are skipped. Parsing stops quietly at the first malformed
/// record, or after `max_rows` rows (0 = unlimited).
pub fn parse_table(sample: &str, dialect: &Dialect, max_rows: usize) -> Table {
    let mut reader = dialect.reader_builder().from_reader(sample.as_bytes());
    let limit = if max_rows == 0 { usize::MAX } else { max_rows };

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    while rows.len() < limit {
        match reader.read_record(&mut record) {
            Ok(true) => rows.push(record.iter().map(str::to_string).collect()),
            Ok(false) | Err(_) => break,
        }
    }

    Table::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Quote;

    #[test]
    fn test_parse_simple_csv() {
        let table = parse_table("a,b,c\n1,2,3\n4,5,6\n", &Dialect::default(), 0);
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.field_counts, vec![3, 3, 3]);
        assert_eq!(table.rows[0], vec!["a", "b", "c"]);
        assert!(table.is_uniform());
    }

    #[test]
    fn test_parse_quoted_csv() {
        let table = parse_table("\"a,b\",c,d\n1,2,3\n", &Dialect::default(), 0);
        assert_eq!(table.rows[0], vec!["a,b", "c", "d"]);

        let unquoted = parse_table(
            "\"a,b\",c,d\n1,2,3\n",
            &Dialect::new(b',', Quote::None),
            0,
        );
        assert_eq!(unquoted.field_counts[0], 4);
    }

    #[test]
    fn test_parse_crlf_and_limit() {
        let table = parse_table("a;b\r\n1;2\r\n3;4\r\n", &Dialect::new(b';', Quote::None), 2);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows[1], vec!["1", "2"]);
    }

    #[test]
    fn test_modal_field_count() {
        let mut table = Table::new();
        table.field_counts = vec![3, 3, 3, 4, 3];
        table.update_modal_field_count();
        assert_eq!(table.modal_field_count(), 3);
        assert_eq!(table.modal_field_count_freq(), 4);
        assert!(!table.is_uniform());
        assert!(table.field_count_std_dev() > 0.0);
    }
}
