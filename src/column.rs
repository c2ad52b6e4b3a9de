//! Per-column streaming accumulator.

use crate::classify::{is_boolean, is_datetime, is_float, is_integer, is_missing};
use crate::field_type::{DataType, Role};
use crate::sketch::CardinalityEstimator;

/// Minimum uniqueness ratio for the identifier role.
pub const IDENTIFIER_UNIQUENESS: f64 = 0.95;

/// Minimum non-missing count for the identifier role.
pub const IDENTIFIER_MIN_COUNT: u64 = 50;

/// Absolute distinct-count ceiling for the dimension role.
pub const DIMENSION_MAX_DISTINCT: u64 = 50;

/// Relative distinct-count ceiling for the dimension role.
pub const DIMENSION_MAX_RATIO: f64 = 0.1;

/// Type hypotheses still compatible with every value seen.
///
/// Each flag starts true and can only ever be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeCandidates {
    pub could_be_integer: bool,
    pub could_be_float: bool,
    pub could_be_boolean: bool,
    pub could_be_datetime: bool,
}

impl Default for TypeCandidates {
    fn default() -> Self {
        Self {
            could_be_integer: true,
            could_be_float: true,
            could_be_boolean: true,
            could_be_datetime: true,
        }
    }
}

impl TypeCandidates {
    /// Clear every hypothesis the token contradicts.
    ///
    /// An integer-looking token keeps float candidacy alive; only a
    /// non-numeric token clears it.
    pub fn narrow(&mut self, token: &str) {
        if self.could_be_integer && !is_integer(token) {
            self.could_be_integer = false;
        }
        if self.could_be_float && !(is_float(token) || is_integer(token)) {
            self.could_be_float = false;
        }
        if self.could_be_boolean && !is_boolean(token) {
            self.could_be_boolean = false;
        }
        if self.could_be_datetime && !is_datetime(token) {
            self.could_be_datetime = false;
        }
    }

    /// True when every hypothesis has been ruled out.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        !(self.could_be_integer
            || self.could_be_float
            || self.could_be_boolean
            || self.could_be_datetime)
    }
}

/// Streaming statistics for one column.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    name: String,
    rows_seen: u64,
    non_missing_count: u64,
    candidates: TypeCandidates,
    distinct: CardinalityEstimator,
}

impl ColumnStats {
    /// Create an empty accumulator for the named column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows_seen: 0,
            non_missing_count: 0,
            candidates: TypeCandidates::default(),
            distinct: CardinalityEstimator::default(),
        }
    }

    /// Feed one row's cell. `None` marks a cell absent from a short row.
    pub fn update(&mut self, raw: Option<&str>) {
        self.rows_seen += 1;
        let Some(raw) = raw else {
            return;
        };
        let token = raw.trim();
        if is_missing(token) {
            return;
        }
        self.non_missing_count += 1;
        self.distinct.update(token.as_bytes());
        if !self.candidates.is_exhausted() {
            self.candidates.narrow(token);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rows scanned, missing cells included.
    pub fn rows_seen(&self) -> u64 {
        self.rows_seen
    }

    /// Rows whose cell was not a missing-value token.
    pub fn non_missing_count(&self) -> u64 {
        self.non_missing_count
    }

    pub fn candidates(&self) -> TypeCandidates {
        self.candidates
    }

    /// Approximate number of distinct non-missing values.
    pub fn estimate_distinct(&self) -> u64 {
        self.distinct.estimate()
    }

    /// Resolve the datatype: integer > decimal > boolean > datetime > string.
    pub fn resolve_datatype(&self) -> DataType {
        if self.non_missing_count == 0 {
            return DataType::String;
        }
        let c = &self.candidates;
        if c.could_be_integer {
            DataType::Integer
        } else if c.could_be_float {
            DataType::Decimal
        } else if c.could_be_boolean {
            DataType::Boolean
        } else if c.could_be_datetime {
            DataType::DateTime
        } else {
            DataType::String
        }
    }

    /// Resolve the semantic role. Rules are tried in order, first match wins:
    ///
    /// 1. identifier: uniqueness >= 0.95 over at least 50 values
    /// 2. measure: numeric datatype that is not near-unique
    /// 3. dimension: boolean, or distinct <= min(50, 10% of values)
    /// 4. attribute
    pub fn resolve_role(&self) -> Role {
        if self.non_missing_count == 0 {
            return Role::Attribute;
        }

        let distinct = self.estimate_distinct();
        let uniqueness = distinct as f64 / self.non_missing_count.max(1) as f64;

        if uniqueness >= IDENTIFIER_UNIQUENESS && self.non_missing_count >= IDENTIFIER_MIN_COUNT {
            return Role::Identifier;
        }

        let datatype = self.resolve_datatype();
        if datatype.is_numeric() && uniqueness < IDENTIFIER_UNIQUENESS {
            return Role::Measure;
        }

        let relative_cap = (DIMENSION_MAX_RATIO * self.non_missing_count as f64) as u64;
        if datatype == DataType::Boolean || distinct <= DIMENSION_MAX_DISTINCT.min(relative_cap) {
            return Role::Dimension;
        }

        Role::Attribute
    }
}
