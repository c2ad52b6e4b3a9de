//! Profiling results and their serializable summary.

use std::path::PathBuf;

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};

use crate::column::ColumnStats;
use crate::field_type::{DataType, Role};
use crate::metadata::{Dialect, printable_delimiter};

/// Result of profiling one input.
#[derive(Debug, Clone)]
pub struct Profile {
    /// Path of the profiled file, if it came from one.
    pub source: Option<PathBuf>,
    /// Lower-case hex MD5 of the file's bytes, when computed.
    pub file_md5: Option<String>,
    /// Encoding used to decode the input.
    pub encoding: &'static Encoding,
    /// Delimiter and quoting used to split rows.
    pub dialect: Dialect,
    /// Whether the first row was treated as a header.
    pub has_header: bool,
    /// Number of data rows scanned (header excluded).
    pub rows_read: u64,
    /// One accumulator per column, in column order.
    pub columns: Vec<ColumnStats>,
}

impl Profile {
    /// Column names in column order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnStats::name).collect()
    }

    /// Iterate `(name, stats)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColumnStats)> {
        self.columns.iter().map(|stats| (stats.name(), stats))
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStats> {
        self.columns.iter().find(|stats| stats.name() == name)
    }

    /// Resolve every column into its summary form.
    pub fn to_summary(&self) -> ProfileSummary {
        ProfileSummary {
            file: self.source.as_ref().map(|p| p.display().to_string()),
            file_md5: self.file_md5.clone(),
            encoding: self.encoding.name().to_string(),
            delimiter: printable_delimiter(self.dialect.delimiter),
            quote: self.dialect.quote.char().map(|q| (q as char).to_string()),
            has_header: self.has_header,
            rows_profiled: self.rows_read,
            columns: self.columns.iter().map(ColumnSummary::from).collect(),
        }
    }
}

/// Serializable per-file summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub file: Option<String>,
    pub file_md5: Option<String>,
    pub encoding: String,
    pub delimiter: String,
    pub quote: Option<String>,
    pub has_header: bool,
    pub rows_profiled: u64,
    pub columns: Vec<ColumnSummary>,
}

/// Serializable per-column summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub name: String,
    pub datatype: DataType,
    pub role: Role,
    pub approx_distinct: u64,
    pub non_missing: u64,
}

impl From<&ColumnStats> for ColumnSummary {
    fn from(stats: &ColumnStats) -> Self {
        Self {
            name: stats.name().to_string(),
            datatype: stats.resolve_datatype(),
            role: stats.resolve_role(),
            approx_distinct: stats.estimate_distinct(),
            non_missing: stats.non_missing_count(),
        }
    }
}

impl ProfileSummary {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Summary of a multi-file run: total rows plus one entry per file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub rows_profiled: u64,
    pub files: Vec<ProfileSummary>,
}

impl SummaryDocument {
    pub fn from_summaries(files: Vec<ProfileSummary>) -> Self {
        Self {
            rows_profiled: files.iter().map(|f| f.rows_profiled).sum(),
            files,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
