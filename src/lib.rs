//! csv-cdi-profile: streaming column profiler for delimited text files
//!
//! Profiles a CSV/TSV file in a single bounded-memory pass and derives, per
//! column, an XSD datatype and a DDI-CDI role (identifier, measure,
//! dimension or attribute), ready to be turned into dataset metadata.
//!
//! # Quick Start
//!
//! ```no_run
//! use csv_cdi_profile::Profiler;
//!
//! let profile = Profiler::new().profile_path("survey.csv").unwrap();
//!
//! println!("Encoding: {}", profile.encoding.name());
//! println!("Dialect: {}", profile.dialect);
//! println!("Has header: {}", profile.has_header);
//! for (name, stats) in profile.iter() {
//!     println!(
//!         "{name}: {} / {} (~{} distinct)",
//!         stats.resolve_datatype().xsd_iri(),
//!         stats.resolve_role(),
//!         stats.estimate_distinct()
//!     );
//! }
//! ```
//!
//! # How a file is profiled
//!
//! 1. The encoding is detected from a bounded byte prefix (BOM, UTF-8
//!    validity, then a statistical guess).
//! 2. Delimiter and quote character are sniffed from a decoded text prefix
//!    by scoring candidate dialects on table uniformity and type consistency.
//! 3. Header presence is decided from the same prefix unless forced.
//! 4. Every row is streamed once through per-column accumulators holding a
//!    missing-aware counter, type candidate flags and a HyperLogLog sketch.
//! 5. For files, an MD5 digest of the raw bytes is recorded unless disabled.
//!
//! Memory use is independent of the number of rows.

mod checksum;
pub mod classify;
pub mod column;
pub mod dialect;
mod encoding;
mod error;
mod field_type;
mod metadata;
mod profiler;
pub mod sample;
pub mod sketch;
mod summary;

pub use checksum::file_md5;
pub use column::{ColumnStats, TypeCandidates};
pub use error::{ProfileError, Result};
pub use field_type::{DataType, Role};
pub use metadata::{Dialect, HeaderMode, Quote, printable_delimiter};
pub use profiler::{Profiler, TYPED_RATIO_THRESHOLD, detect_header, synthesized_name};
pub use sample::SampleSize;
pub use sketch::CardinalityEstimator;
pub use summary::{ColumnSummary, Profile, ProfileSummary, SummaryDocument};

// Re-export for advanced usage
pub use encoding::{EncodingInfo, detect_encoding, is_utf8, resolve_encoding};
