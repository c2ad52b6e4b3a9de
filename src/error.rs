use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for profiling operations.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// IO error outside the row loop (opening the file, reading samples).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("CSV file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input exists but holds no bytes.
    #[error("CSV file is empty: {}", .0.display())]
    EmptyFile(PathBuf),

    /// A reader produced no bytes at all.
    #[error("Empty input: no data to profile")]
    EmptyInput,

    /// Header mode string is not one of the recognised spellings.
    #[error("Invalid header mode: {0}")]
    InvalidHeaderMode(String),

    /// A forced encoding label is not known to `encoding_rs`.
    #[error("Unknown encoding '{0}'")]
    UnknownEncoding(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Bytes could not be decoded with the resolved encoding (strict mode only).
    #[error("Error decoding record {row} with encoding '{encoding}'")]
    Decode { encoding: &'static str, row: u64 },

    /// Any other failure inside the scan loop.
    #[error("Error processing CSV file: {0}")]
    Processing(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ProfileError {
    /// Wrap a low-level scan failure into the unified processing kind.
    pub fn processing<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        ProfileError::Processing(err.into())
    }

    /// Returns true for failures raised before any scanning started.
    pub fn is_input_validation(&self) -> bool {
        matches!(
            self,
            ProfileError::NotFound(_)
                | ProfileError::EmptyFile(_)
                | ProfileError::EmptyInput
                | ProfileError::InvalidHeaderMode(_)
                | ProfileError::UnknownEncoding(_)
                | ProfileError::InvalidConfig(_)
        )
    }
}

/// Result type alias for profiling operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_wraps_source() {
        let err = ProfileError::processing(io::Error::other("boom"));
        assert!(matches!(err, ProfileError::Processing(_)));
        assert!(!err.is_input_validation());
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Error processing CSV file: boom");
    }

    #[test]
    fn test_validation_kinds() {
        assert!(ProfileError::EmptyFile(PathBuf::from("x.csv")).is_input_validation());
        assert!(ProfileError::InvalidHeaderMode("maybe".into()).is_input_validation());
        assert!(!ProfileError::Decode { encoding: "UTF-8", row: 3 }.is_input_validation());
    }
}
