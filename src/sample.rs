use std::io::{self, Read};

/// Default prefix length fed to the encoding detector (1 MiB).
pub const ENCODING_SAMPLE_BYTES: usize = 1024 * 1024;

/// Default prefix length used for dialect and header detection (256 KiB).
pub const DIALECT_SAMPLE_BYTES: usize = 256 * 1024;

/// Bounded sample sizes for the detection steps.
///
/// Detection never looks beyond these prefixes, so its cost is independent
/// of file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSize {
    /// Bytes read for encoding detection.
    pub encoding_bytes: usize,
    /// Bytes read for dialect sniffing and header detection.
    pub dialect_bytes: usize,
}

impl Default for SampleSize {
    fn default() -> Self {
        Self {
            encoding_bytes: ENCODING_SAMPLE_BYTES,
            dialect_bytes: DIALECT_SAMPLE_BYTES,
        }
    }
}

impl SampleSize {
    /// Same limit for every detection step.
    pub const fn uniform(bytes: usize) -> Self {
        Self {
            encoding_bytes: bytes,
            dialect_bytes: bytes,
        }
    }

    /// Largest prefix any detection step needs.
    pub fn max_bytes(&self) -> usize {
        self.encoding_bytes.max(self.dialect_bytes)
    }
}

/// Read at most `limit` bytes from the reader.
pub fn read_prefix<R: Read>(reader: R, limit: usize) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(limit.min(64 * 1024));
    reader.take(limit as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Drop a trailing partial line from a truncated sample.
///
/// When the sample holds no line break at all it is returned unchanged.
pub fn complete_lines(sample: &str) -> &str {
    match sample.rfind(['\n', '\r']) {
        Some(pos) => &sample[..=pos],
        None => sample,
    }
}
