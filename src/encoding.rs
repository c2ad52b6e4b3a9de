//! Encoding detection using chardetng and `encoding_rs`.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use simdutf8::basic::from_utf8;

use crate::error::{ProfileError, Result};

/// Encoding used when detection fails or yields nothing usable.
pub static DEFAULT_ENCODING: &Encoding = &encoding_rs::UTF_8_INIT;

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Outcome of encoding detection over a byte prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingInfo {
    /// The resolved encoding.
    pub encoding: &'static Encoding,
    /// Whether a byte order mark selected the encoding.
    pub has_bom: bool,
    /// Whether detection fell back to [`DEFAULT_ENCODING`].
    pub is_fallback: bool,
}

impl EncodingInfo {
    /// Create a new `EncodingInfo`.
    pub const fn new(encoding: &'static Encoding, has_bom: bool, is_fallback: bool) -> Self {
        Self {
            encoding,
            has_bom,
            is_fallback,
        }
    }

    /// The WHATWG name of the resolved encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }
}

/// Detect the encoding of a bounded prefix.
///
/// BOMs win outright. Valid UTF-8 short-circuits the statistical detector;
/// otherwise chardetng guesses among legacy encodings (Windows-125x,
/// ISO-8859, GBK, Shift_JIS, ...). An empty prefix falls back to UTF-8.
pub fn detect_encoding(data: &[u8]) -> EncodingInfo {
    if data.is_empty() {
        return EncodingInfo::new(DEFAULT_ENCODING, false, true);
    }

    if let Some((encoding, _bom_len)) = Encoding::for_bom(data) {
        return EncodingInfo::new(encoding, true, false);
    }

    if is_utf8(data) {
        return EncodingInfo::new(UTF_8, false, false);
    }

    // The prefix may end mid-sequence, so only trust UTF-8 up to the cut.
    if let Err(err) = simdutf8::compat::from_utf8(data)
        && err.error_len().is_none()
        && err.valid_up_to() > 0
    {
        return EncodingInfo::new(UTF_8, false, false);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, false);
    let encoding = detector.guess(None, true);
    EncodingInfo::new(encoding, false, false)
}

/// Resolve a caller-supplied encoding label (`"latin1"`, `"utf-16le"`, ...).
pub fn resolve_encoding(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| ProfileError::UnknownEncoding(label.to_string()))
}

/// Decode a sample for detection purposes, substituting invalid sequences.
pub fn decode_lossy(data: &[u8], encoding: &'static Encoding) -> String {
    let (decoded, _, _) = encoding.decode(data);
    decoded.into_owned()
}

/// Returns true when rows can be split on raw bytes before decoding.
pub fn is_byte_splittable(encoding: &'static Encoding) -> bool {
    encoding.is_ascii_compatible()
}
