//! Whole-file MD5 digest recorded alongside a profile.

use std::fs::File;
use std::io;
use std::path::Path;

use log::info;
use md5::{Digest, Md5};

/// Lower-case hex MD5 of the file at `path`, streamed in fixed-size chunks.
pub fn file_md5(path: &Path) -> io::Result<String> {
    info!("Calculating MD5 hash for {}", path.display());
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn digest_of(contents: &[u8]) -> String {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file_md5(file.path()).unwrap()
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(digest_of(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(digest_of(b"abc"), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_digest_spans_buffer_boundaries() {
        let contents = vec![b'x'; 64 * 1024 + 7];
        let expected = format!("{:x}", Md5::digest(&contents));
        assert_eq!(digest_of(&contents), expected);
    }

    #[test]
    fn test_missing_file() {
        assert!(file_md5(Path::new("/nonexistent/data.csv")).is_err());
    }
}
