//! The streaming profiler: detection steps plus one pass over the rows.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use log::{debug, info, warn};

use crate::checksum::file_md5;
use crate::classify::is_typed;
use crate::column::ColumnStats;
use crate::dialect::header::sniff_header;
use crate::dialect::sniff_dialect;
use crate::dialect::table::parse_table;
use crate::encoding::{decode_lossy, detect_encoding, is_byte_splittable, resolve_encoding};
use crate::error::{ProfileError, Result};
use crate::metadata::{Dialect, HeaderMode, Quote, printable_delimiter};
use crate::sample::{SampleSize, complete_lines, read_prefix};
use crate::summary::Profile;

/// Share of typed first-row cells at which the row is judged to be data.
pub const TYPED_RATIO_THRESHOLD: f64 = 0.75;

/// Rows between progress log lines.
const PROGRESS_INTERVAL: u64 = 10_000;

/// Streaming column profiler.
///
/// # Example
///
/// ```no_run
/// use csv_cdi_profile::{HeaderMode, Profiler};
///
/// let mut profiler = Profiler::new();
/// profiler.delimiter(b'\t').header_mode(HeaderMode::Auto).row_limit(10_000);
///
/// let profile = profiler.profile_path("data.tab").unwrap();
/// for column in &profile.columns {
///     println!("{}: {} / {}", column.name(), column.resolve_datatype(), column.resolve_role());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Profiler {
    /// Prefix sizes for the detection steps.
    sample_size: SampleSize,
    /// Optional forced encoding label.
    forced_encoding: Option<String>,
    /// Optional forced delimiter.
    forced_delimiter: Option<u8>,
    /// Optional forced quote character.
    forced_quote: Option<Quote>,
    /// Header handling.
    header_mode: HeaderMode,
    /// Stop after this many data rows.
    row_limit: Option<u64>,
    /// Fail on undecodable bytes instead of substituting them.
    strict_decoding: bool,
    /// Record an MD5 digest of profiled files.
    checksum: bool,
}

impl Default for Profiler {
    fn default() -> Self {
        Self {
            sample_size: SampleSize::default(),
            forced_encoding: None,
            forced_delimiter: None,
            forced_quote: None,
            header_mode: HeaderMode::default(),
            row_limit: None,
            strict_decoding: false,
            checksum: true,
        }
    }
}

impl Profiler {
    /// Create a new Profiler with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection sample sizes.
    pub fn sample_size(&mut self, sample_size: SampleSize) -> &mut Self {
        self.sample_size = sample_size;
        self
    }

    /// Force an encoding by label (skip encoding detection).
    pub fn encoding(&mut self, label: impl Into<String>) -> &mut Self {
        self.forced_encoding = Some(label.into());
        self
    }

    /// Force a specific delimiter (skip delimiter detection).
    pub fn delimiter(&mut self, delimiter: u8) -> &mut Self {
        self.forced_delimiter = Some(delimiter);
        self
    }

    /// Force a specific quote character.
    pub fn quote(&mut self, quote: Quote) -> &mut Self {
        self.forced_quote = Some(quote);
        self
    }

    /// Set how the first row is treated.
    pub fn header_mode(&mut self, mode: HeaderMode) -> &mut Self {
        self.header_mode = mode;
        self
    }

    /// Stop after `limit` data rows; 0 means no limit.
    pub fn row_limit(&mut self, limit: u64) -> &mut Self {
        self.row_limit = (limit > 0).then_some(limit);
        self
    }

    /// Fail with [`ProfileError::Decode`] on bytes invalid for the encoding.
    ///
    /// Only honoured for ASCII-compatible encodings; UTF-16 input is always
    /// transcoded with substitution.
    pub fn strict_decoding(&mut self, strict: bool) -> &mut Self {
        self.strict_decoding = strict;
        self
    }

    /// Whether [`profile_path`](Self::profile_path) records the file's MD5
    /// digest. On by default.
    pub fn checksum(&mut self, enabled: bool) -> &mut Self {
        self.checksum = enabled;
        self
    }

    /// Profile the file at `path`.
    pub fn profile_path<P: AsRef<Path>>(&self, path: P) -> Result<Profile> {
        let path = path.as_ref();
        info!("Starting to profile {}", path.display());

        if !path.exists() {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }
        if path.metadata()?.len() == 0 {
            return Err(ProfileError::EmptyFile(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let mut profile = self.profile_reader(BufReader::new(file))?;
        profile.source = Some(path.to_path_buf());
        if self.checksum {
            profile.file_md5 = Some(file_md5(path)?);
        }
        Ok(profile)
    }

    /// Profile delimited text from a seekable reader.
    ///
    /// The reader is sampled from its start for detection, rewound, and then
    /// scanned once.
    pub fn profile_reader<R: Read + Seek>(&self, mut reader: R) -> Result<Profile> {
        if self.sample_size.encoding_bytes == 0 || self.sample_size.dialect_bytes == 0 {
            return Err(ProfileError::InvalidConfig(format!(
                "sample sizes must be positive, got {:?}",
                self.sample_size
            )));
        }

        let forced_encoding = self
            .forced_encoding
            .as_deref()
            .map(resolve_encoding)
            .transpose()?;

        reader.seek(SeekFrom::Start(0))?;
        let prefix = read_prefix(&mut reader, self.sample_size.max_bytes())?;
        if prefix.is_empty() {
            return Err(ProfileError::EmptyInput);
        }

        let encoding = match forced_encoding {
            Some(encoding) => {
                info!("Using forced encoding: {}", encoding.name());
                encoding
            }
            None => {
                let end = prefix.len().min(self.sample_size.encoding_bytes);
                let detected = detect_encoding(&prefix[..end]);
                if detected.is_fallback {
                    warn!(
                        "Encoding detection inconclusive; using {} as fallback",
                        detected.name()
                    );
                } else {
                    info!("Detected encoding: {}", detected.name());
                }
                detected.encoding
            }
        };

        let end = prefix.len().min(self.sample_size.dialect_bytes);
        let decoded = decode_lossy(&prefix[..end], encoding);
        let sample = if end < prefix.len() || prefix.len() == self.sample_size.max_bytes() {
            complete_lines(&decoded)
        } else {
            decoded.as_str()
        };

        let dialect = self.resolve_dialect(sample);
        let has_header = match self.header_mode {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => {
                let decision = detect_header(sample, &dialect);
                info!("Header auto-detection result: {decision}");
                decision
            }
        };

        reader.seek(SeekFrom::Start(0))?;
        let mut rows = if self.strict_decoding && is_byte_splittable(encoding) {
            RowSource::strict(reader, &dialect, encoding)
        } else {
            RowSource::transcoded(reader, &dialect, encoding)
        };

        let (columns, rows_read) = self.scan(&mut rows, has_header)?;
        info!("Finished profiling. Processed {rows_read} data rows.");

        Ok(Profile {
            source: None,
            file_md5: None,
            encoding,
            dialect,
            has_header,
            rows_read,
            columns,
        })
    }

    fn resolve_dialect(&self, sample: &str) -> Dialect {
        match sniff_dialect(sample, self.forced_delimiter, self.forced_quote) {
            Some(dialect) => {
                info!(
                    "Detected delimiter: '{}', quote: '{}'",
                    printable_delimiter(dialect.delimiter),
                    dialect.quote
                );
                dialect
            }
            None => {
                let fallback = Dialect::new(
                    self.forced_delimiter.unwrap_or(b','),
                    self.forced_quote.unwrap_or_default(),
                );
                warn!("Could not detect CSV dialect; using defaults ({fallback})");
                fallback
            }
        }
    }

    /// The single pass: resolve names, then feed every row to the accumulators.
    fn scan<R: Read>(
        &self,
        rows: &mut RowSource<R>,
        has_header: bool,
    ) -> Result<(Vec<ColumnStats>, u64)> {
        let mut row: Vec<String> = Vec::new();

        // Blank lines ahead of the first record are not rows.
        if let Next::End { .. } = rows.next_row(&mut row)? {
            return Err(ProfileError::processing(if has_header {
                "empty CSV; no header row found"
            } else {
                "empty CSV; no data rows found"
            }));
        }

        if let Some(first) = row.first_mut()
            && first.starts_with('\u{feff}')
        {
            first.remove(0);
        }

        let mut columns: Vec<ColumnStats> = if has_header {
            let columns: Vec<ColumnStats> = row
                .iter()
                .enumerate()
                .map(|(i, name)| match name.trim() {
                    "" => ColumnStats::new(synthesized_name(i)),
                    trimmed => ColumnStats::new(trimmed),
                })
                .collect();
            info!("Found {} columns in header", columns.len());
            columns
        } else {
            let columns: Vec<ColumnStats> = (0..row.len())
                .map(|i| ColumnStats::new(synthesized_name(i)))
                .collect();
            info!(
                "No header row, generated {} column names",
                columns.len()
            );
            columns
        };

        let limit = self.row_limit.unwrap_or(u64::MAX);
        let mut rows_read: u64 = 0;
        // Without a header the peeked row is the first data row.
        let mut pending = !has_header;

        'rows: loop {
            let (blank_lines, has_record) = if pending {
                pending = false;
                (0, true)
            } else {
                match rows.next_row(&mut row)? {
                    Next::Record { blank_lines } => (blank_lines, true),
                    Next::End { blank_lines } => (blank_lines, false),
                }
            };

            // A blank line is a row with every cell empty.
            for _ in 0..blank_lines {
                if rows_read >= limit {
                    break 'rows;
                }
                for stats in &mut columns {
                    stats.update(Some(""));
                }
                rows_read += 1;
                log_progress(rows_read);
            }

            if !has_record || rows_read >= limit {
                break;
            }

            // Short rows are padded with empty cells, long rows truncated.
            for (i, stats) in columns.iter_mut().enumerate() {
                stats.update(Some(row.get(i).map_or("", String::as_str)));
            }
            rows_read += 1;
            log_progress(rows_read);
        }

        if rows_read >= limit {
            info!("Reached row limit of {rows_read}");
        }

        Ok((columns, rows_read))
    }
}

fn log_progress(rows_read: u64) {
    if rows_read % PROGRESS_INTERVAL == 0 {
        info!("Processed {rows_read} rows...");
    }
}

/// Positional name for column index `i` (`col_1`, `col_2`, ...).
pub fn synthesized_name(i: usize) -> String {
    format!("col_{}", i + 1)
}

/// Decide whether the sample starts with a header row.
///
/// A first row that is mostly typed values (numbers, booleans, dates) is data,
/// whatever the generic heuristic says. Otherwise the heuristic decides, and
/// when it has nothing to go on the header is assumed present.
pub fn detect_header(sample: &str, dialect: &Dialect) -> bool {
    let first = parse_table(sample, dialect, 1);
    let Some(first_row) = first.rows.first() else {
        debug!("No first row available for header detection");
        return false;
    };

    let (typed, total) = first_row
        .iter()
        .map(|cell| cell.trim())
        .filter(|cell| !cell.is_empty())
        .fold((0usize, 0usize), |(typed, total), cell| {
            (typed + usize::from(is_typed(cell)), total + 1)
        });
    let ratio = if total > 0 {
        typed as f64 / total as f64
    } else {
        0.0
    };

    if ratio >= TYPED_RATIO_THRESHOLD {
        info!("First row resembles data (typed_ratio={ratio:.2}); treating as no header");
        return false;
    }

    let sniffed = sniff_header(sample, dialect).unwrap_or(true);
    debug!("Header heuristic reports header present: {sniffed}");
    sniffed
}

/// Outcome of one read from a [`RowSource`].
enum Next {
    /// A record was read, preceded by `blank_lines` newly found blank lines.
    Record { blank_lines: u64 },
    /// Input is exhausted; `blank_lines` are the blank lines not yet reported.
    End { blank_lines: u64 },
}

/// Passes bytes through, remembering the last one handed out.
struct TailTracking<R> {
    inner: R,
    last: Option<u8>,
}

impl<R: Read> Read for TailTracking<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            self.last = Some(buf[n - 1]);
        }
        Ok(n)
    }
}

fn tail_tracking<R: Read>(inner: R) -> TailTracking<R> {
    TailTracking { inner, last: None }
}

/// Infers the blank lines the csv reader skips from its line counter.
///
/// The counter sees every `\n`, so blank lines are whatever is left after
/// newlines inside fields and one terminator per record. A `\r\n` record's
/// `\n` is only consumed by the following read, so while scanning this is a
/// lower bound; it becomes exact at end of input, where an unterminated last
/// record is recognised from the final byte.
#[derive(Debug, Default)]
struct BlankLines {
    records: u64,
    embedded_newlines: u64,
    reported: u64,
}

impl BlankLines {
    fn after_record(&mut self, line: u64, fields: &[String]) -> u64 {
        self.records += 1;
        self.embedded_newlines += fields
            .iter()
            .map(|field| bytecount::count(field.as_bytes(), b'\n') as u64)
            .sum::<u64>();
        self.take(line, self.records)
    }

    fn at_end(&mut self, line: u64, last_byte: Option<u8>) -> u64 {
        let unterminated = self.records > 0 && !matches!(last_byte, Some(b'\n' | b'\r'));
        self.take(line, self.records - u64::from(unterminated))
    }

    fn take(&mut self, line: u64, terminators: u64) -> u64 {
        let blank = line
            .saturating_sub(1)
            .saturating_sub(self.embedded_newlines)
            .saturating_sub(terminators);
        let fresh = blank.saturating_sub(self.reported);
        self.reported += fresh;
        fresh
    }
}

/// Row iterator over the scanned input.
struct RowSource<R: Read> {
    records: Records<R>,
    blank_lines: BlankLines,
}

enum Records<R: Read> {
    /// Decoded to UTF-8 on the fly, invalid sequences replaced.
    Transcoded {
        reader: csv::Reader<TailTracking<DecodeReaderBytes<R, Vec<u8>>>>,
        record: csv::StringRecord,
    },
    /// Split on raw bytes, each field decoded without replacement.
    Strict {
        reader: csv::Reader<TailTracking<R>>,
        record: csv::ByteRecord,
        encoding: &'static Encoding,
        row: u64,
    },
}

impl<R: Read> RowSource<R> {
    fn transcoded(reader: R, dialect: &Dialect, encoding: &'static Encoding) -> Self {
        let decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .build(reader);
        Self::new(Records::Transcoded {
            reader: dialect.reader_builder().from_reader(tail_tracking(decoder)),
            record: csv::StringRecord::new(),
        })
    }

    fn strict(reader: R, dialect: &Dialect, encoding: &'static Encoding) -> Self {
        Self::new(Records::Strict {
            reader: dialect.reader_builder().from_reader(tail_tracking(reader)),
            record: csv::ByteRecord::new(),
            encoding,
            row: 0,
        })
    }

    fn new(records: Records<R>) -> Self {
        Self {
            records,
            blank_lines: BlankLines::default(),
        }
    }

    /// Read the next record into `out`.
    fn next_row(&mut self, out: &mut Vec<String>) -> Result<Next> {
        if self.records.read(out)? {
            let line = self.records.line();
            Ok(Next::Record {
                blank_lines: self.blank_lines.after_record(line, out),
            })
        } else {
            let (line, last_byte) = (self.records.line(), self.records.last_byte());
            Ok(Next::End {
                blank_lines: self.blank_lines.at_end(line, last_byte),
            })
        }
    }
}

impl<R: Read> Records<R> {
    fn read(&mut self, out: &mut Vec<String>) -> Result<bool> {
        out.clear();
        match self {
            Records::Transcoded { reader, record } => {
                if !reader.read_record(record).map_err(ProfileError::processing)? {
                    return Ok(false);
                }
                out.extend(record.iter().map(str::to_string));
            }
            Records::Strict {
                reader,
                record,
                encoding,
                row,
            } => {
                if !reader.read_byte_record(record).map_err(ProfileError::processing)? {
                    return Ok(false);
                }
                *row += 1;
                for field in record.iter() {
                    let text = encoding
                        .decode_without_bom_handling_and_without_replacement(field)
                        .ok_or(ProfileError::Decode {
                            encoding: encoding.name(),
                            row: *row,
                        })?;
                    out.push(text.into_owned());
                }
            }
        }
        Ok(true)
    }

    /// Newlines consumed so far, plus one.
    fn line(&self) -> u64 {
        match self {
            Records::Transcoded { reader, .. } => reader.position().line(),
            Records::Strict { reader, .. } => reader.position().line(),
        }
    }

    fn last_byte(&self) -> Option<u8> {
        match self {
            Records::Transcoded { reader, .. } => reader.get_ref().last,
            Records::Strict { reader, .. } => reader.get_ref().last,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::DataType;
    use std::io::Cursor;

    fn profile_bytes(profiler: &Profiler, data: &[u8]) -> Profile {
        profiler.profile_reader(Cursor::new(data.to_vec())).unwrap()
    }

    #[test]
    fn test_profiler_builder() {
        let mut profiler = Profiler::new();
        profiler
            .delimiter(b';')
            .quote(Quote::None)
            .header_mode(HeaderMode::Absent)
            .row_limit(10)
            .strict_decoding(true);

        assert_eq!(profiler.forced_delimiter, Some(b';'));
        assert_eq!(profiler.forced_quote, Some(Quote::None));
        assert_eq!(profiler.header_mode, HeaderMode::Absent);
        assert_eq!(profiler.row_limit, Some(10));
        assert!(profiler.strict_decoding);
        assert!(profiler.checksum);

        profiler.row_limit(0).checksum(false);
        assert_eq!(profiler.row_limit, None);
        assert!(!profiler.checksum);
    }

    #[test]
    fn test_profile_with_header() {
        let profile = profile_bytes(&Profiler::new(), b"id,score,name\n1,9.5,ann\n2,7.25,bob\n");
        assert!(profile.has_header);
        assert_eq!(profile.rows_read, 2);
        assert_eq!(profile.column_names(), vec!["id", "score", "name"]);
        assert_eq!(profile.columns[0].resolve_datatype(), DataType::Integer);
        assert_eq!(profile.columns[1].resolve_datatype(), DataType::Decimal);
        assert_eq!(profile.columns[2].resolve_datatype(), DataType::String);
    }

    #[test]
    fn test_headerless_first_row_is_data() {
        let data = b"1\t2020-01-15\t95.5\tJohn Doe\n2\t2020-01-16\t88.0\tJane Roe\n";
        let mut profiler = Profiler::new();
        profiler.delimiter(b'\t');
        let profile = profile_bytes(&profiler, data);

        assert!(!profile.has_header);
        assert_eq!(profile.column_names(), vec!["col_1", "col_2", "col_3", "col_4"]);
        assert_eq!(profile.rows_read, 2);
        assert_eq!(profile.columns[0].non_missing_count(), 2);
        assert_eq!(profile.columns[1].resolve_datatype(), DataType::DateTime);
    }

    #[test]
    fn test_blank_header_names_are_synthesized() {
        let mut profiler = Profiler::new();
        profiler.header_mode(HeaderMode::Present);
        let profile = profile_bytes(&profiler, b"a, ,c\nx,y,z\n");
        assert_eq!(profile.column_names(), vec!["a", "col_2", "c"]);
    }

    #[test]
    fn test_ragged_rows_padded_and_truncated() {
        let mut profiler = Profiler::new();
        profiler.delimiter(b',').header_mode(HeaderMode::Present);
        let profile = profile_bytes(&profiler, b"a,b,c\n1,2\n3,4,5,6\n7,8,9\n");

        assert_eq!(profile.rows_read, 3);
        for column in &profile.columns {
            assert_eq!(column.rows_seen(), 3);
        }
        assert_eq!(profile.columns[2].non_missing_count(), 2);
    }

    #[test]
    fn test_blank_lines_count_as_empty_rows() {
        let mut profiler = Profiler::new();
        profiler.delimiter(b',').header_mode(HeaderMode::Present);
        let profile = profile_bytes(&profiler, b"a,b\n1,x\n\n2,y\n\n3,z\n");

        assert_eq!(profile.rows_read, 5);
        for column in &profile.columns {
            assert_eq!(column.rows_seen(), 5);
            assert_eq!(column.non_missing_count(), 3);
        }
    }

    #[test]
    fn test_blank_lines_with_crlf_and_unterminated_tail() {
        let mut profiler = Profiler::new();
        profiler.delimiter(b',').header_mode(HeaderMode::Present);

        let crlf = profile_bytes(&profiler, b"a,b\r\n1,x\r\n\r\n2,y\r\n");
        assert_eq!(crlf.rows_read, 3);
        assert_eq!(crlf.columns[1].non_missing_count(), 2);

        let unterminated = profile_bytes(&profiler, b"a,b\n1,x\n\n2,y");
        assert_eq!(unterminated.rows_read, 3);

        let trailing = profile_bytes(&profiler, b"a,b\n1,x\n\n\n");
        assert_eq!(trailing.rows_read, 3);
        assert_eq!(trailing.columns[0].non_missing_count(), 1);
    }

    #[test]
    fn test_leading_blank_lines_and_embedded_newlines() {
        let mut profiler = Profiler::new();
        profiler
            .delimiter(b',')
            .quote(Quote::Some(b'"'))
            .header_mode(HeaderMode::Absent);
        let profile = profile_bytes(&profiler, b"\n\n1,\"two\nlines\"\n\n3,x\n");

        assert_eq!(profile.rows_read, 3);
        assert_eq!(profile.columns[0].non_missing_count(), 2);
    }

    #[test]
    fn test_blank_lines_respect_row_limit() {
        let mut profiler = Profiler::new();
        profiler
            .delimiter(b',')
            .header_mode(HeaderMode::Present)
            .row_limit(2);
        let profile = profile_bytes(&profiler, b"a,b\n1,x\n\n2,y\n");

        assert_eq!(profile.rows_read, 2);
        assert_eq!(profile.columns[0].rows_seen(), 2);
        assert_eq!(profile.columns[0].non_missing_count(), 1);
    }

    #[test]
    fn test_row_limit_stops_early() {
        let mut profiler = Profiler::new();
        profiler.header_mode(HeaderMode::Present).row_limit(2);
        let profile = profile_bytes(&profiler, b"v\n1\n2\n3\n4\n");
        assert_eq!(profile.rows_read, 2);
        assert_eq!(profile.columns[0].rows_seen(), 2);
    }

    #[test]
    fn test_forced_absent_keeps_first_row() {
        let mut profiler = Profiler::new();
        profiler.header_mode(HeaderMode::Absent);
        let profile = profile_bytes(&profiler, b"name,age\nAlice,30\n");
        assert_eq!(profile.rows_read, 2);
        assert_eq!(profile.column_names(), vec!["col_1", "col_2"]);
        assert_eq!(profile.columns[1].resolve_datatype(), DataType::String);
    }

    #[test]
    fn test_reader_input_has_no_checksum() {
        let profile = profile_bytes(&Profiler::new(), b"a\n1\n");
        assert_eq!(profile.file_md5, None);
    }

    #[test]
    fn test_empty_reader() {
        let result = Profiler::new().profile_reader(Cursor::new(Vec::new()));
        assert!(matches!(result, Err(ProfileError::EmptyInput)));
    }

    #[test]
    fn test_zero_sample_size_rejected() {
        let mut profiler = Profiler::new();
        profiler.sample_size(SampleSize::uniform(0));
        let result = profiler.profile_reader(Cursor::new(b"a\n1\n".to_vec()));
        assert!(matches!(result, Err(ProfileError::InvalidConfig(_))));
    }

    #[test]
    fn test_unknown_forced_encoding() {
        let mut profiler = Profiler::new();
        profiler.encoding("not-a-charset");
        let result = profiler.profile_reader(Cursor::new(b"a\n1\n".to_vec()));
        assert!(matches!(result, Err(ProfileError::UnknownEncoding(_))));
    }

    #[test]
    fn test_latin1_is_transcoded() {
        let mut profiler = Profiler::new();
        profiler.encoding("latin1").header_mode(HeaderMode::Present);
        let profile = profile_bytes(&profiler, b"city\nZ\xfcrich\nMalm\xf6\n");
        assert_eq!(profile.encoding.name(), "windows-1252");
        assert_eq!(profile.columns[0].non_missing_count(), 2);
    }

    #[test]
    fn test_strict_decoding_rejects_invalid_bytes() {
        let mut profiler = Profiler::new();
        profiler
            .encoding("utf-8")
            .header_mode(HeaderMode::Present)
            .strict_decoding(true);
        let result = profiler.profile_reader(Cursor::new(b"name\nok\nbad\xff\n".to_vec()));
        assert!(matches!(result, Err(ProfileError::Decode { row: 3, .. })));
    }

    #[test]
    fn test_lossy_decoding_substitutes() {
        let mut profiler = Profiler::new();
        profiler.encoding("utf-8").header_mode(HeaderMode::Present);
        let profile = profile_bytes(&profiler, b"name\nok\nbad\xff\n");
        assert_eq!(profile.rows_read, 2);
    }

    #[test]
    fn test_detect_header_typed_override() {
        let dialect = Dialect::new(b'\t', Quote::Some(b'"'));
        assert!(!detect_header("1\t2020-01-15\t95.5\tJohn Doe\n", &dialect));
        assert!(detect_header("id\tname\n1\tann\n2\tbob\n", &dialect));
        assert!(!detect_header("", &dialect));
    }
}
