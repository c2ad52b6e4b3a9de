//! csv-cdi-profile CLI - column profiler for DDI-CDI metadata

use clap::Parser;
use csv_cdi_profile::{
    HeaderMode, Profile, ProfileSummary, Profiler, Quote, SummaryDocument, printable_delimiter,
};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Streaming column profiler for CSV/TSV files.
///
/// Detects encoding, delimiter and header, then infers an XSD datatype and a
/// DDI-CDI role for every column in a single pass.
#[derive(Parser, Debug)]
#[command(name = "csv-cdi-profile")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input CSV/TSV file(s) to profile
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Force delimiter (single character, `\t` or `tab`)
    #[arg(short = 'd', long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// Force quote character (single ASCII character, or 'none')
    #[arg(long, value_parser = parse_quote)]
    quote: Option<Quote>,

    /// Force the input encoding (e.g. utf-8, latin1, windows-1252)
    #[arg(short = 'e', long)]
    encoding: Option<String>,

    /// Header handling: present, absent or auto
    #[arg(long, default_value = "auto", value_parser = parse_header_mode)]
    header: HeaderMode,

    /// Treat the first row as data (same as `--header absent`)
    #[arg(long, conflicts_with = "header")]
    no_header: bool,

    /// Stop after this many data rows (0 = no limit)
    #[arg(short = 'n', long, default_value = "0")]
    limit_rows: u64,

    /// Fail on bytes that are invalid for the encoding instead of replacing them
    #[arg(long)]
    strict: bool,

    /// Output format: text (default) or json
    #[arg(short = 'f', long, default_value = "text")]
    format: OutputFormat,

    /// Write one JSON summary covering every profiled file to this path
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Do not compute the MD5 checksum of each file
    #[arg(long)]
    skip_md5: bool,

    /// Debug logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii() => Ok(c as u8),
                _ => Err(format!(
                    "delimiter must be a single ASCII character, got '{value}'"
                )),
            }
        }
    }
}

fn parse_quote(value: &str) -> Result<Quote, String> {
    value.parse().map_err(|e: csv_cdi_profile::ProfileError| e.to_string())
}

fn parse_header_mode(value: &str) -> Result<HeaderMode, String> {
    value.parse().map_err(|e: csv_cdi_profile::ProfileError| e.to_string())
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var("RUST_LOG").is_err() {
        builder.filter_module("csv_cdi_profile", level);
    }
    let _ = builder.format_timestamp_millis().try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let mut exit_code = ExitCode::SUCCESS;
    let mut summaries = Vec::with_capacity(args.files.len());

    for file in &args.files {
        match profile_file(file, &args) {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                eprintln!("Error processing {}: {}", file.display(), e);
                exit_code = ExitCode::FAILURE;
            }
        }
    }

    if let Some(summary_path) = &args.summary_json
        && let Err(e) = write_summary(summary_path, summaries)
    {
        eprintln!("Error writing summary {}: {}", summary_path.display(), e);
        exit_code = ExitCode::FAILURE;
    }

    exit_code
}

fn write_summary(
    path: &Path,
    summaries: Vec<ProfileSummary>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = SummaryDocument::from_summaries(summaries);
    fs::write(path, document.to_json()?)?;
    log::info!(
        "Summary of {} file(s) written to {}",
        document.files.len(),
        path.display()
    );
    Ok(())
}

fn profile_file(path: &Path, args: &Args) -> Result<ProfileSummary, Box<dyn std::error::Error>> {
    let mut profiler = Profiler::new();

    if let Some(label) = &args.encoding {
        profiler.encoding(label.as_str());
    }
    if let Some(delim) = args.delimiter {
        profiler.delimiter(delim);
    }
    if let Some(quote) = args.quote {
        profiler.quote(quote);
    }

    let header_mode = if args.no_header {
        HeaderMode::Absent
    } else {
        args.header
    };
    profiler
        .header_mode(header_mode)
        .row_limit(args.limit_rows)
        .strict_decoding(args.strict)
        .checksum(!args.skip_md5);

    let profile = profiler.profile_path(path)?;
    let summary = profile.to_summary();

    match args.format {
        OutputFormat::Text => print_text_output(path, &profile),
        OutputFormat::Json => println!("{}", summary.to_json()?),
    }

    Ok(summary)
}

fn print_text_output(path: &Path, profile: &Profile) {
    println!("File: {}", path.display());
    println!("  Encoding: {}", profile.encoding.name());
    println!(
        "  Delimiter: {}",
        printable_delimiter(profile.dialect.delimiter)
    );
    println!("  Quote: {}", profile.dialect.quote);
    println!("  Has header: {}", profile.has_header);
    println!("  Rows profiled: {}", profile.rows_read);
    if let Some(md5) = &profile.file_md5 {
        println!("  MD5: {md5}");
    }
    println!("  Column Analysis:");
    println!(
        "    {:<24} {:<10} {:<11} {:>10} {:>12}",
        "Column", "Datatype", "Role", "~Distinct", "Non-missing"
    );
    for (name, stats) in profile.iter() {
        println!(
            "    {:<24} {:<10} {:<11} {:>10} {:>12}",
            name,
            stats.resolve_datatype(),
            stats.resolve_role(),
            stats.estimate_distinct(),
            stats.non_missing_count()
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_for(file: &str, rows: u64) -> ProfileSummary {
        ProfileSummary {
            file: Some(file.to_string()),
            file_md5: None,
            encoding: "UTF-8".to_string(),
            delimiter: ",".to_string(),
            quote: Some("\"".to_string()),
            has_header: true,
            rows_profiled: rows,
            columns: Vec::new(),
        }
    }

    #[test]
    fn test_quote_argument() {
        let args = Args::try_parse_from(["csv-cdi-profile", "--quote", "'", "a.csv"]).unwrap();
        assert_eq!(args.quote, Some(Quote::Some(b'\'')));

        let args = Args::try_parse_from(["csv-cdi-profile", "--quote", "none", "a.csv"]).unwrap();
        assert_eq!(args.quote, Some(Quote::None));

        for bad in ["ab", "€", ""] {
            assert!(Args::try_parse_from(["csv-cdi-profile", "--quote", bad, "a.csv"]).is_err());
        }
    }

    #[test]
    fn test_skip_md5_flag() {
        let args = Args::try_parse_from(["csv-cdi-profile", "--skip-md5", "a.csv"]).unwrap();
        assert!(args.skip_md5);
    }

    #[test]
    fn test_summary_covers_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        write_summary(&path, vec![summary_for("a.csv", 3), summary_for("b.csv", 4)]).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["rows_profiled"], 7);
        assert_eq!(value["files"][0]["file"], "a.csv");
        assert_eq!(value["files"][1]["file"], "b.csv");
        assert_eq!(value["files"][1]["rows_profiled"], 4);
    }
}
