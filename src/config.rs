use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

use crate::models::Grouping;
use crate::render::template::DEFAULT_TITLE;
use crate::render::{PageSize, Template};

/// Convert a CSV report of Swish payments into separate PDF files for accounting.
///
/// The input has the columns date,reference,amount,currency,message (an
/// optional header row with those names is skipped). Each row becomes
/// <reference>.pdf in the output directory.
#[derive(Parser, Debug)]
#[command(name = "swish2pdf", version)]
pub struct Args {
    /// Swish CSV export to convert.
    pub input: PathBuf,

    /// Directory the PDF files are written to, created if missing.
    pub output_dir: PathBuf,

    /// Field delimiter: a single ASCII character, or "tab".
    #[arg(short, long, env = "SWISH2PDF_DELIMITER", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,

    /// Write one summary per booking date instead of one receipt per payment.
    #[arg(long, env = "SWISH2PDF_GROUP_BY_DATE")]
    pub group_by_date: bool,

    /// Page size: a4 or letter.
    #[arg(long, env = "SWISH2PDF_PAGE_SIZE", default_value_t = PageSize::A4)]
    pub page_size: PageSize,

    /// Title printed at the top of every document.
    #[arg(long, env = "SWISH2PDF_TITLE", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Validate and render everything but write no files.
    #[arg(long, env = "SWISH2PDF_DRY_RUN")]
    pub dry_run: bool,

    /// Log level: error, warn, info, debug or trace. Logs go to stderr.
    #[arg(long, env = "SWISH2PDF_LOG_LEVEL", default_value = "warn", value_parser = parse_log_level)]
    pub log_level: LevelFilter
}

/// Validated settings for one conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub delimiter: u8,
    pub grouping: Grouping,
    pub template: Template,
    pub dry_run: bool
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let grouping = if args.group_by_date { Grouping::PerDate } else { Grouping::PerTransaction };

        Self {
            input: args.input,
            output_dir: args.output_dir,
            delimiter: args.delimiter,
            grouping,
            template: Template {
                page_size: args.page_size,
                title: args.title
            },
            dry_run: args.dry_run
        }
    }
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }

    match value.as_bytes() {
        [byte] if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(*byte),
        _ => Err(format!("'{value}' is not a single ASCII delimiter character"))
    }
}

pub fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(format!("invalid log level '{level}', expected error, warn, info, debug or trace"))
    }
}
