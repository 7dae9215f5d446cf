mod config;
mod engine;
mod models;
mod output;
mod reader;
mod render;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{Args, Config};
use crate::engine::{ConvertError, Converter, Summary};

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(args.log_level);

    let config = Config::from(args);
    let converter = Converter::new(&config);

    let timer = Instant::now();
    let result = converter.run();
    let duration = timer.elapsed();

    match result {
        Ok(summary) => {
            info!("Converted {} in: {duration:?}", config.input.display());

            match write_summary_to_stdout(&summary, &config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(error) => {
                    error!("Could not print summary: {error}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(error) => {
            eprintln!("swish2pdf: {error}");

            if let ConvertError::MalformedInput { row, .. } = &error {
                eprintln!("swish2pdf: no files were written, fix line {row} of {} and run again", config.input.display());
            }

            ExitCode::from(error.exit_code())
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run summary, so logs go to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_summary_to_stdout(summary: &Summary, config: &Config) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    if config.dry_run {
        writeln!(
            output,
            "{} records checked, {} documents would be written to {}",
            summary.records,
            summary.documents.len(),
            config.output_dir.display()
        )?;
    } else {
        writeln!(
            output,
            "{} records converted, {} documents written to {}",
            summary.records,
            summary.written,
            config.output_dir.display()
        )?;
    }

    for name in &summary.documents {
        writeln!(output, "{name}")?;
    }

    output.flush()?;

    Ok(())
}
