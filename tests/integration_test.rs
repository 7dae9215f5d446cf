use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::Result;
use tempfile::tempdir;

fn run(args: &[&OsStr]) -> Result<Output> {
    let binary_path = env!("CARGO_BIN_EXE_swish2pdf");

    Ok(Command::new(binary_path).args(args).output()?)
}

fn sample(name: &str) -> PathBuf {
    Path::new("samples").join(name)
}

fn listing(directory: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in fs::read_dir(directory)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }

    names.sort();

    Ok(names)
}

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle.as_bytes())
}

#[test]
fn test_cli_writes_one_pdf_per_row() -> Result<()> {
    let output_dir = tempdir()?;
    let input = sample("sample.csv");
    let output = run(&[input.as_os_str(), output_dir.path().as_os_str()])?;

    assert!(output.status.success());
    assert_eq!(listing(output_dir.path())?, vec!["1234567890.pdf", "REF-125.pdf", "REF123.pdf", "REF126.pdf"]);

    let receipt = fs::read(output_dir.path().join("REF123.pdf"))?;

    assert!(receipt.starts_with(b"%PDF-"));
    assert!(contains(&receipt, "(2021-01-01)"));
    assert!(contains(&receipt, "(REF123)"));
    assert!(contains(&receipt, "(100.00 SEK)"));
    assert!(contains(&receipt, "(Rent)"));

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.starts_with("4 records converted, 4 documents written to"));

    Ok(())
}

#[test]
fn test_cli_output_is_byte_identical_across_runs() -> Result<()> {
    let first_dir = tempdir()?;
    let second_dir = tempdir()?;
    let input = sample("sample.csv");

    assert!(run(&[input.as_os_str(), first_dir.path().as_os_str()])?.status.success());
    assert!(run(&[input.as_os_str(), second_dir.path().as_os_str()])?.status.success());

    for name in listing(first_dir.path())? {
        assert_eq!(fs::read(first_dir.path().join(&name))?, fs::read(second_dir.path().join(&name))?, "{name} differs");
    }

    Ok(())
}

#[test]
fn test_cli_fails_on_malformed_input_without_writing() -> Result<()> {
    let root = tempdir()?;
    let output_dir = root.path().join("receipts");
    let input = sample("malformed.csv");
    let output = run(&[input.as_os_str(), output_dir.as_os_str()])?;

    assert_eq!(output.status.code(), Some(65));
    assert!(!output_dir.exists());

    let stderr = String::from_utf8(output.stderr)?;

    assert!(stderr.contains("Row [3]"));
    assert!(stderr.contains("amount"));

    Ok(())
}

#[test]
fn test_cli_fails_on_missing_input() -> Result<()> {
    let output_dir = tempdir()?;
    let input = sample("does-not-exist.csv");
    let output = run(&[input.as_os_str(), output_dir.path().as_os_str()])?;

    assert_eq!(output.status.code(), Some(66));
    assert!(listing(output_dir.path())?.is_empty());

    Ok(())
}

#[test]
fn test_cli_fails_when_output_is_not_a_directory() -> Result<()> {
    let root = tempdir()?;
    let blocker = root.path().join("file.txt");
    fs::write(&blocker, b"not a directory")?;

    let input = sample("sample.csv");
    let output = run(&[input.as_os_str(), blocker.as_os_str()])?;

    assert_eq!(output.status.code(), Some(73));

    Ok(())
}

#[test]
fn test_cli_groups_by_date_with_semicolon_delimiter() -> Result<()> {
    let output_dir = tempdir()?;
    let input = sample("semicolon.csv");
    let output = run(&[
        input.as_os_str(),
        output_dir.path().as_os_str(),
        OsStr::new("--delimiter"),
        OsStr::new(";"),
        OsStr::new("--group-by-date")
    ])?;

    assert!(output.status.success());
    assert_eq!(listing(output_dir.path())?, vec!["2021-02-01.pdf"]);

    let summary = fs::read(output_dir.path().join("2021-02-01.pdf"))?;

    assert!(contains(&summary, "(REF200)"));
    assert!(contains(&summary, "(REF201)"));
    assert!(contains(&summary, "(200.00 SEK)"));

    Ok(())
}

#[test]
fn test_cli_dry_run_creates_nothing() -> Result<()> {
    let root = tempdir()?;
    let output_dir = root.path().join("receipts");
    let input = sample("sample.csv");
    let output = run(&[input.as_os_str(), output_dir.as_os_str(), OsStr::new("--dry-run")])?;

    assert!(output.status.success());
    assert!(!output_dir.exists());

    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("4 documents would be written"));
    assert!(stdout.contains("REF123.pdf"));

    Ok(())
}

#[test]
fn test_cli_requires_output_directory() -> Result<()> {
    let input = sample("sample.csv");
    let output = run(&[input.as_os_str()])?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}
