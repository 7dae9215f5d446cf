use super::document::MAX_FILE_STEM_LEN;
use super::record::sanitize_file_stem;
use super::{plan_documents, DocumentPlan, Grouping, RawRecord, RecordError, TransactionRecord};

use anyhow::{anyhow, Result};
use chrono::{NaiveDate, NaiveTime};

use crate::types::{AmountError, RowNumber};

fn raw(date: &str, reference: &str, amount: &str, currency: &str, message: &str) -> RawRecord {
    RawRecord {
        date: date.to_string(),
        reference: reference.to_string(),
        amount: amount.to_string(),
        currency: currency.to_string(),
        message: message.to_string()
    }
}

fn record(date: &str, reference: &str, row: RowNumber) -> Result<TransactionRecord> {
    Ok(TransactionRecord::from_raw(raw(date, reference, "100.00", "SEK", ""), row)?)
}

#[test]
fn test_valid_row_becomes_record() -> Result<()> {
    let record = TransactionRecord::from_raw(raw("2021-01-01", " REF123 ", "100.00", "sek", " Rent "), 2)?;

    assert_eq!(record.date, NaiveDate::from_ymd_opt(2021, 1, 1).ok_or_else(|| anyhow!("bad date"))?);
    assert_eq!(record.time, None);
    assert_eq!(record.reference, "REF123");
    assert_eq!(record.amount.to_string(), "100.00");
    assert_eq!(record.currency.to_string(), "SEK");
    assert_eq!(record.message, "Rent");
    assert_eq!(record.row, 2);

    Ok(())
}

#[test]
fn test_date_with_time_keeps_the_time() -> Result<()> {
    let with_seconds = TransactionRecord::from_raw(raw("2021-03-04 13:37:05", "A", "1", "SEK", ""), 1)?;
    let without_seconds = TransactionRecord::from_raw(raw("2021-03-04 08:15", "B", "1", "SEK", ""), 2)?;

    assert_eq!(with_seconds.time, NaiveTime::from_hms_opt(13, 37, 5));
    assert_eq!(without_seconds.time, NaiveTime::from_hms_opt(8, 15, 0));
    assert_eq!(with_seconds.date, without_seconds.date);

    Ok(())
}

#[test]
fn test_invalid_date_is_rejected_with_row() {
    for value in ["2021-13-01", "01/02/2021", "", "2021-02-30"] {
        let result = TransactionRecord::from_raw(raw(value, "A", "1", "SEK", ""), 7);

        assert!(matches!(result, Err(RecordError::InvalidDate { row: 7, .. })), "accepted {value:?}");
    }
}

#[test]
fn test_empty_reference_is_rejected() {
    let result = TransactionRecord::from_raw(raw("2021-01-01", "   ", "1", "SEK", ""), 3);

    assert!(matches!(result, Err(RecordError::MissingReference { row: 3 })));
}

#[test]
fn test_non_numeric_amount_is_rejected() {
    let result = TransactionRecord::from_raw(raw("2021-01-01", "A", "ten", "SEK", ""), 4);

    assert!(matches!(result, Err(RecordError::InvalidAmount { row: 4, source: AmountError::InvalidFormat(_) })));
}

#[test]
fn test_invalid_currency_is_rejected() {
    let result = TransactionRecord::from_raw(raw("2021-01-01", "A", "1", "kronor", ""), 5);

    assert!(matches!(result, Err(RecordError::InvalidCurrency { row: 5, .. })));
}

#[test]
fn test_error_message_names_the_row() {
    let error = RecordError::column_count(9, 5, 4);

    assert_eq!(error.row(), 9);
    assert!(error.to_string().starts_with("Row [9]"));
}

#[test]
fn test_sanitize_file_stem_replaces_unsafe_characters() {
    assert_eq!(sanitize_file_stem("REF123"), "REF123");
    assert_eq!(sanitize_file_stem("a/b\\c:d"), "a_b_c_d");
    assert_eq!(sanitize_file_stem("Hyra mars"), "Hyra_mars");
    assert_eq!(sanitize_file_stem("åäö-1.2_x"), "___-1.2_x");
    assert_eq!(sanitize_file_stem(".hidden"), "_hidden");
    assert_eq!(sanitize_file_stem(".."), "_.");
}

#[test]
fn test_receipt_plans_are_named_after_references() -> Result<()> {
    let plans = plan_documents(vec![
        record("2021-01-01", "REF123", 1)?,
        record("2021-01-01", "REF/124", 2)?
    ], Grouping::PerTransaction)?;

    let names: Vec<_> = plans.iter().map(DocumentPlan::file_name).collect();

    assert_eq!(names, vec!["REF123.pdf", "REF_124.pdf"]);

    Ok(())
}

#[test]
fn test_colliding_references_are_rejected() -> Result<()> {
    let result = plan_documents(vec![
        record("2021-01-01", "REF 1", 2)?,
        record("2021-01-02", "other", 3)?,
        record("2021-01-03", "ref_1", 4)?
    ], Grouping::PerTransaction);

    match result {
        Err(error @ RecordError::DuplicateName { .. }) => {
            let message = error.to_string();

            assert_eq!(error.row(), 4);
            assert!(message.contains("'ref_1'"));
            assert!(message.contains("'ref_1.pdf'"));
            assert!(message.contains("'REF 1' on row [2]"));
        }
        other => return Err(anyhow!("expected a duplicate name error, got {other:?}"))
    }

    Ok(())
}

#[test]
fn test_references_too_long_for_a_file_name_are_rejected() -> Result<()> {
    let long_reference = "R".repeat(300);

    let result = plan_documents(vec![
        record("2021-01-01", "REF1", 2)?,
        record("2021-01-01", &long_reference, 3)?
    ], Grouping::PerTransaction);

    match result {
        Err(RecordError::NameTooLong { row, length, max }) => {
            assert_eq!(row, 3);
            assert_eq!(length, 300);
            assert_eq!(max, MAX_FILE_STEM_LEN);
        }
        other => return Err(anyhow!("expected a name too long error, got {other:?}"))
    }

    let longest = "R".repeat(MAX_FILE_STEM_LEN);
    let plans = plan_documents(vec![record("2021-01-01", &longest, 2)?], Grouping::PerTransaction)?;

    assert_eq!(plans[0].file_name(), format!("{longest}.pdf"));

    Ok(())
}

#[test]
fn test_long_references_are_fine_when_grouping_by_date() -> Result<()> {
    let plans = plan_documents(vec![record("2021-01-01", &"R".repeat(300), 2)?], Grouping::PerDate)?;

    assert_eq!(plans[0].file_name(), "2021-01-01.pdf");

    Ok(())
}

#[test]
fn test_daily_plans_group_by_date_in_date_order() -> Result<()> {
    let plans = plan_documents(vec![
        record("2021-01-02", "B", 1)?,
        record("2021-01-01", "A", 2)?,
        record("2021-01-02 10:00", "C", 3)?
    ], Grouping::PerDate)?;

    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].file_name(), "2021-01-01.pdf");
    assert_eq!(plans[1].file_name(), "2021-01-02.pdf");

    let references: Vec<_> = plans[1].records().iter().map(|record| record.reference.as_str()).collect();

    assert_eq!(references, vec!["B", "C"]);

    Ok(())
}

#[test]
fn test_empty_input_plans_nothing() -> Result<()> {
    assert!(plan_documents(Vec::new(), Grouping::PerTransaction)?.is_empty());
    assert!(plan_documents(Vec::new(), Grouping::PerDate)?.is_empty());

    Ok(())
}
