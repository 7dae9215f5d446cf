use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::str::FromStr;

use crate::models::errors::RecordError;
use crate::types::{Amount, Currency, RowNumber};

/// Column names of the input file, in order.
pub const COLUMNS: [&str; 5] = ["date", "reference", "amount", "currency", "message"];

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// A row exactly as it appears in the CSV file, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub date: String,
    pub reference: String,
    pub amount: String,
    pub currency: String,
    pub message: String
}

/// A validated Swish payment.
///
/// Records are immutable once parsed; the renderer only ever borrows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Booking date of the payment.
    pub date: NaiveDate,
    /// Time of day, when the export carries one.
    pub time: Option<NaiveTime>,
    /// Payer reference, also used to name the output file.
    pub reference: String,
    pub amount: Amount,
    pub currency: Currency,
    /// Free text message attached to the payment, possibly empty.
    pub message: String,
    /// Line in the input file this record was read from.
    pub row: RowNumber
}

impl TransactionRecord {
    /// Validates a raw row, reporting the first invalid field.
    pub fn from_raw(raw: RawRecord, row: RowNumber) -> Result<Self, RecordError> {
        let (date, time) = parse_date(raw.date.trim())
            .ok_or_else(|| RecordError::invalid_date(row, raw.date.trim()))?;

        let reference = raw.reference.trim().to_string();

        if reference.is_empty() {
            return Err(RecordError::missing_reference(row));
        }

        let amount = Amount::from_str(&raw.amount)
            .map_err(|error| RecordError::invalid_amount(row, error))?;

        let currency = Currency::from_str(&raw.currency)
            .map_err(|error| RecordError::invalid_currency(row, error))?;

        Ok(Self {
            date,
            time,
            reference,
            amount,
            currency,
            message: raw.message.trim().to_string(),
            row
        })
    }

    /// File stem derived from the reference.
    pub fn file_stem(&self) -> String {
        sanitize_file_stem(&self.reference)
    }
}

fn parse_date(value: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Some((date, None));
    }

    DATE_TIME_FORMATS.iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|date_time| (date_time.date(), Some(date_time.time())))
}

/// Maps a reference to a file stem that is safe on every common filesystem.
///
/// ASCII alphanumerics, `-`, `_` and `.` are kept; everything else becomes `_`,
/// as does a leading `.`.
pub fn sanitize_file_stem(reference: &str) -> String {
    let mut stem: String = reference.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();

    if stem.starts_with('.') {
        stem.replace_range(..1, "_");
    }

    stem
}
