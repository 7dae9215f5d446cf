use crate::types::{AmountError, CurrencyError, RowNumber};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Row [{row}]: expected {expected} columns (date,reference,amount,currency,message), found {found}")]
    ColumnCount {
        row: RowNumber,
        expected: usize,
        found: usize
    },
    #[error("Row [{row}]: invalid date '{value}', expected YYYY-MM-DD with an optional HH:MM[:SS] time")]
    InvalidDate {
        row: RowNumber,
        value: String
    },
    #[error("Row [{row}]: reference is empty")]
    MissingReference {
        row: RowNumber
    },
    #[error("Row [{row}]: {source}")]
    InvalidAmount {
        row: RowNumber,
        source: AmountError
    },
    #[error("Row [{row}]: {source}")]
    InvalidCurrency {
        row: RowNumber,
        source: CurrencyError
    },
    #[error("Row [{row}]: reference '{reference}' maps to output file '{name}', already used by reference '{first_reference}' on row [{first_row}]")]
    DuplicateName {
        row: RowNumber,
        reference: String,
        name: String,
        first_row: RowNumber,
        first_reference: String
    },
    #[error("Row [{row}]: reference is too long for a file name ({length} characters, at most {max})")]
    NameTooLong {
        row: RowNumber,
        length: usize,
        max: usize
    }
}

impl RecordError {
    pub fn column_count(row: RowNumber, expected: usize, found: usize) -> Self {
        Self::ColumnCount { row, expected, found }
    }

    pub fn invalid_date(row: RowNumber, value: &str) -> Self {
        Self::InvalidDate { row, value: value.to_string() }
    }

    pub fn missing_reference(row: RowNumber) -> Self {
        Self::MissingReference { row }
    }

    pub fn invalid_amount(row: RowNumber, source: AmountError) -> Self {
        Self::InvalidAmount { row, source }
    }

    pub fn invalid_currency(row: RowNumber, source: CurrencyError) -> Self {
        Self::InvalidCurrency { row, source }
    }

    pub fn duplicate_name(row: RowNumber, reference: &str, name: &str, first_row: RowNumber, first_reference: &str) -> Self {
        Self::DuplicateName {
            row,
            reference: reference.to_string(),
            name: name.to_string(),
            first_row,
            first_reference: first_reference.to_string()
        }
    }

    pub fn name_too_long(row: RowNumber, length: usize, max: usize) -> Self {
        Self::NameTooLong { row, length, max }
    }

    /// The input row the error refers to.
    pub fn row(&self) -> RowNumber {
        match self {
            Self::ColumnCount { row, .. }
            | Self::InvalidDate { row, .. }
            | Self::MissingReference { row }
            | Self::InvalidAmount { row, .. }
            | Self::InvalidCurrency { row, .. }
            | Self::DuplicateName { row, .. }
            | Self::NameTooLong { row, .. } => *row
        }
    }
}
