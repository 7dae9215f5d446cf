use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::RecordError;
use crate::types::RowNumber;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Cannot read input file '{path}': {source}")]
    Unreadable {
        path: PathBuf,
        source: io::Error
    },
    #[error(transparent)]
    Record(#[from] RecordError),
    #[error("Row [{row}]: {message}")]
    Syntax {
        row: RowNumber,
        message: String
    }
}

impl ReadError {
    pub fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Unreadable { path: path.into(), source }
    }

    pub fn from_csv(error: csv::Error) -> Self {
        let row = error.position().map(|position| position.line()).unwrap_or(0);

        let message = match error.kind() {
            csv::ErrorKind::Utf8 { err, .. } => format!("field {} is not valid UTF-8", err.field() + 1),
            _ => error.to_string()
        };

        Self::Syntax { row, message }
    }
}
