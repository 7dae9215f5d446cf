use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::RecordError;
use crate::output::OutputError;
use crate::reader::ReadError;
use crate::render::RenderError;
use crate::types::RowNumber;

/// Everything that can abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Malformed input: {message}")]
    MalformedInput {
        row: RowNumber,
        message: String
    },
    #[error("Cannot read input file '{path}': {source}")]
    InputUnreadable {
        path: PathBuf,
        source: io::Error
    },
    #[error("Cannot write output '{path}': {source}")]
    OutputUnwritable {
        path: PathBuf,
        source: io::Error
    },
    #[error("Cannot render '{name}': {source}")]
    Render {
        name: String,
        source: RenderError
    }
}

impl ConvertError {
    pub fn render(name: &str, source: RenderError) -> Self {
        Self::Render { name: name.to_string(), source }
    }

    /// Process exit status for this error, following the BSD sysexits values.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::MalformedInput { .. } => 65,
            Self::InputUnreadable { .. } => 66,
            Self::Render { .. } => 70,
            Self::OutputUnwritable { .. } => 73
        }
    }
}

impl From<RecordError> for ConvertError {
    fn from(error: RecordError) -> Self {
        Self::MalformedInput { row: error.row(), message: error.to_string() }
    }
}

impl From<ReadError> for ConvertError {
    fn from(error: ReadError) -> Self {
        match error {
            ReadError::Unreadable { path, source } => Self::InputUnreadable { path, source },
            ReadError::Record(error) => error.into(),
            ReadError::Syntax { row, message } => Self::MalformedInput { row, message: format!("Row [{row}]: {message}") }
        }
    }
}

impl From<OutputError> for ConvertError {
    fn from(error: OutputError) -> Self {
        Self::OutputUnwritable { path: error.path, source: error.source }
    }
}
