mod directory_output;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use directory_output::DirectoryOutput;

#[derive(Debug, Error)]
#[error("Cannot write '{path}': {source}")]
pub struct OutputError {
    pub path: PathBuf,
    pub source: io::Error
}

impl OutputError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self { path: path.into(), source }
    }
}

/// Destination for rendered documents.
///
/// Documents are staged first and only become visible on `commit`, so a
/// failure while staging leaves the destination untouched.
pub trait DocumentSink {
    fn stage(&mut self, name: &str, bytes: &[u8]) -> Result<(), OutputError>;
    /// Publishes every staged document, returning how many were written.
    fn commit(&mut self) -> Result<usize, OutputError>;
}
