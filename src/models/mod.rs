mod document;
mod errors;
mod record;
#[cfg(test)]
mod tests;

pub use document::{plan_documents, DocumentPlan};
pub use errors::RecordError;
pub use record::{RawRecord, TransactionRecord, COLUMNS};

/// How records are split into output documents.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum Grouping {
    /// One receipt per transaction, named after its reference.
    #[default]
    PerTransaction,
    /// One summary per booking date, named after the date.
    PerDate
}
