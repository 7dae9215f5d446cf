use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

use crate::models::errors::RecordError;
use crate::models::{Grouping, TransactionRecord};
use crate::types::RowNumber;

pub const PDF_EXTENSION: &str = "pdf";

/// Longest file stem taken from a reference. Leaves room for the extension
/// within the 255 byte name limit of common filesystems.
pub const MAX_FILE_STEM_LEN: usize = 200;

/// One output file and the records that go into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentPlan {
    /// A single payment on its own page.
    Receipt(TransactionRecord),
    /// Every payment booked on one date, in input order.
    DailySummary {
        date: NaiveDate,
        records: Vec<TransactionRecord>
    }
}

impl DocumentPlan {
    pub fn file_name(&self) -> String {
        match self {
            Self::Receipt(record) => format!("{}.{PDF_EXTENSION}", record.file_stem()),
            Self::DailySummary { date, .. } => format!("{}.{PDF_EXTENSION}", date.format("%Y-%m-%d"))
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        match self {
            Self::Receipt(record) => std::slice::from_ref(record),
            Self::DailySummary { records, .. } => records
        }
    }
}

/// Splits validated records into the documents to render.
///
/// Per-transaction plans keep input order and reject two records that would
/// write the same file, or a reference too long to become a file name. Names
/// are compared case-insensitively so the result does not depend on the
/// filesystem. Per-date plans are ordered by date.
pub fn plan_documents(records: Vec<TransactionRecord>, grouping: Grouping) -> Result<Vec<DocumentPlan>, RecordError> {
    match grouping {
        Grouping::PerTransaction => plan_receipts(records),
        Grouping::PerDate => Ok(plan_daily_summaries(records))
    }
}

fn plan_receipts(records: Vec<TransactionRecord>) -> Result<Vec<DocumentPlan>, RecordError> {
    let mut claimed = HashMap::<String, (RowNumber, String)>::with_capacity(records.len());
    let mut plans = Vec::with_capacity(records.len());

    for record in records {
        let stem = record.file_stem();

        if stem.len() > MAX_FILE_STEM_LEN {
            return Err(RecordError::name_too_long(record.row, stem.len(), MAX_FILE_STEM_LEN));
        }

        let name = format!("{stem}.{PDF_EXTENSION}");
        let key = name.to_lowercase();

        if let Some((first_row, first_reference)) = claimed.get(&key) {
            return Err(RecordError::duplicate_name(record.row, &record.reference, &name, *first_row, first_reference));
        }

        claimed.insert(key, (record.row, record.reference.clone()));
        plans.push(DocumentPlan::Receipt(record));
    }

    Ok(plans)
}

fn plan_daily_summaries(records: Vec<TransactionRecord>) -> Vec<DocumentPlan> {
    let mut by_date = BTreeMap::<NaiveDate, Vec<TransactionRecord>>::new();

    for record in records {
        by_date.entry(record.date).or_default().push(record);
    }

    by_date.into_iter()
        .map(|(date, records)| DocumentPlan::DailySummary { date, records })
        .collect()
}
