use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::models::{RawRecord, RecordError, TransactionRecord, COLUMNS};
use crate::reader::ReadError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Reads a Swish export into validated records, in file order.
///
/// The whole file is validated before anything is returned, so callers never
/// see a partial batch.
pub struct CsvReader {
    delimiter: u8
}

impl CsvReader {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter
        }
    }

    pub fn read_path(&self, path: &Path) -> Result<Vec<TransactionRecord>, ReadError> {
        let contents = fs::read(path).map_err(|error| ReadError::unreadable(path, error))?;

        debug!("Read {} bytes from {}", contents.len(), path.display());

        self.read_slice(&contents)
    }

    pub fn read_slice(&self, input: &[u8]) -> Result<Vec<TransactionRecord>, ReadError> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .trim(Trim::All)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let mut row = StringRecord::new();
        let mut records = Vec::new();
        let mut is_first_row = true;

        while reader.read_record(&mut row).map_err(ReadError::from_csv)? {
            let line = row.position().map(|position| position.line()).unwrap_or(0);

            if is_first_row {
                is_first_row = false;

                if is_header(&row) {
                    debug!("Skipping header on line {line}");
                    continue;
                }
            }

            if row.len() != COLUMNS.len() {
                return Err(RecordError::column_count(line, COLUMNS.len(), row.len()).into());
            }

            let raw: RawRecord = row.deserialize(None).map_err(ReadError::from_csv)?;
            let record = TransactionRecord::from_raw(raw, line)?;

            debug!("Row [{line}]: {} {} {} {}", record.date, record.reference, record.amount, record.currency);

            records.push(record);
        }

        info!("Parsed {} transaction records", records.len());

        Ok(records)
    }
}

fn is_header(row: &StringRecord) -> bool {
    row.len() == COLUMNS.len()
        && row.iter().zip(COLUMNS).all(|(field, column)| field.eq_ignore_ascii_case(column))
}
