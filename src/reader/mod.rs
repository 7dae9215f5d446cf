mod csv_reader;
mod errors;

pub use csv_reader::CsvReader;
pub use errors::ReadError;
