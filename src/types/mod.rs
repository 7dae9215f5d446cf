mod amount;
mod currency;
mod errors;

pub use amount::Amount;
pub use currency::Currency;
pub use errors::{AmountError, CurrencyError};

/// 1-based line number of a row in the input file, header line included.
pub type RowNumber = u64;
