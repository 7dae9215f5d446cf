use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount: {0}")]
    InvalidFormat(String),
    #[error("Invalid amount: too many decimal places (at most {0})")]
    TooManyDecimals(u32),
    #[error("Invalid amount: Overflow")]
    Overflow
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("Invalid currency '{0}': expected a three letter code such as SEK")]
    InvalidCode(String)
}
