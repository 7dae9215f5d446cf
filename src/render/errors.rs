use std::io;

use thiserror::Error;

use crate::types::Currency;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF assembly failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("PDF serialization failed: {0}")]
    Io(#[from] io::Error),
    #[error("Total for {currency} does not fit in an amount")]
    TotalOverflow {
        currency: Currency
    }
}
