mod converter;
mod errors;

pub use converter::{Converter, Summary};
pub use errors::ConvertError;
