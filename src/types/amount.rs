use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DECIMAL_PLACES: u32 = 2;

/// Characters Swedish exports use to group thousands: space, no-break space
/// and narrow no-break space.
const GROUP_SEPARATORS: [char; 3] = [' ', '\u{00A0}', '\u{202F}'];

/// A money value with exactly two decimals.
///
/// Parsing accepts both `.` and `,` as decimal separator and ignores digit
/// grouping, so `1 234,50` and `1234.50` are the same amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn zero() -> Self {
        Amount::normalized(Decimal::ZERO)
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount::normalized)
    }

    fn normalized(mut value: Decimal) -> Self {
        if value.is_zero() {
            value.set_sign_positive(true);
        }
        value.rescale(DECIMAL_PLACES);
        Amount(value)
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.prec$}", self.0, prec = DECIMAL_PLACES as usize)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let compact: String = value.trim()
            .chars()
            .filter(|c| !GROUP_SEPARATORS.contains(c))
            .collect();

        if compact.is_empty() {
            return Err(AmountError::InvalidFormat("value is an empty string".to_string()));
        }

        let (negative, unsigned) = match compact.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, compact.strip_prefix('+').unwrap_or(&compact))
        };

        if unsigned.contains('.') && unsigned.contains(',') {
            return Err(AmountError::InvalidFormat(format!("'{value}' mixes '.' and ',' separators")));
        }

        let parts: Vec<&str> = unsigned.split(['.', ',']).collect();

        if parts.len() > 2 {
            return Err(AmountError::InvalidFormat(format!("'{value}' has more than one decimal separator")));
        }

        let integer = parts[0];
        let fraction = parts.get(1).copied().unwrap_or("");

        if integer.is_empty() || !integer.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::InvalidFormat(format!("'{value}' has an invalid integer part")));
        }

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(AmountError::InvalidFormat(format!("'{value}' has an invalid fraction part")));
        }

        if fraction.len() > DECIMAL_PLACES as usize {
            return Err(AmountError::TooManyDecimals(DECIMAL_PLACES));
        }

        let sign = if negative { "-" } else { "" };
        let fraction = if fraction.is_empty() { "0" } else { fraction };

        // Digits are validated above, so the only remaining failure is a value
        // too large for the decimal type.
        let parsed = Decimal::from_str(&format!("{sign}{integer}.{fraction}"))
            .map_err(|_| AmountError::Overflow)?;

        Ok(Amount::normalized(parsed))
    }
}
