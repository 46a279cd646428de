//! Sign-adjusted, rescaled amounts
//!
//! Protocols encode signed quantities as a `(isPositive, magnitude)` pair and
//! leave the fixed-point position implicit. [`scale`] is the single place that
//! turns such a pair into a [`DecodedNumber`].

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use alloy_primitives::utils::{Unit, format_units};
use serde::{Serialize, Serializer};

use crate::errors::SemanticsError;

/// A decoded amount: a full 256-bit magnitude with the sign kept beside it.
///
/// Zero is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodedNumber {
    /// Taken as-is, never divided. Displays without a fractional part (`-42`).
    Integer { negative: bool, magnitude: U256 },
    /// `magnitude / 10^decimals`. Always displays a fractional part (`5.0`, `42.0`).
    Scaled {
        negative: bool,
        magnitude: U256,
        decimals: u8,
    },
}

/// Applies the sign to `magnitude` and, when `decimals` is given, divides the
/// result by `10^decimals`.
pub fn scale(
    positive: bool,
    magnitude: U256,
    decimals: Option<u8>,
) -> Result<DecodedNumber, SemanticsError> {
    let negative = !positive && !magnitude.is_zero();

    match decimals {
        None => Ok(DecodedNumber::Integer {
            negative,
            magnitude,
        }),
        Some(decimals) => {
            Unit::new(decimals).ok_or(SemanticsError::DecimalsOutOfRange(decimals))?;
            Ok(DecodedNumber::Scaled {
                negative,
                magnitude,
                decimals,
            })
        }
    }
}

impl DecodedNumber {
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Integer { negative, .. } | Self::Scaled { negative, .. } => *negative,
        }
    }
}

/// Drops trailing zeros of the fractional part, keeping at least one digit.
fn trim_fraction(formatted: &str) -> &str {
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0');
    if trimmed.ends_with('.') {
        &formatted[..trimmed.len() + 1]
    } else {
        trimmed
    }
}

impl fmt::Display for DecodedNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.write_str("-")?;
        }
        match self {
            Self::Integer { magnitude, .. } => write!(f, "{magnitude}"),
            Self::Scaled {
                magnitude,
                decimals,
                ..
            } => {
                // decimals were range-checked by `scale`
                let formatted = format_units(*magnitude, *decimals).map_err(|_| fmt::Error)?;
                f.write_str(trim_fraction(&formatted))
            }
        }
    }
}

impl FromStr for DecodedNumber {
    type Err = SemanticsError;

    /// Parses plain decimal literals such as `-42` or `1.25`.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let invalid = || SemanticsError::InvalidTree(format!("unsupported number literal {literal}"));
        let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

        let (positive, unsigned) = match literal.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, literal),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (unsigned, None),
        };
        if !is_digits(whole) || !fraction.is_none_or(is_digits) {
            return Err(invalid());
        }

        let digits = format!("{whole}{}", fraction.unwrap_or_default());
        let magnitude = U256::from_str_radix(&digits, 10).map_err(|_| invalid())?;
        let decimals = fraction
            .map(|f| u8::try_from(f.len()))
            .transpose()
            .map_err(|_| invalid())?;

        scale(positive, magnitude, decimals)
    }
}

impl Serialize for DecodedNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serialize_numeric(&self.to_string(), serializer)
    }
}
