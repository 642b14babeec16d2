//! Parsing of submitted quantities.
//!
//! Quantities arrive as raw text from the request layer. Anything that is not a
//! non-negative integer is rejected here and the engine leaves that line alone;
//! a rejection never fails the rest of the update.

use std::num::IntErrorKind;
use thiserror::Error;

/// Largest quantity a diner may put on one line.
pub const MAX_LINE_QUANTITY: u64 = u32::MAX as u64;

/// Why a submitted quantity was skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityRejected {
    #[error("not an integer: {0:?}")]
    Unparsable(String),

    #[error("negative quantity: {0}")]
    Negative(i64),

    #[error("quantity out of range: {0}")]
    OutOfRange(String),
}

/// Parses a submitted quantity.
///
/// Accepts an optional sign followed by decimal digits, with no surrounding
/// whitespace. `"-0"` is zero.
pub fn parse_quantity(raw: &str) -> Result<u64, QuantityRejected> {
    let value = raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            QuantityRejected::OutOfRange(raw.to_string())
        }
        _ => QuantityRejected::Unparsable(raw.to_string()),
    })?;

    if value < 0 {
        return Err(QuantityRejected::Negative(value));
    }

    let value = value.unsigned_abs();
    if value > MAX_LINE_QUANTITY {
        return Err(QuantityRejected::OutOfRange(raw.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_and_signed_integers() {
        assert_eq!(parse_quantity("0"), Ok(0));
        assert_eq!(parse_quantity("5"), Ok(5));
        assert_eq!(parse_quantity("+7"), Ok(7));
        assert_eq!(parse_quantity("-0"), Ok(0));
        assert_eq!(parse_quantity("007"), Ok(7));
        assert_eq!(parse_quantity("4294967295"), Ok(MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_rejects_non_integers() {
        for raw in ["", " 3", "3 ", "2.5", "abc", "1e3", "0x10"] {
            assert_eq!(
                parse_quantity(raw),
                Err(QuantityRejected::Unparsable(raw.to_string())),
                "{raw:?} should be unparsable"
            );
        }
    }

    #[test]
    fn test_rejects_negative() {
        assert_eq!(parse_quantity("-3"), Err(QuantityRejected::Negative(-3)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            parse_quantity("4294967296"),
            Err(QuantityRejected::OutOfRange(_))
        ));
        assert!(matches!(
            parse_quantity("99999999999999999999"),
            Err(QuantityRejected::OutOfRange(_))
        ));
    }
}
