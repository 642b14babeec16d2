//! Money rounding.
//!
//! All amounts are [`Decimal`]. Totals are rounded once, after summing every
//! line of an order, never per line.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept on order totals.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to [`MONEY_DECIMAL_PLACES`], half away from zero.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_money_midpoint_goes_away_from_zero() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("0.124")), dec("0.12"));
        assert_eq!(round_money(dec("-0.125")), dec("-0.13"));
    }

    #[test]
    fn test_round_money_sum_of_tenths_is_exact() {
        let total = dec("0.10") + dec("0.10") + dec("0.10");
        assert_eq!(round_money(total), dec("0.30"));
    }

    #[test]
    fn test_round_money_keeps_two_places() {
        let rounded = round_money(dec("12.3456"));
        assert_eq!(rounded, dec("12.35"));
        assert_eq!(rounded.scale(), 2);
    }
}
