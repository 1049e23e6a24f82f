//! # Amount Codec
//!
//! Asset amounts travel as signed 64-bit integers counting *stroops*
//! (1 unit = 10^7 stroops) and are shown to humans as decimal strings.
//! Conversion is exact: any input that would need rounding is rejected.
//!
//! All arithmetic goes through `rust_decimal::Decimal`, never `f64`.
//!
//! ```text
//! "10.5"        -> 105000000
//! "0.0000001"   -> 1
//! "0.00000001"  -> error: more than 7 decimal places
//! 105000000     -> "10.5"
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::config::{AMOUNT_DECIMALS, STROOPS_PER_UNIT};

/// Errors raised while converting a decimal amount to stroops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid amount '{input}': {reason}")]
    InvalidDecimal { input: String, reason: String },

    #[error("amount '{0}' has more than 7 digits after the decimal point")]
    TooPrecise(String),

    #[error("amount '{0}' is negative")]
    Negative(String),

    #[error("amount '{0}' does not fit in a signed 64-bit stroop count")]
    Overflow(String),
}

/// Anything that can be read as an exact decimal amount.
///
/// Implemented for strings and [`Decimal`]. Floats are deliberately absent:
/// `0.1_f64` is not 0.1.
pub trait IntoAmount {
    fn into_decimal(self) -> Result<Decimal, AmountError>;
}

impl IntoAmount for Decimal {
    fn into_decimal(self) -> Result<Decimal, AmountError> {
        Ok(self)
    }
}

impl IntoAmount for &str {
    fn into_decimal(self) -> Result<Decimal, AmountError> {
        let trimmed = self.trim();
        Decimal::from_str_exact(trimmed).map_err(|e| parse_error(trimmed, e))
    }
}

/// Sorts a parse failure into the amount error it stands for.
///
/// Inputs past `Decimal`'s 96-bit mantissa or 28-digit scale are well-formed
/// numbers, just out of range, so they get `Overflow` or `TooPrecise` rather
/// than `InvalidDecimal`.
fn parse_error(input: &str, err: rust_decimal::Error) -> AmountError {
    use rust_decimal::Error as DecimalError;

    let input = input.to_string();
    match err {
        DecimalError::ExceedsMaximumPossibleValue | DecimalError::LessThanMinimumPossibleValue => {
            AmountError::Overflow(input)
        }
        DecimalError::ScaleExceedsMaximumPrecision(_) => AmountError::TooPrecise(input),
        // Too many digits after the point; the rounded value says whether
        // the integer part fits at all.
        DecimalError::Underflow => match Decimal::from_str(&input) {
            Ok(rounded) if rounded.abs() > Decimal::new(i64::MAX, AMOUNT_DECIMALS) => {
                AmountError::Overflow(input)
            }
            _ => AmountError::TooPrecise(input),
        },
        DecimalError::ErrorString(reason) if reason.contains("overflow") => {
            AmountError::Overflow(input)
        }
        other => AmountError::InvalidDecimal {
            input,
            reason: other.to_string(),
        },
    }
}

impl IntoAmount for &String {
    fn into_decimal(self) -> Result<Decimal, AmountError> {
        self.as_str().into_decimal()
    }
}

impl IntoAmount for String {
    fn into_decimal(self) -> Result<Decimal, AmountError> {
        self.as_str().into_decimal()
    }
}

/// Converts a decimal amount into stroops.
///
/// Fails when the value has more than seven fractional digits, is negative,
/// or exceeds `i64::MAX` stroops (922337203685.4775807).
pub fn to_network_amount(value: impl IntoAmount) -> Result<i64, AmountError> {
    let amount = value.into_decimal()?;
    let shown = amount.to_string();

    let scaled = amount
        .checked_mul(Decimal::from(STROOPS_PER_UNIT))
        .ok_or_else(|| AmountError::Overflow(shown.clone()))?;
    if !scaled.fract().is_zero() {
        return Err(AmountError::TooPrecise(shown));
    }
    if scaled.is_sign_negative() && !scaled.is_zero() {
        return Err(AmountError::Negative(shown));
    }
    scaled.to_i64().ok_or(AmountError::Overflow(shown))
}

/// Renders a stroop count as the shortest exact decimal string.
///
/// Trailing zeros are dropped; whole numbers carry no decimal point.
pub fn from_network_amount(stroops: i64) -> String {
    Decimal::new(stroops, AMOUNT_DECIMALS).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(to_network_amount("10.5").unwrap(), 105_000_000);
        assert_eq!(to_network_amount("1").unwrap(), 10_000_000);
        assert_eq!(to_network_amount("0.0000001").unwrap(), 1);
        assert_eq!(to_network_amount("0").unwrap(), 0);
    }

    #[test]
    fn maximum_amount_fits() {
        assert_eq!(to_network_amount("922337203685.4775807").unwrap(), i64::MAX);
    }

    #[test]
    fn one_stroop_past_max_overflows() {
        assert!(matches!(
            to_network_amount("922337203685.4775808"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn eight_decimal_places_are_rejected() {
        assert!(matches!(
            to_network_amount("0.00000001"),
            Err(AmountError::TooPrecise(_))
        ));
    }

    #[test]
    fn trailing_zeros_beyond_seven_places_are_fine() {
        assert_eq!(to_network_amount("1.50000000").unwrap(), 15_000_000);
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert_eq!(
            to_network_amount("-1"),
            Err(AmountError::Negative("-1".into()))
        );
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            to_network_amount("ten"),
            Err(AmountError::InvalidDecimal { .. })
        ));
        assert!(matches!(
            to_network_amount(""),
            Err(AmountError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn out_of_range_inputs_keep_their_error_kind() {
        assert_eq!(
            to_network_amount("100000000000000000000000000000"),
            Err(AmountError::Overflow("100000000000000000000000000000".into()))
        );
        assert_eq!(
            to_network_amount("0.000000000000000000000000000001"),
            Err(AmountError::TooPrecise("0.000000000000000000000000000001".into()))
        );
        assert!(matches!(
            to_network_amount("12345678901234567890123456789.5"),
            Err(AmountError::Overflow(_))
        ));
    }

    #[test]
    fn decimal_input_is_accepted() {
        assert_eq!(to_network_amount(dec("2.25")).unwrap(), 22_500_000);
    }

    #[test]
    fn rendering_drops_trailing_zeros() {
        assert_eq!(from_network_amount(105_000_000), "10.5");
        assert_eq!(from_network_amount(10_000_000), "1");
        assert_eq!(from_network_amount(1), "0.0000001");
        assert_eq!(from_network_amount(0), "0");
        assert_eq!(from_network_amount(i64::MAX), "922337203685.4775807");
    }

    #[test]
    fn render_then_parse_is_identity() {
        for stroops in [0, 1, 9, 10, 12_345_678, 100_000_000_000, i64::MAX] {
            assert_eq!(to_network_amount(from_network_amount(stroops)).unwrap(), stroops);
        }
    }
}
