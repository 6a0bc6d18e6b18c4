//! Conversions between token base units and human decimal strings.
//!
//! Every display amount in the tool goes through these two functions,
//! parameterized by the decimal count discovered from the token contract.

use alloy::primitives::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("malformed numeric string: {0:?}")]
    Malformed(String),

    #[error("{input:?} has more fractional digits than the token's {decimals} decimals")]
    PrecisionLoss { input: String, decimals: u8 },

    #[error("value does not fit in a 256-bit integer")]
    Overflow,
}

/// Format a base-unit amount as a human decimal string.
///
/// Trailing fractional zeros are trimmed; a whole amount prints with no
/// fractional part at all.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let base = U256::from(10).pow(U256::from(decimals));
    let (whole, frac) = value.div_rem(base);
    if frac.is_zero() {
        return whole.to_string();
    }

    let digits = frac.to_string();
    let padded = format!("{digits:0>width$}", width = decimals as usize);
    format!("{}.{}", whole, padded.trim_end_matches('0'))
}

/// Parse a human decimal string into a base-unit amount.
///
/// Rejects anything that is not plain decimal digits with at most one dot,
/// more fractional digits than the token carries, and values that overflow
/// 256 bits.
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, UnitsError> {
    let trimmed = input.trim();
    let (whole, frac) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::Malformed(input.to_string()));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::Malformed(input.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(UnitsError::PrecisionLoss {
            input: input.to_string(),
            decimals,
        });
    }

    // Digits are already validated, so a parse failure can only be overflow.
    let whole_part = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| UnitsError::Overflow)?
    };

    let frac_part = if frac.is_empty() {
        U256::ZERO
    } else {
        let digits = U256::from_str_radix(frac, 10).map_err(|_| UnitsError::Overflow)?;
        let shift = U256::from(10).pow(U256::from(decimals as usize - frac.len()));
        digits.checked_mul(shift).ok_or(UnitsError::Overflow)?
    };

    let base = U256::from(10).pow(U256::from(decimals));
    whole_part
        .checked_mul(base)
        .and_then(|scaled| scaled.checked_add(frac_part))
        .ok_or(UnitsError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_amount() {
        assert_eq!(format_units(U256::from(5_000_000u64), 6), "5");
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }

    #[test]
    fn test_format_trims_trailing_zeros() {
        assert_eq!(format_units(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(format_units(U256::from(1_000_001u64), 6), "1.000001");
    }

    #[test]
    fn test_format_zero_decimals() {
        assert_eq!(format_units(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_format_sub_unit_amount() {
        assert_eq!(format_units(U256::from(25u64), 6), "0.000025");
    }

    #[test]
    fn test_parse_basic() {
        assert_eq!(parse_units("1.5", 6), Ok(U256::from(1_500_000u64)));
        assert_eq!(parse_units("10", 6), Ok(U256::from(10_000_000u64)));
        assert_eq!(parse_units(".5", 6), Ok(U256::from(500_000u64)));
        assert_eq!(parse_units("0", 18), Ok(U256::ZERO));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(parse_units("abc", 6), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units("1.2.3", 6), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units("", 6), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units("-1", 6), Err(UnitsError::Malformed(_))));
        assert!(matches!(parse_units(".", 6), Err(UnitsError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        assert!(matches!(
            parse_units("1.1234567", 6),
            Err(UnitsError::PrecisionLoss { decimals: 6, .. })
        ));
        assert!(matches!(
            parse_units("1.5", 0),
            Err(UnitsError::PrecisionLoss { decimals: 0, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_overflow() {
        // U256::MAX in whole tokens cannot be scaled up by 10^18.
        let max = U256::MAX.to_string();
        assert_eq!(parse_units(&max, 18), Err(UnitsError::Overflow));
        // But it is fine with zero decimals.
        assert_eq!(parse_units(&max, 0), Ok(U256::MAX));
    }

    #[test]
    fn test_round_trip_across_decimal_range() {
        let samples = [
            U256::ZERO,
            U256::from(1u64),
            U256::from(999u64),
            U256::from(1_000_000u64),
            U256::from(123_456_789_012_345_678u64),
            U256::from(u128::MAX),
        ];
        for decimals in 0u8..=18 {
            for value in samples {
                let formatted = format_units(value, decimals);
                assert_eq!(
                    parse_units(&formatted, decimals),
                    Ok(value),
                    "round trip failed for value={value} decimals={decimals}"
                );
            }
        }
    }
}
