//! Smallest-unit amount conversion.
//!
//! Gas amounts arrive as integer literals in MIST (10^-9 SUI). They can exceed
//! the 53-bit range of a float, so parsing and arithmetic stay in `BigInt` and
//! the scaled result is an exact `BigDecimal`.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;

use crate::error::{ReplayError, Result};

/// Decimal places between MIST and SUI.
pub const SUI_DECIMALS: u32 = 9;

/// Parse a non-negative integer literal into a `BigInt`.
///
/// Only ASCII digits are accepted: no sign, no whitespace, no exponent.
pub fn parse_amount(amount: &str) -> Result<BigInt> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReplayError::MalformedAmount {
            amount: amount.to_string(),
        });
    }
    BigInt::parse_bytes(amount.as_bytes(), 10).ok_or_else(|| ReplayError::MalformedAmount {
        amount: amount.to_string(),
    })
}

/// Scale an integer amount down by `10^decimal_places`, exactly.
pub fn scale_amount(value: BigInt, decimal_places: u32) -> BigDecimal {
    BigDecimal::new(value, i64::from(decimal_places))
}

/// Convert an optional smallest-unit amount to a decimal.
///
/// `None` stays `None`: an amount that was not reported is unknown, not zero.
pub fn to_decimal(amount: Option<&str>, decimal_places: u32) -> Result<Option<BigDecimal>> {
    amount
        .map(|a| parse_amount(a).map(|v| scale_amount(v, decimal_places)))
        .transpose()
}

/// [`to_decimal`] with the MIST → SUI scale.
pub fn mist_to_sui(amount: Option<&str>) -> Result<Option<BigDecimal>> {
    to_decimal(amount, SUI_DECIMALS)
}

/// Render a decimal without trailing fractional zeros; `-` when unknown.
pub fn format_decimal(value: Option<&BigDecimal>) -> String {
    match value {
        Some(v) => {
            let text = v.to_string();
            if text.contains('.') {
                text.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                text
            }
        }
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_to_decimal_none_propagates() {
        for places in [0, 6, 9, 18] {
            assert!(to_decimal(None, places).unwrap().is_none());
        }
    }

    #[test]
    fn test_to_decimal_exact() {
        let v = to_decimal(Some("1300"), 9).unwrap().unwrap();
        assert_eq!(v, BigDecimal::from_str("0.0000013").unwrap());

        let v = mist_to_sui(Some("1500000000")).unwrap().unwrap();
        assert_eq!(v, BigDecimal::from_str("1.5").unwrap());
    }

    #[test]
    fn test_round_trip_law_beyond_f64_precision() {
        // 2^53 + 1 and a u128-sized amount
        for literal in [
            "0",
            "1",
            "999999999",
            "9007199254740993",
            "340282366920938463463374607431768211455",
        ] {
            let decimal = to_decimal(Some(literal), 9).unwrap().unwrap();
            let scaled = decimal * BigDecimal::new(BigInt::from(1_000_000_000u64), 0);
            let original = BigDecimal::new(parse_amount(literal).unwrap(), 0);
            assert_eq!(scaled, original, "round trip failed for {}", literal);
        }
    }

    #[test]
    fn test_malformed_amounts() {
        for bad in ["-1", "", "1.5", " 12", "+3", "1e9", "0x10", "abc"] {
            assert!(
                matches!(
                    to_decimal(Some(bad), 9),
                    Err(ReplayError::MalformedAmount { ref amount }) if amount == bad
                ),
                "expected MalformedAmount for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_decimal() {
        let v = to_decimal(Some("1300"), 9).unwrap();
        assert_eq!(format_decimal(v.as_ref()), "0.0000013");

        let v = to_decimal(Some("2000000000"), 9).unwrap();
        assert_eq!(format_decimal(v.as_ref()), "2");

        let v = to_decimal(Some("42"), 0).unwrap();
        assert_eq!(format_decimal(v.as_ref()), "42");

        let negative = scale_amount(BigInt::from(-1300), 9);
        assert_eq!(format_decimal(Some(&negative)), "-0.0000013");

        assert_eq!(format_decimal(None), "-");
    }
}
