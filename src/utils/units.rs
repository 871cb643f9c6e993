use alloy::primitives::U256;

/// 10^decimals, or `None` once it no longer fits into 256 bits.
pub fn pow10(decimals: u8) -> Option<U256> {
    U256::from(10u8).checked_pow(U256::from(decimals))
}

/// Converts a human readable decimal amount into base units.
///
/// The fractional part is right padded (or truncated) to exactly `decimals` digits.
/// Anything that is not a plain non-negative decimal, or that does not fit into
/// 256 bits, converts to zero.
pub fn parse_units(amount: &str, decimals: u8) -> U256 {
    checked_parse_units(amount, decimals).unwrap_or(U256::ZERO)
}

pub fn to_base_units(amount: &str, decimals: u8) -> String {
    parse_units(amount, decimals).to_string()
}

/// Same as [`parse_units`] but tells invalid input apart from a literal zero.
pub fn checked_parse_units(amount: &str, decimals: u8) -> Option<U256> {
    let amount = amount.trim();
    let (whole, fraction) = amount.split_once('.').unwrap_or((amount, ""));

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).ok()?
    };
    let mut value = match pow10(decimals) {
        Some(scale) => whole.checked_mul(scale)?,
        // Past 77 decimals only a zero whole part fits.
        None if whole.is_zero() => U256::ZERO,
        None => return None,
    };
    let width = usize::from(decimals);

    if width > 0 && !fraction.is_empty() {
        let truncated = &fraction[..fraction.len().min(width)];
        let padded = format!("{:0<width$}", truncated, width = width);

        value = value.checked_add(U256::from_str_radix(&padded, 10).ok()?)?;
    }

    Some(value)
}

fn is_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

/// Converts base units into a human readable decimal string with trailing zeros
/// of the fraction removed and no dangling separator.
pub fn format_units(value: U256, decimals: u8) -> String {
    let (whole, remainder) = match pow10(decimals) {
        Some(divisor) => (value / divisor, value % divisor),
        // 10^decimals exceeds U256::MAX, so the whole part is always zero.
        None => (U256::ZERO, value),
    };
    let fraction = format!(
        "{:0>width$}",
        remainder.to_string(),
        width = usize::from(decimals)
    );
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

pub fn from_base_units(amount: &str, decimals: u8) -> String {
    let value = U256::from_str_radix(amount.trim(), 10).unwrap_or(U256::ZERO);

    format_units(value, decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_units() {
        assert_eq!(to_base_units("1.5", 6), "1500000");
        assert_eq!(to_base_units("0.0001", 18), "100000000000000");
        assert_eq!(to_base_units("42", 0), "42");
        assert_eq!(to_base_units("1.", 6), "1000000");
        assert_eq!(to_base_units(".25", 2), "25");
    }

    #[test]
    fn test_to_base_units_truncates_extra_digits() {
        assert_eq!(to_base_units("1.1234567", 6), "1123456");
        assert_eq!(to_base_units("0.9", 0), "0");
    }

    #[test]
    fn test_to_base_units_invalid_input() {
        assert_eq!(to_base_units("abc", 18), "0");
        assert_eq!(to_base_units("", 6), "0");
        assert_eq!(to_base_units(".", 6), "0");
        assert_eq!(to_base_units("-1", 6), "0");
        assert_eq!(to_base_units("1.2.3", 6), "0");
        assert_eq!(to_base_units("1e3", 6), "0");
    }

    #[test]
    fn test_checked_parse_units() {
        assert_eq!(checked_parse_units("0", 6), Some(U256::ZERO));
        assert_eq!(checked_parse_units("0.5", 2), Some(U256::from(50u8)));
        assert_eq!(checked_parse_units("x", 6), None);
    }

    #[test]
    fn test_to_base_units_overflow_is_zero() {
        let huge = "9".repeat(80);

        assert_eq!(to_base_units(&huge, 18), "0");
    }

    #[test]
    fn test_from_base_units() {
        assert_eq!(from_base_units("1500000", 6), "1.5");
        assert_eq!(from_base_units("1000000", 6), "1");
        assert_eq!(from_base_units("1", 6), "0.000001");
        assert_eq!(from_base_units("0", 18), "0");
        assert_eq!(from_base_units("123", 0), "123");
        assert_eq!(from_base_units("not a number", 6), "0");
    }

    #[test]
    fn test_format_units_beyond_u256_precision() {
        assert_eq!(format_units(U256::from(5u8), 80), format!("0.{}5", "0".repeat(79)));
    }

    #[test]
    fn test_round_trip() {
        let values = [
            "0",
            "1",
            "999",
            "1000000",
            "123456789012345678901234567890",
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ];

        for decimals in [0u8, 1, 6, 8, 18, 30, 80] {
            for value in values {
                let human = from_base_units(value, decimals);

                assert_eq!(to_base_units(&human, decimals), value, "{} @ {}", value, decimals);
            }
        }
    }

    #[test]
    fn test_to_base_units_beyond_u256_precision() {
        let human = format!("0.{}5", "0".repeat(79));

        assert_eq!(to_base_units(&human, 80), "5");
        assert_eq!(to_base_units("1", 80), "0");
    }

    #[test]
    fn test_round_trip_human_strips_trailing_zeros() {
        assert_eq!(from_base_units(&to_base_units("1.500", 6), 6), "1.5");
        assert_eq!(from_base_units(&to_base_units("2.000", 18), 18), "2");
    }
}
