//! Decimal token amount handling. Every on-chain amount is a [`BigUint`] in
//! base units; these helpers convert between base units and the decimal
//! strings users type and read.

use num_bigint::BigUint;

/// Parses a user-entered decimal string into base units. Fractional digits
/// beyond the token's precision are truncated, never rounded up, so the
/// parsed amount is always spendable.
pub fn parse_decimal_amount(value: &str, decimals: u32) -> Option<BigUint> {
    let value = value.trim();
    let (int_part, frac_part) = match value.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (value, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let frac_kept = &frac_part[..frac_part.len().min(decimals as usize)];
    let mut digits = String::with_capacity(int_part.len() + decimals as usize);
    digits.push_str(int_part);
    digits.push_str(frac_kept);
    digits.extend(std::iter::repeat('0').take(decimals as usize - frac_kept.len()));
    if digits.is_empty() {
        digits.push('0');
    }
    BigUint::parse_bytes(digits.as_bytes(), 10)
}

/// Rescales base units between tokens of different precision. Scaling down
/// truncates.
pub fn shift_decimals(value: &BigUint, from_decimals: u32, to_decimals: u32) -> BigUint {
    if to_decimals >= from_decimals {
        value * BigUint::from(10u32).pow(to_decimals - from_decimals)
    } else {
        value / BigUint::from(10u32).pow(from_decimals - to_decimals)
    }
}

/// Formats base units for display: thousands-grouped integer part and two
/// truncated fractional digits, e.g. `1 234.56`.
pub fn format_token_value(value: &BigUint, decimals: u32) -> String {
    let divisor = BigUint::from(10u32).pow(decimals);
    let int_part = (value / &divisor).to_string();
    let remainder = value % &divisor;
    let frac = match decimals {
        0 => BigUint::from(0u32),
        1 => remainder * 10u32,
        _ => remainder / BigUint::from(10u32).pow(decimals - 2),
    };

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out.push_str(&format!(".{frac:02}"));
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::usdt_whole("100", 6, Some(100_000_000u64))]
    #[case::wever_whole("100", 9, Some(100_000_000_000u64))]
    #[case::fractional("1.5", 6, Some(1_500_000u64))]
    #[case::truncates_excess("1.2345678", 6, Some(1_234_567u64))]
    #[case::leading_dot(".5", 9, Some(500_000_000u64))]
    #[case::trailing_dot("2.", 6, Some(2_000_000u64))]
    #[case::zero_decimals("42", 0, Some(42u64))]
    fn test_parse_decimal_amount(
        #[case] raw: &str,
        #[case] decimals: u32,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(parse_decimal_amount(raw, decimals), expected.map(BigUint::from));
    }

    #[rstest]
    #[case::empty("")]
    #[case::dot_only(".")]
    #[case::letters("abc")]
    #[case::negative("-1")]
    #[case::two_dots("1.2.3")]
    #[case::embedded_space("1 000")]
    fn test_parse_rejects_garbage(#[case] raw: &str) {
        assert_eq!(parse_decimal_amount(raw, 9), None);
    }

    #[test]
    fn test_shift_decimals() {
        let evm_amount = BigUint::from(100_000_000u64); // 100 @ 6 decimals
        assert_eq!(shift_decimals(&evm_amount, 6, 9), BigUint::from(100_000_000_000u64));
        assert_eq!(shift_decimals(&evm_amount, 6, 6), evm_amount);
        // Truncation on the way down.
        assert_eq!(shift_decimals(&BigUint::from(1_999u32), 3, 0), BigUint::from(1u32));
    }

    #[test]
    fn test_format_token_value() {
        assert_eq!(format_token_value(&BigUint::from(1_234_567_890u64), 6), "1 234.56");
        assert_eq!(format_token_value(&BigUint::from(5u32), 6), "0.00");
        assert_eq!(format_token_value(&BigUint::from(1_000_000_000u64), 9), "1.00");
        assert_eq!(format_token_value(&BigUint::from(12u32), 0), "12.00");
        assert_eq!(format_token_value(&BigUint::from(95u32), 1), "9.50");
    }
}
