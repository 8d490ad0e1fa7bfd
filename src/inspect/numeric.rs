//! Lenient integer parsing for path segments.

/// Parse the leading integer of `input`.
///
/// Leading whitespace and a single sign are accepted, a `0x`/`0X` prefix
/// switches to hexadecimal, parsing stops at the first non-digit, and
/// trailing text is ignored (`"42abc"` is 42, `"0x1F4"` is 500). Returns
/// `None` when no digit is found. Values beyond `i64` saturate.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        _ => (10, unsigned),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for ch in digits.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            break;
        };
        seen_digit = true;
        let digit = i64::from(digit);
        let radix = i64::from(radix);
        value = if negative {
            value.saturating_mul(radix).saturating_sub(digit)
        } else {
            value.saturating_mul(radix).saturating_add(digit)
        };
    }

    seen_digit.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_integers() {
        assert_eq!(parse_leading_int("200"), Some(200));
        assert_eq!(parse_leading_int("0"), Some(0));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+7"), Some(7));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(parse_leading_int("404abc"), Some(404));
        assert_eq!(parse_leading_int("2.5"), Some(2));
        assert_eq!(parse_leading_int("  12 "), Some(12));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x12"), None);
    }

    #[test]
    fn test_hex_prefix() {
        assert_eq!(parse_leading_int("0x1F4"), Some(500));
        assert_eq!(parse_leading_int("0XaZ"), Some(10));
        assert_eq!(parse_leading_int("-0x10"), Some(-16));
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0xg"), None);
        assert_eq!(parse_leading_int("012"), Some(12));
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(parse_leading_int("99999999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999999"), Some(i64::MIN));
    }
}
