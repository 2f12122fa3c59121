//! Lenient price parsing for the add-product form.
//!
//! Mirrors the usual "parse a number prefix" behavior of UI text fields:
//! leading whitespace is skipped, the longest decimal prefix wins, and
//! anything without a numeric prefix becomes NaN. The result is never
//! rejected; NaN travels to the server as `null`.

pub fn parse_price(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return infinity_prefix(trimmed).unwrap_or(f64::NAN);
    }
    prefix.parse().unwrap_or(f64::NAN)
}

/// Longest prefix shaped like `[+-]digits[.digits][(e|E)[+-]digits]` that
/// contains at least one mantissa digit.
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        // A lone "." after digits is still part of "5." but not of ".".
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return "";
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

fn infinity_prefix(text: &str) -> Option<f64> {
    let (sign, rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };
    rest.starts_with("Infinity").then_some(sign * f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(parse_price("5.5"), 5.5);
        assert_eq!(parse_price("9.99"), 9.99);
        assert_eq!(parse_price("12"), 12.0);
        assert_eq!(parse_price("-3"), -3.0);
        assert_eq!(parse_price(".5"), 0.5);
        assert_eq!(parse_price("5."), 5.0);
    }

    #[test]
    fn leading_whitespace_and_trailing_garbage() {
        assert_eq!(parse_price("  7.25 "), 7.25);
        assert_eq!(parse_price("5.5abc"), 5.5);
        assert_eq!(parse_price("1.2.3"), 1.2);
        assert_eq!(parse_price("3e2"), 300.0);
        assert_eq!(parse_price("3e"), 3.0);
        assert_eq!(parse_price("3e+"), 3.0);
    }

    #[test]
    fn non_numeric_input_is_nan() {
        assert!(parse_price("").is_nan());
        assert!(parse_price("abc").is_nan());
        assert!(parse_price(".").is_nan());
        assert!(parse_price("-").is_nan());
        assert!(parse_price("$5").is_nan());
    }

    #[test]
    fn infinity() {
        assert_eq!(parse_price("Infinity"), f64::INFINITY);
        assert_eq!(parse_price("-Infinityx"), f64::NEG_INFINITY);
        assert!(parse_price("inf").is_nan());
    }
}
