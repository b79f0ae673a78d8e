/// Parses the longest numeric prefix after leading whitespace, the way
/// browsers' `parseFloat` does. Returns `NaN` when there is none.
pub fn parse_float(value: &str) -> f64 {
    let value = value.trim_start();

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    if unsigned.starts_with("Infinity") {
        return if value.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let bytes = value.as_bytes();
    let mut end = value.len() - unsigned.len();
    let mut n_digits = 0;
    while bytes.get(end).map_or(false, u8::is_ascii_digit) {
        end += 1;
        n_digits += 1;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1;
        while bytes.get(end).map_or(false, u8::is_ascii_digit) {
            end += 1;
            n_digits += 1;
        }
    }
    if n_digits == 0 {
        return f64::NAN;
    }

    // Only consume the exponent if it has digits.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let digits_start = exponent_end;
        while bytes.get(exponent_end).map_or(false, u8::is_ascii_digit) {
            exponent_end += 1;
        }
        if exponent_end > digits_start {
            end = exponent_end;
        }
    }

    value[..end].parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_float_ok() {
        assert_eq!(parse_float("45"), 45.0);
        assert_eq!(parse_float("  85.5"), 85.5);
        assert_eq!(parse_float("-3.25e2"), -325.0);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("+7"), 7.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn parse_float_nan_ok() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("   ").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("e5").is_nan());
    }
}
