//! Number formatting in the Spanish (Spain) locale.

use itertools::Itertools;

const GROUP_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Spanish locale only groups thousands from five integer digits on.
const MIN_GROUPED_DIGITS: usize = 5;

/// Formats like `Intl.NumberFormat('es-ES')`: at most three fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let formatted = format!("{:.3}", value);
    let formatted = formatted.trim_end_matches('0').trim_end_matches('.');
    localize(formatted)
}

/// Formats as US dollars like `Intl.NumberFormat('es-ES', {style: 'currency', currency: 'USD'})`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{}\u{a0}US$", format_non_finite(amount));
    }
    format!("{}\u{a0}US$", localize(&format!("{:.2}", amount)))
}

/// Fixed-point notation like `Number.prototype.toFixed`: exact binary ties
/// round away from zero instead of to even.
pub fn to_fixed(value: f64, n_digits: usize) -> String {
    if !value.is_finite() {
        return format_non_finite(value);
    }
    let expanded = format!("{:.*}", n_digits + TIE_DIGITS, value);
    let (truncated, rest) = expanded.split_at(expanded.len() - TIE_DIGITS);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|digit| digit == b'0');
    if !is_tie {
        return format!("{:.*}", n_digits, value);
    }
    increment_last_digit(truncated.trim_end_matches('.'))
}

/// Digits past the requested precision that tell an exact tie from a near one.
const TIE_DIGITS: usize = 40;

fn increment_last_digit(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", number),
    };
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        match *byte {
            b'.' => continue,
            b'9' => *byte = b'0',
            _ => {
                *byte += 1;
                carry = false;
                break;
            }
        }
    }
    let digits = String::from_utf8_lossy(&bytes);
    if carry {
        format!("{}1{}", sign, digits)
    } else {
        format!("{}{}", sign, digits)
    }
}

fn format_non_finite(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_sign_negative() {
        "-∞".to_string()
    } else {
        "∞".to_string()
    }
}

/// Replaces the separators of a `-1234.5`-style number.
fn localize(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(unsigned) => ("-", unsigned),
        None => ("", formatted),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let sign = if integer.chars().all(|char_| char_ == '0') && fraction.chars().all(|char_| char_ == '0') {
        ""
    } else {
        sign
    };

    let integer = if integer.len() >= MIN_GROUPED_DIGITS {
        let head_len = integer.len() % 3;
        let (head, tail) = integer.split_at(head_len);
        let mut groups = tail.as_bytes().chunks(3).map(|chunk| String::from_utf8_lossy(chunk));
        let grouped = groups.join(&GROUP_SEPARATOR.to_string());
        if head.is_empty() {
            grouped
        } else {
            format!("{}{}{}", head, GROUP_SEPARATOR, grouped)
        }
    } else {
        integer.to_string()
    };

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}{}{}", sign, integer, DECIMAL_SEPARATOR, fraction)
    }
}
