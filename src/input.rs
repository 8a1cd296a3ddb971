//! Lenient parsing of typed loan fields.
//!
//! Each parser mirrors how a loan form treats a keystroke: an empty field reads
//! as zero, and `None` means the text is rejected and the previous value stays.

use crate::display::group_thousands;
use crate::loan::MIN_TERM_YEARS;

/// Reads a loan amount, ignoring everything that is not a digit (`"$200,000"` is 200000).
pub fn parse_loan_amount(text: &str) -> f64 {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0.;
    }
    // a run of ascii digits always parses, overflowing to infinity at worst
    digits.parse().unwrap_or(f64::INFINITY)
}

/// Echoes a loan amount back with thousands separators.
pub fn format_loan_amount(amount: f64) -> String {
    group_thousands(&format!("{:.0}", amount.max(0.).round()))
}

/// Reads a term in years. Text without a leading number reads as 0; terms under
/// half a year are rejected.
pub fn parse_loan_term(text: &str) -> Option<f64> {
    match leading_number(text) {
        None => Some(0.),
        Some(years) if years >= MIN_TERM_YEARS => Some(years),
        Some(_) => None,
    }
}

/// Reads a rate or extra payment, which may be zero but never negative.
pub fn parse_non_negative(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.);
    }
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.)
}

// longest prefix of the form [+-]digits[.digits][e[+-]digits], after leading whitespace
fn leading_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = bytes[exp_end..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_parse_loan_amount() {
        assert_eq!(parse_loan_amount("200000"), 200000.);
        assert_eq!(parse_loan_amount("$200,000"), 200000.);
        assert_eq!(parse_loan_amount("1,234.56"), 123456.);
        assert_eq!(parse_loan_amount(""), 0.);
        assert_eq!(parse_loan_amount("abc"), 0.);
    }

    #[test]
    fn test_format_loan_amount() {
        assert_eq!(format_loan_amount(200000.), "200,000");
        assert_eq!(format_loan_amount(999.), "999");
        assert_eq!(format_loan_amount(0.), "0");
        let huge = parse_loan_amount("100000000000000000000");
        assert_eq!(format_loan_amount(huge), "100,000,000,000,000,000,000");
    }

    #[test]
    fn test_parse_loan_term() {
        assert_eq!(parse_loan_term("30"), Some(30.));
        assert_eq!(parse_loan_term("0.5"), Some(0.5));
        assert_eq!(parse_loan_term("2.5 years"), Some(2.5));
        assert_eq!(parse_loan_term(""), Some(0.));
        assert_eq!(parse_loan_term("soon"), Some(0.));
        assert_eq!(parse_loan_term("0.25"), None);
        assert_eq!(parse_loan_term("-3"), None);
        assert_eq!(parse_loan_term("1."), Some(1.));
        assert_eq!(parse_loan_term("1e1"), Some(10.));
        assert_eq!(parse_loan_term("25E-1 years"), Some(2.5));
        assert_eq!(parse_loan_term("3e"), Some(3.));
        assert_eq!(parse_loan_term("3e+x"), Some(3.));
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("6.5"), Some(6.5));
        assert_eq!(parse_non_negative(" 0 "), Some(0.));
        assert_eq!(parse_non_negative(""), Some(0.));
        assert_eq!(parse_non_negative("-1"), None);
        assert_eq!(parse_non_negative("12abc"), None);
        assert_eq!(parse_non_negative("inf"), None);
        assert_eq!(parse_non_negative("NaN"), None);
    }
}
