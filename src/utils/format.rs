//! Text formatting shared by the GUI table and the terminal snapshot.

use crate::domain::ChangeDirection;

const MAX_FRACTION_DIGITS: usize = 3;

/// en-US number formatting: comma thousands separators, at most three
/// fraction digits, trailing zeros dropped (`65000` -> `65,000`,
/// `0.123456` -> `0.123`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Monetary table cell: `$` followed by [`format_number`].
pub fn format_usd(value: f64) -> String {
    format!("${}", format_number(value))
}

/// Percentage cell text and its color class. Exactly two decimals plus `%`.
pub fn format_change(pct: f64) -> (String, ChangeDirection) {
    // -0.0 prints as "0.00" (a real small negative still prints "-0.00")
    let pct = if pct == 0.0 { 0.0 } else { pct };
    (format!("{:.2}%", pct), ChangeDirection::of(pct))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
