//! Vietnamese đồng formatting for tables and exports.
//!
//! Mirrors the storefront's `vi-VN` currency rendering: whole đồng, `.` as
//! the thousands separator, ` ₫` suffix (e.g. `150.000 ₫`). Invalid input
//! never fails; it formats as zero so a broken backend value degrades to
//! `0 ₫` in a cell rather than aborting the whole export.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as VND text, rounding to whole đồng.
#[must_use]
pub fn format_vnd(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let digits = rounded.abs().to_string();
    let grouped = group_thousands(&digits);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Formats an `f64` amount, treating NaN and infinities as zero.
#[must_use]
pub fn format_vnd_f64(amount: f64) -> String {
    let value = if amount.is_finite() {
        Decimal::from_f64_retain(amount).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    format_vnd(value)
}

/// Parses and formats free-form text, falling back to zero when the text is
/// not a number.
#[must_use]
pub fn format_vnd_lossy(input: &str) -> String {
    let trimmed = input.trim();
    let parsed = Decimal::from_str(trimmed)
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .and_then(Decimal::from_f64_retain)
        })
        .unwrap_or(Decimal::ZERO);
    format_vnd(parsed)
}

fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(*b as char);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_dot_separators_and_dong_sign() {
        assert_eq!(format_vnd(Decimal::from(150_000)), "150.000 ₫");
        assert_eq!(format_vnd(Decimal::from(15_000)), "15.000 ₫");
        assert_eq!(format_vnd(Decimal::from(1_234_567)), "1.234.567 ₫");
        assert_eq!(format_vnd(Decimal::from(999)), "999 ₫");
        assert_eq!(format_vnd(Decimal::ZERO), "0 ₫");
    }

    #[test]
    fn rounds_to_whole_dong() {
        assert_eq!(format_vnd(Decimal::new(1_999_995, 1)), "200.000 ₫");
        assert_eq!(format_vnd(Decimal::new(1_999_4, 1)), "1.999 ₫");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_vnd(Decimal::from(-25_000)), "-25.000 ₫");
    }

    #[test]
    fn invalid_text_formats_as_zero() {
        let zero = format_vnd(Decimal::ZERO);
        assert_eq!(format_vnd_lossy("abc"), zero);
        assert_eq!(format_vnd_lossy(""), zero);
        assert_eq!(format_vnd_lossy("NaN"), zero);
        assert_eq!(format_vnd_f64(f64::NAN), zero);
        assert_eq!(format_vnd_f64(f64::INFINITY), zero);
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(format_vnd_lossy("150000"), "150.000 ₫");
        assert_eq!(format_vnd_lossy("  120000.50 "), "120.001 ₫");
    }
}
