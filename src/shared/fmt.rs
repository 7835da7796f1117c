//! Formatting utilities for human-readable journal reports.
//!
//! Memecoin prices routinely sit many zeros after the decimal point, so prices
//! below `0.00001` use subscript notation: `0.0000001` renders as `0.0(6)1`.

use rust_decimal::prelude::*;

enum PriceFormat {
    Standard(u32),
    Subscript { zeros: u32, significant: String },
}

#[inline]
fn count_digits_u128(n: u128) -> u32 {
    if n == 0 {
        return 1;
    }
    n.ilog10() + 1
}

fn price_format(value: &Decimal) -> PriceFormat {
    if value.is_zero() {
        return PriceFormat::Standard(2);
    }

    let abs_value = value.abs().normalize();

    if abs_value >= Decimal::ONE_HUNDRED {
        return PriceFormat::Standard(0);
    }

    if abs_value >= Decimal::ONE {
        return PriceFormat::Standard(2);
    }

    let mantissa = abs_value.mantissa().unsigned_abs();
    let mantissa_digits = count_digits_u128(mantissa);
    let leading_zeros = abs_value.scale().saturating_sub(mantissa_digits);

    if leading_zeros > 5 {
        let sig_digits = mantissa_digits.min(4);
        let mut sig = mantissa / 10u128.pow(mantissa_digits - sig_digits);
        while sig > 0 && sig % 10 == 0 {
            sig /= 10;
        }
        PriceFormat::Subscript {
            zeros: leading_zeros,
            significant: sig.to_string(),
        }
    } else {
        PriceFormat::Standard((leading_zeros + 3).min(8))
    }
}

/// Trims trailing zeros, adds thousands separators.
fn group_thousands(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    };

    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format a price for display, using subscript notation for very small values.
pub fn display_price(value: &Decimal) -> String {
    match price_format(value) {
        PriceFormat::Standard(decimals) => group_thousands(value.round_dp(decimals).to_string()),
        PriceFormat::Subscript { zeros, significant } => {
            let sign = if value.is_sign_negative() { "-" } else { "" };
            format!("{}0.0({}){}", sign, zeros, significant)
        }
    }
}

/// Signed percentage with two decimals, e.g. `+50.00%`.
pub fn display_percent(value: &Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_positive() && !rounded.is_zero() {
        "+"
    } else {
        ""
    };
    format!("{}{:.2}%", sign, rounded)
}

/// Abbreviate an amount with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: usize) -> String {
    const STEPS: [(i64, &str); 4] = [
        (1_000_000_000_000, "T"),
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    for (step, suffix) in STEPS {
        let step = Decimal::from(step);
        if abs_amount >= step {
            return format!(
                "{}{:.precision$}{}",
                sign,
                (abs_amount / step).round_dp_with_strategy(
                    digits as u32,
                    RoundingStrategy::ToZero
                ),
                suffix,
                precision = digits
            );
        }
    }
    format!("{}{:.precision$}", sign, abs_amount, precision = digits)
}
