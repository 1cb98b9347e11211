//! Number formatting for table cells and detail fields.
//!
//! Kept in the core so every front-end shows identical text.

/// Direction of a 24h price change, for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ChangeTrend {
    Up,
    Down,
    Unknown,
}

impl ChangeTrend {
    pub fn of(change: Option<f64>) -> Self {
        match change {
            Some(v) if v.is_nan() => ChangeTrend::Unknown,
            Some(v) if v >= 0.0 => ChangeTrend::Up,
            Some(_) => ChangeTrend::Down,
            None => ChangeTrend::Unknown,
        }
    }
}

/// Placeholder for absent or non-finite numbers.
pub const NOT_AVAILABLE: &str = "N/A";

/// Insert `,` every three digits of an unsigned integer string.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Fixed decimals with grouped integer part, e.g. `-1,234.50`.
fn fixed_grouped(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    let sign = if value.is_sign_negative() && !is_zero { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}{}.{f}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

/// Most decimals a sub-unit price is ever rendered with.
const MAX_PRICE_DECIMALS: usize = 20;

/// Number part of a price: 2 decimals from 1 upwards. Below 1, up to 8
/// significant digits (trailing zeros trimmed, at least 2 decimals kept,
/// never more than 20 decimals).
pub fn format_price_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    if value == 0.0 || value.abs() >= 1.0 {
        return fixed_grouped(value, 2);
    }
    // Zeros between the decimal point and the first significant digit.
    let leading_zeros = (-value.abs().log10()).ceil().max(1.0) as usize - 1;
    let decimals = (leading_zeros + 8).min(MAX_PRICE_DECIMALS);
    let mut text = fixed_grouped(value, decimals);
    while text.ends_with('0') && text.split_once('.').is_some_and(|(_, f)| f.len() > 2) {
        text.pop();
    }
    text
}

/// Price with currency: `$1,234.56` for USD, `1,234.56 EUR` otherwise.
pub fn format_price(value: f64, currency: &str) -> String {
    let number = format_price_number(value);
    if !value.is_finite() {
        return number;
    }
    if currency.eq_ignore_ascii_case("usd") {
        match number.strip_prefix('-') {
            Some(rest) => format!("-${rest}"),
            None => format!("${number}"),
        }
    } else {
        format!("{number} {}", currency.to_uppercase())
    }
}

/// Optional price; absent renders as "N/A".
pub fn format_optional_price(value: Option<f64>, currency: &str) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format_price(v, currency))
}

/// Whole-number quantity (market cap, supply), grouped, no decimals.
pub fn format_amount(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => fixed_grouped(v, 0),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// 24h change with two decimals and a percent sign, or "N/A".
pub fn format_change(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}%"),
        _ => NOT_AVAILABLE.to_string(),
    }
}
