//! Raw text <-> typed value conversion.
//!
//! `parse_value` never fails: text that does not match the declared kind is
//! kept as [`SingleValue::Unknown`]. `format_value` returns the exact raw
//! text, so `parse_value(format_value(v), v.kind()) == v` for every value
//! that is not `Unknown`.

use std::borrow::Cow;

use crate::model::{Color, Double, SingleValue, ValueKind};

/// Parses unescaped raw text as a value of `kind`.
pub fn parse_value(raw: &str, kind: ValueKind) -> SingleValue {
    let parsed = match kind {
        ValueKind::None => raw.is_empty().then_some(SingleValue::None),
        ValueKind::Number => parse_number(raw).map(|value| SingleValue::Number {
            raw: raw.to_string(),
            value,
        }),
        ValueKind::Real => parse_real(raw).map(|value| SingleValue::Real {
            raw: raw.to_string(),
            value,
        }),
        ValueKind::Double => Double::from_str_token(raw).map(SingleValue::Double),
        ValueKind::Color => Color::from_str_token(raw).map(SingleValue::Color),
        ValueKind::SimpleText => Some(SingleValue::SimpleText(raw.to_string())),
        ValueKind::Text => Some(SingleValue::Text(raw.to_string())),
        ValueKind::Point => Some(SingleValue::Point(raw.to_string())),
        ValueKind::Move => Some(SingleValue::Move(raw.to_string())),
        ValueKind::Stone => Some(SingleValue::Stone(raw.to_string())),
        ValueKind::Unknown => None,
    };
    parsed.unwrap_or_else(|| SingleValue::Unknown(raw.to_string()))
}

/// Returns the raw (unescaped) text of a value.
pub fn format_value(value: &SingleValue) -> Cow<'_, str> {
    match value {
        SingleValue::None => Cow::Borrowed(""),
        SingleValue::Number { raw, .. } | SingleValue::Real { raw, .. } => Cow::Borrowed(raw),
        SingleValue::Double(d) => Cow::Borrowed(d.as_str()),
        SingleValue::Color(c) => Cow::Borrowed(c.as_str()),
        SingleValue::SimpleText(s)
        | SingleValue::Text(s)
        | SingleValue::Point(s)
        | SingleValue::Move(s)
        | SingleValue::Stone(s)
        | SingleValue::Unknown(s) => Cow::Borrowed(s),
    }
}

/// Splits an optional leading sign off `s`.
fn strip_sign(s: &str) -> &str {
    s.strip_prefix(['+', '-']).unwrap_or(s)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `[+-]?[0-9]+`, within `i64` range.
fn parse_number(raw: &str) -> Option<i64> {
    if !all_digits(strip_sign(raw)) {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// `[+-]?digits[.digits][(e|E)[+-]digits]` or `[+-]?.digits[...]`.
///
/// Rust's float parser also accepts `inf`, `nan` and `1.`; the grammar check
/// rules those out first.
fn parse_real(raw: &str) -> Option<f64> {
    let body = strip_sign(raw);
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(i) => (&body[..i], Some(&body[i + 1..])),
        None => (body, None),
    };
    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => (int.is_empty() || all_digits(int)) && all_digits(frac),
        None => all_digits(mantissa),
    };
    let exponent_ok = exponent.is_none_or(|e| all_digits(strip_sign(e)));
    if !mantissa_ok || !exponent_ok {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
