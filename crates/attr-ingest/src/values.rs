//! Polars `AnyValue` conversion helpers.
//!
//! The pipeline reads every CSV column as text and interprets cells lazily;
//! these helpers are the single place where an `AnyValue` turns into a
//! string or a number.

use polars::prelude::*;

/// Converts an `AnyValue` to its string representation. Null becomes the
/// empty string; floats are formatted without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to a trimmed string, treating null and blank as
/// absent.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Converts an `AnyValue` to f64. Strings are parsed; anything unparseable
/// or null yields `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as f64, returning `None` for blank or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Formats a float without unnecessary trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_parse_as_numbers() {
        assert_eq!(any_to_f64(AnyValue::String(" 42 ")), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String("4.5")), Some(4.5));
        assert_eq!(any_to_f64(AnyValue::String("abc")), None);
        assert_eq!(any_to_f64(AnyValue::String("")), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(any_to_string_non_empty(AnyValue::String("  ")), None);
        assert_eq!(any_to_string_non_empty(AnyValue::Null), None);
        assert_eq!(
            any_to_string_non_empty(AnyValue::String(" PAID ")),
            Some("PAID".to_string())
        );
    }

    #[test]
    fn numeric_formatting_strips_trailing_zeros() {
        assert_eq!(format_numeric(15.0), "15");
        assert_eq!(format_numeric(15.50), "15.5");
        assert_eq!(any_to_string(AnyValue::Float64(102.0)), "102");
    }
}
