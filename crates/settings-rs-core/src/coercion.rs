//! Permissive scalar coercion for typed reads.
//!
//! Coercion never fails: values that cannot be represented in the requested
//! kind fall back to the kind's zero value.

use crate::value::Value;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Target representation for [`coerce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    String,
    /// Any unrecognised kind name; the value passes through unchanged.
    Raw,
}

impl FromStr for ValueKind {
    type Err = Infallible;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => ValueKind::Int,
            "float" | "double" => ValueKind::Float,
            "bool" | "boolean" => ValueKind::Bool,
            "string" => ValueKind::String,
            _ => ValueKind::Raw,
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::String => "string",
            ValueKind::Raw => "raw",
        };
        f.write_str(name)
    }
}

/// Convert `value` to `kind`.
pub fn coerce(value: Value, kind: ValueKind) -> Value {
    match kind {
        ValueKind::Int => Value::Integer(to_int(&value)),
        ValueKind::Float => Value::Float(to_float(&value)),
        ValueKind::Bool => Value::Bool(to_bool(&value)),
        ValueKind::String => match value {
            Value::String(text) => Value::String(text),
            other => Value::String(to_string(&other)),
        },
        ValueKind::Raw => value,
    }
}

fn to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(flag) => i64::from(*flag),
        Value::Integer(number) => *number,
        Value::Float(number) => truncate(*number),
        Value::String(text) => parse_int_prefix(text),
        Value::List(items) => i64::from(!items.is_empty()),
        Value::Map(map) => i64::from(!map.is_empty()),
    }
}

fn to_float(value: &Value) -> f64 {
    match value {
        Value::Float(number) => *number,
        Value::Integer(number) => *number as f64,
        Value::String(text) => numeric_prefix(text)
            .and_then(|prefix| prefix.parse::<f64>().ok())
            .unwrap_or(0.0),
        other => to_int(other) as f64,
    }
}

fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Integer(number) => *number != 0,
        Value::Float(number) => *number != 0.0,
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::List(items) => !items.is_empty(),
        Value::Map(map) => !map.is_empty(),
    }
}

fn to_string(value: &Value) -> String {
    match value {
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

/// Truncate toward zero, saturating at the `i64` bounds. NaN maps to zero.
fn truncate(number: f64) -> i64 {
    if number.is_nan() {
        0
    } else {
        // `as` saturates for out-of-range floats.
        number.trunc() as i64
    }
}

fn parse_int_prefix(text: &str) -> i64 {
    let Some(prefix) = numeric_prefix(text) else {
        return 0;
    };
    if prefix.contains(['.', 'e', 'E']) {
        return prefix.parse::<f64>().map(truncate).unwrap_or(0);
    }
    prefix.parse::<i64>().unwrap_or_else(|_| {
        if prefix.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}

/// Longest leading slice of `text` (after whitespace) that reads as a decimal
/// number: sign, digits, optional fraction, optional exponent.
fn numeric_prefix(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if frac_end > frac_start || digits > 0 {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    Some(&text[..end])
}
