//! Scalar type coercion
//!
//! Coercion failures are silent data-quality issues, not errors: a value
//! that does not fit its target type becomes null, and every warehouse
//! column is nullable.

use crate::schema::FieldType;
use crate::types::JsonValue;
use serde_json::{Number, Value};

/// Render a source-database identifier as its canonical string form
///
/// Identifiers arrive in extended-JSON shape, `{"$oid": "..."}`. Returns
/// None for any other value.
pub fn object_id_as_string(value: &JsonValue) -> Option<String> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    obj.get("$oid").and_then(Value::as_str).map(String::from)
}

/// Coerce a scalar value to a target type tag
///
/// Null input is null output for every tag. Conversion failure is null,
/// never an error.
pub fn coerce(value: &JsonValue, field_type: FieldType) -> JsonValue {
    if value.is_null() {
        return Value::Null;
    }

    match field_type {
        FieldType::String => coerce_string(value),
        FieldType::Integer => coerce_integer(value),
        FieldType::Boolean => coerce_boolean(value),
        FieldType::Float => coerce_float(value),
        FieldType::Passthrough => value.clone(),
    }
}

fn coerce_string(value: &JsonValue) -> JsonValue {
    match value {
        Value::String(s) => Value::String(s.clone()),
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        // Structured values have no scalar string form
        _ => Value::Null,
    }
}

fn coerce_integer(value: &JsonValue) -> JsonValue {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::from(i))
            } else if let Some(f) = n.as_f64() {
                // Fractional numerics truncate toward zero
                let t = f.trunc();
                if t >= i64::MIN as f64 && t <= i64::MAX as f64 {
                    Value::Number(Number::from(t as i64))
                } else {
                    Value::Null
                }
            } else {
                Value::Null
            }
        }
        // Integer-shaped text converts; "2.7" and non-numeric text do not
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(i) => Value::Number(Number::from(i)),
            Err(_) => Value::Null,
        },
        Value::Bool(b) => Value::Number(Number::from(i64::from(*b))),
        _ => Value::Null,
    }
}

fn coerce_boolean(value: &JsonValue) -> JsonValue {
    match value {
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) => Value::Bool(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Null,
        },
        _ => Value::Null,
    }
}

fn coerce_float(value: &JsonValue) -> JsonValue {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    };

    match parsed.and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::Null,
    }
}
