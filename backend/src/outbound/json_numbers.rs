//! Numeric normalisation shared by the store adapters.
//!
//! Stored documents hold signed 64-bit integers at most. Unsigned values past
//! `i64::MAX` are kept as doubles instead of being refused.

use serde_json::{Number, Value};

/// Replace unsigned integers wider than `i64` with their `f64` value.
pub(crate) fn widen_unsigned(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(widen_number(number)),
        Value::Array(items) => Value::Array(items.into_iter().map(widen_unsigned).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, widen_unsigned(value)))
                .collect(),
        ),
        other => other,
    }
}

fn widen_number(number: Number) -> Number {
    match number.as_u64() {
        Some(wide) if number.as_i64().is_none() => {
            #[expect(clippy::cast_precision_loss, reason = "stored as a double")]
            let float = wide as f64;
            Number::from_f64(float).unwrap_or(number)
        }
        _ => number,
    }
}
