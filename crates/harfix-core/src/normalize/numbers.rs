use lazy_static::lazy_static;
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

lazy_static! {
    /// Fields that must hold numbers in a Chrome-compatible capture.
    ///
    /// Matching is by bare key name at any depth, exactly as the field
    /// appears in the document; nesting context is not considered.
    static ref NUMERIC_FIELDS: HashSet<&'static str> = [
        "time",
        "timings",
        "bodySize",
        "headersSize",
        "connect",
        "wait",
        "receive",
        "send",
        "ssl",
        "blocked",
        "dns",
        "compression",
        "size",
    ]
    .into_iter()
    .collect();
}

/// Rewrite string-typed numeric fields as numbers, recursively.
///
/// Firefox serializes several timing and size fields as strings, which the
/// Chrome importer rejects. Returns the number of fields rewritten.
pub(crate) fn coerce_numeric_strings(value: &mut Value) -> usize {
    match value {
        Value::Object(map) => coerce_object(map),
        Value::Array(items) => items.iter_mut().map(coerce_numeric_strings).sum(),
        _ => 0,
    }
}

fn coerce_object(map: &mut Map<String, Value>) -> usize {
    let mut coerced = 0;
    for (key, value) in map.iter_mut() {
        match value {
            Value::String(text) if NUMERIC_FIELDS.contains(key.as_str()) => {
                *value = parse_lenient(text);
                coerced += 1;
            }
            Value::Object(_) | Value::Array(_) => coerced += coerce_numeric_strings(value),
            _ => {}
        }
    }
    coerced
}

/// Parse a numeric string leniently: whitespace is trimmed, the empty
/// string and anything unparseable collapse to `0`. Never an error.
fn parse_lenient(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::from(0);
    }
    match trimmed.parse::<f64>() {
        // `from_f64` refuses non-finite values, which JSON cannot hold.
        Ok(parsed) => Number::from_f64(parsed).map_or_else(|| Value::from(0), Value::Number),
        Err(_) => Value::from(0),
    }
}
