use super::NormalizeReport;
use crate::{Error, Result};
use serde_json::{Map, Value, json};

/// The seven per-entry timing phases the Chrome importer requires.
pub const TIMING_FIELDS: [&str; 7] =
    ["blocked", "dns", "connect", "ssl", "send", "wait", "receive"];

/// Ensure the minimal structural skeleton exists: `log` with `creator` and
/// `entries`, and per entry `request`, `response`, and a complete `timings`
/// object with no null or negative phases.
///
/// A field that is present but `null` is treated like a missing field. A
/// node that must be an object or array but holds some other value is a
/// structural fault and fails the whole conversion.
pub(crate) fn complete_structure(document: &mut Value, report: &mut NormalizeReport) -> Result<()> {
    let root = document
        .as_object_mut()
        .ok_or_else(|| Error::Transform("document root is not an object".to_string()))?;

    if missing(root.get("log")) {
        root.insert("log".to_string(), Value::Object(Map::new()));
        report.fields_defaulted += 1;
    }
    let log = root
        .get_mut("log")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::Transform("\"log\" is not an object".to_string()))?;

    if missing(log.get("creator")) {
        log.insert("creator".to_string(), default_creator());
        report.fields_defaulted += 1;
    }

    if missing(log.get("entries")) {
        log.insert("entries".to_string(), Value::Array(Vec::new()));
        report.fields_defaulted += 1;
    }
    let entries = log
        .get_mut("entries")
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::Transform("\"log.entries\" is not an array".to_string()))?;

    for (index, entry) in entries.iter_mut().enumerate() {
        let entry = entry
            .as_object_mut()
            .ok_or_else(|| Error::Transform(format!("entry {index} is not an object")))?;
        complete_entry(entry, index, report)?;
    }

    Ok(())
}

fn complete_entry(
    entry: &mut Map<String, Value>,
    index: usize,
    report: &mut NormalizeReport,
) -> Result<()> {
    for field in ["request", "response"] {
        if missing(entry.get(field)) {
            entry.insert(field.to_string(), Value::Object(Map::new()));
            report.fields_defaulted += 1;
        }
    }

    if missing(entry.get("timings")) {
        let mut timings = Map::new();
        for field in TIMING_FIELDS {
            timings.insert(field.to_string(), Value::from(0));
        }
        entry.insert("timings".to_string(), Value::Object(timings));
        report.fields_defaulted += 1;
    }
    let timings = entry
        .get_mut("timings")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| Error::Transform(format!("entry {index} \"timings\" is not an object")))?;

    // Canonical keys are filled before the sanitize scan below, so a
    // freshly defaulted 0 is in range and passes through it.
    for field in TIMING_FIELDS {
        if !timings.contains_key(field) {
            timings.insert(field.to_string(), Value::from(0));
            report.fields_defaulted += 1;
        }
    }

    // The scan covers every key present, canonical or not. Firefox uses -1
    // for "phase did not apply"; the Chrome importer chokes on it.
    for (_, value) in timings.iter_mut() {
        let reset = match value {
            Value::Null => true,
            Value::Number(number) => number.as_f64().is_some_and(|phase| phase < 0.0),
            _ => false,
        };
        if reset {
            *value = Value::from(0);
            report.timings_sanitized += 1;
        }
    }

    Ok(())
}

fn default_creator() -> Value {
    json!({
        "name": "Firefox",
        "version": "unknown",
        "comment": "Converted by Firefox HAR Converter"
    })
}

fn missing(value: Option<&Value>) -> bool {
    matches!(value, None | Some(Value::Null))
}
