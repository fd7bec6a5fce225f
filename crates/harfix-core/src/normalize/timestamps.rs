use chrono::{DateTime, Datelike, Local, TimeZone};
use serde_json::Value;

/// Rewrite numeric `startedDateTime` values as ISO-8601-like text.
///
/// Some Firefox builds emit the field as a raw epoch number. The value is
/// tried as milliseconds first, then as seconds; if neither lands on a
/// representable date the supplied wall-clock instant is used. Textual or
/// absent values pass through untouched. Returns the rewrite count.
pub(crate) fn normalize_timestamps(document: &mut Value, now: DateTime<Local>) -> usize {
    let Some(entries) = document
        .pointer_mut("/log/entries")
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let mut rewritten = 0;
    for entry in entries {
        let Some(started) = entry.get_mut("startedDateTime") else {
            continue;
        };
        if let Value::Number(number) = started
            && let Some(epoch) = number.as_f64()
        {
            *started = Value::String(epoch_to_iso(epoch, now));
            rewritten += 1;
        }
    }
    rewritten
}

fn epoch_to_iso(epoch: f64, now: DateTime<Local>) -> String {
    let datetime = from_epoch_millis(epoch)
        .or_else(|| from_epoch_millis(epoch * 1000.0))
        .unwrap_or(now);
    format_local(datetime)
}

/// Interpret `millis` as milliseconds since the Unix epoch, in local time.
/// Values landing outside years 1-9999 are treated as unrepresentable.
fn from_epoch_millis(millis: f64) -> Option<DateTime<Local>> {
    if !millis.is_finite() {
        return None;
    }
    let micros = millis * 1000.0;
    if micros <= i64::MIN as f64 || micros >= i64::MAX as f64 {
        return None;
    }
    let micros = micros as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    let datetime = Local.timestamp_opt(secs, nanos).single()?;
    (1..=9999).contains(&datetime.year()).then_some(datetime)
}

/// Extended ISO-8601 local time with a literal `Z` appended. The suffix is
/// a compatibility marker only; no timezone conversion is performed.
fn format_local(datetime: DateTime<Local>) -> String {
    format!("{}Z", datetime.naive_local().format("%Y-%m-%dT%H:%M:%S%.f"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn fixed_now() -> DateTime<Local> {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 30, 45)
            .unwrap()
            .and_local_timezone(Local)
            .single()
            .unwrap()
    }

    #[test]
    fn test_numeric_timestamp_becomes_text() {
        let mut value = json!({"log": {"entries": [{"startedDateTime": 1700000000000_i64}]}});

        let rewritten = normalize_timestamps(&mut value, fixed_now());

        assert_eq!(rewritten, 1);
        let started = value["log"]["entries"][0]["startedDateTime"]
            .as_str()
            .expect("startedDateTime should be a string");
        // 2023-11-14T22:13:20 UTC; local renderings stay within a day of it.
        assert!(started.starts_with("2023-11-1"), "got: {started}");
        assert!(started.ends_with('Z'));
    }

    #[test]
    fn test_fractional_milliseconds_survive() {
        let mut value = json!({"log": {"entries": [{"startedDateTime": 1700000000123.5}]}});

        normalize_timestamps(&mut value, fixed_now());

        let started = value["log"]["entries"][0]["startedDateTime"].as_str().unwrap();
        assert!(started.contains('.'), "got: {started}");
    }

    #[test]
    fn test_textual_timestamp_untouched() {
        let original = "2023-05-17T11:23:41.926-07:00";
        let mut value = json!({"log": {"entries": [{"startedDateTime": original}]}});

        let rewritten = normalize_timestamps(&mut value, fixed_now());

        assert_eq!(rewritten, 0);
        assert_eq!(value["log"]["entries"][0]["startedDateTime"], original);
    }

    #[test]
    fn test_absent_timestamp_untouched() {
        let mut value = json!({"log": {"entries": [{}]}});

        let rewritten = normalize_timestamps(&mut value, fixed_now());

        assert_eq!(rewritten, 0);
        assert!(value["log"]["entries"][0].get("startedDateTime").is_none());
    }

    #[test]
    fn test_unrepresentable_epoch_falls_back_to_now() {
        let mut value = json!({"log": {"entries": [{"startedDateTime": 1e300}]}});

        normalize_timestamps(&mut value, fixed_now());

        let started = value["log"]["entries"][0]["startedDateTime"].as_str().unwrap();
        assert_eq!(started, "2024-03-01T12:30:45Z");
    }

    #[test]
    fn test_millis_interpretation_rejects_year_beyond_9999() {
        // ~year 14600 as milliseconds
        assert!(from_epoch_millis(4.0e14).is_none());
        // a plausible capture date is accepted
        assert!(from_epoch_millis(1.7e12).is_some());
    }

    #[test]
    fn test_whole_seconds_format_has_no_fraction() {
        let formatted = format_local(fixed_now());
        assert_eq!(formatted, "2024-03-01T12:30:45Z");
    }
}
