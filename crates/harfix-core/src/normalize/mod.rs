mod mime_types;
mod numbers;
mod structure;
mod timestamps;

pub use structure::TIMING_FIELDS;

use crate::Result;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

/// Counts of the repairs applied by each normalization pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    /// String-typed numeric fields rewritten as numbers.
    pub numbers_coerced: usize,
    /// Missing structural fields filled with defaults.
    pub fields_defaulted: usize,
    /// Null or negative timing phases reset to zero.
    pub timings_sanitized: usize,
    /// Numeric `startedDateTime` values rewritten as text.
    pub timestamps_rewritten: usize,
    /// Missing or empty response MIME types filled in.
    pub mime_types_defaulted: usize,
}

impl NormalizeReport {
    /// Total number of repairs across all passes.
    pub fn total(&self) -> usize {
        self.numbers_coerced
            + self.fields_defaulted
            + self.timings_sanitized
            + self.timestamps_rewritten
            + self.mime_types_defaulted
    }

    /// True when the document needed no repairs at all.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

/// Normalize a parsed HAR document for Chrome-convention consumers.
///
/// Four passes run in a fixed order: numeric coercion, structural
/// completion, timestamp normalization, MIME type defaulting. The document
/// is taken by value; on a structural fault it is dropped, so a half-fixed
/// tree never reaches the caller.
pub fn normalize(document: Value) -> Result<(Value, NormalizeReport)> {
    normalize_at(document, Local::now())
}

/// Like [`normalize`], with an explicit wall-clock instant for the
/// timestamp fallback path.
pub fn normalize_at(
    mut document: Value,
    now: DateTime<Local>,
) -> Result<(Value, NormalizeReport)> {
    let mut report = NormalizeReport::default();

    report.numbers_coerced = numbers::coerce_numeric_strings(&mut document);
    structure::complete_structure(&mut document, &mut report)?;
    report.timestamps_rewritten = timestamps::normalize_timestamps(&mut document, now);
    report.mime_types_defaulted = mime_types::default_mime_types(&mut document);

    tracing::debug!("Normalization applied {} repairs", report.total());

    Ok((document, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    #[test]
    fn test_string_timings_coerced_then_sanitized() {
        // Coercion turns "-1" into -1 first; the structural pass then
        // resets the negative phase and fills the missing ones.
        let document = json!({
            "log": {"entries": [{"timings": {"blocked": "12.5", "dns": "-1"}}]}
        });

        let (fixed, report) = normalize(document).unwrap();

        let timings = &fixed["log"]["entries"][0]["timings"];
        assert_eq!(timings["blocked"].as_f64(), Some(12.5));
        assert_eq!(timings["dns"], json!(0));
        for field in ["connect", "ssl", "send", "wait", "receive"] {
            assert_eq!(timings[field], json!(0));
        }
        assert_eq!(report.numbers_coerced, 2);
        assert_eq!(report.timings_sanitized, 1);
    }

    #[test]
    fn test_missing_log_yields_default_skeleton() {
        let (fixed, _) = normalize(json!({})).unwrap();

        assert_eq!(fixed["log"]["creator"]["name"], "Firefox");
        assert_eq!(fixed["log"]["entries"], json!([]));
    }

    #[test]
    fn test_numeric_timestamp_rewritten_after_structure_pass() {
        let document = json!({
            "log": {"entries": [{"startedDateTime": 1700000000000_i64}]}
        });

        let (fixed, report) = normalize(document).unwrap();

        let started = fixed["log"]["entries"][0]["startedDateTime"].as_str().unwrap();
        assert!(started.ends_with('Z'));
        assert_eq!(report.timestamps_rewritten, 1);
    }

    #[test]
    fn test_empty_mime_type_defaulted() {
        let document = json!({
            "log": {"entries": [{"response": {"content": {"mimeType": ""}}}]}
        });

        let (fixed, report) = normalize(document).unwrap();

        assert_eq!(
            fixed["log"]["entries"][0]["response"]["content"]["mimeType"],
            "application/octet-stream"
        );
        assert_eq!(report.mime_types_defaulted, 1);
    }

    #[test]
    fn test_clean_document_untouched() {
        let document = json!({
            "log": {
                "version": "1.2",
                "creator": {"name": "Firefox", "version": "115.0"},
                "entries": [{
                    "startedDateTime": "2023-05-17T11:23:41.926-07:00",
                    "time": 112.25,
                    "request": {"method": "GET", "url": "https://example.com/"},
                    "response": {"status": 200, "content": {"size": 10, "mimeType": "text/html"}},
                    "timings": {"blocked": 0, "dns": 0, "connect": 0, "ssl": 0,
                                "send": 0, "wait": 100, "receive": 12.25}
                }]
            }
        });

        let (fixed, report) = normalize(document.clone()).unwrap();

        assert!(report.is_clean());
        assert_eq!(fixed, document);
    }

    #[test]
    fn test_structural_fault_reports_transform_error() {
        let result = normalize(json!({"log": {"entries": 5}}));

        let error = result.unwrap_err();
        assert!(matches!(error, Error::Transform(_)));
        assert!(error.to_string().starts_with("Error fixing HAR file:"));
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let document = json!({
            "log": {"entries": [{
                "startedDateTime": 1700000000000_i64,
                "time": "45",
                "timings": {"send": "1", "wait": -1},
                "response": {"content": {}}
            }]}
        });

        let (once, _) = normalize(document).unwrap();
        let (twice, report) = normalize(once.clone()).unwrap();

        assert!(report.is_clean());
        assert_eq!(twice, once);
    }

    #[test]
    fn test_report_totals() {
        let report = NormalizeReport {
            numbers_coerced: 2,
            fields_defaulted: 3,
            timings_sanitized: 1,
            timestamps_rewritten: 1,
            mime_types_defaulted: 1,
        };

        assert_eq!(report.total(), 8);
        assert!(!report.is_clean());
        assert!(NormalizeReport::default().is_clean());
    }
}
