use serde_json::Value;

/// Fill in missing or empty `response.content.mimeType` fields.
///
/// Firefox omits the MIME type for some responses (aborted loads, cached
/// images); the Chrome importer expects it to be present and non-empty.
/// Only an absent key or the empty string is defaulted; any other value,
/// including non-textual ones, is left alone. Returns the fill count.
pub(crate) fn default_mime_types(document: &mut Value) -> usize {
    let Some(entries) = document
        .pointer_mut("/log/entries")
        .and_then(Value::as_array_mut)
    else {
        return 0;
    };

    let mut defaulted = 0;
    for entry in entries {
        let Some(content) = entry
            .pointer_mut("/response/content")
            .and_then(Value::as_object_mut)
        else {
            continue;
        };

        let needs_default = match content.get("mimeType") {
            None => true,
            Some(Value::String(text)) => text.is_empty(),
            Some(_) => false,
        };
        if needs_default {
            content.insert(
                "mimeType".to_string(),
                Value::String(mime::APPLICATION_OCTET_STREAM.to_string()),
            );
            defaulted += 1;
        }
    }
    defaulted
}
