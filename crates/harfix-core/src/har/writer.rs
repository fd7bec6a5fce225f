use crate::Result;
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub struct HarWriter;

impl HarWriter {
    /// Write a HAR document to a file as pretty JSON (2-space indentation).
    pub fn to_file(document: &Value, path: &Path) -> Result<()> {
        tracing::debug!("Writing HAR file to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, document)?;

        tracing::info!("Successfully wrote HAR file to {}", path.display());

        Ok(())
    }

    /// Serialize a HAR document to a pretty JSON string.
    pub fn to_string(document: &Value) -> Result<String> {
        let json = serde_json::to_string_pretty(document)?;

        Ok(json)
    }

    /// Derive the output path for a converted capture: the input filename
    /// with its extension stripped and `_chrome_compatible.har` appended.
    pub fn chrome_compatible_path(input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("capture");
        input.with_file_name(format!("{stem}_chrome_compatible.har"))
    }
}
