use crate::{Error, Result};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct HarReader;

impl HarReader {
    /// Read and parse a HAR document from the given path.
    ///
    /// The document is kept as an untyped JSON tree: the captures this tool
    /// repairs do not reliably deserialize into a typed HAR model.
    pub fn from_file(path: &Path) -> Result<Value> {
        Self::check_extension(path)?;

        tracing::debug!("Reading HAR file from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let document: Value = serde_json::from_reader(reader)?;

        tracing::info!(
            "Successfully parsed HAR file with {} entries",
            entry_count(&document)
        );

        Ok(document)
    }

    /// Parse a HAR document from a JSON string.
    pub fn from_str(content: &str) -> Result<Value> {
        tracing::debug!("Parsing HAR from string");

        let document: Value = serde_json::from_str(content)?;

        Ok(document)
    }

    /// Reject anything that is not named like a HAR capture, before any
    /// bytes are read.
    pub fn check_extension(path: &Path) -> Result<()> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("har") => Ok(()),
            _ => Err(Error::UnsupportedFile(path.display().to_string())),
        }
    }
}

fn entry_count(document: &Value) -> usize {
    document
        .pointer("/log/entries")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
