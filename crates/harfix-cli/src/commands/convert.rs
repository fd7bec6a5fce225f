use anyhow::Result;
use console::style;
use harfix_core::har::{HarReader, HarWriter};
use harfix_core::normalize;
use std::path::{Path, PathBuf};

pub fn execute(file: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::debug!("Converting HAR file: {}", file.display());

    // Read HAR file (rejects non-.har filenames before parsing)
    let document = HarReader::from_file(file)?;

    // Apply the normalization pipeline
    let (fixed, report) = normalize::normalize(document)?;

    // Write output (derived filename unless overridden)
    let output_path = output.unwrap_or_else(|| HarWriter::chrome_compatible_path(file));
    HarWriter::to_file(&fixed, &output_path)?;

    println!(
        "✅ File successfully fixed: {}",
        style(output_path.display()).green()
    );
    if report.is_clean() {
        println!("   No repairs were needed");
    } else {
        println!("   {} repairs applied", report.total());
    }

    Ok(())
}
