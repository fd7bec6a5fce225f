use anyhow::Result;
use console::style;
use harfix_core::har::HarReader;
use harfix_core::normalize::{self, NormalizeReport};
use std::path::Path;

/// Run the normalization pipeline in memory and report what it would
/// repair. Nothing is written to disk.
pub fn execute(file: &Path, format: &str) -> Result<()> {
    tracing::debug!("Checking HAR file: {}", file.display());

    let document = HarReader::from_file(file)?;
    let (_, report) = normalize::normalize(document)?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_pretty(file, &report),
    }

    Ok(())
}

fn print_pretty(file: &Path, report: &NormalizeReport) {
    println!("Check results for {}", file.display());

    if report.is_clean() {
        println!("  ✅ Already Chrome-compatible, no repairs needed");
        return;
    }

    println!("  Numeric fields serialized as strings: {}", report.numbers_coerced);
    println!("  Missing structural fields:            {}", report.fields_defaulted);
    println!("  Null or negative timing values:       {}", report.timings_sanitized);
    println!("  Numeric timestamps:                   {}", report.timestamps_rewritten);
    println!("  Missing response MIME types:          {}", report.mime_types_defaulted);
    println!(
        "  {} repairs would be applied by {}",
        report.total(),
        style("harfix convert").cyan()
    );
}
