use crate::output::read_report;
use crate::utils::config::{CLS_ALL_FRAMES_FEATURE_NAME, SCHEMA_VERSION};
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    if report.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported report schema version {} (expected {})",
            report.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Metric: {}", report.metric);
    println!("  Trace: {}", report.trace);
    println!("  Run: {}", report.run);
    println!("  Value: {}", report.value);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Layout Shift Trace Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string      - Schema version (e.g., '1.0.0')");
        println!("  metric: string       - Metric identifier");
        println!("  trace: string        - Trace the metric was computed from");
        println!("  run: string          - Run label");
        println!("  value: number        - Metric value");
        println!("  generated_at: string - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Layout Shift Trace v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Computes {} from browser page-load traces.", CLS_ALL_FRAMES_FEATURE_NAME);
}
