//! Compute command implementation.
//!
//! The compute command:
//! 1. Loads the trace file
//! 2. Computes CLS across all frames of the traced tab
//! 3. Writes the JSON report (if requested)

use super::models::ComputeArgs;
use crate::aggregator::{
    qualify_layout_shift, CumulativeLayoutShift, CumulativeLayoutShiftAllFrames, Qualification,
};
use crate::computed::{AuditContext, Memoized, Settings};
use crate::output::{validate_path, write_report, MetricReport};
use crate::parser::{load_trace, Trace};
use crate::summarizer::FrameTreeSummarizer;
use crate::utils::error::MetricError;
use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

type SharedSummarizer = Arc<Memoized<FrameTreeSummarizer>>;

/// Memoized summarizer plus the memoized metric built on top of it
///
/// Both share one summarizer, so the trace is attributed to frames once per
/// trace/context no matter how many consumers ask.
pub struct MetricPipeline {
    summarizer: SharedSummarizer,
    cls_all_frames: Memoized<CumulativeLayoutShiftAllFrames<SharedSummarizer>>,
}

impl MetricPipeline {
    pub fn new() -> Self {
        let summarizer = Arc::new(Memoized::new(FrameTreeSummarizer));
        let cls_all_frames = Memoized::new(CumulativeLayoutShiftAllFrames::new(Arc::clone(&summarizer)));
        Self {
            summarizer,
            cls_all_frames,
        }
    }

    pub fn summarizer(&self) -> &SharedSummarizer {
        &self.summarizer
    }

    pub async fn cumulative_layout_shift_all_frames(
        &self,
        trace: &Trace,
        context: &AuditContext,
    ) -> Result<CumulativeLayoutShift, MetricError> {
        self.cls_all_frames.request(trace, context).await
    }
}

impl Default for MetricPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute the compute command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * `MetricError` (`PARSE_ERROR` for unreadable traces, or from the
///   summarizer or metric); callers can downcast and report the error code
/// * Report write errors
pub async fn execute_compute(args: ComputeArgs) -> Result<CumulativeLayoutShift> {
    let start_time = Instant::now();

    info!("Computing CLS (all frames) for: {}", args.trace_path.display());

    info!("Step 1/3: Loading trace...");
    let trace = load_trace(&args.trace_path)
        .map_err(MetricError::from)
        .with_context(|| format!("Failed to load trace {}", args.trace_path.display()))?;
    debug!("Loaded {} trace events", trace.len());

    info!("Step 2/3: Computing cumulative layout shift...");
    let context = AuditContext::new(Settings {
        label: args.label.clone(),
    });
    let pipeline = MetricPipeline::new();
    let result = pipeline.cumulative_layout_shift_all_frames(&trace, &context).await?;

    info!("CLS (all frames): {:.4}", result.value);

    if args.print_summary {
        // Memoized: no second pass over the raw trace
        let tab = pipeline.summarizer().request(&trace, &context).await?;
        let shift_count = tab
            .frame_tree_events
            .iter()
            .filter(|e| matches!(qualify_layout_shift(e), Ok(Qualification::Qualified(_))))
            .count();

        println!("\n{}", "=".repeat(60));
        println!("LAYOUT SHIFT SUMMARY");
        println!("{}", "=".repeat(60));
        println!("Trace:             {}", args.trace_path.display());
        println!("Trace Events:      {}", trace.len());
        println!("Main Frame:        {}", tab.main_frame_id);
        println!("Frames:            {}", tab.frame_ids.len());
        println!("Frame-Tree Events: {}", tab.frame_tree_events.len());
        println!("Layout Shifts:     {}", shift_count);
        println!("CLS (all frames):  {:.4}", result.value);
        println!("{}", "=".repeat(60));
    }

    if let Some(output_path) = &args.output_json {
        info!("Step 3/3: Writing report...");
        let report = MetricReport::cumulative_layout_shift(
            result,
            args.trace_path.display().to_string(),
            &context.settings().label,
        );
        write_report(&report, output_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", output_path.display());
    } else {
        info!("Step 3/3: Skipping report (not requested)");
    }

    info!("Compute completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(result)
}

/// Validate compute arguments
///
/// **Public** - can be called before execute_compute for early validation
pub fn validate_args(args: &ComputeArgs) -> Result<()> {
    if args.trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if !args.trace_path.is_file() {
        anyhow::bail!("Trace file not found: {}", args.trace_path.display());
    }

    if let Some(output) = &args.output_json {
        validate_path(output).context("Invalid report output path")?;
    }

    if args.label.trim().is_empty() {
        anyhow::bail!("Run label cannot be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn trace_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        file
    }

    #[test]
    fn test_validate_args_valid() {
        let file = trace_file();
        let args = ComputeArgs {
            trace_path: file.path().to_path_buf(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_trace_path() {
        let args = ComputeArgs {
            trace_path: std::path::PathBuf::new(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_trace() {
        let dir = tempfile::tempdir().unwrap();
        let args = ComputeArgs {
            trace_path: dir.path().join("missing.json"),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_output_is_directory() {
        let file = trace_file();
        let dir = tempfile::tempdir().unwrap();
        let args = ComputeArgs {
            trace_path: file.path().to_path_buf(),
            output_json: Some(dir.path().to_path_buf()),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_blank_label() {
        let file = trace_file();
        let args = ComputeArgs {
            trace_path: file.path().to_path_buf(),
            label: "  ".to_string(),
            ..Default::default()
        };

        assert!(validate_args(&args).is_err());
    }
}
