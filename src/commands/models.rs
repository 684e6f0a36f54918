use std::path::PathBuf;

/// Arguments for the compute command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ComputeArgs {
    /// Trace JSON file to analyze
    pub trace_path: PathBuf,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Run label recorded in logs and the report
    pub label: String,
}

impl Default for ComputeArgs {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("trace.json"),
            output_json: None,
            print_summary: false,
            label: "default".to_string(),
        }
    }
}
