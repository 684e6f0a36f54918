//! Layout Shift Trace CLI
//!
//! Computes Cumulative Layout Shift across all frames of a page-load trace.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use layout_shift_trace::commands::{
    display_schema, display_version, execute_compute, validate_args, validate_report_file,
    ComputeArgs,
};
use layout_shift_trace::utils::error::MetricError;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Layout Shift Trace - CLS for browser page-load traces
#[derive(Parser, Debug)]
#[command(name = "layout-shift")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute Cumulative Layout Shift across all frames
    Compute {
        /// Trace JSON file (array form or object with traceEvents)
        #[arg(short, long)]
        trace: PathBuf,

        /// Output path for JSON report (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,

        /// Run label recorded in the report
        #[arg(long, env = "LAYOUT_SHIFT_LABEL", default_value = "default")]
        label: String,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Compute {
            trace,
            output,
            summary,
            label,
        } => {
            let args = ComputeArgs {
                trace_path: trace,
                output_json: output,
                print_summary: summary,
                label,
            };

            validate_args(&args)?;

            let result = execute_compute(args).await?;
            println!("{}", result.value);
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Log a failure, surfacing the error code for metric failures
fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<MetricError>() {
        Some(metric_err) => match metric_err.feature_name() {
            Some(feature) => error!("[{}] {} (feature: {})", metric_err.code(), metric_err, feature),
            None => error!("[{}] {}", metric_err.code(), metric_err),
        },
        None => error!("{:#}", err),
    }
}
