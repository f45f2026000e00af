use breath_filter::{process_payload, FilterKind, FilterParams, DEFAULT_WINDOW_SIZE};
use clap::Args;
use std::io::Read;
use std::path::Path;
use tracing::{error, info};

use crate::output;

pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const IO_ERROR: i32 = 1;
    pub const INPUT_ERROR: i32 = 2;
    pub const PROCESSING_ERROR: i32 = 3;
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Payload file in either accepted JSON shape ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Filter to apply: none, moving_average, lowpass, adaptive
    #[arg(short, long, default_value = "none")]
    pub filter: String,

    /// Moving-average window in samples
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window_size: usize,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Compact JSON output
    #[arg(long)]
    pub compact: bool,
}

impl FilterArgs {
    /// Run the filter and return the process exit code
    pub fn execute(self) -> i32 {
        let kind = FilterKind::from_selector(Some(self.filter.as_str()));
        if kind == FilterKind::MovingAverage && self.window_size == 0 {
            eprintln!("Error: window_size must be a positive integer");
            return exit_codes::INPUT_ERROR;
        }

        let raw = match read_input(&self.input) {
            Ok(raw) => raw,
            Err(msg) => {
                eprintln!("Error: {}", msg);
                return exit_codes::IO_ERROR;
            }
        };

        let payload: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(v) => v,
            Err(e) => {
                eprintln!("Error: Invalid JSON payload: {}", e);
                return exit_codes::INPUT_ERROR;
            }
        };

        let params = FilterParams::new(kind, self.window_size);

        let (series, result) = match process_payload(&payload, &params) {
            Ok(r) => r,
            Err(e) if e.is_input_error() => {
                eprintln!("Error: {}", e);
                return exit_codes::INPUT_ERROR;
            }
            Err(e) => {
                error!("Filtering failed: {}", e);
                eprintln!("Error: {}", e);
                return exit_codes::PROCESSING_ERROR;
            }
        };
        info!(
            "Filtered {} samples with {} (window {})",
            series.len(),
            params.kind,
            params.window_size
        );

        match output::emit(&result, self.output.as_deref().map(Path::new), self.compact) {
            Ok(()) => exit_codes::SUCCESS,
            Err(e) => {
                eprintln!("Error: {}", e);
                exit_codes::IO_ERROR
            }
        }
    }
}

fn read_input(path: &str) -> Result<String, String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).map_err(|e| format!("Failed to read input file '{}': {}", path, e))
}
