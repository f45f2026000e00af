mod filter;

pub use filter::{exit_codes, FilterArgs};

use clap::{Parser, Subcommand};

/// Breath Server - respiration trace filtering API
#[derive(Parser)]
#[command(name = "breath-server")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the server (default)
    Serve,

    /// Filter a JSON payload file without starting the server
    Filter(FilterArgs),
}
