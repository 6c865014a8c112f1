//! CLI command definitions

use clap::Args;

/// Run the validation scenario
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to validator config YAML (defaults apply when omitted)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Base URL of the pipeline service API (overrides config)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Print the final run report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Validate a config file
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to validator config YAML
    #[arg(short, long)]
    pub file: String,

    /// Output the resolved config in JSON format
    #[arg(long)]
    pub json: bool,
}
