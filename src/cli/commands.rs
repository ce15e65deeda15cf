use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sentinel", about = "Market-condition checker for short-options strategies")]
pub struct Cli {
    /// Strategy profile (0dte-10d, 45dte-10d, 45dte-15d, full-auto)
    #[arg(long, env = "SENTINEL_PROFILE", default_value = "full-auto")]
    pub profile: String,

    /// Compute and print the report without sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the full run report as JSON instead of the message text
    #[arg(long)]
    pub json: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, env = "SENTINEL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the market check once (default)
    Check,
    /// List the built-in strategy profiles
    Profiles,
}
