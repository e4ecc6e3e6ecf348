//! CLI module for spoilcheck
//!
//! Provides the command-line interface for the contract harness.

pub mod login;
pub mod run;

use clap::{Parser, Subcommand};

/// StorySpoil contract harness - ordered CRUD contract verification
#[derive(Parser, Debug)]
#[command(name = "spoilcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SPOILCHECK_BASE_URL     Service base URL (default: https://d3s5nxhwblsjbi.cloudfront.net/api/)
    SPOILCHECK_TOKEN        Cached bearer token to try before logging in (optional)
    SPOILCHECK_USERNAME     Fallback login username (default: LilTest)
    SPOILCHECK_PASSWORD     Fallback login password
    SPOILCHECK_LOG_LEVEL    Log level (default: info)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full ordered contract verification
    Run(run::RunArgs),
    /// Exchange credentials for a fresh token and print it
    Login(login::LoginArgs),
}
