//! CLI command definitions and handlers

use clap::{Parser, Subcommand, ValueEnum};

pub mod ingest;
pub mod init;
pub mod status;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// orgmap - CLI companion for the organization directory API
#[derive(Parser, Debug)]
#[command(name = "orgmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "ORGMAP_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override the directory API host
    #[arg(long, global = true, env = "ORGMAP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "ORGMAP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ORGMAP_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize orgmap configuration
    Init,

    /// Show configuration status
    Status,

    /// Ingest the organization directory and print the assembled forest
    Ingest {
        /// Collapse the hierarchy to sole orgs and subsidiaries before
        /// printing
        #[arg(long)]
        flatten: bool,
    },

    /// Display version information
    Version,
}
