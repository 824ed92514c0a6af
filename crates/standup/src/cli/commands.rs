//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to bind (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides configuration)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Submit command arguments.
#[derive(Debug, Args)]
pub struct SubmitCommand {
    /// Your display name
    #[arg(short, long)]
    pub name: String,

    /// What you accomplished yesterday
    #[arg(short, long)]
    pub yesterday: String,

    /// What you are working on today
    #[arg(short, long)]
    pub today: String,

    /// Any blockers or impediments (optional)
    #[arg(short, long)]
    pub blockers: Option<String>,

    /// The date the update applies to (defaults to today)
    #[arg(short, long, value_name = "YYYY-MM-DD")]
    pub date: Option<NaiveDate>,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "grouped")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The id of the entry to show
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// The id of the entry to delete
    pub id: String,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for list output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Grouped day-by-day view
    #[default]
    Grouped,
    /// JSON output
    Json,
}
