//! Command-line interface for standup.
//!
//! This module provides the CLI structure for the `standup` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ClearCommand, ConfigCommand, DeleteCommand, ListCommand, OutputFormat, ServeCommand,
    ShowCommand, StatusCommand, SubmitCommand,
};

/// standup - Track your team's daily progress
///
/// Submit what you accomplished yesterday, what you're working on today,
/// and any blockers you're facing; view everyone's updates grouped by day.
#[derive(Debug, Parser)]
#[command(name = "standup")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the standup API server
    Serve(ServeCommand),

    /// Submit a standup entry
    Submit(SubmitCommand),

    /// List entries grouped by day
    List(ListCommand),

    /// Show a single entry
    Show(ShowCommand),

    /// Delete a single entry
    Delete(DeleteCommand),

    /// Remove all entries
    Clear(ClearCommand),

    /// Show store statistics
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "standup");
    }

    #[test]
    fn test_cli_verify() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_quiet() {
        let cli = Cli {
            config: None,
            verbose: 0,
            quiet: true,
            command: Command::Status(StatusCommand { json: false }),
        };
        assert_eq!(cli.verbosity(), crate::logging::Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_levels() {
        for (verbose, expected) in [
            (0, crate::logging::Verbosity::Normal),
            (1, crate::logging::Verbosity::Verbose),
            (2, crate::logging::Verbosity::Trace),
            (5, crate::logging::Verbosity::Trace),
        ] {
            let cli = Cli {
                config: None,
                verbose,
                quiet: false,
                command: Command::Status(StatusCommand { json: false }),
            };
            assert_eq!(cli.verbosity(), expected);
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["standup", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Command::Serve(cmd) => assert_eq!(cmd.port, Some(8080)),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_parse_submit() {
        let cli = Cli::try_parse_from([
            "standup", "submit", "--name", "Ann", "--yesterday", "Fixed bug", "--today",
            "Write tests",
        ])
        .unwrap();
        match cli.command {
            Command::Submit(cmd) => {
                assert_eq!(cmd.name, "Ann");
                assert!(cmd.blockers.is_none());
                assert!(cmd.date.is_none());
            }
            _ => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_parse_submit_with_date() {
        let cli = Cli::try_parse_from([
            "standup", "submit", "--name", "Ann", "--yesterday", "a", "--today", "b", "--date",
            "2024-03-01",
        ])
        .unwrap();
        match cli.command {
            Command::Submit(cmd) => {
                assert_eq!(cmd.date.unwrap().to_string(), "2024-03-01");
            }
            _ => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["standup", "list"]).unwrap();
        match cli.command {
            Command::List(cmd) => assert_eq!(cmd.format, OutputFormat::Grouped),
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["standup", "show", "abc123"]).unwrap();
        match cli.command {
            Command::Show(cmd) => assert_eq!(cmd.id, "abc123"),
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_parse_clear_with_yes() {
        let cli = Cli::try_parse_from(["standup", "clear", "--yes"]).unwrap();
        match cli.command {
            Command::Clear(cmd) => assert!(cmd.yes),
            _ => panic!("expected clear command"),
        }
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["standup", "-c", "/custom/config.toml", "list"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_parse_with_quiet() {
        let cli = Cli::try_parse_from(["standup", "-q", "list"]).unwrap();
        assert!(cli.quiet);
    }
}
