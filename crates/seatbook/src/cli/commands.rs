//! CLI command definitions.
//!
//! This module defines the arguments of the seatbook subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// A single seat coordinate.
#[derive(Debug, Args)]
pub struct SeatArg {
    /// Seat as `<row><column>`, e.g. 2D
    pub seat: String,
}

/// Book command arguments.
#[derive(Debug, Args)]
pub struct BookCommand {
    /// Seat as `<row><column>`, e.g. 2D
    pub seat: String,

    /// Passenger passport number
    #[arg(long)]
    pub passport: String,

    /// Passenger first name
    #[arg(long)]
    pub first_name: String,

    /// Passenger last name
    #[arg(long)]
    pub last_name: String,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_command_debug() {
        let cmd = StatusCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_book_command_debug() {
        let cmd = BookCommand {
            seat: "1A".to_string(),
            passport: "P1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("first_name"));
        assert!(debug_str.contains("1A"));
    }
}
