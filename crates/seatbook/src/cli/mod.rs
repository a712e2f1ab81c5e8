//! Command-line interface for seatbook.
//!
//! This module provides the CLI structure for the `seatbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{BookCommand, ConfigCommand, SeatArg, StatusCommand};

/// seatbook - Check, book and cancel flight seats
///
/// Runs an interactive menu by default. The one-shot subcommands work against
/// the same booking database.
#[derive(Debug, Parser)]
#[command(name = "seatbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Keep bookings in memory only for this run
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the interactive menu
    Menu,

    /// Check whether a seat is available
    Check(SeatArg),

    /// Book a seat
    Book(BookCommand),

    /// Cancel the booking on a seat
    Cancel(SeatArg),

    /// Show the seat layout and bookings
    Status(StatusCommand),

    /// Show how many seats are free
    Remaining,

    /// Show the booking with the given reference
    Lookup {
        /// Booking reference (8 characters)
        reference: String,
    },

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
