//! Error types for seatbook.
//!
//! This module defines all error types used throughout the seatbook crate.
//! Seat errors are expected during normal use and are reported back to the
//! person at the console; the rest indicate a broken store or configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Why a seat could not be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unavailable {
    /// The seat already carries a booking.
    AlreadyBooked,
    /// The cell is an aisle or storage area.
    NotBookable,
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyBooked => write!(f, "already booked"),
            Self::NotBookable => write!(f, "aisle or storage"),
        }
    }
}

/// The main error type for seatbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Seat Errors ===
    /// A seat coordinate was malformed or outside the cabin.
    #[error("invalid seat: '{input}'")]
    InvalidSeat {
        /// The coordinate as entered.
        input: String,
    },

    /// Booking was attempted on a seat that is not free.
    #[error("seat {seat} is unavailable ({reason})")]
    SeatUnavailable {
        /// The seat, formatted as `<row><column>`.
        seat: String,
        /// Why the seat cannot be booked.
        reason: Unavailable,
    },

    /// Cancellation was attempted on a seat without a booking.
    #[error("seat {seat} is not booked")]
    NotBooked {
        /// The seat, formatted as `<row><column>`.
        seat: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The store already holds a booking with this reference or for this seat.
    #[error("booking {reference} for seat {seat} conflicts with a stored booking")]
    DuplicateBooking {
        /// Reference of the rejected booking.
        reference: String,
        /// Seat of the rejected booking.
        seat: String,
    },

    /// A stored record could not be decoded.
    #[error("corrupt booking record: {message}")]
    CorruptRecord {
        /// Description of the bad field.
        message: String,
    },

    /// Stored bookings do not fit the configured cabin.
    #[error("stored bookings do not match the cabin layout: {message}")]
    Reconcile {
        /// Description of the mismatch.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// The cabin layout could not be parsed.
    #[error("invalid cabin layout: {message}")]
    InvalidLayout {
        /// Description of the layout problem.
        message: String,
    },

    // === I/O Errors ===
    /// File system or console operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for seatbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid seat error.
    #[must_use]
    pub fn invalid_seat(input: impl Into<String>) -> Self {
        Self::InvalidSeat {
            input: input.into(),
        }
    }

    /// Create a reconciliation error.
    #[must_use]
    pub fn reconcile(message: impl Into<String>) -> Self {
        Self::Reconcile {
            message: message.into(),
        }
    }

    /// Create an invalid layout error.
    #[must_use]
    pub fn invalid_layout(message: impl Into<String>) -> Self {
        Self::InvalidLayout {
            message: message.into(),
        }
    }

    /// Check if this error came from a seat command rather than the system.
    #[must_use]
    pub fn is_seat_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSeat { .. } | Self::SeatUnavailable { .. } | Self::NotBooked { .. }
        )
    }
}
