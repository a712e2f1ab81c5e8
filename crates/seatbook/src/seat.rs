//! Seat coordinates and statuses.
//!
//! A seat is addressed by a 1-based row number and a column letter, written
//! together as `<row><column>` (for example `2D`). Parsing is case-insensitive.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reference::BookingReference;

/// Highest column letter a cabin may use.
pub const MAX_COLUMN: char = 'Z';

/// Coordinate of one cell in the cabin grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeatId {
    /// 1-based row number.
    pub row: u32,
    /// Upper-case column letter.
    pub column: char,
}

impl SeatId {
    /// Create a seat id, normalizing the column letter to upper case.
    #[must_use]
    pub fn new(row: u32, column: char) -> Self {
        Self {
            row,
            column: column.to_ascii_uppercase(),
        }
    }

    /// Build a seat id from 0-based grid indices.
    ///
    /// Returns `None` if the indices cannot be expressed as a row number and
    /// column letter.
    #[must_use]
    pub fn from_indices(row: usize, column: usize) -> Option<Self> {
        let row = u32::try_from(row).ok()?.checked_add(1)?;
        let offset = u8::try_from(column).ok()?;
        let column = char::from(b'A'.checked_add(offset)?);
        (column <= MAX_COLUMN).then_some(Self { row, column })
    }

    /// 0-based row index, or `None` for row 0.
    #[must_use]
    pub fn row_index(&self) -> Option<usize> {
        usize::try_from(self.row).ok()?.checked_sub(1)
    }

    /// 0-based column index, or `None` if the column is not a letter.
    #[must_use]
    pub fn column_index(&self) -> Option<usize> {
        if !self.column.is_ascii_uppercase() {
            return None;
        }
        usize::try_from(u32::from(self.column) - u32::from('A')).ok()
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = Error;

    /// Parse `<row-number><column-letter>`, ignoring surrounding whitespace
    /// and letter case. Bounds are checked against the grid, not here.
    fn from_str(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let column = chars
            .next_back()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| Error::invalid_seat(input))?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid_seat(input));
        }
        let row: u32 = digits.parse().map_err(|_| Error::invalid_seat(input))?;
        if row == 0 {
            return Err(Error::invalid_seat(input));
        }
        Ok(Self::new(row, column))
    }
}

/// Status of a single cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reference", rename_all = "snake_case")]
pub enum SeatStatus {
    /// Bookable and unoccupied.
    Free,
    /// Booked under the given reference.
    Reserved(BookingReference),
    /// Aisle; never bookable.
    Aisle,
    /// Storage area; never bookable.
    Storage,
}

impl SeatStatus {
    /// Single-letter code used in layouts and the rendered grid.
    #[must_use]
    pub fn code(&self) -> char {
        match self {
            Self::Free => 'F',
            Self::Reserved(_) => 'R',
            Self::Aisle => 'X',
            Self::Storage => 'S',
        }
    }

    /// Whether the cell is an aisle or storage area.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Aisle | Self::Storage)
    }

    /// Summarize the status for a seat check.
    #[must_use]
    pub fn availability(&self) -> Availability {
        match self {
            Self::Free => Availability::Free,
            Self::Reserved(_) => Availability::Reserved,
            Self::Aisle | Self::Storage => Availability::Unbookable,
        }
    }
}

/// Result of checking a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// The seat can be booked.
    Free,
    /// The seat is already booked.
    Reserved,
    /// The cell is an aisle or storage area.
    Unbookable,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "The seat is available."),
            Self::Reserved => write!(f, "The seat is already booked."),
            Self::Unbookable => write!(f, "This seat cannot be booked (aisle or storage)."),
        }
    }
}
