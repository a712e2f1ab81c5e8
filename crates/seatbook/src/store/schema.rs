//! `SQLite` schema definitions for seatbook.
//!
//! This module contains the SQL statements for creating the bookings table
//! and the small key/value table that records one-off ledger setup.

use rusqlite::Connection;

use crate::error::Result;

/// SQL statement to create the bookings table.
pub const CREATE_BOOKINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bookings (
    booking_ref TEXT PRIMARY KEY,
    passport_number TEXT,
    first_name TEXT,
    last_name TEXT,
    seat_row INTEGER,
    seat_col TEXT
)
";

/// SQL statement to keep at most one booking per seat.
pub const CREATE_SEAT_INDEX: &str = r"
CREATE UNIQUE INDEX IF NOT EXISTS idx_bookings_seat ON bookings(seat_row, seat_col)
";

/// SQL statement to create the metadata table.
pub const CREATE_META_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS seatbook_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// Metadata key set once the layout's preset reservations have been stored.
pub const PRESETS_SEEDED_KEY: &str = "presets_seeded";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_BOOKINGS_TABLE,
    CREATE_SEAT_INDEX,
    CREATE_META_TABLE,
];

/// Create the tables and indexes if they don't exist.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }
    Ok(())
}
