//! `SQLite`-backed booking store.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use tracing::{debug, info};

use crate::booking::{Booking, Passenger};
use crate::error::{Error, Result};
use crate::reference::BookingReference;
use crate::seat::SeatId;

use super::schema;
use super::BookingStore;

const SELECT_BOOKING: &str = r"
SELECT booking_ref, passport_number, first_name, last_name, seat_row, seat_col
FROM bookings
";

/// Bookings persisted in a `SQLite` database.
///
/// Each write runs in its own transaction, committed before the method
/// returns.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a booking database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist,
    /// and the bookings table if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        schema::initialize_schema(&conn)?;

        info!("Booking database opened at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Create an in-memory database, for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        schema::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert a database row to a Booking.
    fn row_to_booking(row: &rusqlite::Row) -> rusqlite::Result<Booking> {
        let reference: String = row.get(0)?;
        let passport_number: Option<String> = row.get(1)?;
        let first_name: Option<String> = row.get(2)?;
        let last_name: Option<String> = row.get(3)?;
        let seat_row: u32 = row.get(4)?;
        let seat_col: String = row.get(5)?;

        let reference = BookingReference::parse(&reference).map_err(|e| corrupt(0, &e))?;

        let mut letters = seat_col.chars();
        let column = match (letters.next(), letters.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => {
                let e = Error::CorruptRecord {
                    message: format!("'{seat_col}' is not a seat column"),
                };
                return Err(corrupt(5, &e));
            }
        };

        Ok(Booking {
            reference,
            passenger: Passenger {
                passport_number: passport_number.unwrap_or_default(),
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
            },
            seat: SeatId::new(seat_row, column),
        })
    }
}

fn corrupt(column: usize, err: &Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        err.to_string().into(),
    )
}

impl BookingStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn insert(&mut self, booking: &Booking) -> Result<()> {
        let tx = self.conn.transaction()?;
        let result = tx.execute(
            r"
            INSERT INTO bookings
                (booking_ref, passport_number, first_name, last_name, seat_row, seat_col)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
            params![
                booking.reference.as_str(),
                booking.passenger.passport_number,
                booking.passenger.first_name,
                booking.passenger.last_name,
                booking.seat.row,
                booking.seat.column.to_string(),
            ],
        );

        match result {
            Ok(_) => {}
            Err(err) if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) => {
                return Err(Error::DuplicateBooking {
                    reference: booking.reference.to_string(),
                    seat: booking.seat.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        }

        tx.commit()?;
        debug!("Inserted booking {} for seat {}", booking.reference, booking.seat);
        Ok(())
    }

    fn remove(&mut self, reference: &BookingReference) -> Result<bool> {
        let tx = self.conn.transaction()?;
        let affected = tx.execute(
            "DELETE FROM bookings WHERE booking_ref = ?1",
            [reference.as_str()],
        )?;
        tx.commit()?;

        debug!("Deleted {} row(s) for booking {}", affected, reference);
        Ok(affected > 0)
    }

    fn get(&self, reference: &BookingReference) -> Result<Option<Booking>> {
        let result = self
            .conn
            .query_row(
                &format!("{SELECT_BOOKING} WHERE booking_ref = ?1"),
                [reference.as_str()],
                Self::row_to_booking,
            )
            .optional()?;
        Ok(result)
    }

    fn all(&self) -> Result<Vec<Booking>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_BOOKING} ORDER BY seat_row, seat_col"))?;

        let bookings = stmt
            .query_map([], Self::row_to_booking)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(bookings)
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookings", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn presets_seeded(&self) -> Result<bool> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM seatbook_meta WHERE key = ?1",
                [schema::PRESETS_SEEDED_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.is_some())
    }

    fn mark_presets_seeded(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO seatbook_meta (key, value) VALUES (?1, '1')",
            [schema::PRESETS_SEEDED_KEY],
        )?;
        tx.commit()?;
        debug!("Recorded preset seeding in {}", self.path.display());
        Ok(())
    }
}
