//! Booking persistence.
//!
//! The ledger talks to storage only through [`BookingStore`]. Two backends
//! exist: [`MemoryStore`] keeps bookings for the lifetime of the process and
//! [`SqliteStore`] writes them to a single `bookings` table.

mod memory;
pub mod schema;
mod sqlite;

use crate::booking::Booking;
use crate::error::Result;
use crate::reference::BookingReference;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Durable (or not) home for booking records.
///
/// Every method is one complete unit of work; nothing is left open between
/// calls.
pub trait BookingStore: std::fmt::Debug {
    /// Short backend name for logs and status output.
    fn name(&self) -> &'static str;

    /// Store a new booking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DuplicateBooking`] if the reference or the seat
    /// is already taken, or a storage error.
    fn insert(&mut self, booking: &Booking) -> Result<()>;

    /// Delete the booking with this reference.
    ///
    /// Returns `true` if a booking was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&mut self, reference: &BookingReference) -> Result<bool>;

    /// Look up a booking by reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, reference: &BookingReference) -> Result<Option<Booking>>;

    /// All bookings, ordered by seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn all(&self) -> Result<Vec<Booking>>;

    /// Number of stored bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn count(&self) -> Result<usize>;

    /// Whether the layout's preset reservations were already written to this
    /// store.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn presets_seeded(&self) -> Result<bool>;

    /// Record that the preset reservations have been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn mark_presets_seeded(&mut self) -> Result<()>;
}
