//! In-process booking store.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::booking::Booking;
use crate::error::{Error, Result};
use crate::reference::BookingReference;
use crate::seat::SeatId;

use super::BookingStore;

/// Bookings held in memory; lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: HashMap<BookingReference, Booking>,
    by_seat: BTreeMap<SeatId, BookingReference>,
    presets_seeded: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookingStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn insert(&mut self, booking: &Booking) -> Result<()> {
        if self.bookings.contains_key(&booking.reference) || self.by_seat.contains_key(&booking.seat)
        {
            return Err(Error::DuplicateBooking {
                reference: booking.reference.to_string(),
                seat: booking.seat.to_string(),
            });
        }

        self.by_seat.insert(booking.seat, booking.reference.clone());
        self.bookings
            .insert(booking.reference.clone(), booking.clone());
        debug!("Stored booking {} in memory", booking.reference);
        Ok(())
    }

    fn remove(&mut self, reference: &BookingReference) -> Result<bool> {
        match self.bookings.remove(reference) {
            Some(booking) => {
                self.by_seat.remove(&booking.seat);
                debug!("Removed booking {} from memory", reference);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn get(&self, reference: &BookingReference) -> Result<Option<Booking>> {
        Ok(self.bookings.get(reference).cloned())
    }

    fn all(&self) -> Result<Vec<Booking>> {
        Ok(self
            .by_seat
            .values()
            .filter_map(|reference| self.bookings.get(reference).cloned())
            .collect())
    }

    fn count(&self) -> Result<usize> {
        Ok(self.bookings.len())
    }

    fn presets_seeded(&self) -> Result<bool> {
        Ok(self.presets_seeded)
    }

    fn mark_presets_seeded(&mut self) -> Result<()> {
        self.presets_seeded = true;
        Ok(())
    }
}
