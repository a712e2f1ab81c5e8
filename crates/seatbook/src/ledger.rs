//! The seat ledger: grid state plus booking records.
//!
//! The ledger owns the grid, the reference generator and a [`BookingStore`].
//! Every reserved seat has exactly one stored booking and every stored booking
//! sits on a reserved seat; each operation keeps that true or fails without
//! touching the grid.

use tracing::{info, warn};

use crate::booking::{Booking, Passenger};
use crate::error::{Error, Result, Unavailable};
use crate::grid::{CellKind, Grid, Layout};
use crate::reference::{BookingReference, ReferenceGenerator};
use crate::seat::{Availability, SeatId, SeatStatus};
use crate::store::BookingStore;

/// Seat grid and booking records for one cabin.
#[derive(Debug)]
pub struct SeatLedger {
    grid: Grid,
    references: ReferenceGenerator,
    store: Box<dyn BookingStore>,
}

impl SeatLedger {
    /// Open a ledger over the given layout and store.
    ///
    /// Stored bookings are restored onto the grid. The first time a store is
    /// opened, the layout's preset reservations are written to it as held
    /// bookings; later opens leave them to whatever the store holds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Reconcile`] if a stored booking does not fit the
    /// layout, or a storage error.
    pub fn open(layout: &Layout, store: Box<dyn BookingStore>) -> Result<Self> {
        Self::open_with(layout, store, ReferenceGenerator::new())
    }

    /// Open a ledger with a caller-supplied reference generator.
    ///
    /// # Errors
    ///
    /// See [`SeatLedger::open`].
    pub fn open_with(
        layout: &Layout,
        store: Box<dyn BookingStore>,
        references: ReferenceGenerator,
    ) -> Result<Self> {
        let mut ledger = Self {
            grid: Grid::from_layout(layout),
            references,
            store,
        };

        let stored = ledger.store.all()?;
        let restored = stored.len();
        for booking in stored {
            ledger.restore(booking)?;
        }

        if !ledger.store.presets_seeded()? {
            ledger.seed_presets(layout)?;
            ledger.store.mark_presets_seeded()?;
        }

        info!(
            "Ledger opened on {} store: {} booking(s) restored, {} seat(s) free",
            ledger.store.name(),
            restored,
            ledger.count_free()
        );
        Ok(ledger)
    }

    /// Hold the layout's preset reservations on seats that are still free.
    fn seed_presets(&mut self, layout: &Layout) -> Result<()> {
        let presets: Vec<SeatId> = layout
            .cells()
            .filter(|(_, kind)| *kind == CellKind::Reserved)
            .map(|(seat, _)| seat)
            .collect();
        for seat in presets {
            if self.grid.get(&seat) != Some(&SeatStatus::Free) {
                continue;
            }
            let reference = self.reserve(seat, Passenger::unassigned())?;
            info!("Held preset seat {} under {}", seat, reference);
        }
        Ok(())
    }

    /// Put a stored booking back on the grid.
    fn restore(&mut self, booking: Booking) -> Result<()> {
        match self.grid.get(&booking.seat) {
            Some(SeatStatus::Free) => {}
            Some(SeatStatus::Reserved(other)) => {
                return Err(Error::reconcile(format!(
                    "bookings {other} and {} both claim seat {}",
                    booking.reference, booking.seat
                )));
            }
            Some(SeatStatus::Aisle | SeatStatus::Storage) => {
                return Err(Error::reconcile(format!(
                    "booking {} is for seat {}, which is not bookable",
                    booking.reference, booking.seat
                )));
            }
            None => {
                return Err(Error::reconcile(format!(
                    "booking {} is for seat {}, which is outside the cabin",
                    booking.reference, booking.seat
                )));
            }
        }

        if !self.references.record(booking.reference.clone()) {
            return Err(Error::reconcile(format!(
                "reference {} is stored twice",
                booking.reference
            )));
        }

        self.grid
            .set(&booking.seat, SeatStatus::Reserved(booking.reference))?;
        Ok(())
    }

    /// Parse a coordinate and look it up in the grid.
    fn locate(&self, input: &str) -> Result<(SeatId, &SeatStatus)> {
        let seat: SeatId = input.parse()?;
        let status = self
            .grid
            .get(&seat)
            .ok_or_else(|| Error::invalid_seat(input))?;
        Ok((seat, status))
    }

    /// Report whether a seat is free, reserved or unbookable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeat`] if the coordinate is malformed or
    /// outside the cabin.
    pub fn check_seat(&self, input: &str) -> Result<Availability> {
        let (_, status) = self.locate(input)?;
        Ok(status.availability())
    }

    /// Book a free seat for a passenger and return the booking reference.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeat`] for a bad coordinate,
    /// [`Error::SeatUnavailable`] if the seat is not free, or a storage error.
    /// The grid is unchanged on any error.
    pub fn book_seat(&mut self, input: &str, passenger: Passenger) -> Result<BookingReference> {
        let (seat, status) = self.locate(input)?;
        let reason = match status {
            SeatStatus::Free => None,
            SeatStatus::Reserved(_) => Some(Unavailable::AlreadyBooked),
            SeatStatus::Aisle | SeatStatus::Storage => Some(Unavailable::NotBookable),
        };
        if let Some(reason) = reason {
            return Err(Error::SeatUnavailable {
                seat: seat.to_string(),
                reason,
            });
        }

        let reference = self.reserve(seat, passenger)?;
        info!("Booked seat {} under {}", seat, reference);
        Ok(reference)
    }

    /// Store a booking for a free seat, then mark the seat reserved.
    fn reserve(&mut self, seat: SeatId, passenger: Passenger) -> Result<BookingReference> {
        let reference = self.references.next_reference();
        let booking = Booking::new(reference.clone(), passenger, seat);
        self.store.insert(&booking)?;
        self.grid
            .set(&seat, SeatStatus::Reserved(reference.clone()))?;
        Ok(reference)
    }

    /// Cancel the booking on a seat and return the removed booking.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSeat`] for a bad coordinate,
    /// [`Error::NotBooked`] if the seat carries no booking, or a storage
    /// error. The grid is unchanged on any error.
    pub fn cancel_seat(&mut self, input: &str) -> Result<Booking> {
        let (seat, status) = self.locate(input)?;
        let SeatStatus::Reserved(reference) = status else {
            return Err(Error::NotBooked {
                seat: seat.to_string(),
            });
        };
        let reference = reference.clone();

        let booking = self.store.get(&reference)?;
        if !self.store.remove(&reference)? {
            warn!(
                "Booking {} for seat {} was missing from the {} store",
                reference,
                seat,
                self.store.name()
            );
        }
        self.grid.set(&seat, SeatStatus::Free)?;

        info!("Cancelled booking {} on seat {}", reference, seat);
        Ok(booking.unwrap_or_else(|| Booking::new(reference, Passenger::unassigned(), seat)))
    }

    /// Number of free seats.
    #[must_use]
    pub fn count_free(&self) -> usize {
        self.grid.count_free()
    }

    /// The current grid as display text.
    #[must_use]
    pub fn render_layout(&self) -> String {
        self.grid.render()
    }

    /// The live grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// All stored bookings, ordered by seat.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn bookings(&self) -> Result<Vec<Booking>> {
        self.store.all()
    }

    /// Look up a booking by its reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    pub fn find_booking(&self, reference: &BookingReference) -> Result<Option<Booking>> {
        self.store.get(reference)
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn BookingStore {
        self.store.as_ref()
    }
}
