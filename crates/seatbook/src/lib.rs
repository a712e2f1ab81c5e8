//! `seatbook` - An interactive flight-seat reservation console
//!
//! This library provides the seat grid, booking references, the seat ledger
//! and its pluggable booking stores, plus the numbered menu that drives them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod booking;
pub mod cli;
pub mod config;
pub mod error;
pub mod grid;
pub mod ledger;
pub mod logging;
pub mod menu;
pub mod reference;
pub mod seat;
pub mod store;

pub use booking::{Booking, Passenger};
pub use config::{Config, StorageBackend};
pub use error::{Error, Result};
pub use grid::{Grid, Layout};
pub use ledger::SeatLedger;
pub use logging::init_logging;
pub use menu::Menu;
pub use reference::{BookingReference, ReferenceGenerator};
pub use seat::{Availability, SeatId, SeatStatus};
pub use store::{BookingStore, MemoryStore, SqliteStore};
