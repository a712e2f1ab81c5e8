//! Booking records.

use serde::{Deserialize, Serialize};

use crate::reference::BookingReference;
use crate::seat::SeatId;

/// The person a seat is booked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Passport number as entered.
    pub passport_number: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl Passenger {
    /// Create a passenger, trimming surrounding whitespace from each field.
    #[must_use]
    pub fn new(
        passport_number: impl AsRef<str>,
        first_name: impl AsRef<str>,
        last_name: impl AsRef<str>,
    ) -> Self {
        Self {
            passport_number: passport_number.as_ref().trim().to_string(),
            first_name: first_name.as_ref().trim().to_string(),
            last_name: last_name.as_ref().trim().to_string(),
        }
    }

    /// Passenger for a seat held by the cabin layout rather than a person.
    #[must_use]
    pub fn unassigned() -> Self {
        Self::default()
    }

    /// Whether every field is blank.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.passport_number.is_empty() && self.first_name.is_empty() && self.last_name.is_empty()
    }

    /// "First Last", or "(held)" for unassigned passengers.
    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_unassigned() {
            "(held)".to_string()
        } else {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        }
    }
}

/// A stored booking: one passenger on one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Confirmation code shown to the passenger.
    pub reference: BookingReference,
    /// Who the seat is booked for.
    #[serde(flatten)]
    pub passenger: Passenger,
    /// The booked seat.
    pub seat: SeatId,
}

impl Booking {
    /// Create a booking.
    #[must_use]
    pub fn new(reference: BookingReference, passenger: Passenger, seat: SeatId) -> Self {
        Self {
            reference,
            passenger,
            seat,
        }
    }
}

impl std::fmt::Display for Booking {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}  seat {:<4} {}",
            self.reference,
            self.seat,
            self.passenger.display_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> BookingReference {
        BookingReference::parse("QWER1234").unwrap()
    }

    #[test]
    fn test_passenger_trims_fields() {
        let passenger = Passenger::new(" P1234567 ", " Ada", "Lovelace ");
        assert_eq!(passenger.passport_number, "P1234567");
        assert_eq!(passenger.first_name, "Ada");
        assert_eq!(passenger.last_name, "Lovelace");
        assert_eq!(passenger.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_unassigned_passenger() {
        let passenger = Passenger::unassigned();
        assert!(passenger.is_unassigned());
        assert_eq!(passenger.display_name(), "(held)");
        assert!(!Passenger::new("X1", "", "").is_unassigned());
    }

    #[test]
    fn test_booking_display() {
        let booking = Booking::new(
            reference(),
            Passenger::new("P1", "Grace", "Hopper"),
            SeatId::new(1, 'A'),
        );
        let text = booking.to_string();
        assert!(text.starts_with("QWER1234"));
        assert!(text.contains("1A"));
        assert!(text.contains("Grace Hopper"));
    }

    #[test]
    fn test_booking_serialize_flattens_passenger() {
        let booking = Booking::new(
            reference(),
            Passenger::new("P1", "Grace", "Hopper"),
            SeatId::new(3, 'd'),
        );
        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["reference"], "QWER1234");
        assert_eq!(json["first_name"], "Grace");
        assert_eq!(json["seat"]["row"], 3);
        assert_eq!(json["seat"]["column"], "D");
    }
}
