//! Interactive numbered menu.
//!
//! Reads one choice per line, runs it against the ledger and prints the
//! outcome. Seat errors and storage failures are reported and the loop
//! carries on; only console I/O errors end it early.

use std::io::{BufRead, Write};

use tracing::error;

use crate::booking::Passenger;
use crate::error::{Error, Result, Unavailable};
use crate::ledger::SeatLedger;
use crate::seat::Availability;

const MENU_TEXT: &str = "\
===== Seat Booking System =====
1. Check seat availability
2. Book a seat
3. Cancel a seat
4. Show booking status
5. Exit
6. Show number of available seats";

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Check whether a seat is available.
    Check,
    /// Book a seat.
    Book,
    /// Cancel a booking.
    Cancel,
    /// Show the seat layout.
    ShowStatus,
    /// Leave the menu.
    Exit,
    /// Show how many seats are free.
    Remaining,
}

impl MenuChoice {
    /// Parse a menu selection (`1` through `6`).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Check),
            "2" => Some(Self::Book),
            "3" => Some(Self::Cancel),
            "4" => Some(Self::ShowStatus),
            "5" => Some(Self::Exit),
            "6" => Some(Self::Remaining),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The read-evaluate-print loop over a ledger.
#[derive(Debug)]
pub struct Menu<'a, R, W> {
    ledger: &'a mut SeatLedger,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    /// Create a menu reading from `input` and printing to `output`.
    pub fn new(ledger: &'a mut SeatLedger, input: R, output: W) -> Self {
        Self {
            ledger,
            input,
            output,
        }
    }

    /// Run until the exit option is chosen or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the console cannot be read or written.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n{MENU_TEXT}")?;
            let Some(line) = self.prompt("Select an option (1-6): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::Check) => self.check()?,
                Some(MenuChoice::Book) => self.book()?,
                Some(MenuChoice::Cancel) => self.cancel()?,
                Some(MenuChoice::ShowStatus) => self.show_status()?,
                Some(MenuChoice::Remaining) => self.show_remaining()?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    writeln!(
                        self.output,
                        "Invalid input. Please enter a number between 1 and 6."
                    )?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "Exiting the system. Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Print a prompt and read one line. `None` means input has ended.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn check(&mut self) -> Result<Flow> {
        let Some(seat) = self.prompt("Enter seat (e.g. 1A): ")? else {
            return Ok(Flow::Exit);
        };

        match self.ledger.check_seat(&seat) {
            Ok(availability) => writeln!(self.output, "{availability}")?,
            Err(Error::InvalidSeat { .. }) => writeln!(
                self.output,
                "Invalid seat. Please enter again (e.g. 1A)."
            )?,
            Err(err) => self.report_failure("check", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn book(&mut self) -> Result<Flow> {
        let Some(seat) = self.prompt("Enter seat to book (e.g. 2D): ")? else {
            return Ok(Flow::Exit);
        };

        // Only ask for passenger details when the seat can actually be booked.
        match self.ledger.check_seat(&seat) {
            Ok(Availability::Free) => {}
            Ok(Availability::Reserved) => {
                writeln!(self.output, "Seat is already booked.")?;
                return Ok(Flow::Continue);
            }
            Ok(Availability::Unbookable) => {
                writeln!(self.output, "This seat cannot be booked.")?;
                return Ok(Flow::Continue);
            }
            Err(_) => {
                writeln!(self.output, "Invalid seat input.")?;
                return Ok(Flow::Continue);
            }
        }

        let Some(passport) = self.prompt("Passport number: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(first_name) = self.prompt("First name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(last_name) = self.prompt("Last name: ")? else {
            return Ok(Flow::Exit);
        };

        let passenger = Passenger::new(passport, first_name, last_name);
        match self.ledger.book_seat(&seat, passenger) {
            Ok(reference) => writeln!(
                self.output,
                "Seat booked successfully. Your booking reference is {reference}."
            )?,
            Err(Error::SeatUnavailable {
                reason: Unavailable::AlreadyBooked,
                ..
            }) => writeln!(self.output, "Seat is already booked.")?,
            Err(Error::SeatUnavailable { .. }) => {
                writeln!(self.output, "This seat cannot be booked.")?;
            }
            Err(Error::InvalidSeat { .. }) => writeln!(self.output, "Invalid seat input.")?,
            Err(err) => self.report_failure("booking", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn cancel(&mut self) -> Result<Flow> {
        let Some(seat) = self.prompt("Enter seat to cancel (e.g. 2D): ")? else {
            return Ok(Flow::Exit);
        };

        match self.ledger.cancel_seat(&seat) {
            Ok(booking) => writeln!(
                self.output,
                "Booking {} cancelled successfully.",
                booking.reference
            )?,
            Err(Error::NotBooked { .. }) => {
                writeln!(self.output, "This seat is not currently booked.")?;
            }
            Err(Error::InvalidSeat { .. }) => writeln!(self.output, "Invalid seat input.")?,
            Err(err) => self.report_failure("cancellation", &err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_status(&mut self) -> Result<Flow> {
        writeln!(self.output, "\nCurrent Seat Layout:")?;
        write!(self.output, "{}", self.ledger.render_layout())?;
        Ok(Flow::Continue)
    }

    fn show_remaining(&mut self) -> Result<Flow> {
        writeln!(
            self.output,
            "\nThere are {} seat(s) available for booking.",
            self.ledger.count_free()
        )?;
        Ok(Flow::Continue)
    }

    fn report_failure(&mut self, action: &str, err: &Error) -> Result<()> {
        error!("{} failed: {}", action, err);
        writeln!(self.output, "The {action} could not be completed: {err}")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::grid::Layout;
    use crate::logging::init_test_logging;
    use crate::reference::ReferenceGenerator;
    use crate::store::MemoryStore;

    fn ledger() -> SeatLedger {
        SeatLedger::open_with(
            &Layout::parse(&["FFXFF", "FRXFS", "FFXRF"]).unwrap(),
            Box::new(MemoryStore::new()),
            ReferenceGenerator::seeded(9),
        )
        .unwrap()
    }

    fn run_session(ledger: &mut SeatLedger, script: &str) -> String {
        init_test_logging();
        let mut output = Vec::new();
        Menu::new(ledger, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Check));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::Book));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Cancel));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::ShowStatus));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Remaining));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
        assert_eq!(MenuChoice::parse("one"), None);
    }

    #[test]
    fn test_exit_option() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "5\n");
        assert!(out.contains("1. Check seat availability"));
        assert!(out.contains("Exiting the system. Goodbye!"));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "");
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "9\n5\n");
        assert!(out.contains("Invalid input. Please enter a number between 1 and 6."));
        assert_eq!(out.matches("===== Seat Booking System =====").count(), 2);
    }

    #[test]
    fn test_check_seat_messages() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "1\n1a\n1\n2B\n1\n1C\n1\n9Z\n5\n");
        assert!(out.contains("The seat is available."));
        assert!(out.contains("The seat is already booked."));
        assert!(out.contains("This seat cannot be booked (aisle or storage)."));
        assert!(out.contains("Invalid seat. Please enter again (e.g. 1A)."));
    }

    #[test]
    fn test_book_seat_flow() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "2\n1A\nP1234567\nAda\nLovelace\n5\n");
        assert!(out.contains("Seat booked successfully. Your booking reference is "));
        assert_eq!(
            ledger.check_seat("1A").unwrap(),
            crate::seat::Availability::Reserved
        );

        let bookings = ledger.bookings().unwrap();
        let booking = bookings.iter().find(|b| b.seat.to_string() == "1A").unwrap();
        assert_eq!(booking.passenger.first_name, "Ada");
        assert!(out.contains(booking.reference.as_str()));
    }

    #[test]
    fn test_book_unavailable_seats_skip_passenger_prompts() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "2\n2B\n2\n2E\n2\nA1\n5\n");
        assert!(out.contains("Seat is already booked."));
        assert!(out.contains("This seat cannot be booked."));
        assert!(out.contains("Invalid seat input."));
        assert!(!out.contains("Passport number:"));
    }

    #[test]
    fn test_cancel_flow() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "3\n1A\n3\n2B\n3\n\n5\n");
        assert!(out.contains("This seat is not currently booked."));
        assert!(out.contains("cancelled successfully."));
        assert!(out.contains("Invalid seat input."));
        assert_eq!(ledger.count_free(), 10);
    }

    #[test]
    fn test_show_status_and_remaining() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "4\n6\n5\n");
        assert!(out.contains("Current Seat Layout:"));
        assert!(out.contains("   A B C D E"));
        assert!(out.contains("2  F R X F S"));
        assert!(out.contains("There are 9 seat(s) available for booking."));
    }

    #[test]
    fn test_input_ending_mid_booking() {
        let mut ledger = ledger();
        let out = run_session(&mut ledger, "2\n1A\nP1\n");
        assert!(out.contains("First name: "));
        assert!(out.contains("Goodbye!"));
        assert_eq!(ledger.count_free(), 9);
    }
}
