//! Booking reference codes.
//!
//! A reference is eight characters drawn uniformly from `A-Z0-9`. The
//! generator remembers every reference it has handed out (or been told about)
//! and redraws on collision, so references are unique within a run.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Length of a booking reference.
pub const REFERENCE_LEN: usize = 8;

/// Characters a booking reference is drawn from.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A validated booking reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BookingReference(String);

impl BookingReference {
    /// Parse a reference, accepting lower-case input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptRecord`] if the value is not eight characters
    /// from `A-Z0-9`.
    pub fn parse(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_uppercase();
        if normalized.len() == REFERENCE_LEN && normalized.bytes().all(|b| ALPHABET.contains(&b))
        {
            Ok(Self(normalized))
        } else {
            Err(Error::CorruptRecord {
                message: format!("'{value}' is not a booking reference"),
            })
        }
    }

    /// The reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookingReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BookingReference {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BookingReference> for String {
    fn from(reference: BookingReference) -> Self {
        reference.0
    }
}

/// Issues booking references that are unique within this process.
#[derive(Debug)]
pub struct ReferenceGenerator {
    issued: HashSet<BookingReference>,
    rng: StdRng,
}

impl ReferenceGenerator {
    /// Create a generator seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            issued: HashSet::new(),
            rng,
        }
    }

    /// Draw a fresh reference, retrying until it has not been seen before.
    pub fn next_reference(&mut self) -> BookingReference {
        loop {
            let candidate = self.draw();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
            tracing::debug!("Reference {} already issued, drawing again", candidate);
        }
    }

    /// Record a reference issued elsewhere (for example, restored from storage).
    ///
    /// Returns `false` if the reference was already known.
    pub fn record(&mut self, reference: BookingReference) -> bool {
        self.issued.insert(reference)
    }

    /// Whether the reference has been issued or recorded.
    #[must_use]
    pub fn contains(&self, reference: &BookingReference) -> bool {
        self.issued.contains(reference)
    }

    /// Number of references issued or recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// Whether no reference has been issued or recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }

    fn draw(&mut self) -> BookingReference {
        let code = (0..REFERENCE_LEN)
            .map(|_| char::from(ALPHABET[self.rng.gen_range(0..ALPHABET.len())]))
            .collect();
        BookingReference(code)
    }
}

impl Default for ReferenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
