//! Pot quantity type.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One or more ASCII digits.
static DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// The input contains something other than ASCII digits.
    #[error("quantity must be a whole number")]
    NotWholeNumber,
    /// The input is a whole number but does not fit in a `u32`.
    #[error("quantity is too large")]
    TooLarge,
}

/// A non-negative number of pots.
///
/// Form fields for quantities are optional: a blank field means zero pots.
/// [`Quantity::parse`] is the single place where that defaulting happens.
///
/// ```
/// use plant_shop_core::Quantity;
///
/// assert_eq!(Quantity::parse("").unwrap(), Quantity::ZERO);
/// assert_eq!(Quantity::parse(" 3 ").unwrap().get(), 3);
/// assert!(Quantity::parse("-1").is_err());
/// assert!(Quantity::parse("1.5").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// No pots.
    pub const ZERO: Self = Self(0);

    /// Create a quantity from a count.
    #[must_use]
    pub const fn new(count: u32) -> Self {
        Self(count)
    }

    /// Parse a raw form value. Surrounding whitespace is ignored and a
    /// blank value is zero.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::NotWholeNumber`] for anything but digits and
    /// [`QuantityError::TooLarge`] when the number overflows `u32`.
    pub fn parse(raw: &str) -> Result<Self, QuantityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::ZERO);
        }
        if !DIGITS_RE.is_match(trimmed) {
            return Err(QuantityError::NotWholeNumber);
        }
        trimmed
            .parse::<u32>()
            .map(Self)
            .map_err(|_| QuantityError::TooLarge)
    }

    /// Returns the number of pots.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Whether this is zero pots.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
