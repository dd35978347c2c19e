//! Delivery-time tier.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Positive integer without leading zeros.
static POSITIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*$").expect("Invalid regex"));

/// Errors that can occur when parsing a [`DeliveryTier`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTierError {
    /// The input is not a positive integer without leading zeros.
    #[error("delivery tier must be a positive integer")]
    NotPositiveInteger,
}

/// Coarse delivery-speed code chosen on the form (1 = fastest).
///
/// Any positive integer parses; only the codes present in the
/// [`crate::ShippingTable`] carry a surcharge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryTier(u32);

impl DeliveryTier {
    /// Create a tier from its code.
    #[must_use]
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Parse a raw form value.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryTierError::NotPositiveInteger`] unless the input
    /// matches `^[1-9][0-9]*$` and fits in a `u32`.
    pub fn parse(raw: &str) -> Result<Self, DeliveryTierError> {
        if !POSITIVE_RE.is_match(raw) {
            return Err(DeliveryTierError::NotPositiveInteger);
        }
        raw.parse::<u32>()
            .map(Self)
            .map_err(|_| DeliveryTierError::NotPositiveInteger)
    }

    /// Returns the tier code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for DeliveryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
