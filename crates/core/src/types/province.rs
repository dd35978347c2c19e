//! Province code type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProvinceCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProvinceCodeError {
    /// The input is not exactly two uppercase ASCII letters.
    #[error("province code must be two uppercase letters")]
    InvalidFormat,
}

/// A two-letter province or territory code, e.g. `ON`.
///
/// Parsing only checks the shape of the code. Whether the shop knows a tax
/// rate for it is a question for [`crate::TaxTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProvinceCode([u8; 2]);

impl ProvinceCode {
    /// Parse a province code.
    ///
    /// # Errors
    ///
    /// Returns [`ProvinceCodeError::InvalidFormat`] unless the input is
    /// exactly two ASCII uppercase letters.
    pub fn parse(s: &str) -> Result<Self, ProvinceCodeError> {
        match s.as_bytes() {
            &[a, b] if a.is_ascii_uppercase() && b.is_ascii_uppercase() => Ok(Self([a, b])),
            _ => Err(ProvinceCodeError::InvalidFormat),
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII uppercase letters, checked in `parse`.
        core::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for ProvinceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProvinceCode {
    type Err = ProvinceCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProvinceCode {
    type Error = ProvinceCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProvinceCode> for String {
    fn from(code: ProvinceCode) -> Self {
        code.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(ProvinceCode::parse("ON").unwrap().as_str(), "ON");
        assert_eq!(ProvinceCode::parse("ZZ").unwrap().as_str(), "ZZ");
    }

    #[test]
    fn test_parse_invalid() {
        for raw in ["", "O", "on", "On", "ONT", "O1", " ON", "ÖN"] {
            assert!(ProvinceCode::parse(raw).is_err(), "input {raw:?}");
        }
    }

    #[test]
    fn test_serde_as_string() {
        let code = ProvinceCode::parse("QC").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"QC\"");
        let parsed: ProvinceCode = serde_json::from_str("\"QC\"").unwrap();
        assert_eq!(parsed, code);
        assert!(serde_json::from_str::<ProvinceCode>("\"qc\"").is_err());
    }
}
