//! Contact (phone) number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ContactNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactNumberError {
    /// The input string is empty.
    #[error("Contact number is required")]
    Empty,
    /// The input is not exactly ten ASCII digits.
    #[error("Enter a valid 10-digit phone number")]
    Invalid,
}

/// A ten-digit mobile number, digits only.
///
/// ```
/// use spaceway_core::ContactNumber;
///
/// assert!(ContactNumber::parse("9876543210").is_ok());
/// assert!(ContactNumber::parse("+919876543210").is_err());
/// assert!(ContactNumber::parse("98765 43210").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactNumber(String);

impl ContactNumber {
    /// Required number of digits.
    pub const DIGITS: usize = 10;

    /// Parse a `ContactNumber` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or is not exactly ten ASCII digits.
    pub fn parse(s: &str) -> Result<Self, ContactNumberError> {
        if s.is_empty() {
            return Err(ContactNumberError::Empty);
        }

        if s.len() != Self::DIGITS || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ContactNumberError::Invalid);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(ContactNumber::parse("0123456789").is_ok());
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            ContactNumber::parse("123456789"),
            Err(ContactNumberError::Invalid)
        );
        assert_eq!(
            ContactNumber::parse("12345678901"),
            Err(ContactNumberError::Invalid)
        );
    }

    #[test]
    fn test_parse_non_digits() {
        assert_eq!(
            ContactNumber::parse("98765-4321"),
            Err(ContactNumberError::Invalid)
        );
        // Non-ASCII digits are rejected even though they are numeric
        assert_eq!(
            ContactNumber::parse("٠١٢٣٤٥٦٧٨٩"),
            Err(ContactNumberError::Invalid)
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ContactNumber::parse(""), Err(ContactNumberError::Empty));
    }
}
