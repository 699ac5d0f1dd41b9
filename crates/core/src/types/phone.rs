//! WhatsApp contact number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`WhatsAppNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input has no digits.
    #[error("phone number cannot be empty")]
    Empty,
    /// The input contains a character that is neither a digit nor a separator.
    #[error("phone number contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The digit count is outside the E.164 range.
    #[error("phone number must have between {min} and {max} digits (got {len})")]
    BadLength {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
        /// Digits found.
        len: usize,
    },
}

/// A vendor's WhatsApp number in international format, digits only.
///
/// `wa.me` links require the bare digits of the international number (no
/// `+`, no spaces). Parsing accepts a leading `+` and common separators so
/// vendors can paste the number the way their phone displays it.
///
/// ## Examples
///
/// ```
/// use whatsstore_core::WhatsAppNumber;
///
/// assert_eq!(WhatsAppNumber::parse("2348000000000").unwrap().as_str(), "2348000000000");
/// assert_eq!(WhatsAppNumber::parse("+234 800-000-0000").unwrap().as_str(), "2348000000000");
///
/// assert!(WhatsAppNumber::parse("").is_err());
/// assert!(WhatsAppNumber::parse("call me").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct WhatsAppNumber(String);

impl WhatsAppNumber {
    /// Shortest accepted number.
    pub const MIN_DIGITS: usize = 7;
    /// Longest accepted number (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a number, keeping only its digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Contains no digits
    /// - Contains anything other than digits, a leading `+`, spaces, `-`, `.`, `(` or `)`
    /// - Has fewer than 7 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('+').unwrap_or(trimmed);

        let mut digits = String::with_capacity(body.len());
        for ch in body.chars() {
            match ch {
                '0'..='9' => digits.push(ch),
                ' ' | '-' | '.' | '(' | ')' => {}
                other => return Err(PhoneError::InvalidCharacter(other)),
            }
        }

        if digits.is_empty() {
            return Err(PhoneError::Empty);
        }

        let len = digits.len();
        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&len) {
            return Err(PhoneError::BadLength {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                len,
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WhatsAppNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WhatsAppNumber {
    type Error = PhoneError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WhatsAppNumber> for String {
    fn from(number: WhatsAppNumber) -> Self {
        number.0
    }
}

impl std::str::FromStr for WhatsAppNumber {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
