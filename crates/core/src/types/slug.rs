//! Store slug type.
//!
//! A store slug is the path segment that addresses a vendor's storefront
//! (`whatsstore.com/{slug}`). Every slug that enters the system goes through
//! [`StoreSlug::normalize`], so two spellings that differ only in case or
//! spacing always address the same store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`StoreSlug`] strictly.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The slug is empty after normalization.
    #[error("store slug cannot be empty")]
    Empty,
    /// The slug is too long.
    #[error("store slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The slug contains a character outside `[a-z0-9-]`.
    #[error("store slug may only contain letters, digits and hyphens (found {0:?})")]
    InvalidCharacter(char),
}

/// A normalized store slug.
///
/// ## Examples
///
/// ```
/// use whatsstore_core::StoreSlug;
///
/// assert_eq!(StoreSlug::normalize("Zeeluxe Fashion").as_str(), "zeeluxe-fashion");
/// assert_eq!(StoreSlug::normalize("  MAMA   Put ").as_str(), "mama-put");
///
/// assert!(StoreSlug::parse("zeeluxe").is_ok());
/// assert!(StoreSlug::parse("   ").is_err());       // empty
/// assert!(StoreSlug::parse("shop/../admin").is_err()); // invalid characters
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct StoreSlug(String);

impl StoreSlug {
    /// Maximum length of a slug (a single DNS label).
    pub const MAX_LENGTH: usize = 63;

    /// Normalize arbitrary input into a slug.
    ///
    /// Trims, lowercases, and replaces each run of whitespace with a single
    /// hyphen. This is total: it never fails, though the result may be empty
    /// or contain characters [`StoreSlug::parse`] would reject. Lookups use
    /// this form so that matching is case-insensitive.
    #[must_use]
    pub fn normalize(s: &str) -> Self {
        let lowered = s.trim().to_lowercase();
        let mut out = String::with_capacity(lowered.len());
        let mut in_space = false;
        for ch in lowered.chars() {
            if ch.is_whitespace() {
                if !in_space {
                    out.push('-');
                }
                in_space = true;
            } else {
                out.push(ch);
                in_space = false;
            }
        }
        Self(out)
    }

    /// Parse a slug for a new store.
    ///
    /// # Errors
    ///
    /// Returns an error if the normalized input:
    /// - Is empty
    /// - Is longer than 63 characters
    /// - Contains anything other than ASCII letters, digits, or hyphens
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        let slug = Self::normalize(s);

        if slug.0.is_empty() {
            return Err(SlugError::Empty);
        }

        if slug.0.chars().count() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = slug
            .0
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(SlugError::InvalidCharacter(bad));
        }

        Ok(slug)
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the normalized slug is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the slug and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoreSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for StoreSlug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for StoreSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
