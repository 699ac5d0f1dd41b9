//! Product display category.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Display category for grouping products on a storefront.
///
/// Categories carry no ordering or hierarchy; they only decide which group a
/// product is shown under. A missing or blank category becomes
/// [`Category::GENERAL`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>")]
pub struct Category(String);

impl Category {
    /// Sentinel category for products without one.
    pub const GENERAL: &'static str = "General";

    /// Build a category from a possibly missing store value.
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(name) if !name.is_empty() => Self(name.to_owned()),
            _ => Self::general(),
        }
    }

    /// The sentinel category.
    #[must_use]
    pub fn general() -> Self {
        Self(Self::GENERAL.to_owned())
    }

    /// Returns the category name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::general()
    }
}

impl From<Option<String>> for Category {
    fn from(raw: Option<String>) -> Self {
        Self::from_raw(raw.as_deref())
    }
}

impl From<&str> for Category {
    fn from(raw: &str) -> Self {
        Self::from_raw(Some(raw))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_category_is_general() {
        assert_eq!(Category::from_raw(None).as_str(), "General");
        assert_eq!(Category::from_raw(Some("   ")).as_str(), "General");
        assert_eq!(Category::default().as_str(), "General");
    }

    #[test]
    fn test_category_is_trimmed() {
        assert_eq!(Category::from(" Drinks ").as_str(), "Drinks");
    }

    #[test]
    fn test_deserialize_null_is_general() {
        let category: Category = serde_json::from_str("null").unwrap();
        assert_eq!(category, Category::general());

        let category: Category = serde_json::from_str("\"Shoes\"").unwrap();
        assert_eq!(category.as_str(), "Shoes");
    }
}
