//! Products and the validation boundary in front of them.
//!
//! Store rows arrive as a [`ProductDraft`]. Only [`ProductDraft::validate`]
//! produces a [`Product`], so a `Product` in hand always has a non-empty name,
//! a non-negative price, and a category.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Category, PhoneError, Price, PriceError, ProductId, SlugError, VendorId};

/// Malformed product or vendor data rejected at the boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The product name is blank.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The vendor's business name is blank.
    #[error("business name cannot be empty")]
    EmptyBusinessName,
    /// The price is not a usable amount.
    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
    /// The store slug is not usable.
    #[error("invalid store slug: {0}")]
    Slug(#[from] SlugError),
    /// The contact number is not usable.
    #[error("invalid whatsapp number: {0}")]
    Phone(#[from] PhoneError),
}

/// A product offered by one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Category,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// An unvalidated product record as returned by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub id: ProductId,
    pub vendor_id: VendorId,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ProductDraft {
    /// Validate the record into a [`Product`].
    ///
    /// Trims the name, rejects negative prices, and defaults a missing or
    /// blank category to [`Category::GENERAL`]. Blank descriptions and image
    /// URLs become `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] for a blank name and
    /// [`ValidationError::Price`] for a negative price.
    pub fn validate(self) -> Result<Product, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let price = Price::new(self.price)?;

        Ok(Product {
            id: self.id,
            vendor_id: self.vendor_id,
            name: name.to_owned(),
            price,
            description: non_blank(self.description),
            image_url: non_blank(self.image_url),
            category: Category::from_raw(self.category.as_deref()),
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            id: ProductId::generate(),
            vendor_id: VendorId::generate(),
            name: "  Jollof Rice ".to_string(),
            price: Decimal::new(1500, 0),
            description: Some(String::new()),
            image_url: None,
            category: None,
            is_active: true,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_validate_trims_and_defaults() {
        let product = draft().validate().unwrap();
        assert_eq!(product.name, "Jollof Rice");
        assert_eq!(product.category.as_str(), Category::GENERAL);
        assert_eq!(product.description, None);
        assert_eq!(product.price.amount(), Decimal::new(1500, 0));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert!(matches!(d.validate(), Err(ValidationError::EmptyName)));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut d = draft();
        d.price = Decimal::new(-1, 0);
        assert!(matches!(
            d.validate(),
            Err(ValidationError::Price(PriceError::Negative(_)))
        ));
    }

    #[test]
    fn test_validate_keeps_category() {
        let mut d = draft();
        d.category = Some("Drinks".to_string());
        assert_eq!(d.validate().unwrap().category.as_str(), "Drinks");
    }

    #[test]
    fn test_product_json_without_category() {
        let product = draft().validate().unwrap();
        let mut value = serde_json::to_value(&product).unwrap();
        value.as_object_mut().unwrap().remove("category");

        let parsed: Product = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.category, Category::general());
    }
}
