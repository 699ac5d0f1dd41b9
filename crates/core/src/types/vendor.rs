//! Vendor identity.

use serde::{Deserialize, Serialize};

use super::{StoreSlug, ValidationError, VendorId, WhatsAppNumber};

/// A store owner as seen by shoppers.
///
/// Resolved once per storefront visit and treated as immutable afterwards.
/// Slug uniqueness is enforced by the persistent store, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vendor {
    pub id: VendorId,
    pub business_name: String,
    pub store_slug: StoreSlug,
    pub whatsapp_number: WhatsAppNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// An unvalidated vendor record as returned by a store or seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorDraft {
    pub id: VendorId,
    pub business_name: String,
    pub store_slug: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl VendorDraft {
    /// Validate the record into a [`Vendor`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the business name is blank, the slug
    /// fails [`StoreSlug::parse`], or the number fails
    /// [`WhatsAppNumber::parse`].
    pub fn validate(self) -> Result<Vendor, ValidationError> {
        let business_name = self.business_name.trim();
        if business_name.is_empty() {
            return Err(ValidationError::EmptyBusinessName);
        }

        Ok(Vendor {
            id: self.id,
            business_name: business_name.to_owned(),
            store_slug: StoreSlug::parse(&self.store_slug)?,
            whatsapp_number: WhatsAppNumber::parse(&self.whatsapp_number)?,
            avatar_url: self.avatar_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> VendorDraft {
        VendorDraft {
            id: VendorId::generate(),
            business_name: "Zeeluxe Fashion".to_string(),
            store_slug: "Zeeluxe".to_string(),
            whatsapp_number: "+234 812 345 6789".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_validate_normalizes() {
        let vendor = draft().validate().unwrap();
        assert_eq!(vendor.store_slug.as_str(), "zeeluxe");
        assert_eq!(vendor.whatsapp_number.as_str(), "2348123456789");
    }

    #[test]
    fn test_validate_rejects_bad_number() {
        let mut d = draft();
        d.whatsapp_number = "not a number".to_string();
        assert!(matches!(d.validate(), Err(ValidationError::Phone(_))));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let mut d = draft();
        d.business_name = " ".to_string();
        assert!(matches!(
            d.validate(),
            Err(ValidationError::EmptyBusinessName)
        ));
    }
}
