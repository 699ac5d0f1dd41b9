//! Social preview metadata for store pages.

use serde::Serialize;

use whatsstore_core::Vendor;

const FALLBACK_TITLE: &str = "WhatsStore";
const FALLBACK_DESCRIPTION: &str = "Mini E-commerce Store for WhatsApp";

/// Title and descriptions shown when a store link is shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreMetadata {
    pub title: String,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
}

impl StoreMetadata {
    /// Metadata for a resolved vendor, or the generic site metadata.
    #[must_use]
    pub fn for_vendor(vendor: Option<&Vendor>) -> Self {
        let Some(vendor) = vendor else {
            return Self {
                title: FALLBACK_TITLE.to_owned(),
                description: FALLBACK_DESCRIPTION.to_owned(),
                og_title: FALLBACK_TITLE.to_owned(),
                og_description: FALLBACK_DESCRIPTION.to_owned(),
                og_image: None,
            };
        };

        let name = &vendor.business_name;
        Self {
            title: format!("{name} | Shop on WhatsApp"),
            description: format!(
                "Order directly from {name} on WhatsApp. Click to view products."
            ),
            og_title: name.clone(),
            og_description: format!("Order directly from {name} on WhatsApp."),
            og_image: vendor.avatar_url.clone(),
        }
    }
}
