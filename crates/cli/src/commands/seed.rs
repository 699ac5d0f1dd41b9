//! Seed the storefront database with vendors and products from YAML.
//!
//! The whole file is validated before connecting, so a typo never leaves a
//! half-seeded database behind.
//!
//! ```yaml
//! vendors:
//!   - id: 0b5f4c8e-6a7d-4c1e-9f35-2d1d8f3e7a10
//!     business_name: Zeeluxe Fashion
//!     store_slug: zeeluxe
//!     whatsapp_number: "+234 812 345 6789"
//!     products:
//!       - id: 5d0c1a7e-2f4b-4b8e-8f0a-9e6c3b2a1d40
//!         name: Ankara Shirt
//!         price: "15000"
//!         category: Clothing
//! ```

use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use whatsstore_core::{Product, ProductDraft, ProductId, ValidationError, Vendor, VendorDraft};
use whatsstore_storefront::db::PgCatalogStore;

/// Top level of a seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    vendors: Vec<SeedVendor>,
}

#[derive(Debug, Deserialize)]
struct SeedVendor {
    #[serde(flatten)]
    profile: VendorDraft,
    #[serde(default)]
    products: Vec<SeedProduct>,
}

#[derive(Debug, Deserialize)]
struct SeedProduct {
    id: ProductId,
    name: String,
    price: Decimal,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
}

const fn default_active() -> bool {
    true
}

/// A validated vendor with its products.
#[derive(Debug)]
struct SeedStore {
    vendor: Vendor,
    products: Vec<Product>,
}

/// Validate every vendor and product, collecting all problems.
fn validate(file: SeedFile) -> Result<Vec<SeedStore>, Vec<String>> {
    let mut stores = Vec::new();
    let mut errors = Vec::new();

    for seed in file.vendors {
        let slug = seed.profile.store_slug.clone();
        let vendor = match seed.profile.validate() {
            Ok(vendor) => vendor,
            Err(e) => {
                errors.push(format!("vendor '{slug}': {e}"));
                continue;
            }
        };

        let mut products = Vec::new();
        for p in seed.products {
            let name = p.name.clone();
            match to_product(&vendor, p) {
                Ok(product) => products.push(product),
                Err(e) => errors.push(format!("product '{name}' in '{slug}': {e}")),
            }
        }
        stores.push(SeedStore { vendor, products });
    }

    if errors.is_empty() {
        Ok(stores)
    } else {
        Err(errors)
    }
}

fn to_product(vendor: &Vendor, seed: SeedProduct) -> Result<Product, ValidationError> {
    ProductDraft {
        id: seed.id,
        vendor_id: vendor.id,
        name: seed.name,
        price: seed.price,
        description: seed.description,
        image_url: seed.image_url,
        category: seed.category,
        is_active: seed.is_active,
        created_at: Utc::now(),
    }
    .validate()
}

/// Seed vendors and products from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, any record fails
/// validation, or a database write fails.
pub async fn stores(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");
    let content = tokio::fs::read_to_string(path).await?;
    let file: SeedFile = serde_yaml::from_str(&content)?;

    let stores = validate(file).map_err(|errors| {
        error!("Seed validation failed:");
        for err in &errors {
            error!("  - {err}");
        }
        format!("{} validation errors found", errors.len())
    })?;
    info!(vendors = stores.len(), "Seed file validated");

    let catalog = PgCatalogStore::new(super::connect().await?);
    for store in &stores {
        catalog.upsert_vendor(&store.vendor).await?;
        for product in &store.products {
            catalog.upsert_product(product).await?;
        }
        info!(
            slug = %store.vendor.store_slug,
            products = store.products.len(),
            "Seeded store"
        );
    }

    info!("Seeding complete!");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SEED: &str = r#"
vendors:
  - id: 0b5f4c8e-6a7d-4c1e-9f35-2d1d8f3e7a10
    business_name: Zeeluxe Fashion
    store_slug: Zeeluxe
    whatsapp_number: "+234 812 345 6789"
    products:
      - id: 5d0c1a7e-2f4b-4b8e-8f0a-9e6c3b2a1d40
        name: Ankara Shirt
        price: "15000"
        category: Clothing
      - id: 6e1d2b8f-3a5c-4c9f-9a1b-0f7d4c3b2e51
        name: Gift Wrap
        price: 500
"#;

    #[test]
    fn test_parse_and_validate() {
        let file: SeedFile = serde_yaml::from_str(SEED).unwrap();
        let stores = validate(file).unwrap();

        let store = stores.first().unwrap();
        assert_eq!(store.vendor.store_slug.as_str(), "zeeluxe");
        assert_eq!(store.vendor.whatsapp_number.as_str(), "2348123456789");
        assert_eq!(store.products.len(), 2);

        let wrap = store.products.get(1).unwrap();
        assert_eq!(wrap.category.as_str(), "General");
        assert!(wrap.is_active);
        assert_eq!(wrap.vendor_id, store.vendor.id);
    }

    #[test]
    fn test_collects_every_error() {
        let yaml = r#"
vendors:
  - id: 0b5f4c8e-6a7d-4c1e-9f35-2d1d8f3e7a10
    business_name: Broken
    store_slug: broken
    whatsapp_number: "call me"
  - id: 1c6a5d9f-7b8e-4d2f-8a46-3e2e9a4f8b21
    business_name: Mama Put
    store_slug: mama-put
    whatsapp_number: "2348000000000"
    products:
      - id: 5d0c1a7e-2f4b-4b8e-8f0a-9e6c3b2a1d40
        name: Rice
        price: "-10"
"#;
        let file: SeedFile = serde_yaml::from_str(yaml).unwrap();
        let errors = validate(file).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.first().unwrap().contains("broken"));
        assert!(errors.get(1).unwrap().contains("Rice"));
    }
}
