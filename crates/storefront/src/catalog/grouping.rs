//! Display grouping of a vendor's products.

use serde::Serialize;

use whatsstore_core::{Category, Product, ProductId};

/// Products sharing one display category, in store order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: Category,
    pub products: Vec<Product>,
}

/// A vendor's catalog partitioned by category.
///
/// Every product lands in exactly one group. Groups are ordered by the first
/// appearance of their category in the input, and products inside a group
/// keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GroupedCatalog {
    groups: Vec<CategoryGroup>,
}

impl GroupedCatalog {
    /// Group `products` by category.
    #[must_use]
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut groups: Vec<CategoryGroup> = Vec::new();
        for product in products {
            match groups.iter_mut().find(|g| g.category == product.category) {
                Some(group) => group.products.push(product),
                None => groups.push(CategoryGroup {
                    category: product.category.clone(),
                    products: vec![product],
                }),
            }
        }
        Self { groups }
    }

    /// Groups in display order.
    #[must_use]
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Look up a group by category name.
    #[must_use]
    pub fn group(&self, category: &str) -> Option<&CategoryGroup> {
        self.groups.iter().find(|g| g.category.as_str() == category)
    }

    /// Every product, group by group.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.groups.iter().flat_map(|g| g.products.iter())
    }

    /// Find a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products().find(|p| p.id == id)
    }

    /// Total number of products across all groups.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.groups.iter().map(|g| g.products.len()).sum()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
