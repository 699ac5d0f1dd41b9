//! Local cart commands.
//!
//! The cart is a JSON snapshot in `WHATSSTORE_CART_DIR` (default
//! `.whatsstore`), so it survives between invocations the way a browser cart
//! survives page reloads. Only `add` and `checkout` touch the database.

use std::path::PathBuf;

use whatsstore_core::{CurrencyCode, ProductId, Vendor};
use whatsstore_storefront::cart::{Cart, CartEngine, FileCartStore};
use whatsstore_storefront::checkout::CheckoutFormatter;

/// Default directory for the local cart snapshot.
const DEFAULT_CART_DIR: &str = ".whatsstore";

/// The terminal shopper's cart.
pub struct LocalCart {
    engine: CartEngine<FileCartStore>,
    currency: CurrencyCode,
}

impl LocalCart {
    /// Open the cart in `WHATSSTORE_CART_DIR`.
    ///
    /// # Errors
    ///
    /// Returns an error if `STOREFRONT_CURRENCY` is not a supported code.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let dir = std::env::var("WHATSSTORE_CART_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_CART_DIR), PathBuf::from);
        Ok(Self::open_in(dir, super::currency()?))
    }

    fn open_in(dir: PathBuf, currency: CurrencyCode) -> Self {
        Self {
            engine: CartEngine::open(FileCartStore::new(dir)),
            currency,
        }
    }

    /// Add one unit of a product from a store's active catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed, the store does not resolve, or
    /// the product is not in its active catalog.
    pub async fn add(mut self, slug: &str, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        let id = parse_id(product_id)?;
        let resolved = super::resolver().await?.resolve(slug).await?;
        let product = resolved
            .catalog
            .product(id)
            .cloned()
            .ok_or_else(|| format!("product {id} is not available in '{slug}'"))?;

        self.engine.add_to_cart(product);
        self.show();
        Ok(())
    }

    /// Add one unit to a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed.
    pub fn increase(mut self, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.engine.increase_quantity(parse_id(product_id)?);
        self.show();
        Ok(())
    }

    /// Remove one unit from a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed.
    pub fn decrease(mut self, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.engine.decrease_quantity(parse_id(product_id)?);
        self.show();
        Ok(())
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is malformed.
    pub fn remove(mut self, product_id: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.engine.remove_from_cart(parse_id(product_id)?);
        self.show();
        Ok(())
    }

    /// Empty the cart.
    pub fn clear(mut self) {
        self.engine.clear_cart();
        self.show();
    }

    /// Print the cart.
    pub fn show(&self) {
        #[allow(clippy::print_stdout)]
        {
            println!("{}", render_cart(self.engine.cart(), self.currency));
        }
    }

    /// Print the WhatsApp order message and link for a store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store does not resolve or the cart holds
    /// nothing from it.
    pub async fn checkout(self, slug: &str) -> Result<(), Box<dyn std::error::Error>> {
        let resolved = super::resolver().await?.resolve(slug).await?;
        let text = render_checkout(self.engine.cart(), &resolved.vendor, self.currency)?;

        #[allow(clippy::print_stdout)]
        {
            println!("{text}");
        }
        Ok(())
    }
}

/// Order message, link, and a note about other stores' items.
///
/// Refuses a cart with nothing from `vendor`.
fn render_checkout(
    cart: &Cart,
    vendor: &Vendor,
    currency: CurrencyCode,
) -> Result<String, Box<dyn std::error::Error>> {
    let checkout = CheckoutFormatter::new(currency).format_checkout(cart, vendor);
    if checkout.is_empty() {
        return Err(format!("cart has no items from '{}'", vendor.store_slug).into());
    }

    let mut out = format!("{}\n\n{}", checkout.message, checkout.deep_link);
    if checkout.excluded_items > 0 {
        out.push_str(&format!(
            "\n\n({} item(s) from other stores stay in the cart)",
            checkout.excluded_items
        ));
    }
    Ok(out)
}

fn parse_id(raw: &str) -> Result<ProductId, Box<dyn std::error::Error>> {
    raw.trim()
        .parse::<ProductId>()
        .map_err(|e| format!("invalid product id '{raw}': {e}").into())
}

fn render_cart(cart: &Cart, currency: CurrencyCode) -> String {
    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        out.push_str(&format!(
            "{}  {} (x{})  {}\n",
            item.id(),
            item.product.name,
            item.quantity,
            currency.display(item.subtotal())
        ));
    }
    out.push_str(&format!(
        "\n{} item(s), total {}",
        cart.item_count(),
        currency.display(cart.total_price())
    ));
    out
}
