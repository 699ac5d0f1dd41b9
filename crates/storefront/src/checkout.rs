//! Checkout hand-off: cart to WhatsApp message and `wa.me` link.
//!
//! There is no order backend. Checkout renders the vendor's share of the cart
//! into a fixed message layout and returns the deep link that opens a chat
//! with that message prefilled:
//!
//! ```text
//! Hello {business_name}, I want to place an order:
//!
//! ▪️ {name} (x{quantity}) - {symbol}{line subtotal}
//! ...
//!
//! Total: {symbol}{total}
//!
//! Please confirm my order.
//! ```
//!
//! Only line items belonging to the vendor being checked out are included.
//! Items from other stores stay in the cart for their own checkout.
//!
//! The `text` parameter is encoded like JavaScript's `encodeURIComponent`:
//! ASCII letters, digits and `- _ . ! ~ * ' ( )` pass through, every other
//! byte of the UTF-8 message is percent-encoded.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rust_decimal::Decimal;
use serde::Serialize;

use whatsstore_core::{CurrencyCode, Vendor, WhatsAppNumber};

use crate::cart::Cart;

/// Bytes left unescaped in the `text` parameter.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Bullet in front of every line item.
pub const LINE_MARKER: &str = "\u{25aa}\u{fe0f}";

/// Closing line of every order message.
pub const CONFIRMATION_LINE: &str = "Please confirm my order.";

/// Base of the deep link.
pub const WA_ME_BASE: &str = "https://wa.me";

/// A rendered checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkout {
    /// Plain message text.
    pub message: String,
    /// `https://wa.me/{digits}?text={encoded message}`.
    pub deep_link: String,
    /// Total of the included line items.
    pub total: Decimal,
    /// Number of line items included in the message.
    pub included_items: usize,
    /// Line items left out because they belong to another vendor.
    pub excluded_items: usize,
}

impl Checkout {
    /// Whether the message lists no items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.included_items == 0
    }
}

/// Renders checkouts in one currency.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutFormatter {
    currency: CurrencyCode,
}

impl CheckoutFormatter {
    /// Formatter for `currency`.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self { currency }
    }

    /// Currency used for amounts.
    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Render `vendor`'s share of `cart`.
    ///
    /// Deterministic: the same cart and vendor always give byte-identical
    /// output.
    #[must_use]
    pub fn format_checkout(&self, cart: &Cart, vendor: &Vendor) -> Checkout {
        let mut message = format!(
            "Hello {}, I want to place an order:\n\n",
            vendor.business_name
        );

        let mut total = Decimal::ZERO;
        let mut included_items = 0;
        for item in cart.items_for_vendor(vendor.id) {
            let subtotal = item.subtotal();
            total = total.saturating_add(subtotal);
            included_items += 1;
            message.push_str(&format!(
                "{LINE_MARKER} {} (x{}) - {}\n",
                item.product.name,
                item.quantity,
                self.currency.display(subtotal)
            ));
        }

        message.push_str(&format!("\nTotal: {}", self.currency.display(total)));
        message.push_str("\n\n");
        message.push_str(CONFIRMATION_LINE);

        let deep_link = deep_link(&vendor.whatsapp_number, &message);

        Checkout {
            message,
            deep_link,
            total,
            included_items,
            excluded_items: cart.len() - included_items,
        }
    }
}

/// Build the `wa.me` link that opens a chat with `message` prefilled.
#[must_use]
pub fn deep_link(number: &WhatsAppNumber, message: &str) -> String {
    format!(
        "{WA_ME_BASE}/{}?text={}",
        number.as_str(),
        utf8_percent_encode(message, URI_COMPONENT)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use whatsstore_core::{Price, StoreSlug, VendorId};

    use super::*;
    use crate::cart::CartLineItem;
    use crate::cart::tests::{product, product_for};

    fn vendor() -> Vendor {
        Vendor {
            id: VendorId::generate(),
            business_name: "Mama Put".to_string(),
            store_slug: StoreSlug::normalize("mama-put"),
            whatsapp_number: WhatsAppNumber::parse("2348000000000").unwrap(),
            avatar_url: None,
        }
    }

    fn scenario_cart(vendor: &Vendor) -> Cart {
        let rice = product_for(vendor.id, "Rice", "1500");
        let drink = product_for(vendor.id, "Drink", "300");
        let mut cart = Cart::new();
        cart.add(rice.clone());
        cart.add(rice);
        cart.add(drink);
        cart
    }

    #[test]
    fn test_message_layout() {
        let vendor = vendor();
        let checkout = CheckoutFormatter::default().format_checkout(&scenario_cart(&vendor), &vendor);

        let expected = "Hello Mama Put, I want to place an order:\n\n\
                        \u{25aa}\u{fe0f} Rice (x2) - \u{20a6}3,000\n\
                        \u{25aa}\u{fe0f} Drink (x1) - \u{20a6}300\n\
                        \n\
                        Total: \u{20a6}3,300\n\
                        \n\
                        Please confirm my order.";
        assert_eq!(checkout.message, expected);
        assert_eq!(checkout.total, Decimal::new(3300, 0));
        assert_eq!(checkout.included_items, 2);
        assert_eq!(checkout.excluded_items, 0);
    }

    #[test]
    fn test_deep_link_targets_number() {
        let vendor = vendor();
        let checkout = CheckoutFormatter::default().format_checkout(&scenario_cart(&vendor), &vendor);
        assert!(checkout.deep_link.starts_with("https://wa.me/2348000000000?text="));
    }

    #[test]
    fn test_deep_link_decodes_to_message() {
        let vendor = vendor();
        let checkout = CheckoutFormatter::default().format_checkout(&scenario_cart(&vendor), &vendor);
        let (_, encoded) = checkout.deep_link.split_once("?text=").unwrap();

        assert!(!encoded.contains(' '));
        assert!(!encoded.contains('\n'));
        assert_eq!(
            percent_encoding::percent_decode_str(encoded)
                .decode_utf8()
                .unwrap(),
            checkout.message
        );
    }

    #[test]
    fn test_deep_link_matches_uri_component_encoding() {
        let number = WhatsAppNumber::parse("2348000000000").unwrap();
        assert_eq!(
            deep_link(&number, "Rice (x2) - ok!"),
            "https://wa.me/2348000000000?text=Rice%20(x2)%20-%20ok!"
        );
        assert_eq!(
            deep_link(&number, "a~b*c'd_e.f\n&=?#+/"),
            "https://wa.me/2348000000000?text=a~b*c'd_e.f%0A%26%3D%3F%23%2B%2F"
        );
        assert_eq!(
            deep_link(&number, "\u{25aa}\u{fe0f} \u{20a6}3,300"),
            "https://wa.me/2348000000000?text=%E2%96%AA%EF%B8%8F%20%E2%82%A63%2C300"
        );
    }

    #[test]
    fn test_order_lines_keep_literal_parentheses() {
        let vendor = vendor();
        let checkout = CheckoutFormatter::default().format_checkout(&scenario_cart(&vendor), &vendor);
        assert!(checkout.deep_link.contains("Rice%20(x2)%20-%20"));
        assert!(!checkout.deep_link.contains("%28"));
    }

    #[test]
    fn test_ceiling_priced_cart_formats() {
        let vendor = vendor();
        let max = Price::MAX.to_string();
        let cart = Cart::from_items((0..2).map(|_| CartLineItem {
            product: product_for(vendor.id, "Gold", &max),
            quantity: u32::MAX,
        }));

        let checkout = CheckoutFormatter::default().format_checkout(&cart, &vendor);
        assert_eq!(checkout.total, cart.total_price());
        assert_eq!(checkout.included_items, 2);
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let vendor = vendor();
        let cart = scenario_cart(&vendor);
        let formatter = CheckoutFormatter::default();
        assert_eq!(
            formatter.format_checkout(&cart, &vendor),
            formatter.format_checkout(&cart, &vendor)
        );
    }

    #[test]
    fn test_other_vendor_items_are_excluded() {
        let vendor = vendor();
        let mut cart = scenario_cart(&vendor);
        cart.add(product("Shoes", "25000"));

        let checkout = CheckoutFormatter::default().format_checkout(&cart, &vendor);
        assert!(!checkout.message.contains("Shoes"));
        assert_eq!(checkout.total, Decimal::new(3300, 0));
        assert_eq!(checkout.excluded_items, 1);
    }

    #[test]
    fn test_empty_checkout() {
        let vendor = vendor();
        let checkout = CheckoutFormatter::default().format_checkout(&Cart::new(), &vendor);
        assert!(checkout.is_empty());
        assert!(checkout.message.contains("Total: \u{20a6}0"));
    }

    #[test]
    fn test_currency_symbol_follows_formatter() {
        let vendor = vendor();
        let checkout =
            CheckoutFormatter::new(CurrencyCode::USD).format_checkout(&scenario_cart(&vendor), &vendor);
        assert!(checkout.message.contains("Total: $3,300"));
    }

    #[test]
    fn test_large_amounts_use_separators() {
        let vendor = vendor();
        let mut cart = Cart::new();
        let fridge = product_for(vendor.id, "Fridge", "1250000.5");
        cart.add(fridge.clone());
        cart.add(fridge);

        let checkout = CheckoutFormatter::default().format_checkout(&cart, &vendor);
        assert!(checkout.message.contains("Fridge (x2) - \u{20a6}2,500,001\n"));
    }
}
