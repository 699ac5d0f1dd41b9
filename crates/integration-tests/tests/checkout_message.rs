//! Shopper flow from store page to WhatsApp hand-off.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use url::Url;

use whatsstore_core::CurrencyCode;
use whatsstore_integration_tests::MemoryCatalog;
use whatsstore_storefront::cart::{CartEngine, MemoryCartStore};
use whatsstore_storefront::catalog::{CatalogResolver, ResolvedStore};
use whatsstore_storefront::checkout::{CONFIRMATION_LINE, CheckoutFormatter};

struct Market {
    resolver: CatalogResolver<MemoryCatalog>,
}

impl Market {
    fn new() -> Self {
        let catalog = MemoryCatalog::new();

        let mama = catalog.add_vendor("Mama Put", "mama-put", "+234 800 000 0000");
        catalog.add_product(mama, "Jollof Rice", "1500", Some("Food"));
        catalog.add_product(mama, "Zobo", "300", Some("Drinks"));

        let zee = catalog.add_vendor("Zeeluxe Fashion", "zeeluxe", "2348123456789");
        catalog.add_product(zee, "Ankara Shirt", "15000", Some("Clothing"));

        Self {
            resolver: CatalogResolver::new(catalog),
        }
    }

    async fn visit(&self, slug: &str) -> ResolvedStore {
        self.resolver.resolve(slug).await.unwrap()
    }
}

fn add_by_name(engine: &mut CartEngine<MemoryCartStore>, store: &ResolvedStore, name: &str) {
    let product = store
        .catalog
        .products()
        .find(|p| p.name == name)
        .cloned()
        .unwrap();
    engine.add_to_cart(product);
}

fn decoded_text(deep_link: &str) -> String {
    let url = Url::parse(deep_link).unwrap();
    url.query_pairs()
        .find(|(key, _)| key == "text")
        .map(|(_, value)| value.into_owned())
        .unwrap()
}

#[tokio::test]
async fn test_order_message_for_single_store() {
    let market = Market::new();
    let store = market.visit("mama-put").await;

    let mut engine = CartEngine::open(MemoryCartStore::new());
    add_by_name(&mut engine, &store, "Jollof Rice");
    add_by_name(&mut engine, &store, "Jollof Rice");
    add_by_name(&mut engine, &store, "Zobo");

    let checkout =
        CheckoutFormatter::new(CurrencyCode::NGN).format_checkout(engine.cart(), &store.vendor);

    assert_eq!(
        checkout.message,
        "Hello Mama Put, I want to place an order:\n\n\
         \u{25aa}\u{fe0f} Jollof Rice (x2) - \u{20a6}3,000\n\
         \u{25aa}\u{fe0f} Zobo (x1) - \u{20a6}300\n\
         \nTotal: \u{20a6}3,300\n\nPlease confirm my order."
    );
    assert_eq!(checkout.total, Decimal::new(3300, 0));
    assert_eq!(checkout.total, engine.total_price());
    assert_eq!(checkout.included_items, 2);
    assert_eq!(checkout.excluded_items, 0);
}

#[tokio::test]
async fn test_deep_link_targets_vendor_and_decodes_to_message() {
    let market = Market::new();
    let store = market.visit("mama-put").await;

    let mut engine = CartEngine::open(MemoryCartStore::new());
    add_by_name(&mut engine, &store, "Jollof Rice");

    let checkout =
        CheckoutFormatter::new(CurrencyCode::NGN).format_checkout(engine.cart(), &store.vendor);

    assert!(
        checkout
            .deep_link
            .starts_with("https://wa.me/2348000000000?text=")
    );
    assert_eq!(decoded_text(&checkout.deep_link), checkout.message);
    assert!(checkout.message.ends_with(CONFIRMATION_LINE));
}

#[tokio::test]
async fn test_mixed_cart_checks_out_one_vendor_at_a_time() {
    let market = Market::new();
    let mama = market.visit("mama-put").await;
    let zee = market.visit("zeeluxe").await;

    let mut engine = CartEngine::open(MemoryCartStore::new());
    add_by_name(&mut engine, &mama, "Jollof Rice");
    add_by_name(&mut engine, &zee, "Ankara Shirt");
    add_by_name(&mut engine, &mama, "Zobo");

    let formatter = CheckoutFormatter::new(CurrencyCode::NGN);

    let mama_checkout = formatter.format_checkout(engine.cart(), &mama.vendor);
    assert_eq!(mama_checkout.included_items, 2);
    assert_eq!(mama_checkout.excluded_items, 1);
    assert_eq!(mama_checkout.total, Decimal::new(1800, 0));
    assert!(!mama_checkout.message.contains("Ankara Shirt"));

    let zee_checkout = formatter.format_checkout(engine.cart(), &zee.vendor);
    assert_eq!(zee_checkout.included_items, 1);
    assert_eq!(zee_checkout.total, Decimal::new(15000, 0));
    assert!(zee_checkout.deep_link.starts_with("https://wa.me/2348123456789?"));

    assert_eq!(
        mama_checkout.total + zee_checkout.total,
        engine.total_price()
    );

    // Checking out leaves the cart untouched.
    assert_eq!(engine.cart().len(), 3);
}

#[tokio::test]
async fn test_cart_without_this_vendors_items_is_empty_checkout() {
    let market = Market::new();
    let mama = market.visit("mama-put").await;
    let zee = market.visit("zeeluxe").await;

    let mut engine = CartEngine::open(MemoryCartStore::new());
    add_by_name(&mut engine, &zee, "Ankara Shirt");

    let checkout =
        CheckoutFormatter::new(CurrencyCode::NGN).format_checkout(engine.cart(), &mama.vendor);
    assert!(checkout.is_empty());
    assert_eq!(checkout.total, Decimal::ZERO);
    assert!(checkout.message.contains("Total: \u{20a6}0"));
}

#[tokio::test]
async fn test_formatting_is_deterministic() {
    let market = Market::new();
    let store = market.visit("mama-put").await;

    let mut engine = CartEngine::open(MemoryCartStore::new());
    add_by_name(&mut engine, &store, "Zobo");
    add_by_name(&mut engine, &store, "Jollof Rice");

    let formatter = CheckoutFormatter::new(CurrencyCode::NGN);
    let first = formatter.format_checkout(engine.cart(), &store.vendor);
    let second = formatter.format_checkout(engine.cart(), &store.vendor);
    assert_eq!(first, second);

    // Lines follow cart order, not catalog order.
    let zobo = first.message.find("Zobo").unwrap();
    let rice = first.message.find("Jollof Rice").unwrap();
    assert!(zobo < rice);
}
