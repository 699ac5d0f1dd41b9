//! Cart invariants and persistence across engine instances.

#![allow(clippy::unwrap_used)]

use chrono::Utc;
use rust_decimal::Decimal;

use whatsstore_core::{Category, Price, Product, ProductId, VendorId};
use whatsstore_storefront::cart::{
    CART_NAMESPACE, Cart, CartEngine, CartLineItem, CartSnapshot, CartStore, FileCartStore,
    MemoryCartStore,
};

fn product(vendor_id: VendorId, name: &str, price: &str) -> Product {
    Product {
        id: ProductId::generate(),
        vendor_id,
        name: name.to_string(),
        price: Price::parse(price).unwrap(),
        description: None,
        image_url: None,
        category: Category::general(),
        is_active: true,
        created_at: Utc::now(),
    }
}

fn assert_invariants(cart: &Cart) {
    for (i, item) in cart.items().iter().enumerate() {
        assert!(item.quantity >= 1, "line {i} has quantity 0");
        let dupes = cart.items().iter().filter(|o| o.id() == item.id()).count();
        assert_eq!(dupes, 1, "product {} appears {dupes} times", item.id());
    }
}

#[test]
fn test_shopping_session_keeps_invariants() {
    let vendor = VendorId::generate();
    let rice = product(vendor, "Jollof Rice", "1500");
    let drink = product(vendor, "Zobo", "300");

    let mut engine = CartEngine::open(MemoryCartStore::new());
    engine.add_to_cart(rice.clone());
    engine.add_to_cart(drink.clone());
    engine.add_to_cart(rice.clone());
    assert_invariants(engine.cart());

    engine.decrease_quantity(drink.id);
    engine.decrease_quantity(drink.id);
    assert_invariants(engine.cart());
    assert!(engine.cart().get(drink.id).is_none());

    engine.increase_quantity(drink.id);
    assert!(engine.cart().get(drink.id).is_none());

    assert_eq!(engine.item_count(), 2);
    assert_eq!(engine.total_price(), Decimal::new(3000, 0));
}

#[test]
fn test_two_increases_add_two() {
    let rice = product(VendorId::generate(), "Jollof Rice", "1500");
    let mut engine = CartEngine::open(MemoryCartStore::new());
    engine.add_to_cart(rice.clone());

    let before = engine.cart().get(rice.id).unwrap().quantity;
    engine.increase_quantity(rice.id);
    engine.increase_quantity(rice.id);

    assert_eq!(engine.cart().get(rice.id).unwrap().quantity, before + 2);
}

#[test]
fn test_add_then_remove_restores_total() {
    let vendor = VendorId::generate();
    let mut engine = CartEngine::open(MemoryCartStore::new());
    engine.add_to_cart(product(vendor, "Jollof Rice", "1500"));
    let before = engine.total_price();

    let extra = product(vendor, "Small Chops", "2499.99");
    engine.add_to_cart(extra.clone());
    engine.remove_from_cart(extra.id);

    assert_eq!(engine.total_price(), before);
}

#[test]
fn test_fractional_totals_are_exact() {
    let vendor = VendorId::generate();
    let mut engine = CartEngine::open(MemoryCartStore::new());
    let a = product(vendor, "A", "0.1");
    let b = product(vendor, "B", "0.2");
    engine.add_to_cart(a);
    engine.add_to_cart(b);

    assert_eq!(engine.total_price(), Decimal::new(3, 1));
}

#[test]
fn test_clear_empties_the_persisted_cart() {
    let store = MemoryCartStore::new();
    let mut engine = CartEngine::open(store.clone());
    engine.add_to_cart(product(VendorId::generate(), "Rice", "1500"));
    engine.clear_cart();

    let reopened = CartEngine::open(store);
    assert!(reopened.cart().is_empty());
    assert_eq!(reopened.total_price(), Decimal::ZERO);
}

#[test]
fn test_cart_survives_a_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let vendor = VendorId::generate();
    let rice = product(vendor, "Jollof Rice", "1500");
    let drink = product(vendor, "Zobo", "300");

    {
        let mut engine = CartEngine::open(FileCartStore::new(dir.path()));
        engine.add_to_cart(rice.clone());
        engine.add_to_cart(drink.clone());
        engine.increase_quantity(rice.id);
    }

    let engine = CartEngine::open(FileCartStore::new(dir.path()));
    let ids: Vec<ProductId> = engine.cart().items().iter().map(CartLineItem::id).collect();
    assert_eq!(ids, [rice.id, drink.id]);
    assert_eq!(engine.cart().get(rice.id).unwrap().quantity, 2);
    assert_eq!(engine.total_price(), Decimal::new(3300, 0));
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{CART_NAMESPACE}.json")), b"{not json").unwrap();

    let mut engine = CartEngine::open(FileCartStore::new(dir.path()));
    assert!(engine.cart().is_empty());

    let rice = product(VendorId::generate(), "Rice", "1500");
    engine.add_to_cart(rice.clone());

    let reopened = CartEngine::open(FileCartStore::new(dir.path()));
    assert_eq!(reopened.cart().get(rice.id).unwrap().quantity, 1);
}

#[test]
fn test_hand_edited_snapshot_is_normalized_on_load() {
    let vendor = VendorId::generate();
    let rice = product(vendor, "Rice", "1500");
    let drink = product(vendor, "Zobo", "300");

    let snapshot = CartSnapshot {
        version: CartSnapshot::VERSION,
        cart: vec![
            CartLineItem {
                product: rice.clone(),
                quantity: 1,
            },
            CartLineItem {
                product: drink.clone(),
                quantity: 0,
            },
            CartLineItem {
                product: rice.clone(),
                quantity: 2,
            },
        ],
    };

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{CART_NAMESPACE}.json")),
        serde_json::to_vec(&snapshot).unwrap(),
    )
    .unwrap();

    let cart = FileCartStore::new(dir.path())
        .load(CART_NAMESPACE)
        .unwrap()
        .unwrap();
    assert_invariants(&cart);
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(rice.id).unwrap().quantity, 3);
    assert!(cart.get(drink.id).is_none());
}

#[test]
fn test_engines_sharing_a_store_see_each_other_after_reload() {
    let store = MemoryCartStore::new();
    let rice = product(VendorId::generate(), "Rice", "1500");

    let mut tab_a = CartEngine::open(store.clone());
    let mut tab_b = CartEngine::open(store);

    tab_a.add_to_cart(rice.clone());
    assert!(tab_b.cart().is_empty());

    tab_b.reload();
    assert_eq!(tab_b.cart().get(rice.id).unwrap().quantity, 1);
}

#[test]
fn test_namespaces_are_isolated() {
    let store = MemoryCartStore::new();
    let rice = product(VendorId::generate(), "Rice", "1500");

    let mut first = CartEngine::open_in(store.clone(), "shopper-a");
    first.add_to_cart(rice);

    let second = CartEngine::open_in(store, "shopper-b");
    assert!(second.cart().is_empty());
}
