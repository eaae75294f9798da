//! Tests for the storefront: catalogue, cart, accounts and checkout.
use rigboard::prelude::*;
use rigboard::shop::accounts::hash_password;
use rigboard::shop::{CartChange, MemoryShop, Product};
use std::sync::Arc;

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_catalogue_filters() {
    let shop = Shop::in_memory();
    assert_eq!(shop.products(None, None).len(), 4);
    assert_eq!(
        names(&shop.products(Some("clothing"), None)),
        vec!["T-Shirt"]
    );
    assert_eq!(
        names(&shop.products(None, Some("NOISE"))),
        vec!["Headphones"]
    );
    assert_eq!(
        names(&shop.products(Some("Electronics"), Some("smart"))),
        vec!["Smartphone"]
    );
    assert!(shop.products(Some("Garden"), None).is_empty());
    assert_eq!(shop.categories(), vec!["Electronics", "Clothing"]);
}

#[test]
fn test_cart_add_increments_existing_entry() {
    let shop = Shop::in_memory();
    let mut cart = Cart::new();

    assert_eq!(shop.add_to_cart(&mut cart, 1), Some(CartChange::Added));
    assert_eq!(shop.add_to_cart(&mut cart, 1), Some(CartChange::Incremented));
    assert_eq!(shop.add_to_cart(&mut cart, 4), Some(CartChange::Added));

    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.quantity_of(1), 2);
    assert_eq!(cart.item_count(), 3);
}

#[test]
fn test_cart_ignores_unknown_products() {
    let shop = Shop::in_memory();
    let mut cart = Cart::new();
    assert_eq!(shop.add_to_cart(&mut cart, 99), None);
    assert!(cart.is_empty());
}

#[test]
fn test_cart_update_and_remove() {
    let mut cart = Cart::new();
    cart.add(2);
    cart.add(3);

    assert!(cart.update(2, 5));
    assert_eq!(cart.quantity_of(2), 5);
    assert!(!cart.update(4, 1));

    // Zero quantity removes the entry.
    assert!(cart.update(2, 0));
    assert_eq!(cart.quantity_of(2), 0);

    assert!(cart.remove(3));
    assert!(!cart.remove(3));
    assert!(cart.is_empty());
}

#[test]
fn test_cart_lines_and_total() {
    let shop = Shop::in_memory();
    let mut cart = Cart::new();
    shop.add_to_cart(&mut cart, 4);
    shop.add_to_cart(&mut cart, 4);
    shop.add_to_cart(&mut cart, 3);

    let lines = shop.cart_lines(&cart);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product.name, "T-Shirt");
    assert!((lines[0].subtotal - 39.98).abs() < 1e-9);

    let total = cart.total(&shop.products(None, None));
    assert!((total - 189.97).abs() < 1e-9);
}

#[test]
fn test_seeded_admin_can_log_in() {
    let shop = Shop::in_memory();
    let user = shop.login("admin", "admin").unwrap();
    assert_eq!(user.username, "admin");
    assert_eq!(user.email, "admin@shop.com");
    assert_eq!(
        shop.login("admin", "wrong").unwrap_err(),
        ShopError::InvalidCredentials
    );
    assert_eq!(
        shop.login("nobody", "admin").unwrap_err(),
        ShopError::InvalidCredentials
    );
}

#[test]
fn test_register_then_login() {
    let shop = Shop::in_memory();
    let user = shop.register("carol", "s3cret", "carol@example.com").unwrap();
    assert_eq!(shop.login("carol", "s3cret").unwrap().id, user.id);
    assert_eq!(shop.user(user.id).unwrap().email, "carol@example.com");

    assert_eq!(
        shop.register("carol", "other", "").unwrap_err(),
        ShopError::UsernameTaken("carol".to_string())
    );
    assert_eq!(
        shop.register("  ", "pw", "").unwrap_err(),
        ShopError::MissingFields
    );
}

#[test]
fn test_passwords_are_not_serialized() {
    let shop = Shop::in_memory();
    let user = shop.login("admin", "admin").unwrap();
    let json = serde_json::to_value(&user).unwrap();
    assert!(json.get("password_hash").is_none());
    assert!(user.verify_password("admin"));
    assert_eq!(hash_password("admin", "admin").len(), 64);
}

#[test]
fn test_checkout_requires_login_and_items() {
    let shop = Shop::in_memory();
    let mut cart = Cart::new();
    shop.add_to_cart(&mut cart, 1);

    assert_eq!(
        shop.checkout(None, &mut cart).unwrap_err(),
        ShopError::NotLoggedIn
    );
    assert!(!cart.is_empty());

    let admin = shop.login("admin", "admin").unwrap();
    let mut empty = Cart::new();
    assert_eq!(
        shop.checkout(Some(admin.id), &mut empty).unwrap_err(),
        ShopError::EmptyCart
    );
}

#[test]
fn test_checkout_records_order_and_clears_cart() {
    let shop = Shop::new(Arc::new(MemoryShop::seeded()));
    let admin = shop.login("admin", "admin").unwrap();
    let mut cart = Cart::new();
    shop.add_to_cart(&mut cart, 2);
    shop.add_to_cart(&mut cart, 2);

    let order = shop.checkout(Some(admin.id), &mut cart).unwrap();
    assert!(cart.is_empty());
    assert_eq!(order.id, 1);
    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].quantity, 2);
    assert!((order.total - 1399.98).abs() < 1e-9);

    shop.add_to_cart(&mut cart, 4);
    let second = shop.checkout(Some(admin.id), &mut cart).unwrap();
    assert_eq!(second.id, 2);

    let orders = shop.orders_for(admin.id);
    assert_eq!(orders.len(), 2);
    let other = shop.register("dave", "pw", "").unwrap();
    assert!(shop.orders_for(other.id).is_empty());
}
