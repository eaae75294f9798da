//! The storefront demo: catalogue, session cart, accounts and checkout.

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod orders;
pub mod repository;

pub use accounts::{User, UserId};
pub use cart::{Cart, CartChange, CartItem, CartLine};
pub use catalog::{Product, ProductId};
pub use orders::{Order, OrderLine};
pub use repository::{MemoryShop, ShopRepository};

use crate::error::ShopError;
use std::sync::Arc;
use tracing::info;

/// Storefront operations over an injected repository.
#[derive(Clone)]
pub struct Shop {
    repo: Arc<dyn ShopRepository>,
}

impl Shop {
    pub fn new(repo: Arc<dyn ShopRepository>) -> Self {
        Self { repo }
    }

    /// A shop backed by the seeded in-memory repository.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryShop::seeded()))
    }

    pub fn products(&self, category: Option<&str>, query: Option<&str>) -> Vec<Product> {
        let products = self.repo.products();
        catalog::filter_products(&products, category, query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        catalog::categories(&self.repo.products())
    }

    /// Adds a product to the cart. Unknown products leave the cart untouched
    /// and return `None`.
    pub fn add_to_cart(&self, cart: &mut Cart, product_id: ProductId) -> Option<CartChange> {
        self.repo.product(product_id)?;
        Some(cart.add(product_id))
    }

    pub fn cart_lines(&self, cart: &Cart) -> Vec<CartLine> {
        cart.lines(&self.repo.products())
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.repo.user(id)
    }

    pub fn register(&self, username: &str, password: &str, email: &str) -> Result<User, ShopError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ShopError::MissingFields);
        }
        let user = self
            .repo
            .create_user(username, password, email.trim())
            .ok_or_else(|| ShopError::UsernameTaken(username.to_string()))?;
        info!(user = %user.username, "registered user");
        Ok(user)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<User, ShopError> {
        self.repo
            .find_user(username.trim())
            .filter(|u| u.verify_password(password))
            .ok_or(ShopError::InvalidCredentials)
    }

    /// Turns the cart into an order for the logged-in user and empties it.
    pub fn checkout(&self, user_id: Option<UserId>, cart: &mut Cart) -> Result<Order, ShopError> {
        let user_id = user_id.ok_or(ShopError::NotLoggedIn)?;
        let lines = self.cart_lines(cart);
        if lines.is_empty() {
            return Err(ShopError::EmptyCart);
        }
        let order = self.repo.place_order(user_id, &lines);
        cart.clear();
        info!(order = order.id, user = user_id, total = order.total, "order placed");
        Ok(order)
    }

    pub fn orders_for(&self, user_id: UserId) -> Vec<Order> {
        self.repo.orders_for(user_id)
    }
}
