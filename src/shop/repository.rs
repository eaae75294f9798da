use super::accounts::{User, UserId, seed_users};
use super::cart::CartLine;
use super::catalog::{Product, ProductId, seed_products};
use super::orders::{Order, OrderId};
use parking_lot::RwLock;

/// Storage seam for the storefront's products, users and orders.
pub trait ShopRepository: Send + Sync {
    fn products(&self) -> Vec<Product>;
    fn product(&self, id: ProductId) -> Option<Product>;
    fn find_user(&self, username: &str) -> Option<User>;
    fn user(&self, id: UserId) -> Option<User>;
    /// Creates a user, or returns `None` when the username is taken.
    fn create_user(&self, username: &str, password: &str, email: &str) -> Option<User>;
    /// Records an order for the given lines under a fresh order id.
    fn place_order(&self, user_id: UserId, lines: &[CartLine]) -> Order;
    fn orders_for(&self, user_id: UserId) -> Vec<Order>;
}

/// Process-local lists, seeded with the demo catalogue and admin account.
#[derive(Debug)]
pub struct MemoryShop {
    products: RwLock<Vec<Product>>,
    users: RwLock<Vec<User>>,
    orders: RwLock<Vec<Order>>,
}

impl MemoryShop {
    pub fn new(products: Vec<Product>, users: Vec<User>) -> Self {
        Self {
            products: RwLock::new(products),
            users: RwLock::new(users),
            orders: RwLock::new(Vec::new()),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_products(), seed_users())
    }
}

impl Default for MemoryShop {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ShopRepository for MemoryShop {
    fn products(&self) -> Vec<Product> {
        self.products.read().clone()
    }

    fn product(&self, id: ProductId) -> Option<Product> {
        self.products.read().iter().find(|p| p.id == id).cloned()
    }

    fn find_user(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    fn user(&self, id: UserId) -> Option<User> {
        self.users.read().iter().find(|u| u.id == id).cloned()
    }

    fn create_user(&self, username: &str, password: &str, email: &str) -> Option<User> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.username == username) {
            return None;
        }
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User::new(id, username, password, email);
        users.push(user.clone());
        Some(user)
    }

    fn place_order(&self, user_id: UserId, lines: &[CartLine]) -> Order {
        let mut orders = self.orders.write();
        let id: OrderId = orders.iter().map(|o| o.id).max().unwrap_or(0) + 1;
        let order = Order::from_cart_lines(id, user_id, lines);
        orders.push(order.clone());
        order
    }

    fn orders_for(&self, user_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }
}
