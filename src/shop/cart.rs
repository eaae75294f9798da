use super::catalog::{Product, ProductId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// What `Cart::add` did, so the caller can pick a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    Added,
    Incremented,
}

/// A cart line joined with its product, ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: f64,
}

/// The cart held in a visitor's session. One entry per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all entries.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| i.product_id == product_id)
            .map_or(0, |i| i.quantity)
    }

    /// Adds one unit, bumping the existing entry if the product is already in the cart.
    pub fn add(&mut self, product_id: ProductId) -> CartChange {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity += 1;
            return CartChange::Incremented;
        }
        self.items.push(CartItem {
            product_id,
            quantity: 1,
        });
        CartChange::Added
    }

    /// Sets the quantity of an entry; zero removes it. Returns false when the
    /// product is not in the cart.
    pub fn update(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self.items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Joins the cart with the catalogue. Entries for products that no
    /// longer exist are left out.
    pub fn lines(&self, products: &[Product]) -> Vec<CartLine> {
        self.items
            .iter()
            .filter_map(|item| {
                let product = products.iter().find(|p| p.id == item.product_id)?;
                Some(CartLine {
                    product: product.clone(),
                    quantity: item.quantity,
                    subtotal: product.price * f64::from(item.quantity),
                })
            })
            .collect()
    }

    pub fn total(&self, products: &[Product]) -> f64 {
        self.lines(products).iter().map(|l| l.subtotal).sum()
    }
}
