use super::accounts::UserId;
use super::cart::CartLine;
use super::catalog::ProductId;
use serde::Serialize;

pub type OrderId = u32;

/// A purchased line with the price paid at checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub lines: Vec<OrderLine>,
    pub total: f64,
}

impl Order {
    pub fn from_cart_lines(id: OrderId, user_id: UserId, lines: &[CartLine]) -> Self {
        let lines: Vec<OrderLine> = lines
            .iter()
            .map(|l| OrderLine {
                product_id: l.product.id,
                name: l.product.name.clone(),
                unit_price: l.product.price,
                quantity: l.quantity,
            })
            .collect();
        let total = lines
            .iter()
            .map(|l| l.unit_price * f64::from(l.quantity))
            .sum();
        Self {
            id,
            user_id,
            lines,
            total,
        }
    }
}
