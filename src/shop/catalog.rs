use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub category: String,
}

impl Product {
    fn new(
        id: ProductId,
        name: &str,
        price: f64,
        description: &str,
        image: &str,
        category: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
            description: description.to_string(),
            image: image.to_string(),
            category: category.to_string(),
        }
    }

    /// Case-insensitive category match; `None` or an empty string matches everything.
    pub fn in_category(&self, category: Option<&str>) -> bool {
        match category.map(str::trim) {
            None | Some("") => true,
            Some(c) => self.category.eq_ignore_ascii_case(c),
        }
    }

    /// Case-insensitive substring search over name and description.
    pub fn matches_query(&self, query: Option<&str>) -> bool {
        match query.map(str::trim) {
            None | Some("") => true,
            Some(q) => {
                let q = q.to_lowercase();
                self.name.to_lowercase().contains(&q) || self.description.to_lowercase().contains(&q)
            }
        }
    }
}

/// The catalogue the storefront starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 999.99, "High-performance laptop", "💻", "Electronics"),
        Product::new(2, "Smartphone", 699.99, "Latest smartphone", "📱", "Electronics"),
        Product::new(3, "Headphones", 149.99, "Noise-cancelling headphones", "🎧", "Electronics"),
        Product::new(4, "T-Shirt", 19.99, "Cotton t-shirt", "👕", "Clothing"),
    ]
}

/// Filters a product list by category and free-text query.
pub fn filter_products<'a>(
    products: &'a [Product],
    category: Option<&str>,
    query: Option<&str>,
) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.in_category(category) && p.matches_query(query))
        .collect()
}

/// Distinct categories in catalogue order.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.category.clone())
        .unique()
        .collect()
}
