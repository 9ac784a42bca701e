//! Cart Model

use serde::{Deserialize, Serialize};

/// One merged entry in the active order
///
/// Identity for merge purposes is the pair (name, price): two products with
/// identical name and price are indistinguishable in the cart. A line is a
/// detached copy of product data taken at the moment of selection; editing
/// the product afterwards does not change the line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    /// Unit price in currency units
    pub price: f64,
    pub image: Option<String>,
    /// Always >= 1 in the stored list; a line reaching 0 is removed
    pub quantity: i32,
}

impl CartLine {
    /// Merge identity check against a product's (name, price)
    pub fn matches(&self, name: &str, price: f64) -> bool {
        self.name == name && self.price == price
    }
}
