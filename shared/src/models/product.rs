//! Product Model

use serde::{Deserialize, Serialize};

/// Catalog product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Assigned at creation, globally unique, never reused
    pub id: String,
    pub name: String,
    /// Unit price in currency units
    pub price: f64,
    /// Optional image as a data URI or file path
    pub image: Option<String>,
    /// Staged quantity, chosen before committing to the cart.
    /// Reset to 0 when the product is added to the cart.
    #[serde(default)]
    pub pending_qty: i32,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

/// Update product payload
///
/// Partial update: only the provided fields are replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}
