//! Cart operations: merge-on-add, quantity deltas, removal, total

use shared::models::CartLine;
use shared::{AppError, AppResult};

use super::BillingManager;
use crate::money;

impl BillingManager {
    /// Add a product to the cart
    ///
    /// The committed quantity is `qty` when given, else the product's
    /// pending quantity, else 1. A line with identical (name, price)
    /// absorbs the quantity instead of a new line being inserted. On
    /// success the product's pending quantity resets to 0; the cart and
    /// the products record flush in one transaction so both changes land
    /// atomically. Returns the affected line.
    pub fn add_to_cart(&mut self, product_id: &str, qty: Option<i32>) -> AppResult<CartLine> {
        let product = self
            .state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| AppError::not_found("product"))?
            .clone();

        let resolved = match qty {
            Some(q) => q,
            None if product.pending_qty > 0 => product.pending_qty,
            None => 1,
        };
        money::validate_quantity(resolved)?;

        let mut staged_cart = self.state.cart.clone();
        let line_index = match staged_cart
            .iter()
            .position(|line| line.matches(&product.name, product.price))
        {
            Some(index) => {
                staged_cart[index].quantity = staged_cart[index].quantity.saturating_add(resolved);
                tracing::debug!(name = %product.name, qty = resolved, "Merged into existing cart line");
                index
            }
            None => {
                staged_cart.push(CartLine {
                    name: product.name.clone(),
                    price: product.price,
                    image: product.image.clone(),
                    quantity: resolved,
                });
                staged_cart.len() - 1
            }
        };

        let mut staged_products = self.state.products.clone();
        if let Some(p) = staged_products.iter_mut().find(|p| p.id == product_id) {
            p.pending_qty = 0;
        }

        self.storage
            .save_cart_and_products(&staged_cart, &staged_products)?;
        self.state.cart = staged_cart;
        self.state.products = staged_products;

        Ok(self.state.cart[line_index].clone())
    }

    /// Change a cart line's quantity by a delta
    ///
    /// The new quantity is clamped to >= 0; a line reaching 0 is removed
    /// entirely, never stored.
    pub fn change_line_qty(&mut self, line_index: usize, delta: i32) -> AppResult<()> {
        if line_index >= self.state.cart.len() {
            return Err(AppError::not_found("cart line"));
        }

        let mut staged = self.state.cart.clone();
        let new_qty = staged[line_index].quantity.saturating_add(delta).max(0);
        if new_qty == 0 {
            staged.remove(line_index);
        } else {
            staged[line_index].quantity = new_qty;
        }

        self.storage.save_cart(&staged)?;
        self.state.cart = staged;
        Ok(())
    }

    /// Remove a cart line
    pub fn remove_line(&mut self, line_index: usize) -> AppResult<()> {
        if line_index >= self.state.cart.len() {
            return Err(AppError::not_found("cart line"));
        }

        let mut staged = self.state.cart.clone();
        staged.remove(line_index);
        self.storage.save_cart(&staged)?;
        self.state.cart = staged;
        Ok(())
    }

    /// Empty the cart unconditionally
    ///
    /// Any confirmation policy lives with the caller.
    pub fn clear_cart(&mut self) -> AppResult<()> {
        self.storage.save_cart(&[])?;
        self.state.cart.clear();
        Ok(())
    }

    /// Cart total, recomputed on demand
    pub fn cart_total(&self) -> f64 {
        money::cart_total(&self.state.cart)
    }
}
