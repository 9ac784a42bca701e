//! Catalog operations: product CRUD, search, pending quantity staging

use shared::models::{Product, ProductCreate, ProductUpdate};
use shared::{AppError, AppResult};

use super::BillingManager;
use crate::money;
use crate::validation::{MAX_IMAGE_LEN, MAX_NAME_LEN, validate_optional_text, validate_required_text};

impl BillingManager {
    /// Add a product to the catalog
    ///
    /// The id comes from the persisted product counter, so it stays unique
    /// under rapid successive calls and across restarts.
    pub fn add_product(&mut self, payload: ProductCreate) -> AppResult<Product> {
        validate_required_text(&payload.name, "product name", MAX_NAME_LEN)?;
        money::validate_price(payload.price, "price")?;
        validate_optional_text(&payload.image, "image", MAX_IMAGE_LEN)?;

        let product = Product {
            id: self.storage.next_product_id()?,
            name: payload.name.trim().to_string(),
            price: payload.price,
            image: payload.image,
            pending_qty: 0,
        };

        let mut staged = self.state.products.clone();
        staged.push(product.clone());
        self.storage.save_products(&staged)?;
        self.state.products = staged;

        tracing::debug!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Partially update a product; only provided fields are replaced
    pub fn update_product(&mut self, id: &str, payload: ProductUpdate) -> AppResult<Product> {
        let index = self.product_index(id)?;

        if let Some(name) = &payload.name {
            validate_required_text(name, "product name", MAX_NAME_LEN)?;
        }
        if let Some(price) = payload.price {
            money::validate_price(price, "price")?;
        }
        validate_optional_text(&payload.image, "image", MAX_IMAGE_LEN)?;

        let mut staged = self.state.products.clone();
        {
            let product = &mut staged[index];
            if let Some(name) = payload.name {
                product.name = name.trim().to_string();
            }
            if let Some(price) = payload.price {
                product.price = price;
            }
            if let Some(image) = payload.image {
                product.image = Some(image);
            }
        }
        self.storage.save_products(&staged)?;
        self.state.products = staged;

        Ok(self.state.products[index].clone())
    }

    /// Delete a product permanently
    ///
    /// Existing cart lines and bills created from it are value copies and
    /// stay untouched.
    pub fn delete_product(&mut self, id: &str) -> AppResult<()> {
        let index = self.product_index(id)?;

        let mut staged = self.state.products.clone();
        staged.remove(index);
        self.storage.save_products(&staged)?;
        self.state.products = staged;

        tracing::debug!(id, "Product deleted");
        Ok(())
    }

    /// Stage a quantity on a product before committing it to the cart
    ///
    /// Clamped to >= 0. A missing id is a silent no-op: the product may
    /// have been deleted between render and click, which is not an error
    /// the user can act on.
    pub fn set_pending_qty(&mut self, id: &str, qty: i32) -> AppResult<()> {
        self.adjust_pending_qty(id, |_| qty)
    }

    /// Adjust the staged quantity by a delta, clamped to >= 0
    pub fn increment_pending_qty(&mut self, id: &str, delta: i32) -> AppResult<()> {
        self.adjust_pending_qty(id, |current| current.saturating_add(delta))
    }

    fn adjust_pending_qty(&mut self, id: &str, f: impl FnOnce(i32) -> i32) -> AppResult<()> {
        let Some(index) = self.state.products.iter().position(|p| p.id == id) else {
            return Ok(());
        };

        let new_qty = f(self.state.products[index].pending_qty).max(0);
        if new_qty == self.state.products[index].pending_qty {
            return Ok(());
        }

        let mut staged = self.state.products.clone();
        staged[index].pending_qty = new_qty;
        self.storage.save_products(&staged)?;
        self.state.products = staged;
        Ok(())
    }

    /// Case-insensitive substring search on product names
    ///
    /// An empty query returns the whole catalog. Matches keep insertion
    /// order; no re-sorting.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.state
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn product_index(&self, id: &str) -> AppResult<usize> {
        self.state
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::not_found("product"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::tests::open_manager;
    use shared::ErrorCode;

    fn tea() -> ProductCreate {
        ProductCreate {
            name: "Tea".to_string(),
            price: 50.0,
            image: None,
        }
    }

    #[test]
    fn test_add_product_assigns_fresh_unique_ids() {
        let (_dir, mut mgr) = open_manager();
        let a = mgr.add_product(tea()).expect("add");
        let b = mgr
            .add_product(ProductCreate {
                name: "Coffee".to_string(),
                price: 80.0,
                image: None,
            })
            .expect("add");
        assert_ne!(a.id, b.id);
        assert_eq!(mgr.products().len(), 2);
        assert_eq!(mgr.products()[0].pending_qty, 0);
    }

    #[test]
    fn test_add_product_rejects_bad_input() {
        let (_dir, mut mgr) = open_manager();
        let err = mgr
            .add_product(ProductCreate {
                name: "   ".to_string(),
                price: 50.0,
                image: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = mgr
            .add_product(ProductCreate {
                name: "Tea".to_string(),
                price: f64::NAN,
                image: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = mgr
            .add_product(ProductCreate {
                name: "Tea".to_string(),
                price: -1.0,
                image: None,
            })
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(mgr.products().is_empty());
    }

    #[test]
    fn test_add_then_search_finds_product() {
        let (_dir, mut mgr) = open_manager();
        mgr.add_product(tea()).expect("add");
        let hits = mgr.search("tea");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Tea");
        assert_eq!(hits[0].price, 50.0);
    }

    #[test]
    fn test_search_is_case_insensitive_and_stable() {
        let (_dir, mut mgr) = open_manager();
        for name in ["Green Tea", "Coffee", "Iced TEA"] {
            mgr.add_product(ProductCreate {
                name: name.to_string(),
                price: 10.0,
                image: None,
            })
            .expect("add");
        }
        let hits = mgr.search("tea");
        assert_eq!(hits.len(), 2);
        // Insertion order, not alphabetical
        assert_eq!(hits[0].name, "Green Tea");
        assert_eq!(hits[1].name, "Iced TEA");

        // Empty query returns all
        assert_eq!(mgr.search("").len(), 3);
    }

    #[test]
    fn test_update_product_partial() {
        let (_dir, mut mgr) = open_manager();
        let product = mgr.add_product(tea()).expect("add");

        let updated = mgr
            .update_product(
                &product.id,
                ProductUpdate {
                    price: Some(55.0),
                    ..Default::default()
                },
            )
            .expect("update");
        assert_eq!(updated.name, "Tea");
        assert_eq!(updated.price, 55.0);
    }

    #[test]
    fn test_delete_then_update_fails_not_found() {
        let (_dir, mut mgr) = open_manager();
        let product = mgr.add_product(tea()).expect("add");
        mgr.delete_product(&product.id).expect("delete");

        let err = mgr
            .update_product(&product.id, ProductUpdate::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_pending_qty_clamps_and_ignores_missing_id() {
        let (_dir, mut mgr) = open_manager();
        let product = mgr.add_product(tea()).expect("add");

        mgr.increment_pending_qty(&product.id, 3).expect("inc");
        assert_eq!(mgr.products()[0].pending_qty, 3);

        mgr.increment_pending_qty(&product.id, -5).expect("dec");
        assert_eq!(mgr.products()[0].pending_qty, 0);

        mgr.set_pending_qty(&product.id, -2).expect("set");
        assert_eq!(mgr.products()[0].pending_qty, 0);

        // Unknown id: no-op, not an error
        mgr.set_pending_qty("P-999999", 7).expect("missing id");
        mgr.increment_pending_qty("P-999999", 1).expect("missing id");
    }
}
