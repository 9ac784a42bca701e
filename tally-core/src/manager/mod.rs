//! BillingManager - state controller for the billing core
//!
//! Owns the in-memory [`BillingState`] (the four records) and the storage
//! handle. Every mutating operation follows the same discipline:
//!
//! ```text
//! operation(input)
//!     ├─ 1. Validate input
//!     ├─ 2. Stage: clone the affected record(s), apply the change
//!     ├─ 3. Flush: write the staged record(s) through storage
//!     ├─ 4. Commit: assign the staged record(s) to in-memory state
//!     └─ 5. Return the affected entity / error
//! ```
//!
//! A failed flush surfaces a persistence error and leaves both disk and
//! memory in the pre-operation state. All operations are synchronous and
//! run to completion; the core is single-threaded by design.

mod bills;
mod cart;
mod catalog;
mod profile;

use serde::{Deserialize, Serialize};
use shared::AppResult;
use shared::models::{Bill, CartLine, Product, Profile};
use std::path::Path;

use crate::storage::BillingStorage;

/// The four persisted records, as one application-state object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingState {
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub bills: Vec<Bill>,
    pub profile: Profile,
}

/// State controller owning the billing state and its persistence
pub struct BillingManager {
    state: BillingState,
    storage: BillingStorage,
}

impl BillingManager {
    /// Open the backing database and load the persisted state
    ///
    /// Missing or corrupt records come back as empty defaults; an
    /// unreadable database propagates as a persistence error.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let storage = BillingStorage::open(path)?;
        let state = storage.load()?;
        tracing::info!(
            products = state.products.len(),
            cart_lines = state.cart.len(),
            bills = state.bills.len(),
            "Billing state loaded"
        );
        Ok(Self { state, storage })
    }

    // ==================== Read accessors ====================

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.state.cart
    }

    /// Bill history, oldest first
    pub fn bills(&self) -> &[Bill] {
        &self.state.bills
    }

    pub fn profile(&self) -> &Profile {
        &self.state.profile
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Fresh manager over a scratch database
    pub(crate) fn open_manager() -> (TempDir, BillingManager) {
        let dir = TempDir::new().expect("temp dir");
        let mgr = BillingManager::open(dir.path().join("billing.redb")).expect("open");
        (dir, mgr)
    }

    #[test]
    fn test_open_reloads_persisted_state() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("billing.redb");
        {
            let mut mgr = BillingManager::open(&path).expect("open");
            mgr.add_product(shared::models::ProductCreate {
                name: "Tea".to_string(),
                price: 50.0,
                image: None,
            })
            .expect("add");
        }

        let mgr = BillingManager::open(&path).expect("reopen");
        assert_eq!(mgr.products().len(), 1);
        assert_eq!(mgr.products()[0].name, "Tea");
    }
}
