//! Bill generation and history: snapshots, lookup, clear, export

use shared::models::{Bill, BillItem};
use shared::{AppError, AppResult};

use super::BillingManager;
use crate::money;

impl BillingManager {
    /// Generate a bill from the current cart and profile
    ///
    /// Snapshots the cart lines and the profile by value, stamps a fresh
    /// chronological id and the current time, and appends to history.
    /// The cart is deliberately left untouched: a bill may be generated
    /// and displayed any number of times before the presentation flow
    /// decides to commit the sale via [`Self::commit_and_clear_cart`].
    pub fn generate_bill(&mut self) -> AppResult<Bill> {
        if self.state.cart.is_empty() {
            return Err(AppError::empty_cart());
        }

        let bill = Bill {
            id: self.storage.next_bill_id()?,
            created_at: chrono::Utc::now().timestamp_millis(),
            items: self
                .state
                .cart
                .iter()
                .map(|line| BillItem {
                    name: line.name.clone(),
                    qty: line.quantity,
                    price: line.price,
                })
                .collect(),
            total: money::cart_total(&self.state.cart),
            profile: self.state.profile.clone(),
        };

        let mut staged = self.state.bills.clone();
        staged.push(bill.clone());
        self.storage.save_bills(&staged)?;
        self.state.bills = staged;

        tracing::info!(id = %bill.id, total = bill.total, items = bill.items.len(), "Bill generated");
        Ok(bill)
    }

    /// Empty the cart after a completed sale
    ///
    /// The explicit second half of the print flow: the presentation layer
    /// composes `generate_bill` + print + `commit_and_clear_cart`, so
    /// generating a bill never clears the cart as a side effect.
    pub fn commit_and_clear_cart(&mut self) -> AppResult<()> {
        self.clear_cart()
    }

    /// Look up a bill by id
    pub fn find_bill(&self, id: &str) -> AppResult<&Bill> {
        self.state
            .bills
            .iter()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found("bill"))
    }

    /// Discard the entire bill history (irreversible)
    pub fn clear_history(&mut self) -> AppResult<()> {
        self.storage.save_bills(&[])?;
        let dropped = self.state.bills.len();
        self.state.bills.clear();
        tracing::info!(dropped, "Bill history cleared");
        Ok(())
    }

    /// Owned deep copy of the history for external consumers
    /// (file download, printable document rendering)
    pub fn export_snapshot(&self) -> Vec<Bill> {
        self.state.bills.clone()
    }

    /// Full history as pretty-printed JSON
    pub fn export_history_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(&self.state.bills)
            .map_err(|e| AppError::persistence(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::tests::open_manager;
    use shared::ErrorCode;
    use shared::models::{ProductCreate, ProfileUpdate};

    fn stock_cart(mgr: &mut BillingManager) {
        let id = mgr
            .add_product(ProductCreate {
                name: "Tea".to_string(),
                price: 50.0,
                image: None,
            })
            .expect("add product")
            .id;
        mgr.add_to_cart(&id, Some(3)).expect("add to cart");
    }

    #[test]
    fn test_generate_bill_snapshots_cart_and_leaves_it_unchanged() {
        let (_dir, mut mgr) = open_manager();
        stock_cart(&mut mgr);
        let cart_before = mgr.cart().to_vec();

        let bill = mgr.generate_bill().expect("generate");
        assert_eq!(bill.total, 150.0);
        assert_eq!(bill.items.len(), 1);
        assert_eq!(bill.items[0].name, "Tea");
        assert_eq!(bill.items[0].qty, 3);

        // Cart identical before/after
        assert_eq!(mgr.cart().len(), cart_before.len());
        assert_eq!(mgr.cart()[0].quantity, cart_before[0].quantity);
        assert_eq!(mgr.bills().len(), 1);
    }

    #[test]
    fn test_generate_bill_on_empty_cart_fails_and_appends_nothing() {
        let (_dir, mut mgr) = open_manager();
        let err = mgr.generate_bill().unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
        assert!(mgr.bills().is_empty());
    }

    #[test]
    fn test_bill_ids_are_chronological() {
        let (_dir, mut mgr) = open_manager();
        stock_cart(&mut mgr);
        let a = mgr.generate_bill().expect("generate");
        let b = mgr.generate_bill().expect("generate");
        assert!(b.id > a.id);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_bill_profile_is_a_snapshot() {
        let (_dir, mut mgr) = open_manager();
        mgr.save_profile(ProfileUpdate {
            shop_name: Some("Corner Shop".to_string()),
            ..Default::default()
        })
        .expect("profile");
        stock_cart(&mut mgr);
        let bill = mgr.generate_bill().expect("generate");

        mgr.save_profile(ProfileUpdate {
            shop_name: Some("Renamed Shop".to_string()),
            ..Default::default()
        })
        .expect("profile");

        // The stored bill still carries the old name
        let stored = mgr.find_bill(&bill.id).expect("find");
        assert_eq!(stored.profile.shop_name, "Corner Shop");
    }

    #[test]
    fn test_find_bill_not_found() {
        let (_dir, mut mgr) = open_manager();
        let err = mgr.find_bill("B-000404").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_commit_and_clear_cart_is_separate_from_generation() {
        let (_dir, mut mgr) = open_manager();
        stock_cart(&mut mgr);
        mgr.generate_bill().expect("generate");
        assert!(!mgr.cart().is_empty());

        mgr.commit_and_clear_cart().expect("commit");
        assert!(mgr.cart().is_empty());
        // History untouched by the clear
        assert_eq!(mgr.bills().len(), 1);
    }

    #[test]
    fn test_clear_history() {
        let (_dir, mut mgr) = open_manager();
        stock_cart(&mut mgr);
        mgr.generate_bill().expect("generate");
        mgr.clear_history().expect("clear");
        assert!(mgr.bills().is_empty());
    }

    #[test]
    fn test_export_history_json() {
        let (_dir, mut mgr) = open_manager();
        stock_cart(&mut mgr);
        let bill = mgr.generate_bill().expect("generate");

        let json = mgr.export_history_json().expect("export");
        let parsed: Vec<Bill> = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].id, bill.id);

        let snapshot = mgr.export_snapshot();
        assert_eq!(snapshot.len(), 1);
    }
}
