//! redb-based persistence for the billing state
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `records` | record key | JSON bytes | The four named state records |
//! | `sequences` | counter key | `u64` | Monotonic id counters |
//!
//! Record keys are versioned (`products_v2`, ...); a schema bump is a new
//! key, which the tolerant loader treats as "missing, substitute default".
//!
//! # Durability
//!
//! redb commits are persistent as soon as `commit()` returns (copy-on-write
//! with atomic pointer swap), so the database file is always in a consistent
//! state even across forced shutdowns of the host machine.

use redb::{Database, ReadableDatabase, ReadableTable, ReadOnlyTable, TableDefinition};
use serde::de::DeserializeOwned;
use shared::AppError;
use shared::models::{Bill, CartLine, Product, Profile};
use std::path::Path;
use thiserror::Error;

use crate::manager::BillingState;

/// Table for the named state records: key = record name, value = JSON bytes
const RECORDS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("records");

/// Table for id counters: key = counter name, value = next sequence base
const SEQUENCES_TABLE: TableDefinition<&str, u64> = TableDefinition::new("sequences");

pub const PRODUCTS_KEY: &str = "products_v2";
pub const CART_KEY: &str = "cart_v2";
pub const BILLS_KEY: &str = "bills_v2";
pub const PROFILE_KEY: &str = "profile_v2";

const PRODUCT_SEQ_KEY: &str = "product_seq";
const BILL_SEQ_KEY: &str = "bill_seq";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::persistence(err.to_string())
    }
}

/// Billing state storage backed by redb
pub struct BillingStorage {
    db: Database,
}

impl BillingStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Create tables and seed counters on first open
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(RECORDS_TABLE)?;
            let mut seq_table = write_txn.open_table(SEQUENCES_TABLE)?;
            for key in [PRODUCT_SEQ_KEY, BILL_SEQ_KEY] {
                if seq_table.get(key)?.is_none() {
                    seq_table.insert(key, 0u64)?;
                }
            }
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // ==================== Load ====================

    /// Load all four records
    ///
    /// Each record is loaded independently: a missing or corrupt record
    /// yields that record's default and a warning, never a load failure.
    /// Database-level failures (unreadable file) do propagate.
    pub fn load(&self) -> StorageResult<BillingState> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(RECORDS_TABLE)?;

        Ok(BillingState {
            products: Self::read_record(&table, PRODUCTS_KEY),
            cart: Self::read_record(&table, CART_KEY),
            bills: Self::read_record(&table, BILLS_KEY),
            profile: Self::read_record(&table, PROFILE_KEY),
        })
    }

    fn read_record<T: DeserializeOwned + Default>(
        table: &ReadOnlyTable<&'static str, &'static [u8]>,
        key: &str,
    ) -> T {
        match table.get(key) {
            Ok(Some(guard)) => match serde_json::from_slice(guard.value()) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!(key, error = %e, "Corrupt record, substituting default");
                    T::default()
                }
            },
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable record, substituting default");
                T::default()
            }
        }
    }

    // ==================== Save ====================

    pub fn save_products(&self, products: &[Product]) -> StorageResult<()> {
        self.write_records(&[(PRODUCTS_KEY, serde_json::to_vec(products)?)])
    }

    pub fn save_cart(&self, cart: &[CartLine]) -> StorageResult<()> {
        self.write_records(&[(CART_KEY, serde_json::to_vec(cart)?)])
    }

    pub fn save_bills(&self, bills: &[Bill]) -> StorageResult<()> {
        self.write_records(&[(BILLS_KEY, serde_json::to_vec(bills)?)])
    }

    pub fn save_profile(&self, profile: &Profile) -> StorageResult<()> {
        self.write_records(&[(PROFILE_KEY, serde_json::to_vec(profile)?)])
    }

    /// Persist cart and products in a single transaction
    ///
    /// Used by add-to-cart, where the new cart line and the product's
    /// pending-quantity reset must land atomically.
    pub fn save_cart_and_products(
        &self,
        cart: &[CartLine],
        products: &[Product],
    ) -> StorageResult<()> {
        self.write_records(&[
            (CART_KEY, serde_json::to_vec(cart)?),
            (PRODUCTS_KEY, serde_json::to_vec(products)?),
        ])
    }

    /// Persist all four records in a single transaction
    pub fn save_all(&self, state: &BillingState) -> StorageResult<()> {
        self.write_records(&[
            (PRODUCTS_KEY, serde_json::to_vec(&state.products)?),
            (CART_KEY, serde_json::to_vec(&state.cart)?),
            (BILLS_KEY, serde_json::to_vec(&state.bills)?),
            (PROFILE_KEY, serde_json::to_vec(&state.profile)?),
        ])
    }

    fn write_records(&self, entries: &[(&str, Vec<u8>)]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(RECORDS_TABLE)?;
            for (key, data) in entries {
                table.insert(*key, data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // ==================== Id sequences ====================

    /// Next product id (`P-NNNNNN`)
    ///
    /// Counters are persisted, so ids stay unique across restarts and are
    /// never reused after a delete. Allocation commits in its own
    /// transaction; if the caller's staged write fails afterwards the id is
    /// burned, leaving a gap, which is harmless.
    pub fn next_product_id(&self) -> StorageResult<String> {
        Ok(format!("P-{:06}", self.next_sequence(PRODUCT_SEQ_KEY)?))
    }

    /// Next bill id (`B-NNNNNN`, monotonic, therefore chronological)
    pub fn next_bill_id(&self) -> StorageResult<String> {
        Ok(format!("B-{:06}", self.next_sequence(BILL_SEQ_KEY)?))
    }

    fn next_sequence(&self, key: &str) -> StorageResult<u64> {
        let write_txn = self.db.begin_write()?;
        let next = {
            let mut table = write_txn.open_table(SEQUENCES_TABLE)?;
            let current = table.get(key)?.map(|v| v.value()).unwrap_or(0);
            let next = current + 1;
            table.insert(key, next)?;
            next
        };
        write_txn.commit()?;
        Ok(next)
    }

    /// Write raw bytes under a record key (test hook for corruption cases)
    #[cfg(test)]
    fn write_raw(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        self.write_records(&[(key, data.to_vec())])
    }
}
