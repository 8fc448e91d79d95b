//! # Blocking Store
//!
//! Bridges the async repositories to the core's synchronous store traits.
//!
//! ```text
//! RebateService::calculate (sync)
//!       │
//!       ▼
//! BlockingStore ── runtime.block_on(..) ──► RebateRepository / ProductRepository
//!       │                                         │
//!       │  DbError → StoreError                   ▼
//!       ◄──────────────────────────────────── SqlitePool
//! ```
//!
//! The store owns a current-thread tokio runtime. Calling it from inside
//! another runtime panics in `block_on`, so keep it on synchronous code
//! paths (the runner's `main`, blocking threads, tests).

use std::future::Future;

use rust_decimal::Decimal;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::pool::{Database, DbConfig};
use rebate_core::{Product, ProductDataStore, Rebate, RebateDataStore, StoreResult};

/// SQLite-backed implementation of [`RebateDataStore`] and [`ProductDataStore`].
///
/// ## Usage
/// ```rust,ignore
/// let store = BlockingStore::open(DbConfig::new("./rebate_dev.db"))?;
/// let service = RebateService::new(&store, &store);
/// ```
#[derive(Debug)]
pub struct BlockingStore {
    db: Database,
    runtime: Runtime,
}

impl BlockingStore {
    /// Starts a private runtime and connects to the database (running
    /// migrations if the config asks for it).
    pub fn open(config: DbConfig) -> DbResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DbError::Runtime(e.to_string()))?;

        let db = runtime.block_on(Database::new(config))?;

        Ok(BlockingStore { db, runtime })
    }

    /// The underlying database, for seeding and inspection.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Drives a future on the store's runtime.
    ///
    /// ```rust,ignore
    /// store.block_on(store.database().products().upsert(&product))?;
    /// ```
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Closes the pool and shuts the runtime down.
    pub fn close(self) {
        self.runtime.block_on(self.db.close());
    }
}

impl RebateDataStore for BlockingStore {
    fn get_rebate(&self, identifier: &str) -> StoreResult<Option<Rebate>> {
        self.block_on(self.db.rebates().get_by_id(identifier))
            .map_err(|e| e.into_read_error("rebate", identifier))
    }

    fn store_calculation_result(&self, rebate: &Rebate, amount: Decimal) -> StoreResult<()> {
        debug!(rebate_id = %rebate.id, amount = %amount, "Persisting calculation result");

        self.block_on(self.db.rebates().store_calculation_result(&rebate.id, amount))
            .map_err(|e| e.into_write_error("rebate", &rebate.id))
    }
}

impl ProductDataStore for BlockingStore {
    fn get_product(&self, identifier: &str) -> StoreResult<Option<Product>> {
        self.block_on(self.db.products().get_by_id(identifier))
            .map_err(|e| e.into_read_error("product", identifier))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rebate_core::{IncentiveType, StoreError};

    fn store() -> BlockingStore {
        BlockingStore::open(DbConfig::in_memory()).unwrap()
    }

    #[test]
    fn test_lookups_through_traits() {
        let store = store();
        let product = Product::new("P-1", Decimal::TEN, [IncentiveType::AmountPerUom]);
        store
            .block_on(store.database().products().upsert(&product))
            .unwrap();

        assert_eq!(store.get_product("P-1").unwrap(), Some(product));
        assert_eq!(store.get_product("P-2").unwrap(), None);
        assert_eq!(store.get_rebate("R-1").unwrap(), None);
    }

    #[test]
    fn test_write_to_unknown_rebate_is_write_error() {
        let store = store();
        let rebate = Rebate::new("R-1", IncentiveType::FixedCashAmount, Decimal::ONE, Decimal::ZERO);

        assert!(matches!(
            store.store_calculation_result(&rebate, Decimal::ONE),
            Err(StoreError::Write { .. })
        ));
    }

    #[test]
    fn test_closed_pool_is_unavailable() {
        let store = store();
        store.block_on(store.database().close());

        assert!(matches!(
            store.get_rebate("R-1"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
