//! # Entity Store Traits
//!
//! The orchestrator depends on these traits, never on a concrete database.
//!
//! ```text
//! RebateService
//!   ├── RebateDataStore::get_rebate(id)                  → Option<Rebate>
//!   ├── ProductDataStore::get_product(id)                → Option<Product>
//!   └── RebateDataStore::store_calculation_result(r, x)  → ()
//! ```
//!
//! Absence is `Ok(None)`, not an error. `Err` is reserved for a store that
//! could not answer at all.
//!
//! Implementations: `rebate_db::BlockingStore` (SQLite), and mockall mocks
//! in this crate's tests.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::error::StoreResult;
use crate::types::{Product, Rebate};

/// Lookup and persistence for rebate programs.
#[cfg_attr(test, mockall::automock)]
pub trait RebateDataStore: Send + Sync {
    /// Fetches a rebate by its identifier.
    fn get_rebate(&self, identifier: &str) -> StoreResult<Option<Rebate>>;

    /// Records a successfully calculated amount against the rebate.
    ///
    /// Only the latest value is kept.
    fn store_calculation_result(&self, rebate: &Rebate, amount: Decimal) -> StoreResult<()>;
}

/// Lookup for products.
#[cfg_attr(test, mockall::automock)]
pub trait ProductDataStore: Send + Sync {
    /// Fetches a product by its identifier.
    fn get_product(&self, identifier: &str) -> StoreResult<Option<Product>>;
}

// =============================================================================
// Forwarding impls
// =============================================================================
// Lets one store value back both sides of a RebateService:
// `RebateService::new(&store, &store)` or with two `Arc` clones.

macro_rules! forward_store_impls {
    ($($wrapper:ty),*) => {
        $(
            impl<T: RebateDataStore + ?Sized> RebateDataStore for $wrapper {
                fn get_rebate(&self, identifier: &str) -> StoreResult<Option<Rebate>> {
                    (**self).get_rebate(identifier)
                }

                fn store_calculation_result(
                    &self,
                    rebate: &Rebate,
                    amount: Decimal,
                ) -> StoreResult<()> {
                    (**self).store_calculation_result(rebate, amount)
                }
            }

            impl<T: ProductDataStore + ?Sized> ProductDataStore for $wrapper {
                fn get_product(&self, identifier: &str) -> StoreResult<Option<Product>> {
                    (**self).get_product(identifier)
                }
            }
        )*
    };
}

forward_store_impls!(&T, Box<T>, Arc<T>);
