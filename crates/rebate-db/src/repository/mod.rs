//! # Repository Module
//!
//! Database repository implementations for the rebate store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  BlockingStore / seed                                                  │
//! │       │                                                                 │
//! │       │  db.rebates().get_by_id("Test_Rebate_Identifier")              │
//! │       ▼                                                                 │
//! │  RebateRepository                    ProductRepository                 │
//! │  ├── get_by_id(&self, id)            ├── get_by_id(&self, id)          │
//! │  ├── upsert(&self, rebate)           ├── upsert(&self, product)        │
//! │  ├── store_calculation_result(..)    └── count(&self)                  │
//! │  ├── latest_calculation(&self, id)                                     │
//! │  └── count(&self)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product lookup and upsert
//! - [`rebate::RebateRepository`] - Rebate lookup, upsert, calculation results

pub mod product;
pub mod rebate;
