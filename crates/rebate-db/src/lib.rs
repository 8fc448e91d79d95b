//! # rebate-db: Database Layer for the Rebate Calculator
//!
//! This crate provides the entity store for the rebate calculator.
//! It uses SQLite for storage with sqlx for async operations, and exposes a
//! blocking adapter so the synchronous core can use it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rebate Calculator Data Flow                        │
//! │                                                                         │
//! │  RebateService (rebate-core, synchronous)                              │
//! │       │  RebateDataStore / ProductDataStore                             │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     rebate-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ BlockingStore │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │  (store.rs)   │───►│ ProductRepo   │    │  (embedded)  │  │   │
//! │  │   │ tokio runtime │    │ RebateRepo    │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                                │   │
//! │  │                        ┌───────▼───────┐                        │   │
//! │  │                        │   Database    │                        │   │
//! │  │                        │   (pool.rs)   │                        │   │
//! │  │                        │  SqlitePool   │                        │   │
//! │  │                        └───────────────┘                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (./rebate_dev.db by default)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (product, rebate)
//! - [`store`] - Blocking adapter implementing the core's store traits
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rebate_core::{CalculateRebateRequest, RebateService};
//! use rebate_db::{BlockingStore, DbConfig};
//!
//! let store = BlockingStore::open(DbConfig::new("./rebate_dev.db"))?;
//! let service = RebateService::new(&store, &store);
//!
//! let result = service.calculate(&request);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::BlockingStore;

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::rebate::RebateRepository;
