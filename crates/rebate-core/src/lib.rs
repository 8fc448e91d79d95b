//! # rebate-core: Pure Business Logic for the Rebate Calculator
//!
//! This crate is the **heart** of the rebate calculator. It decides whether a
//! rebate program applies to a product and, if so, how much it is worth.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rebate Calculator Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Runner (apps/runner)                         │   │
//! │  │        load config ──► build request ──► print outcome          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rebate-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ calculator │  │  service  │  │   store   │  │   │
//! │  │   │  Product  │  │   rules    │  │  Rebate   │  │  traits   │  │   │
//! │  │   │  Rebate   │  │  per type  │  │  Service  │  │  (seams)  │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RebateDataStore / ProductDataStore     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 rebate-db (Database Layer)                      │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Rebate, request/result)
//! - [`calculator`] - Incentive rules: product + rebate + volume → amount
//! - [`service`] - Orchestrator: read, calculate, persist on success
//! - [`store`] - Entity store traits the orchestrator depends on
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for data entering the store
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: the calculator is deterministic and never touches a store
//! 2. **Exact Decimals**: every amount is a `rust_decimal::Decimal`, no floats
//! 3. **Explicit Outcomes**: an invalid calculation is an `Err(RuleViolation)`,
//!    never a magic number
//! 4. **Quiet Failures Outward**: callers of `calculate` see only `success`;
//!    the detail goes to the logs
//!
//! ## Example Usage
//!
//! ```rust
//! use rebate_core::calculator::calculate_amount;
//! use rebate_core::{IncentiveType, Product, Rebate};
//! use rust_decimal::Decimal;
//!
//! let product = Product::new("P-1", Decimal::from(10), [IncentiveType::FixedRateRebate]);
//! let rebate = Rebate::new(
//!     "R-1",
//!     IncentiveType::FixedRateRebate,
//!     Decimal::ZERO,
//!     Decimal::new(2, 1), // 0.2
//! );
//!
//! // 10 × 0.2 × 5 = 10
//! let amount = calculate_amount(&product, &rebate, Decimal::from(5)).unwrap();
//! assert_eq!(amount, Decimal::from(10));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use rebate_core::Product` instead of
// `use rebate_core::types::Product`

pub use error::{CoreResult, RebateError, RuleViolation, StoreError, StoreResult, ValidationError};
pub use service::RebateService;
pub use store::{ProductDataStore, RebateDataStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product or rebate identifier.
///
/// Identifiers are opaque external keys; the limit only guards the store
/// against garbage input.
pub const MAX_IDENTIFIER_LEN: usize = 100;
