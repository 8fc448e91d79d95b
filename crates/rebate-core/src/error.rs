//! # Error Types
//!
//! Domain-specific error types for rebate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rebate-core errors (this file)                                        │
//! │  ├── RebateError      - Everything that can stop a calculation         │
//! │  │   ├── RebateNotFound / ProductNotFound   (EntityMissing)            │
//! │  │   ├── Rule(RuleViolation)                (RuleViolation)            │
//! │  │   └── Store(StoreError)                  (UnexpectedFailure)        │
//! │  ├── RuleViolation    - Why the calculator refused                     │
//! │  ├── StoreError       - Entity store faults, as seen by the core       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  rebate-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures → StoreError       │
//! │                                                                         │
//! │  Outward: every RebateError becomes `success: false`                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::IncentiveType;

// =============================================================================
// Rebate Error
// =============================================================================

/// Everything that can stop a rebate calculation.
///
/// None of these reach the caller of `RebateService::calculate`; they are
/// logged and collapsed into a failed result.
#[derive(Debug, Error)]
pub enum RebateError {
    /// No rebate program exists for the identifier.
    #[error("Rebate not found: {0}")]
    RebateNotFound(String),

    /// No product exists for the identifier.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The incentive rules rejected the product/rebate/volume combination.
    #[error("Rebate rule violated: {0}")]
    Rule(#[from] RuleViolation),

    /// The entity store failed to read or write.
    #[error("Entity store failure: {0}")]
    Store(#[from] StoreError),
}

impl RebateError {
    /// True for faults that are not a normal business outcome.
    pub fn is_unexpected(&self) -> bool {
        matches!(self, RebateError::Store(_))
    }
}

// =============================================================================
// Rule Violation
// =============================================================================

/// Why the calculator refused to produce an amount.
///
/// ## When This Occurs
/// ```text
/// rebate.incentive not a known code      → UnrecognizedIncentive
/// product does not accept that incentive → IncentiveNotSupported
/// a multiplicative input is zero         → MissingInput
/// the product does not fit in a Decimal  → Overflow
/// the product needs > 28 decimal places  → Precision
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("unrecognized incentive '{code}'")]
    UnrecognizedIncentive { code: String },

    #[error("product {product_id} does not support {incentive}")]
    IncentiveNotSupported {
        incentive: IncentiveType,
        product_id: String,
    },

    /// A zero input means the rebate or product is not configured, not that
    /// the rebate is legitimately zero.
    #[error("{incentive} requires a non-zero {field}")]
    MissingInput {
        incentive: IncentiveType,
        field: &'static str,
    },

    #[error("{incentive} amount overflows")]
    Overflow { incentive: IncentiveType },

    /// The exact amount has more fractional digits than `Decimal` holds.
    #[error("{incentive} amount can't be represented without rounding")]
    Precision { incentive: IncentiveType },
}

// =============================================================================
// Store Error
// =============================================================================

/// Entity store faults, independent of the backing technology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot be reached at all.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read {entity} {id}: {reason}")]
    Read {
        entity: String,
        id: String,
        reason: String,
    },

    #[error("failed to write {entity} {id}: {reason}")]
    Write {
        entity: String,
        id: String,
        reason: String,
    },
}

impl StoreError {
    /// Creates a Read error for a given entity type and ID.
    pub fn read(entity: impl Into<String>, id: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Read {
            entity: entity.into(),
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a Write error for a given entity type and ID.
    pub fn write(entity: impl Into<String>, id: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Write {
            entity: entity.into(),
            id: id.into(),
            reason: reason.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when data entering the store doesn't meet requirements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Invalid format (e.g., unparseable decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with RebateError.
pub type CoreResult<T> = Result<T, RebateError>;

/// Result type for entity store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RuleViolation::MissingInput {
            incentive: IncentiveType::FixedRateRebate,
            field: "price",
        };
        assert_eq!(err.to_string(), "fixed_rate_rebate requires a non-zero price");

        let err = RuleViolation::IncentiveNotSupported {
            incentive: IncentiveType::AmountPerUom,
            product_id: "P-1".to_string(),
        };
        assert_eq!(err.to_string(), "product P-1 does not support amount_per_uom");
    }

    #[test]
    fn test_store_error_helpers() {
        let err = StoreError::write("rebate", "R-1", "disk full");
        assert_eq!(err.to_string(), "failed to write rebate R-1: disk full");
    }

    #[test]
    fn test_conversions_into_rebate_error() {
        let rule: RebateError = RuleViolation::UnrecognizedIncentive {
            code: "x".to_string(),
        }
        .into();
        assert!(matches!(rule, RebateError::Rule(_)));
        assert!(!rule.is_unexpected());

        let store: RebateError = StoreError::Unavailable("closed".to_string()).into();
        assert!(matches!(store, RebateError::Store(_)));
        assert!(store.is_unexpected());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "id".to_string(),
        };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        };
        assert_eq!(err.to_string(), "percentage must be between 0 and 1");
    }
}
