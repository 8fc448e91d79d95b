//! # Validation Module
//!
//! Input validation for data entering the entity store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Writers (seed, runner config)                                │
//! │  └── THIS MODULE: shape of identifiers, ranges of numbers              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── PRIMARY KEY uniqueness                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculator                                                   │
//! │  └── Non-zero gates per incentive (see calculator.rs)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator does not call into this module. Rows already in the store
//! are judged by the incentive rules alone.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::MAX_IDENTIFIER_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product or rebate identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - No leading or trailing whitespace (lookups match the id exactly)
/// - At most [`MAX_IDENTIFIER_LEN`] characters
///
/// ## Example
/// ```rust
/// use rebate_core::validation::validate_identifier;
///
/// assert!(validate_identifier("rebate", "Test_Rebate_Identifier").is_ok());
/// assert!(validate_identifier("rebate", "  ").is_err());
/// assert!(validate_identifier("rebate", " R-1 ").is_err());
/// ```
pub fn validate_identifier(field: &str, id: &str) -> ValidationResult<()> {
    let trimmed = id.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if trimmed.len() != id.len() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "leading or trailing whitespace".to_string(),
        });
    }

    if id.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price. Zero is allowed (free items).
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    require_non_negative("price", price)
}

/// Validates a purchased volume. Zero is allowed; the calculator decides
/// whether it matters.
pub fn validate_volume(volume: Decimal) -> ValidationResult<()> {
    require_non_negative("volume", volume)
}

/// Validates a rebate percentage.
///
/// ## Rules
/// - Between 0 and 1 inclusive (0.2 = 20%)
///
/// ## Example
/// ```rust
/// use rebate_core::validation::validate_percentage;
/// use rust_decimal::Decimal;
///
/// assert!(validate_percentage(Decimal::new(2, 1)).is_ok());  // 0.2
/// assert!(validate_percentage(Decimal::from(20)).is_err());  // 2000%
/// ```
pub fn validate_percentage(percentage: Decimal) -> ValidationResult<()> {
    if percentage < Decimal::ZERO || percentage > Decimal::ONE {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: "0".to_string(),
            max: "1".to_string(),
        });
    }

    Ok(())
}

/// Parses a decimal from text, e.g. a config value or a database column.
pub fn parse_decimal(field: &str, text: &str) -> ValidationResult<Decimal> {
    text.trim()
        .parse::<Decimal>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

fn require_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
