//! # Rebate Calculation Engine
//!
//! Turns a product, a rebate program and a purchased volume into a rebate
//! amount, or explains why it can't.
//!
//! ## Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Incentive        Gate (product must support it, and …)   Amount        │
//! │  ───────────────  ──────────────────────────────────────  ────────────  │
//! │  FixedCashAmount  amount ≠ 0                              amount        │
//! │  FixedRateRebate  percentage ≠ 0, price ≠ 0, volume ≠ 0   price×pct×vol │
//! │  AmountPerUom     amount ≠ 0, volume ≠ 0                  amount×vol    │
//! │  anything else    never passes                            -             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is pure: it never reads or writes a store, never rounds and
//! never panics. `Decimal` keeps at most 28 fractional digits and would
//! round a product that needs more, so such products are refused with
//! [`RuleViolation::Precision`].

use rust_decimal::Decimal;

use crate::error::RuleViolation;
use crate::types::{IncentiveType, Product, Rebate};

/// Result type for the calculation engine.
pub type CalculationResult = Result<Decimal, RuleViolation>;

/// Computes the rebate amount for `volume` units of `product` under `rebate`.
///
/// ## Returns
/// * `Ok(amount)` - every gate passed; `amount` is exact
/// * `Err(RuleViolation)` - the first gate that failed, or an amount that
///   overflows or can't be represented exactly
///
/// ## Example
/// ```rust
/// use rebate_core::calculator::calculate_amount;
/// use rebate_core::{IncentiveType, Product, Rebate, RuleViolation};
/// use rust_decimal::Decimal;
///
/// let product = Product::new("P-1", Decimal::ZERO, [IncentiveType::AmountPerUom]);
/// let rebate = Rebate::new("R-1", IncentiveType::AmountPerUom, Decimal::from(3), Decimal::ZERO);
///
/// assert_eq!(calculate_amount(&product, &rebate, Decimal::from(7)), Ok(Decimal::from(21)));
/// assert!(matches!(
///     calculate_amount(&product, &rebate, Decimal::ZERO),
///     Err(RuleViolation::MissingInput { field: "volume", .. })
/// ));
/// ```
pub fn calculate_amount(product: &Product, rebate: &Rebate, volume: Decimal) -> CalculationResult {
    let incentive = rebate
        .incentive_type()
        .ok_or_else(|| RuleViolation::UnrecognizedIncentive {
            code: rebate.incentive.clone(),
        })?;

    if !product.supports(incentive) {
        return Err(RuleViolation::IncentiveNotSupported {
            incentive,
            product_id: product.id.clone(),
        });
    }

    match incentive {
        IncentiveType::FixedCashAmount => {
            require_non_zero(incentive, "amount", rebate.amount)?;
            Ok(rebate.amount)
        }

        IncentiveType::FixedRateRebate => {
            require_non_zero(incentive, "percentage", rebate.percentage)?;
            require_non_zero(incentive, "price", product.price)?;
            require_non_zero(incentive, "volume", volume)?;

            let per_unit = exact_mul(incentive, product.price, rebate.percentage)?;
            exact_mul(incentive, per_unit, volume)
        }

        IncentiveType::AmountPerUom => {
            require_non_zero(incentive, "amount", rebate.amount)?;
            require_non_zero(incentive, "volume", volume)?;

            exact_mul(incentive, rebate.amount, volume)
        }
    }
}

fn require_non_zero(
    incentive: IncentiveType,
    field: &'static str,
    value: Decimal,
) -> Result<(), RuleViolation> {
    if value.is_zero() {
        return Err(RuleViolation::MissingInput { incentive, field });
    }
    Ok(())
}

/// Multiplies, refusing any result `Decimal` had to round.
///
/// The exact product has `lhs.scale() + rhs.scale()` fractional digits. If
/// the result carries fewer, the digits dropped are zeros only when the
/// mantissa product is divisible by `10^dropped`.
fn exact_mul(incentive: IncentiveType, lhs: Decimal, rhs: Decimal) -> CalculationResult {
    let product = lhs
        .checked_mul(rhs)
        .ok_or(RuleViolation::Overflow { incentive })?;

    let dropped = (lhs.scale() + rhs.scale()).saturating_sub(product.scale());
    if dropped == 0 {
        return Ok(product);
    }

    let (lhs, rhs) = (lhs.mantissa().unsigned_abs(), rhs.mantissa().unsigned_abs());
    let twos = factor_count(lhs, 2).saturating_add(factor_count(rhs, 2));
    let fives = factor_count(lhs, 5).saturating_add(factor_count(rhs, 5));

    if twos < dropped || fives < dropped {
        return Err(RuleViolation::Precision { incentive });
    }

    Ok(product)
}

/// How many times `factor` divides `n`. Zero is divisible without limit.
fn factor_count(mut n: u128, factor: u128) -> u32 {
    if n == 0 {
        return u32::MAX;
    }

    let mut count = 0;
    while n % factor == 0 {
        n /= factor;
        count += 1;
    }
    count
}

// =============================================================================
// Unit Tests
// =============================================================================
