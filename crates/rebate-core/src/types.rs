//! # Domain Types
//!
//! Core domain types used throughout the rebate calculator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                   │
//! │  │       Product        │   │        Rebate        │                   │
//! │  │  ──────────────────  │   │  ──────────────────  │                   │
//! │  │  id                  │   │  id                  │                   │
//! │  │  supported_incentives│   │  incentive (code)    │                   │
//! │  │  price               │   │  amount              │                   │
//! │  └──────────────────────┘   │  percentage          │                   │
//! │                             └──────────────────────┘                   │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌──────────────────────┐                   │
//! │  │ CalculateRebate-     │   │ CalculateRebate-     │                   │
//! │  │ Request              │   │ Result               │                   │
//! │  │  rebate_identifier   │   │  success             │                   │
//! │  │  product_identifier  │   │  rebate_amount       │                   │
//! │  │  volume              │   │                      │                   │
//! │  └──────────────────────┘   └──────────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Incentive Codes
//! A rebate stores its incentive as a raw text code. Only the three codes of
//! [`IncentiveType`] are recognized; anything else makes the rebate
//! unusable, but it is still a valid row to load.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// =============================================================================
// Incentive Type
// =============================================================================

/// The three incentive rules a rebate program can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncentiveType {
    /// A flat amount, independent of price and volume.
    FixedCashAmount,
    /// A percentage of the product price, per unit of volume.
    FixedRateRebate,
    /// A flat amount per unit of measure.
    AmountPerUom,
}

impl IncentiveType {
    /// Every incentive type, in declaration order.
    pub const ALL: [IncentiveType; 3] = [
        IncentiveType::FixedCashAmount,
        IncentiveType::FixedRateRebate,
        IncentiveType::AmountPerUom,
    ];

    /// Returns the canonical text code stored in the database.
    pub const fn code(&self) -> &'static str {
        match self {
            IncentiveType::FixedCashAmount => "fixed_cash_amount",
            IncentiveType::FixedRateRebate => "fixed_rate_rebate",
            IncentiveType::AmountPerUom => "amount_per_uom",
        }
    }
}

impl fmt::Display for IncentiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for IncentiveType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        IncentiveType::ALL
            .into_iter()
            .find(|incentive| incentive.code() == code)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "incentive".to_string(),
                allowed: IncentiveType::ALL
                    .iter()
                    .map(|incentive| incentive.code().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Supported Incentives
// =============================================================================

/// The set of incentive types a product accepts.
///
/// A product may accept none, one, or several types at once. Membership is
/// the only question ever asked of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupportedIncentives(BTreeSet<IncentiveType>);

impl SupportedIncentives {
    /// An empty set: the product accepts no rebates.
    pub fn empty() -> Self {
        SupportedIncentives(BTreeSet::new())
    }

    /// Adds an incentive type. Returns `false` if it was already present.
    pub fn insert(&mut self, incentive: IncentiveType) -> bool {
        self.0.insert(incentive)
    }

    /// Checks whether the product accepts the given incentive type.
    pub fn contains(&self, incentive: IncentiveType) -> bool {
        self.0.contains(&incentive)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = IncentiveType> + '_ {
        self.0.iter().copied()
    }

    /// Renders the set as comma-separated codes, e.g.
    /// `"fixed_cash_amount,amount_per_uom"`.
    pub fn to_codes(&self) -> String {
        self.iter()
            .map(|incentive| incentive.code())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses comma-separated codes.
    ///
    /// Blank entries are ignored. Unknown codes do not fail the parse; they
    /// are returned alongside the set so the caller can log them.
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::{IncentiveType, SupportedIncentives};
    ///
    /// let (set, unknown) = SupportedIncentives::parse_codes("amount_per_uom, bogus,");
    /// assert!(set.contains(IncentiveType::AmountPerUom));
    /// assert_eq!(unknown, vec!["bogus".to_string()]);
    /// ```
    pub fn parse_codes(codes: &str) -> (Self, Vec<String>) {
        let mut set = SupportedIncentives::empty();
        let mut unknown = Vec::new();

        for code in codes.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            match code.parse::<IncentiveType>() {
                Ok(incentive) => {
                    set.insert(incentive);
                }
                Err(_) => unknown.push(code.to_string()),
            }
        }

        (set, unknown)
    }
}

impl FromIterator<IncentiveType> for SupportedIncentives {
    fn from_iter<I: IntoIterator<Item = IncentiveType>>(iter: I) -> Self {
        SupportedIncentives(iter.into_iter().collect())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product that rebate programs can be applied to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// External identifier used for lookup.
    pub id: String,

    /// Incentive types this product accepts.
    pub supported_incentives: SupportedIncentives,

    /// Unit price. Non-negative.
    pub price: Decimal,
}

impl Product {
    /// Creates a product accepting the given incentive types.
    pub fn new(
        id: impl Into<String>,
        price: Decimal,
        supported: impl IntoIterator<Item = IncentiveType>,
    ) -> Self {
        Product {
            id: id.into(),
            supported_incentives: supported.into_iter().collect(),
            price,
        }
    }

    /// Checks whether this product accepts the given incentive type.
    #[inline]
    pub fn supports(&self, incentive: IncentiveType) -> bool {
        self.supported_incentives.contains(incentive)
    }
}

// =============================================================================
// Rebate
// =============================================================================

/// A rebate program.
///
/// `amount` and `percentage` mean different things per incentive type:
///
/// | Incentive         | amount            | percentage          |
/// |-------------------|-------------------|---------------------|
/// | FixedCashAmount   | the rebate itself | unused              |
/// | FixedRateRebate   | unused            | share of the price  |
/// | AmountPerUom      | per unit of volume| unused              |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rebate {
    /// External identifier used for lookup.
    pub id: String,

    /// Raw incentive code as stored. See [`Rebate::incentive_type`].
    pub incentive: String,

    pub amount: Decimal,

    /// Conceptually in `[0, 1]`.
    pub percentage: Decimal,
}

impl Rebate {
    /// Creates a rebate with a recognized incentive type.
    pub fn new(
        id: impl Into<String>,
        incentive: IncentiveType,
        amount: Decimal,
        percentage: Decimal,
    ) -> Self {
        Rebate {
            id: id.into(),
            incentive: incentive.code().to_string(),
            amount,
            percentage,
        }
    }

    /// Returns the incentive type, or `None` if the stored code is not one
    /// of the recognized ones.
    pub fn incentive_type(&self) -> Option<IncentiveType> {
        self.incentive.parse().ok()
    }
}

// =============================================================================
// Request / Result
// =============================================================================

/// Input to [`RebateService::calculate`](crate::service::RebateService::calculate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRebateRequest {
    pub rebate_identifier: String,
    pub product_identifier: String,
    /// Quantity purchased. May be zero.
    pub volume: Decimal,
}

impl CalculateRebateRequest {
    pub fn new(
        rebate_identifier: impl Into<String>,
        product_identifier: impl Into<String>,
        volume: Decimal,
    ) -> Self {
        CalculateRebateRequest {
            rebate_identifier: rebate_identifier.into(),
            product_identifier: product_identifier.into(),
            volume,
        }
    }
}

/// Outcome of a rebate calculation.
///
/// `rebate_amount` is only meaningful when `success` is true; it is zero
/// otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRebateResult {
    pub success: bool,
    pub rebate_amount: Decimal,
}

impl CalculateRebateResult {
    /// A successful calculation carrying the computed amount.
    #[inline]
    pub const fn success(rebate_amount: Decimal) -> Self {
        CalculateRebateResult {
            success: true,
            rebate_amount,
        }
    }

    /// A failed calculation. The amount is zero.
    #[inline]
    pub const fn failure() -> Self {
        CalculateRebateResult {
            success: false,
            rebate_amount: Decimal::ZERO,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incentive_codes_parse_back() {
        for incentive in IncentiveType::ALL {
            assert_eq!(incentive.code().parse::<IncentiveType>().unwrap(), incentive);
        }
        assert_eq!(
            " amount_per_uom ".parse::<IncentiveType>().unwrap(),
            IncentiveType::AmountPerUom
        );
    }

    #[test]
    fn test_unknown_incentive_code_rejected() {
        let err = "FixedCashAmount".parse::<IncentiveType>().unwrap_err();
        assert!(matches!(err, ValidationError::NotAllowed { .. }));
        assert!("".parse::<IncentiveType>().is_err());
    }

    #[test]
    fn test_supported_incentives_membership() {
        let set: SupportedIncentives =
            [IncentiveType::FixedCashAmount, IncentiveType::AmountPerUom]
                .into_iter()
                .collect();

        assert!(set.contains(IncentiveType::FixedCashAmount));
        assert!(set.contains(IncentiveType::AmountPerUom));
        assert!(!set.contains(IncentiveType::FixedRateRebate));
        assert_eq!(set.len(), 2);
        assert!(SupportedIncentives::empty().is_empty());
    }

    #[test]
    fn test_supported_incentives_codes() {
        let set: SupportedIncentives = [IncentiveType::AmountPerUom, IncentiveType::FixedCashAmount]
            .into_iter()
            .collect();
        assert_eq!(set.to_codes(), "fixed_cash_amount,amount_per_uom");

        let (parsed, unknown) = SupportedIncentives::parse_codes(&set.to_codes());
        assert_eq!(parsed, set);
        assert!(unknown.is_empty());

        let (parsed, unknown) = SupportedIncentives::parse_codes("");
        assert!(parsed.is_empty());
        assert!(unknown.is_empty());
    }

    #[test]
    fn test_rebate_incentive_type() {
        let rebate = Rebate::new("R-1", IncentiveType::FixedRateRebate, Decimal::ZERO, Decimal::ONE);
        assert_eq!(rebate.incentive_type(), Some(IncentiveType::FixedRateRebate));

        let unknown = Rebate {
            incentive: "loyalty_points".to_string(),
            ..rebate
        };
        assert_eq!(unknown.incentive_type(), None);
    }

    #[test]
    fn test_result_constructors() {
        let ok = CalculateRebateResult::success(Decimal::from(42));
        assert!(ok.success);
        assert_eq!(ok.rebate_amount, Decimal::from(42));

        let failed = CalculateRebateResult::failure();
        assert!(!failed.success);
        assert_eq!(failed.rebate_amount, Decimal::ZERO);
        assert_eq!(failed, CalculateRebateResult::default());
    }

    #[test]
    fn test_request_json_shape() {
        let request = CalculateRebateRequest::new("R-1", "P-1", Decimal::from(100));
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["rebateIdentifier"], "R-1");
        assert_eq!(json["productIdentifier"], "P-1");
        assert_eq!(json["volume"], "100");
    }

    #[test]
    fn test_result_json_shape() {
        let ok = serde_json::to_string(&CalculateRebateResult::success(Decimal::new(25, 1))).unwrap();
        assert_eq!(ok, r#"{"success":true,"rebateAmount":"2.5"}"#);

        let failed = serde_json::to_value(CalculateRebateResult::failure()).unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["rebateAmount"], "0");
    }

    #[test]
    fn test_product_json_lists_incentive_codes() {
        let product = Product::new("P-1", Decimal::from(10), [IncentiveType::FixedRateRebate]);
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["supportedIncentives"][0], "fixed_rate_rebate");
    }
}
