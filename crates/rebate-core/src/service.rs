//! # Rebate Service
//!
//! Orchestrates one rebate calculation end to end.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  calculate(request)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  get_rebate(rebate_identifier) + get_product(product_identifier)        │
//! │       │                                                                 │
//! │       ├── either missing? ─────────────────────► { success: false }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculate_amount(product, rebate, volume)                              │
//! │       │                                                                 │
//! │       ├── RuleViolation? ──────────────────────► { success: false }     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store_calculation_result(rebate, amount)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { success: true, rebate_amount: amount }                               │
//! │                                                                         │
//! │  Any store error at any step ──► logged ──────► { success: false }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use crate::calculator::calculate_amount;
use crate::error::{CoreResult, RebateError};
use crate::store::{ProductDataStore, RebateDataStore};
use crate::types::{CalculateRebateRequest, CalculateRebateResult};

/// Calculates rebates against an entity store.
///
/// ## Usage
/// ```rust,ignore
/// let service = RebateService::new(&store, &store);
///
/// let result = service.calculate(&CalculateRebateRequest::new(
///     "Test_Rebate_Identifier",
///     "Test_Product_Identifier",
///     Decimal::from(100),
/// ));
///
/// if result.success {
///     println!("{}", result.rebate_amount);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RebateService<R, P> {
    rebates: R,
    products: P,
}

impl<R, P> RebateService<R, P>
where
    R: RebateDataStore,
    P: ProductDataStore,
{
    /// Creates a new RebateService.
    pub fn new(rebates: R, products: P) -> Self {
        RebateService { rebates, products }
    }

    /// Calculates and persists the rebate for a request.
    ///
    /// Never fails outward: every error becomes `success: false` and is
    /// logged.
    pub fn calculate(&self, request: &CalculateRebateRequest) -> CalculateRebateResult {
        match self.try_calculate(request) {
            Ok(amount) => CalculateRebateResult::success(amount),
            Err(err) => {
                log_failure(request, &err);
                CalculateRebateResult::failure()
            }
        }
    }

    /// Same sequence as [`calculate`](Self::calculate), but keeps the reason
    /// for failure.
    ///
    /// The amount is persisted before `Ok` is returned.
    pub fn try_calculate(&self, request: &CalculateRebateRequest) -> CoreResult<Decimal> {
        debug!(
            rebate_id = %request.rebate_identifier,
            product_id = %request.product_identifier,
            volume = %request.volume,
            "Calculating rebate"
        );

        let rebate = self.rebates.get_rebate(&request.rebate_identifier)?;
        let product = self.products.get_product(&request.product_identifier)?;

        let rebate =
            rebate.ok_or_else(|| RebateError::RebateNotFound(request.rebate_identifier.clone()))?;
        let product = product
            .ok_or_else(|| RebateError::ProductNotFound(request.product_identifier.clone()))?;

        let amount = calculate_amount(&product, &rebate, request.volume)?;

        self.rebates.store_calculation_result(&rebate, amount)?;

        info!(
            rebate_id = %rebate.id,
            product_id = %product.id,
            amount = %amount,
            "Rebate calculated and stored"
        );

        Ok(amount)
    }
}

/// Logs a failed calculation: store faults at `error`, everything else
/// (missing entities, rule violations) at `warn`.
pub fn log_failure(request: &CalculateRebateRequest, err: &RebateError) {
    if err.is_unexpected() {
        error!(
            rebate_id = %request.rebate_identifier,
            product_id = %request.product_identifier,
            error = %err,
            "Rebate calculation failed"
        );
    } else {
        warn!(
            rebate_id = %request.rebate_identifier,
            product_id = %request.product_identifier,
            reason = %err,
            "Rebate not applicable"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RuleViolation, StoreError};
    use crate::store::{MockProductDataStore, MockRebateDataStore};
    use crate::types::{IncentiveType, Product, Rebate};
    use mockall::predicate::eq;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn request(volume: &str) -> CalculateRebateRequest {
        CalculateRebateRequest::new("Test_Rebate_Identifier", "Test_Product_Identifier", dec(volume))
    }

    fn rebate_store(rebate: Option<Rebate>) -> MockRebateDataStore {
        let mut store = MockRebateDataStore::new();
        store
            .expect_get_rebate()
            .returning(move |_| Ok(rebate.clone()));
        store
    }

    fn product_store(product: Option<Product>) -> MockProductDataStore {
        let mut store = MockProductDataStore::new();
        store
            .expect_get_product()
            .returning(move |_| Ok(product.clone()));
        store
    }

    // -------------------------------------------------------------------------
    // EntityMissing
    // -------------------------------------------------------------------------

    #[test]
    fn test_missing_entities_fail_without_persisting() {
        let some_rebate = Rebate::new(
            "R",
            IncentiveType::FixedCashAmount,
            Decimal::from(42),
            Decimal::ZERO,
        );
        let some_product = Product::new("P", Decimal::ONE, [IncentiveType::FixedCashAmount]);

        let cases = [
            (Some(some_rebate.clone()), None),
            (None, Some(some_product.clone())),
            (None, None),
        ];

        for (rebate, product) in cases {
            // No expect_store_calculation_result: a call would panic the mock
            let service = RebateService::new(rebate_store(rebate), product_store(product));

            assert_eq!(
                service.calculate(&request("100")),
                CalculateRebateResult::failure()
            );
        }
    }

    #[test]
    fn test_missing_entity_reason_is_kept() {
        let service = RebateService::new(
            rebate_store(None),
            product_store(Some(Product::new(
                "P",
                Decimal::ONE,
                [IncentiveType::AmountPerUom],
            ))),
        );

        let err = service.try_calculate(&request("1")).unwrap_err();
        assert!(matches!(err, RebateError::RebateNotFound(id) if id == "Test_Rebate_Identifier"));
    }

    #[test]
    fn test_lookups_use_request_identifiers() {
        let mut rebates = MockRebateDataStore::new();
        rebates
            .expect_get_rebate()
            .with(eq("Test_Rebate_Identifier"))
            .times(1)
            .returning(|_| Ok(None));

        let mut products = MockProductDataStore::new();
        products
            .expect_get_product()
            .with(eq("Test_Product_Identifier"))
            .times(1)
            .returning(|_| Ok(None));

        let service = RebateService::new(rebates, products);
        assert!(!service.calculate(&request("1")).success);
    }

    // -------------------------------------------------------------------------
    // RuleViolation
    // -------------------------------------------------------------------------

    #[test]
    fn test_rule_violation_fails_without_persisting() {
        let rebate = Rebate::new(
            "R",
            IncentiveType::FixedRateRebate,
            Decimal::ZERO,
            dec("0.2"),
        );
        let product = Product::new("P", Decimal::ZERO, [IncentiveType::FixedRateRebate]);

        let service = RebateService::new(rebate_store(Some(rebate)), product_store(Some(product)));

        let err = service.try_calculate(&request("5")).unwrap_err();
        assert!(matches!(
            err,
            RebateError::Rule(RuleViolation::MissingInput { field: "price", .. })
        ));
        assert!(!service.calculate(&request("5")).success);
    }

    #[test]
    fn test_unrepresentable_amount_is_not_stored_as_zero() {
        let rebate = Rebate::new(
            "R",
            IncentiveType::FixedRateRebate,
            Decimal::ZERO,
            dec("0.0000000000001"),
        );
        let product = Product::new("P", dec("0.0000000000001"), [IncentiveType::FixedRateRebate]);

        // No expect_store_calculation_result: a call would panic the mock
        let service = RebateService::new(rebate_store(Some(rebate)), product_store(Some(product)));

        assert_eq!(
            service.calculate(&request("0.0001")),
            CalculateRebateResult::failure()
        );
        assert!(matches!(
            service.try_calculate(&request("0.0001")),
            Err(RebateError::Rule(RuleViolation::Precision { .. }))
        ));
    }

    #[test]
    fn test_unrecognized_incentive_fails_for_any_product() {
        for supported in IncentiveType::ALL {
            let rebate = Rebate {
                id: "R".to_string(),
                incentive: "unknown".to_string(),
                amount: Decimal::ONE,
                percentage: Decimal::ONE,
            };
            let product = Product::new("P", Decimal::ONE, [supported]);

            let service =
                RebateService::new(rebate_store(Some(rebate)), product_store(Some(product)));
            assert!(!service.calculate(&request("100")).success);
        }
    }

    // -------------------------------------------------------------------------
    // RuleValid → PersistThenSuccess
    // -------------------------------------------------------------------------

    fn assert_persists(rebate: Rebate, product: Product, volume: &str, expected: &str) {
        let expected = dec(expected);

        let mut rebates = rebate_store(Some(rebate.clone()));
        rebates
            .expect_store_calculation_result()
            .withf(move |stored, amount| stored == &rebate && *amount == expected)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RebateService::new(rebates, product_store(Some(product)));
        assert_eq!(
            service.calculate(&request(volume)),
            CalculateRebateResult::success(expected)
        );
    }

    #[test]
    fn test_fixed_cash_amount_scenario() {
        assert_persists(
            Rebate::new("R", IncentiveType::FixedCashAmount, dec("42"), Decimal::ZERO),
            Product::new("P", Decimal::ZERO, [IncentiveType::FixedCashAmount]),
            "100",
            "42",
        );
    }

    #[test]
    fn test_fixed_rate_rebate_scenario() {
        assert_persists(
            Rebate::new("R", IncentiveType::FixedRateRebate, Decimal::ZERO, dec("0.2")),
            Product::new("P", dec("10"), [IncentiveType::FixedRateRebate]),
            "5",
            "10",
        );
    }

    #[test]
    fn test_amount_per_uom_scenario() {
        assert_persists(
            Rebate::new("R", IncentiveType::AmountPerUom, dec("3"), Decimal::ZERO),
            Product::new("P", Decimal::ZERO, [IncentiveType::AmountPerUom]),
            "7",
            "21",
        );
    }

    #[test]
    fn test_identical_requests_give_identical_results() {
        let rebate = Rebate::new("R", IncentiveType::AmountPerUom, dec("2.5"), Decimal::ZERO);
        let product = Product::new("P", Decimal::ONE, [IncentiveType::AmountPerUom]);

        let mut rebates = rebate_store(Some(rebate));
        rebates
            .expect_store_calculation_result()
            .times(2)
            .returning(|_, _| Ok(()));

        let service = RebateService::new(rebates, product_store(Some(product)));

        let first = service.calculate(&request("4"));
        let second = service.calculate(&request("4"));
        assert_eq!(first, second);
        assert_eq!(first.rebate_amount, dec("10"));
    }

    // -------------------------------------------------------------------------
    // UnexpectedFailure
    // -------------------------------------------------------------------------

    #[test]
    fn test_read_failure_becomes_failure_result() {
        let mut rebates = MockRebateDataStore::new();
        rebates
            .expect_get_rebate()
            .returning(|id| Err(StoreError::read("rebate", id, "connection reset")));

        let service = RebateService::new(rebates, product_store(None));

        assert!(!service.calculate(&request("1")).success);
        assert!(service.try_calculate(&request("1")).unwrap_err().is_unexpected());
    }

    #[test]
    fn test_write_failure_becomes_failure_result() {
        let rebate = Rebate::new("R", IncentiveType::FixedCashAmount, dec("42"), Decimal::ZERO);
        let product = Product::new("P", Decimal::ZERO, [IncentiveType::FixedCashAmount]);

        let mut rebates = rebate_store(Some(rebate));
        rebates
            .expect_store_calculation_result()
            .returning(|rebate, _| Err(StoreError::write("rebate", rebate.id.clone(), "read-only")));

        let service = RebateService::new(rebates, product_store(Some(product)));

        assert_eq!(
            service.calculate(&request("1")),
            CalculateRebateResult::failure()
        );
    }

    #[test]
    fn test_shared_store_through_references() {
        struct Both(Rebate, Product);

        impl RebateDataStore for Both {
            fn get_rebate(&self, _: &str) -> crate::StoreResult<Option<Rebate>> {
                Ok(Some(self.0.clone()))
            }

            fn store_calculation_result(&self, _: &Rebate, _: Decimal) -> crate::StoreResult<()> {
                Ok(())
            }
        }

        impl ProductDataStore for Both {
            fn get_product(&self, _: &str) -> crate::StoreResult<Option<Product>> {
                Ok(Some(self.1.clone()))
            }
        }

        let store = Both(
            Rebate::new("R", IncentiveType::FixedCashAmount, dec("7"), Decimal::ZERO),
            Product::new("P", Decimal::ZERO, [IncentiveType::FixedCashAmount]),
        );

        let service = RebateService::new(&store, &store);
        assert_eq!(service.calculate(&request("1")).rebate_amount, dec("7"));
    }
}
