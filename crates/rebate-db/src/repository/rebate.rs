//! # Rebate Repository
//!
//! Database operations for rebate programs and their calculation results.
//!
//! ## Calculation Results
//! ```text
//! calculate → Ok(amount)
//!       │
//!       ▼
//! UPDATE rebates SET calculated_amount = amount, calculated_at = now
//!       │
//!       └── earlier results are overwritten, only the latest is kept
//! ```
//!
//! The incentive column holds the raw code. Rows whose code isn't one of
//! the recognized incentive types still load; the calculator rejects them.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use rebate_core::validation::{validate_identifier, validate_percentage};
use rebate_core::Rebate;

/// Raw `rebates` row.
#[derive(Debug, sqlx::FromRow)]
struct RebateRow {
    id: String,
    incentive: String,
    amount: String,
    percentage: String,
}

impl RebateRow {
    fn into_rebate(self) -> DbResult<Rebate> {
        let amount = parse_column(&self.id, "amount", &self.amount)?;
        let percentage = parse_column(&self.id, "percentage", &self.percentage)?;

        Ok(Rebate {
            id: self.id,
            incentive: self.incentive,
            amount,
            percentage,
        })
    }
}

fn parse_column(id: &str, column: &str, text: &str) -> DbResult<Decimal> {
    text.parse::<Decimal>()
        .map_err(|e| DbError::invalid_data("Rebate", id, format!("{column}: {e}")))
}

/// Repository for rebate database operations.
#[derive(Debug, Clone)]
pub struct RebateRepository {
    pool: SqlitePool,
}

impl RebateRepository {
    /// Creates a new RebateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RebateRepository { pool }
    }

    /// Gets a rebate by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Rebate))` - Rebate found
    /// * `Ok(None)` - Rebate not found
    /// * `Err(DbError::InvalidData)` - Amount or percentage isn't a decimal
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Rebate>> {
        debug!(id = %id, "Fetching rebate");

        let row = sqlx::query_as::<_, RebateRow>(
            r#"
            SELECT id, incentive, amount, percentage
            FROM rebates
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RebateRow::into_rebate).transpose()
    }

    /// Inserts a rebate, or replaces the terms of an existing one.
    ///
    /// A previously stored calculation result is left in place.
    pub async fn upsert(&self, rebate: &Rebate) -> DbResult<()> {
        validate_identifier("rebate id", &rebate.id)?;
        validate_percentage(rebate.percentage)?;

        debug!(id = %rebate.id, incentive = %rebate.incentive, "Upserting rebate");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO rebates (id, incentive, amount, percentage, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            ON CONFLICT(id) DO UPDATE SET
                incentive = excluded.incentive,
                amount = excluded.amount,
                percentage = excluded.percentage,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&rebate.id)
        .bind(&rebate.incentive)
        .bind(rebate.amount.normalize().to_string())
        .bind(rebate.percentage.normalize().to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Records the latest calculated amount for a rebate.
    ///
    /// ## Returns
    /// * `Ok(())` - Stored, replacing any earlier result
    /// * `Err(DbError::NotFound)` - No rebate row with this id
    pub async fn store_calculation_result(&self, id: &str, amount: Decimal) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE rebates
            SET calculated_amount = ?2, calculated_at = ?3, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(amount.to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Rebate", id));
        }

        info!(id = %id, amount = %amount, "Calculation result stored");
        Ok(())
    }

    /// Returns the last stored calculation result, if any.
    pub async fn latest_calculation(&self, id: &str) -> DbResult<Option<Decimal>> {
        let stored: Option<Option<String>> =
            sqlx::query_scalar("SELECT calculated_amount FROM rebates WHERE id = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        stored
            .flatten()
            .map(|text| parse_column(id, "calculated_amount", &text))
            .transpose()
    }

    /// Counts rebates (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rebates")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use rebate_core::IncentiveType;

    async fn repo() -> (Database, RebateRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rebates();
        (db, repo)
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let (_db, repo) = repo().await;

        let rebate = Rebate::new(
            "R-1",
            IncentiveType::FixedRateRebate,
            Decimal::ZERO,
            Decimal::new(25, 2),
        );
        repo.upsert(&rebate).await.unwrap();

        let loaded = repo.get_by_id("R-1").await.unwrap().unwrap();
        assert_eq!(loaded, rebate);
        assert_eq!(loaded.incentive_type(), Some(IncentiveType::FixedRateRebate));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_rebate_is_none() {
        let (_db, repo) = repo().await;
        assert!(repo.get_by_id("nope").await.unwrap().is_none());
        assert!(repo.latest_calculation("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_incentive_round_trips() {
        let (_db, repo) = repo().await;

        let rebate = Rebate {
            id: "R-2".to_string(),
            incentive: "volume_tier".to_string(),
            amount: Decimal::ONE,
            percentage: Decimal::ZERO,
        };
        repo.upsert(&rebate).await.unwrap();

        let loaded = repo.get_by_id("R-2").await.unwrap().unwrap();
        assert_eq!(loaded.incentive, "volume_tier");
        assert_eq!(loaded.incentive_type(), None);
    }

    #[tokio::test]
    async fn test_upsert_rejects_out_of_range_percentage() {
        let (_db, repo) = repo().await;

        let rebate = Rebate::new(
            "R-3",
            IncentiveType::FixedRateRebate,
            Decimal::ZERO,
            Decimal::TWO,
        );
        assert!(matches!(
            repo.upsert(&rebate).await,
            Err(DbError::Validation(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_rejects_padded_id() {
        let (_db, repo) = repo().await;

        let rebate = Rebate::new(
            "R-3 ",
            IncentiveType::FixedCashAmount,
            Decimal::ONE,
            Decimal::ZERO,
        );
        assert!(matches!(
            repo.upsert(&rebate).await,
            Err(DbError::Validation(_))
        ));
        assert!(repo.get_by_id("R-3").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_calculation_keeps_latest() {
        let (_db, repo) = repo().await;

        let rebate = Rebate::new(
            "R-4",
            IncentiveType::FixedCashAmount,
            Decimal::TEN,
            Decimal::ZERO,
        );
        repo.upsert(&rebate).await.unwrap();
        assert!(repo.latest_calculation("R-4").await.unwrap().is_none());

        repo.store_calculation_result("R-4", Decimal::TEN).await.unwrap();
        repo.store_calculation_result("R-4", Decimal::new(1250, 2))
            .await
            .unwrap();

        assert_eq!(
            repo.latest_calculation("R-4").await.unwrap(),
            Some(Decimal::new(1250, 2))
        );
    }

    #[tokio::test]
    async fn test_upsert_keeps_calculation_result() {
        let (_db, repo) = repo().await;

        let mut rebate = Rebate::new(
            "R-5",
            IncentiveType::FixedCashAmount,
            Decimal::ONE,
            Decimal::ZERO,
        );
        repo.upsert(&rebate).await.unwrap();
        repo.store_calculation_result("R-5", Decimal::ONE).await.unwrap();

        rebate.amount = Decimal::TWO;
        repo.upsert(&rebate).await.unwrap();

        assert_eq!(
            repo.latest_calculation("R-5").await.unwrap(),
            Some(Decimal::ONE)
        );
    }

    #[tokio::test]
    async fn test_store_calculation_for_missing_rebate() {
        let (_db, repo) = repo().await;

        assert!(matches!(
            repo.store_calculation_result("ghost", Decimal::ONE).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
