//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Storage Shape
//! ```text
//! products
//! ┌─────────────────────────┬────────────────────────────────────┬───────┐
//! │ id                      │ supported_incentives               │ price │
//! ├─────────────────────────┼────────────────────────────────────┼───────┤
//! │ Test_Product_Identifier │ fixed_cash_amount,fixed_rate_rebate│ 10    │
//! └─────────────────────────┴────────────────────────────────────┴───────┘
//! ```
//! Unknown incentive codes in `supported_incentives` are dropped on load
//! (with a warning), so they never match a rebate.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use rebate_core::validation::{validate_identifier, validate_price};
use rebate_core::{Product, SupportedIncentives};

/// Raw `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    supported_incentives: String,
    price: String,
}

impl ProductRow {
    fn into_product(self) -> DbResult<Product> {
        let price = self
            .price
            .parse::<Decimal>()
            .map_err(|e| DbError::invalid_data("Product", &self.id, format!("price: {e}")))?;

        let (supported_incentives, unknown) =
            SupportedIncentives::parse_codes(&self.supported_incentives);
        if !unknown.is_empty() {
            warn!(id = %self.id, unknown = ?unknown, "Ignoring unknown incentive codes");
        }

        Ok(Product {
            id: self.id,
            supported_incentives,
            price,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.get_by_id("Test_Product_Identifier").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    /// * `Err(DbError::InvalidData)` - Row exists but its price isn't a decimal
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        debug!(id = %id, "Fetching product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, supported_incentives, price
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_product).transpose()
    }

    /// Inserts a product, or replaces the price and incentives of an
    /// existing one.
    ///
    /// ## Returns
    /// * `Ok(())` - Stored
    /// * `Err(DbError::Validation)` - Blank or padded id, or negative price
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        validate_identifier("product id", &product.id)?;
        validate_price(product.price)?;

        debug!(id = %product.id, "Upserting product");

        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (id, supported_incentives, price, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT(id) DO UPDATE SET
                supported_incentives = excluded.supported_incentives,
                price = excluded.price,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&product.id)
        .bind(product.supported_incentives.to_codes())
        .bind(product.price.normalize().to_string())
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
