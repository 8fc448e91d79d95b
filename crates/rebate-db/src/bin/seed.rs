//! # Seed Data Generator
//!
//! Populates the database with the demo product and rebates the runner
//! looks up by default.
//!
//! ## Usage
//! ```bash
//! # Seed ./rebate_dev.db
//! cargo run -p rebate-db --bin seed
//!
//! # Specify database path
//! cargo run -p rebate-db --bin seed -- --db ./data/rebate.db
//! ```
//!
//! ## Seeded Data
//! ```text
//! Test_Product_Identifier   price 10, supports all incentive types
//!
//! Test_Rebate_Identifier    fixed_rate_rebate   percentage 0.2  → 2 per unit
//! Demo_Fixed_Cash_Rebate    fixed_cash_amount   amount 50
//! Demo_Per_Uom_Rebate       amount_per_uom      amount 0.5      → 0.5 × volume
//! ```
//!
//! Rows are upserted, so running the seed twice resets the demo terms.

use rust_decimal::Decimal;
use std::env;
use tracing_subscriber::EnvFilter;

use rebate_core::{IncentiveType, Product, Rebate};
use rebate_db::{Database, DbConfig};

const DEFAULT_DB_PATH: &str = "./rebate_dev.db";

fn demo_product() -> Product {
    Product::new("Test_Product_Identifier", Decimal::TEN, IncentiveType::ALL)
}

fn demo_rebates() -> Vec<Rebate> {
    vec![
        Rebate::new(
            "Test_Rebate_Identifier",
            IncentiveType::FixedRateRebate,
            Decimal::ZERO,
            Decimal::new(2, 1),
        ),
        Rebate::new(
            "Demo_Fixed_Cash_Rebate",
            IncentiveType::FixedCashAmount,
            Decimal::new(50, 0),
            Decimal::ZERO,
        ),
        Rebate::new(
            "Demo_Per_Uom_Rebate",
            IncentiveType::AmountPerUom,
            Decimal::new(5, 1),
            Decimal::ZERO,
        ),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("REBATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from(DEFAULT_DB_PATH);

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Rebate Calculator Seed Data");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: {DEFAULT_DB_PATH})");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
            }
        }
        i += 1;
    }

    println!("Rebate Calculator Seed Data");
    println!("===========================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let product = demo_product();
    db.products().upsert(&product).await?;
    println!(
        "✓ Product {} (price {}, incentives {})",
        product.id,
        product.price,
        product.supported_incentives.to_codes()
    );

    for rebate in demo_rebates() {
        db.rebates().upsert(&rebate).await?;
        println!("✓ Rebate {} ({})", rebate.id, rebate.incentive);
    }

    println!();
    println!(
        "Store now holds {} product(s) and {} rebate(s)",
        db.products().count().await?,
        db.rebates().count().await?
    );

    db.close().await;
    println!("✓ Seed complete!");

    Ok(())
}
