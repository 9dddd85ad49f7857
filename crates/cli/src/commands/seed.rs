//! Catalog seed command.
//!
//! Inserts a starter catalog for development and demos. Does nothing when
//! the products table already has rows, so it is safe to run on every
//! deploy.

use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use sqlx::PgPool;

use super::CommandError;

/// (name, description, price in cents, category)
const STARTER_PRODUCTS: &[(&str, &str, i64, &str)] = &[
    (
        "Kayak",
        "A boat for one person",
        27500,
        "Watersports",
    ),
    (
        "Lifejacket",
        "Protective and fashionable",
        4895,
        "Watersports",
    ),
    ("Soccer Ball", "FIFA-approved size and weight", 1950, "Soccer"),
    (
        "Corner Flags",
        "Give your playing field a professional touch",
        3495,
        "Soccer",
    ),
    ("Stadium", "Flat-packed 35,000-seat stadium", 7_950_000, "Soccer"),
    ("Thinking Cap", "Improve brain efficiency by 75%", 1600, "Chess"),
    (
        "Unsteady Chair",
        "Secretly give your opponent a disadvantage",
        2995,
        "Chess",
    ),
    (
        "Human Chess Board",
        "A fun game for the family",
        7500,
        "Chess",
    ),
    ("Bling-Bling King", "Gold-plated, diamond-studded King", 11600, "Chess"),
];

/// Seed the catalog if it is empty.
///
/// # Errors
///
/// Returns `CommandError` if the database URL is missing or a query fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        tracing::info!("Catalog already has {existing} products, skipping seed");
        return Ok(());
    }

    for (name, description, cents, category) in STARTER_PRODUCTS {
        sqlx::query(
            r"
            INSERT INTO products (name, description, price, category)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(name)
        .bind(description)
        .bind(Decimal::new(*cents, 2))
        .bind(category)
        .execute(&pool)
        .await?;
    }

    tracing::info!("Seeded {} products", STARTER_PRODUCTS.len());
    Ok(())
}
