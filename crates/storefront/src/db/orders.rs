//! Postgres-backed order persistence for the checkout path.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use trailhead_core::{Order, OrderId};

use super::RepositoryError;
use crate::services::checkout::OrderStore;

/// Order store backed by the `orders` and `order_lines` tables.
///
/// Inserting an order writes the header and every line in a single
/// transaction, so a partially written order is never visible.
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    /// Create a new order store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for PgOrderStore {
    /// Persist an order.
    ///
    /// An unassigned id inserts a new record (header plus line snapshot,
    /// one transaction) and writes the assigned identity back into the
    /// order. Any other id updates the existing record; only the shipping
    /// fields and the `shipped` flag are written because the line snapshot
    /// is immutable after creation.
    async fn save_order(&self, order: &mut Order) -> Result<(), RepositoryError> {
        if order.id.is_unassigned() {
            let mut tx = self.pool.begin().await?;

            let (id, placed_at): (i64, DateTime<Utc>) = sqlx::query_as(
                r"
                INSERT INTO orders
                    (name, line1, line2, line3, city, state, zip, country, gift_wrap, shipped)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING id, placed_at
                ",
            )
            .bind(&order.details.name)
            .bind(&order.details.line1)
            .bind(order.details.line2.as_deref())
            .bind(order.details.line3.as_deref())
            .bind(&order.details.city)
            .bind(&order.details.state)
            .bind(&order.details.zip)
            .bind(&order.details.country)
            .bind(order.details.gift_wrap)
            .bind(order.shipped)
            .fetch_one(&mut *tx)
            .await?;

            for line in &order.lines {
                sqlx::query(
                    r"
                    INSERT INTO order_lines
                        (order_id, product_id, product_name, quantity, unit_price)
                    VALUES ($1, $2, $3, $4, $5)
                    ",
                )
                .bind(id)
                .bind(line.product_id.as_i64())
                .bind(&line.product_name)
                .bind(i64::from(line.quantity))
                .bind(line.unit_price)
                .execute(&mut *tx)
                .await?;
            }

            tx.commit().await?;

            order.id = OrderId::new(id);
            order.placed_at = placed_at;
            return Ok(());
        }

        sqlx::query(
            r"
            UPDATE orders
            SET name = $2, line1 = $3, line2 = $4, line3 = $5, city = $6,
                state = $7, zip = $8, country = $9, gift_wrap = $10, shipped = $11
            WHERE id = $1
            ",
        )
        .bind(order.id.as_i64())
        .bind(&order.details.name)
        .bind(&order.details.line1)
        .bind(order.details.line2.as_deref())
        .bind(order.details.line3.as_deref())
        .bind(&order.details.city)
        .bind(&order.details.state)
        .bind(&order.details.zip)
        .bind(&order.details.country)
        .bind(order.details.gift_wrap)
        .bind(order.shipped)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
