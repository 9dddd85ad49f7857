//! Order repository for the fulfillment surface.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use trailhead_core::{Order, OrderDetails, OrderId, OrderLine, ProductId};

use super::RepositoryError;

/// Row mapping for the `orders` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    name: String,
    line1: String,
    line2: Option<String>,
    line3: Option<String>,
    city: String,
    state: String,
    zip: String,
    country: String,
    gift_wrap: bool,
    shipped: bool,
    placed_at: DateTime<Utc>,
}

/// Row mapping for the `order_lines` table.
#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: i64,
    product_id: i64,
    product_name: String,
    quantity: i64,
    unit_price: Decimal,
}

impl OrderLineRow {
    fn into_line(self) -> Result<OrderLine, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "order line quantity {} out of range",
                self.quantity
            ))
        })?;

        Ok(OrderLine {
            product_id: ProductId::new(self.product_id),
            product_name: self.product_name,
            quantity,
            unit_price: self.unit_price,
        })
    }
}

/// Persistence seam for the fulfillment flag.
///
/// The Postgres implementation lives on [`OrderRepository`]; tests
/// substitute an in-memory store.
pub trait FulfillmentStore {
    /// Set an order's `shipped` flag.
    ///
    /// Idempotent: setting a flag to its current value is still a success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no order has the id - the
    /// fulfillment contract implies existence.
    async fn set_shipped(&self, id: OrderId, shipped: bool) -> Result<(), RepositoryError>;
}

/// Repository for order listing and fulfillment tracking.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every order with its fully-populated line snapshot, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for an out-of-range line quantity.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let order_rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, name, line1, line2, line3, city, state, zip, country,
                   gift_wrap, shipped, placed_at
            FROM orders
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let line_rows = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT order_id, product_id, product_name, quantity, unit_price
            FROM order_lines
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        let mut lines_by_order: HashMap<i64, Vec<OrderLine>> = HashMap::new();
        for row in line_rows {
            let order_id = row.order_id;
            lines_by_order
                .entry(order_id)
                .or_default()
                .push(row.into_line()?);
        }

        Ok(order_rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_order.remove(&row.id).unwrap_or_default();
                Order {
                    id: OrderId::new(row.id),
                    details: OrderDetails {
                        name: row.name,
                        line1: row.line1,
                        line2: row.line2,
                        line3: row.line3,
                        city: row.city,
                        state: row.state,
                        zip: row.zip,
                        country: row.country,
                        gift_wrap: row.gift_wrap,
                    },
                    lines,
                    shipped: row.shipped,
                    placed_at: row.placed_at,
                }
            })
            .collect())
    }
}

impl FulfillmentStore for OrderRepository<'_> {
    async fn set_shipped(&self, id: OrderId, shipped: bool) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE orders SET shipped = $2 WHERE id = $1")
            .bind(id.as_i64())
            .bind(shipped)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// In-memory fulfillment store keyed by order id.
    #[derive(Default)]
    struct MemoryFulfillment {
        flags: Mutex<HashMap<i64, bool>>,
    }

    impl MemoryFulfillment {
        fn with_order(id: i64) -> Self {
            let store = Self::default();
            store.flags.lock().expect("lock").insert(id, false);
            store
        }

        fn shipped(&self, id: i64) -> Option<bool> {
            self.flags.lock().expect("lock").get(&id).copied()
        }
    }

    impl FulfillmentStore for MemoryFulfillment {
        async fn set_shipped(&self, id: OrderId, shipped: bool) -> Result<(), RepositoryError> {
            let mut flags = self.flags.lock().expect("lock");
            match flags.get_mut(&id.as_i64()) {
                Some(flag) => {
                    *flag = shipped;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }
    }

    #[tokio::test]
    async fn ship_then_reset_then_ship_tracks_the_flag() {
        let store = MemoryFulfillment::with_order(1);
        let id = OrderId::new(1);

        store.set_shipped(id, true).await.expect("ship");
        assert_eq!(store.shipped(1), Some(true));

        store.set_shipped(id, false).await.expect("reset");
        assert_eq!(store.shipped(1), Some(false));

        store.set_shipped(id, true).await.expect("reship");
        assert_eq!(store.shipped(1), Some(true));
    }

    #[tokio::test]
    async fn marking_shipped_twice_is_idempotent() {
        let store = MemoryFulfillment::with_order(1);
        let id = OrderId::new(1);

        store.set_shipped(id, true).await.expect("first");
        store.set_shipped(id, true).await.expect("second");
        assert_eq!(store.shipped(1), Some(true));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let store = MemoryFulfillment::with_order(1);

        let err = store
            .set_shipped(OrderId::new(42), true)
            .await
            .expect_err("missing id must fail");

        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(store.shipped(1), Some(false));
    }
}
