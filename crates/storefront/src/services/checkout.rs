//! The checkout workflow: validated transition from a live cart to a
//! persisted order.
//!
//! The workflow has two observable states. While a checkout attempt fails
//! validation or persistence the visitor keeps editing the same cart; once
//! an attempt succeeds the order exists, the cart is empty, and the assigned
//! order id is reported.

use trailhead_core::{Cart, Order, OrderDetails, OrderId, ValidationFailure};

use crate::db::RepositoryError;

/// Persistence seam for orders.
///
/// The Postgres implementation lives in [`crate::db::PgOrderStore`]; tests
/// substitute an in-memory store.
pub trait OrderStore {
    /// Persist the order, assigning an identity when it has none.
    async fn save_order(&self, order: &mut Order) -> Result<(), RepositoryError>;
}

/// Why a checkout attempt did not complete.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The cart or the shipping details failed validation. Recoverable:
    /// the caller fixes the input and retries.
    #[error("{0}")]
    Validation(#[from] ValidationFailure),

    /// The order could not be persisted. Not retried automatically; the
    /// cart is left intact for a later attempt.
    #[error("failed to persist order: {0}")]
    Storage(#[from] RepositoryError),
}

/// Attempt to turn the cart into a persisted order.
///
/// Checks, in order: the cart is non-empty, then every required shipping
/// field is present. Only when both pass does it snapshot the cart's lines
/// into a new [`Order`], persist it, and clear the cart. The
/// snapshot-then-clear ordering is load-bearing: clearing before a
/// successful persist would lose the customer's cart on a failed save.
///
/// # Errors
///
/// `CheckoutError::Validation` for an empty cart or a missing field,
/// `CheckoutError::Storage` when persistence fails. In both cases the cart
/// is unchanged.
pub async fn attempt_checkout<S: OrderStore>(
    store: &S,
    cart: &mut Cart,
    details: OrderDetails,
) -> Result<OrderId, CheckoutError> {
    if cart.is_empty() {
        return Err(ValidationFailure::EmptyCart.into());
    }
    details.validate()?;

    let mut order = Order::from_cart(details, cart);
    store.save_order(&mut order).await?;

    cart.clear();
    Ok(order.id)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rust_decimal::Decimal;

    use trailhead_core::{Product, ProductId};

    use super::*;

    /// In-memory order store that assigns sequential ids, or fails every
    /// save when constructed with `failing()`.
    #[derive(Default)]
    struct MemoryOrderStore {
        saved: Mutex<Vec<Order>>,
        fail: bool,
    }

    impl MemoryOrderStore {
        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn saved(&self) -> Vec<Order> {
            self.saved.lock().expect("lock").clone()
        }
    }

    impl OrderStore for MemoryOrderStore {
        async fn save_order(&self, order: &mut Order) -> Result<(), RepositoryError> {
            if self.fail {
                return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
            }
            let mut saved = self.saved.lock().expect("lock");
            if order.id.is_unassigned() {
                order.id = OrderId::new(i64::try_from(saved.len()).expect("len") + 1);
                saved.push(order.clone());
            } else if let Some(existing) =
                saved.iter_mut().find(|existing| existing.id == order.id)
            {
                *existing = order.clone();
            }
            Ok(())
        }
    }

    fn product(id: i64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(cents, 2),
            category: "Chess".to_owned(),
        }
    }

    fn details() -> OrderDetails {
        OrderDetails {
            name: "Bob Example".to_owned(),
            line1: "1 Summit Way".to_owned(),
            line2: None,
            line3: None,
            city: "Denver".to_owned(),
            state: "CO".to_owned(),
            zip: "80202".to_owned(),
            country: "USA".to_owned(),
            gift_wrap: false,
        }
    }

    #[tokio::test]
    async fn empty_cart_never_persists_and_reports_the_failure() {
        let store = MemoryOrderStore::default();
        let mut cart = Cart::new();

        let err = attempt_checkout(&store, &mut cart, details())
            .await
            .expect_err("empty cart must fail");

        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationFailure::EmptyCart)
        ));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn missing_field_names_the_field_and_keeps_the_cart() {
        let store = MemoryOrderStore::default();
        let mut cart = Cart::new();
        cart.add_item(product(1, 1999), 2);

        let mut bad = details();
        bad.zip = String::new();

        let err = attempt_checkout(&store, &mut cart, bad)
            .await
            .expect_err("missing zip must fail");

        assert!(matches!(
            err,
            CheckoutError::Validation(ValidationFailure::MissingField("zip"))
        ));
        assert_eq!(cart.lines().len(), 1);
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn successful_checkout_snapshots_lines_and_clears_the_cart() {
        let store = MemoryOrderStore::default();
        let mut cart = Cart::new();
        cart.add_item(product(1, 1999), 2);
        cart.add_item(product(2, 4850), 1);
        let expected_total = cart.compute_total();

        let order_id = attempt_checkout(&store, &mut cart, details())
            .await
            .expect("checkout succeeds");

        assert_eq!(order_id, OrderId::new(1));
        assert!(cart.is_empty());

        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].lines.len(), 2);
        assert_eq!(saved[0].lines[0].product_id, ProductId::new(1));
        assert_eq!(saved[0].lines[0].quantity, 2);
        assert_eq!(saved[0].lines[1].quantity, 1);
        assert_eq!(saved[0].total(), expected_total);
        assert!(!saved[0].shipped);
    }

    #[tokio::test]
    async fn persistence_failure_surfaces_and_preserves_the_cart() {
        let store = MemoryOrderStore::failing();
        let mut cart = Cart::new();
        cart.add_item(product(1, 1999), 2);

        let err = attempt_checkout(&store, &mut cart, details())
            .await
            .expect_err("save must fail");

        assert!(matches!(err, CheckoutError::Storage(_)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }
}
