//! Orders, order lines, and checkout field validation.
//!
//! An order is the durable record of a completed checkout. Its line snapshot
//! is copied from the cart at checkout time and never changes afterwards;
//! only the `shipped` flag is mutable post-creation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::{OrderId, ProductId};

/// A recoverable checkout validation failure.
///
/// Reported to the caller; the checkout workflow stays in its editing state
/// and the cart is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum ValidationFailure {
    /// Checkout was attempted with no lines in the cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A required shipping field was blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Customer and shipping fields collected at checkout.
///
/// All fields except `line2`, `line3`, and `gift_wrap` are required
/// non-empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDetails {
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    #[serde(default)]
    pub line3: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(default)]
    pub gift_wrap: bool,
}

impl OrderDetails {
    /// Check that every required field is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationFailure::MissingField` naming the first field
    /// (in declaration order) that is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let required: [(&'static str, &str); 6] = [
            ("name", &self.name),
            ("line1", &self.line1),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
            ("country", &self.country),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationFailure::MissingField(field));
            }
        }

        Ok(())
    }
}

/// One immutable line within an order's snapshot.
///
/// Carries the product name and unit price as they were at checkout, so a
/// fetched order is always fully populated even if the catalog record is
/// later edited or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl OrderLine {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A persisted checkout.
///
/// `id` stays `OrderId::UNASSIGNED` until the order repository inserts the
/// record. Orders are never deleted in normal operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Storage-assigned identity; unassigned until persisted.
    pub id: OrderId,
    /// Customer and shipping fields, validated before the order is built.
    pub details: OrderDetails,
    /// Immutable snapshot of the cart lines at checkout time.
    pub lines: Vec<OrderLine>,
    /// Fulfillment flag, the only field mutable after creation.
    pub shipped: bool,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Build a new, not-yet-persisted order by snapshotting a cart.
    ///
    /// The caller is responsible for validating `details` and for the cart
    /// being non-empty; the checkout workflow does both before calling this.
    #[must_use]
    pub fn from_cart(details: OrderDetails, cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .map(|line| OrderLine {
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                quantity: line.quantity,
                unit_price: line.product.price,
            })
            .collect();

        Self {
            id: OrderId::UNASSIGNED,
            details,
            lines,
            shipped: false,
            placed_at: Utc::now(),
        }
    }

    /// Total value of the order's line snapshot.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Product;

    fn details() -> OrderDetails {
        OrderDetails {
            name: "Alice Example".to_owned(),
            line1: "123 River Rd".to_owned(),
            line2: None,
            line3: None,
            city: "Boulder".to_owned(),
            state: "CO".to_owned(),
            zip: "80301".to_owned(),
            country: "USA".to_owned(),
            gift_wrap: false,
        }
    }

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            category: "Soccer".to_owned(),
        }
    }

    #[test]
    fn validate_accepts_complete_details() {
        assert_eq!(details().validate(), Ok(()));
    }

    #[test]
    fn validate_names_the_first_missing_field() {
        let mut d = details();
        d.city = "   ".to_owned();
        d.zip = String::new();

        assert_eq!(
            d.validate(),
            Err(ValidationFailure::MissingField("city"))
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut d = details();
        d.line2 = None;
        d.line3 = None;
        d.gift_wrap = true;

        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn from_cart_snapshots_lines_exactly() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(275, 2)), 2);
        cart.add_item(product(2, Decimal::new(4895, 2)), 1);

        let order = Order::from_cart(details(), &cart);

        assert!(order.id.is_unassigned());
        assert!(!order.shipped);
        assert_eq!(order.lines.len(), 2);
        assert_eq!(order.lines[0].product_id, ProductId::new(1));
        assert_eq!(order.lines[0].quantity, 2);
        assert_eq!(order.lines[0].unit_price, Decimal::new(275, 2));
        assert_eq!(order.total(), cart.compute_total());
    }

    #[test]
    fn snapshot_keeps_the_price_captured_in_the_cart() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 1);

        // A later catalog price change must not affect the snapshot.
        let order = Order::from_cart(details(), &cart);
        assert_eq!(order.lines[0].unit_price, Decimal::new(1000, 2));
    }
}
