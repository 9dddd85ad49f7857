//! The session-owned cart aggregate.
//!
//! A `Cart` is a plain in-memory collection of lines with no persistence
//! logic of its own - the storefront's `CartSession` wraps these same
//! operations with session write-through. Carts serialize to JSON for the
//! session blob, which is also what pins each line's price to the moment
//! the product was added.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::Product;
use crate::types::ProductId;

/// One (product, quantity) pair within a cart.
///
/// Invariant: `quantity >= 1`; a line that would reach zero is removed
/// from the cart, never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product as it was when added.
    pub product: Product,
    /// Number of units, always at least one.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Insertion-ordered collection of cart lines, at most one per product id.
///
/// Created empty per visitor session, mutated by add/remove, and cleared
/// (emptied, not destroyed) after a successful checkout. No operation here
/// raises an error: inputs are trusted to reference valid products, and
/// callers only ever add positive quantities - both are enforced upstream
/// at the catalog and HTTP boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` units of `product`.
    ///
    /// If a line for the same product id already exists its quantity is
    /// incremented, saturating at `u32::MAX`; otherwise a new line is
    /// appended. Callers must pass `quantity >= 1`.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }
    }

    /// Remove the entire line for `product_id`, if present.
    ///
    /// Removing an absent product id is a no-op, never an error.
    pub fn remove_line(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Total value of the cart: the sum of every line's subtotal.
    ///
    /// Recomputed on demand rather than cached, so it is always consistent
    /// with the current lines.
    #[must_use]
    pub fn compute_total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Empty all lines. The cart remains usable for the same session.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: Decimal) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price,
            category: "Watersports".to_owned(),
        }
    }

    #[test]
    fn add_item_appends_new_lines_in_insertion_order() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 1);
        cart.add_item(product(2, Decimal::new(500, 2)), 2);

        let ids: Vec<i64> = cart
            .lines()
            .iter()
            .map(|l| l.product.id.as_i64())
            .collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn add_item_merges_quantities_for_same_product() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 1);
        cart.add_item(product(2, Decimal::new(500, 2)), 1);
        cart.add_item(product(1, Decimal::new(1000, 2)), 4);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[1].quantity, 1);
    }

    #[test]
    fn repeated_adds_sum_to_one_line() {
        let mut cart = Cart::new();
        for quantity in [3, 1, 7, 2] {
            cart.add_item(product(9, Decimal::new(250, 2)), quantity);
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 13);
    }

    #[test]
    fn add_item_saturates_at_the_quantity_ceiling() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(100, 2)), u32::MAX);
        cart.add_item(product(1, Decimal::new(100, 2)), 5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
    }

    #[test]
    fn remove_line_deletes_the_whole_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 3);
        cart.add_item(product(2, Decimal::new(500, 2)), 1);

        cart.remove_line(ProductId::new(1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product.id, ProductId::new(2));
    }

    #[test]
    fn remove_line_on_absent_product_is_a_noop() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 3);
        let total_before = cart.compute_total();

        cart.remove_line(ProductId::new(42));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.compute_total(), total_before);
    }

    #[test]
    fn compute_total_sums_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 3); // 30.00
        cart.add_item(product(2, Decimal::new(550, 2)), 2); // 11.00

        assert_eq!(cart.compute_total(), Decimal::new(4100, 2));
    }

    #[test]
    fn total_is_zero_after_removing_last_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(999, 2)), 1);
        cart.remove_line(ProductId::new(1));

        assert!(cart.is_empty());
        assert_eq!(cart.compute_total(), Decimal::ZERO);
    }

    #[test]
    fn clear_empties_but_cart_stays_usable() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(1000, 2)), 2);
        cart.add_item(product(2, Decimal::new(500, 2)), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.compute_total(), Decimal::ZERO);

        cart.add_item(product(3, Decimal::new(100, 2)), 1);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn serde_round_trips_through_session_json() {
        let mut cart = Cart::new();
        cart.add_item(product(1, Decimal::new(4995, 2)), 2);

        let json = serde_json::to_string(&cart).expect("serialize");
        let back: Cart = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(back, cart);
        assert_eq!(back.compute_total(), Decimal::new(9990, 2));
    }
}
