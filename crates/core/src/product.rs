//! Catalog product record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A product in the catalog.
///
/// Identity is assigned by storage; `ProductId::UNASSIGNED` marks a record
/// that has not been inserted yet. The catalog is the sole mutator - carts
/// and orders only ever hold snapshots, so the price a customer is charged
/// is the price at the time the line was captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Storage-assigned identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price, non-negative with two fractional digits.
    pub price: Decimal,
    /// Exact-match category (non-empty).
    pub category: String,
}
