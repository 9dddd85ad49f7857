//! HTTP route handlers for the admin panel.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//!
//! # Products (catalog CRUD)
//! GET    /products          - All products
//! POST   /products          - Create a product
//! GET    /products/{id}     - Fetch one product (404 if missing)
//! PUT    /products/{id}     - Update mutable fields (silent no-op if missing)
//! DELETE /products/{id}     - Delete (no-op if missing)
//!
//! # Orders (fulfillment tracking)
//! GET  /orders              - All orders with line snapshots
//! POST /orders/{id}/ship    - Mark shipped
//! POST /orders/{id}/reset   - Reset shipped
//! ```
//!
//! Every route except `/health` requires the admin bearer token.

pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}/ship", post(orders::ship))
        .route("/{id}/reset", post(orders::reset))
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
}
