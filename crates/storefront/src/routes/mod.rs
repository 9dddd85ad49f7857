//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Catalog
//! GET  /products               - Paginated product listing (?category=&page=)
//! GET  /categories             - Distinct category list for navigation
//!
//! # Cart
//! GET  /cart                   - Current cart with total
//! POST /cart/add               - Add a product (merges quantity by product id)
//! POST /cart/remove            - Remove an entire line
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! POST /checkout               - Attempt checkout; 422 on validation failure
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::index))
        .route("/categories", get(catalog::categories))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(catalog_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
}
