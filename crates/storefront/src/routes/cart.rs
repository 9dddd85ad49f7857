//! Cart route handlers.
//!
//! Every mutation loads the session's cart, applies the change, and writes
//! the cart back before responding (write-through), so the next request
//! from the same visitor always sees it.

use axum::{Form, Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use trailhead_core::{Cart, ProductId};

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::CartSession;
use crate::state::AppState;

/// Cart response body: the lines plus the recomputed total.
#[derive(Debug, Serialize)]
pub struct CartView {
    #[serde(flatten)]
    pub cart: Cart,
    pub total: Decimal,
}

impl From<Cart> for CartView {
    fn from(cart: Cart) -> Self {
        let total = cart.compute_total();
        Self { cart, total }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i64,
    pub quantity: Option<u32>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: i64,
}

/// Show the current cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartView>> {
    let cart = CartSession::new(session).load().await?;
    Ok(Json(cart.into()))
}

/// Add a product to the cart.
///
/// Validates the quantity and resolves the product before the cart is
/// touched; the cart itself trusts its inputs. Adding a product already in
/// the cart merges into the existing line.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);
    if quantity < 1 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = CatalogRepository::new(state.pool())
        .find(ProductId::new(form.product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let carts = CartSession::new(session);
    let mut cart = carts.load().await?;
    cart.add_item(product, quantity);
    carts.save(&cart).await?;

    Ok(Json(cart.into()))
}

/// Remove an entire line from the cart.
///
/// Removing a product that is not in the cart is a no-op, not an error.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Json<CartView>> {
    let carts = CartSession::new(session);
    let mut cart = carts.load().await?;
    cart.remove_line(ProductId::new(form.product_id));
    carts.save(&cart).await?;

    Ok(Json(cart.into()))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let carts = CartSession::new(session);
    carts.remove().await?;

    Ok(Json(Cart::new().into()))
}
