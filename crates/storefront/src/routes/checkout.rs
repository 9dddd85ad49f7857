//! Checkout route handler.

use axum::{Form, Json, extract::State};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use trailhead_core::{OrderDetails, OrderId};

use crate::error::Result;
use crate::models::CartSession;
use crate::services::checkout::attempt_checkout;
use crate::state::AppState;

/// Successful checkout response.
#[derive(Debug, Serialize)]
pub struct CheckoutComplete {
    pub order_id: OrderId,
}

/// Attempt to turn the session's cart into a persisted order.
///
/// Validation failures (empty cart, missing shipping field) come back as
/// 422 with the specific failure; the cart is untouched and the visitor
/// keeps editing. On success the order id is reported and the session's
/// cart is emptied.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Form(details): Form<OrderDetails>,
) -> Result<Json<CheckoutComplete>> {
    let carts = CartSession::new(session);
    let mut cart = carts.load().await?;

    let order_id = attempt_checkout(state.orders(), &mut cart, details).await?;

    // The order is already durable; a session write failure here must not
    // fail the request. The cart will be stale until the session recovers.
    if let Err(e) = carts.remove().await {
        tracing::error!(%order_id, "Failed to clear cart from session: {e}");
    }

    Ok(Json(CheckoutComplete { order_id }))
}
