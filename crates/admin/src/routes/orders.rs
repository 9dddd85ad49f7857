//! Order fulfillment handlers.
//!
//! Thin callers of the order repository: find by id, flip `shipped`, save.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use trailhead_core::{Order, OrderId};

use crate::db::{FulfillmentStore, OrderRepository};
use crate::error::Result;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// List every order with its line snapshot, oldest first.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Mark an order shipped. Idempotent; 404 for an unknown id.
#[instrument(skip(_auth, state))]
pub async fn ship(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool())
        .set_shipped(OrderId::new(id), true)
        .await?;

    tracing::info!(order_id = %id, "Order marked shipped");
    Ok(StatusCode::NO_CONTENT)
}

/// Reset an order back to unshipped. 404 for an unknown id.
#[instrument(skip(_auth, state))]
pub async fn reset(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    OrderRepository::new(state.pool())
        .set_shipped(OrderId::new(id), false)
        .await?;

    tracing::info!(order_id = %id, "Order shipped flag reset");
    Ok(StatusCode::NO_CONTENT)
}
