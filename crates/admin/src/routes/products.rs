//! Product CRUD handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use trailhead_core::{Product, ProductId};

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Mutable product fields, for create and update.
#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
}

impl ProductInput {
    /// Reject inputs the data model cannot represent.
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name must not be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::BadRequest(
                "category must not be empty".to_string(),
            ));
        }
        if self.price < Decimal::ZERO {
            return Err(AppError::BadRequest(
                "price must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
        }
    }
}

/// List every product.
#[instrument(skip(_auth, state))]
pub async fn index(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Fetch a single product for editing. 404 when the id does not exist.
#[instrument(skip(_auth, state))]
pub async fn show(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .find(ProductId::new(id))
        .await?;
    Ok(Json(product))
}

/// Create a new product. Storage assigns the id.
#[instrument(skip(_auth, state, input))]
pub async fn create(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate()?;

    let mut product = input.into_product(ProductId::UNASSIGNED);
    ProductRepository::new(state.pool())
        .save(&mut product)
        .await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product's mutable fields.
///
/// Updating an id with no record behind it is a silent no-op, per the
/// catalog's save contract.
#[instrument(skip(_auth, state, input))]
pub async fn update(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> Result<StatusCode> {
    input.validate()?;

    let mut product = input.into_product(ProductId::new(id));
    ProductRepository::new(state.pool())
        .save(&mut product)
        .await?;

    tracing::info!(product_id = %id, "Product saved");
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a product. Tolerates a missing id.
#[instrument(skip(_auth, state))]
pub async fn delete(
    _auth: RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
