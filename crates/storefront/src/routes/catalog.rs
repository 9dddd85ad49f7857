//! Catalog route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use trailhead_core::{PagingInfo, Product};

use crate::db::CatalogRepository;
use crate::error::Result;
use crate::state::AppState;

/// Fixed page-size policy for the product listing.
pub const PAGE_SIZE: u32 = 4;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    /// Exact, case-sensitive category filter; omit for all categories.
    pub category: Option<String>,
    /// 1-based page number (default 1).
    pub page: Option<u32>,
}

/// One page of the catalog plus its paging window.
#[derive(Debug, Serialize)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub paging: PagingInfo,
}

/// List one page of products, optionally filtered by category.
///
/// The catalog itself does not clamp page numbers; this handler supplies it
/// valid input by defaulting absent or zero pages to 1. Pages past the end
/// come back empty with consistent paging metadata, not as an error.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<ProductListing>> {
    let page = query.page.unwrap_or(1).max(1);
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    let (products, paging) = CatalogRepository::new(state.pool())
        .query(category, page, PAGE_SIZE)
        .await?;

    Ok(Json(ProductListing { products, paging }))
}

/// Distinct category names for the navigation menu.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let categories = CatalogRepository::new(state.pool()).categories().await?;
    Ok(Json(categories))
}
