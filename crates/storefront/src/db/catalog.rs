//! Catalog repository: filtered, paginated, stably-ordered product queries.

use rust_decimal::Decimal;
use sqlx::PgPool;

use trailhead_core::{PagingInfo, Product, ProductId};

use super::RepositoryError;

/// Row mapping for the `products` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: Decimal,
    category: String,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
        }
    }
}

/// LIMIT/OFFSET pair for a 1-based page.
///
/// Page `p` of size `s` starts `(p - 1) * s` items into the filtered set,
/// so the last page holds whatever remains and pages past the end hold
/// nothing.
fn page_window(page: u32, page_size: u32) -> (i64, i64) {
    let limit = i64::from(page_size);
    let offset = (i64::from(page) - 1) * limit;
    (limit, offset)
}

/// Repository for catalog read operations.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch one page of products, optionally filtered by exact category.
    ///
    /// Ordering is by product id ascending, so repeated calls see the same
    /// window regardless of the backing store's natural order. The paging
    /// count runs against the same filter as the items, and a page beyond
    /// the last one returns an empty list rather than an error. Callers are
    /// responsible for supplying `page >= 1`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn query(
        &self,
        category: Option<&str>,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Product>, PagingInfo), RepositoryError> {
        let (limit, offset) = page_window(page, page_size);

        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category
            FROM products
            WHERE $1::text IS NULL OR category = $1
            ORDER BY id
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        let total_items: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM products
            WHERE $1::text IS NULL OR category = $1
            ",
        )
        .bind(category)
        .fetch_one(self.pool)
        .await?;

        let paging = PagingInfo::new(page, page_size, u64::try_from(total_items).unwrap_or(0));
        Ok((rows.into_iter().map(Product::from).collect(), paging))
    }

    /// Fetch a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Distinct category names, sorted, for the navigation menu.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<String>, RepositoryError> {
        let categories = sqlx::query_scalar(
            r"
            SELECT DISTINCT category
            FROM products
            ORDER BY category
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Apply the query's window to an already-filtered, id-ordered set.
    fn window_of(ids: &[i64], page: u32, page_size: u32) -> Vec<i64> {
        let (limit, offset) = page_window(page, page_size);
        ids.iter()
            .copied()
            .skip(usize::try_from(offset).expect("offset"))
            .take(usize::try_from(limit).expect("limit"))
            .collect()
    }

    #[test]
    fn page_window_advances_by_whole_pages() {
        assert_eq!(page_window(1, 4), (4, 0));
        assert_eq!(page_window(2, 4), (4, 4));
        assert_eq!(page_window(3, 4), (4, 8));
    }

    #[test]
    fn ten_filtered_items_leave_two_on_page_three() {
        let ids: Vec<i64> = (1..=10).collect();

        assert_eq!(window_of(&ids, 1, 4).len(), 4);
        assert_eq!(window_of(&ids, 2, 4).len(), 4);
        assert_eq!(window_of(&ids, 3, 4), vec![9, 10]);
    }

    #[test]
    fn pages_past_the_end_come_back_empty() {
        let ids: Vec<i64> = (1..=10).collect();
        assert!(window_of(&ids, 4, 4).is_empty());
        assert!(window_of(&ids, 100, 4).is_empty());
    }
}
