//! Product repository: the catalog's only write path.

use rust_decimal::Decimal;
use sqlx::PgPool;

use trailhead_core::{Product, ProductId};

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

/// Repository for product CRUD.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every product, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, description, price, category
            FROM products
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Fetch a product by id for the admin edit surface.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` when no product has the id -
    /// unlike `save`/`delete`, the edit contract implies existence.
    pub async fn find(&self, id: ProductId) -> Result<Product, RepositoryError> {
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

        row.map(Product::from).ok_or(RepositoryError::NotFound)
    }

    /// Persist a product with upsert-by-id semantics.
    ///
    /// An unassigned id inserts a new record and writes the assigned
    /// identity back. Any other id copies the mutable fields (name,
    /// description, price, category) onto the existing record; if no record
    /// with that id exists, the update is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn save(&self, product: &mut Product) -> Result<(), RepositoryError> {
        if product.id.is_unassigned() {
            let id: i64 = sqlx::query_scalar(
                r"
                INSERT INTO products (name, description, price, category)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                ",
            )
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(&product.category)
            .fetch_one(self.pool)
            .await?;

            product.id = ProductId::new(id);
            return Ok(());
        }

        sqlx::query(
            r"
            UPDATE products
            SET name = $2, description = $3, price = $4, category = $5
            WHERE id = $1
            ",
        )
        .bind(product.id.as_i64())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(&product.category)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete a product by id. Deleting a non-existent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
