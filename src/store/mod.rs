// Entity store for products, backed by Postgres via sqlx.
//
// The pool is built once at startup and injected into handler state; no
// process-wide singleton. Every failure that crosses this boundary is a
// `StoreError` variant so callers match on tags, never on message strings.

pub mod product;

use serde::Serialize;
use sqlx::postgres::{PgDatabaseError, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

pub use product::{NewProduct, Product, Specifications, DEFAULT_BRAND, DEFAULT_RATING};

use crate::config::DatabaseConfig;

/// One field-level validation problem, reported to clients as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Closed set of failures the store can raise.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("malformed identifier: {0}")]
    MalformedId(String),

    #[error("product not found: {0}")]
    NotFound(String),

    #[error("field validation failed")]
    Validation(Vec<FieldError>),

    #[error("duplicate value for field: {0}")]
    Duplicate(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name TEXT NOT NULL UNIQUE,
    category TEXT NOT NULL,
    description TEXT NOT NULL,
    image TEXT NOT NULL,
    full_description TEXT NOT NULL,
    brand TEXT NOT NULL,
    rating DOUBLE PRECISION NOT NULL,
    features TEXT[] NOT NULL DEFAULT '{}',
    applications TEXT[] NOT NULL DEFAULT '{}',
    specifications JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Build the shared connection pool from `DATABASE_URL` and config limits.
pub async fn connect(database_url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.connection_timeout_secs))
        .connect(database_url)
        .await
}

#[derive(Debug, Clone)]
pub struct ProductStore {
    pool: PgPool,
}

impl ProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the products table if it does not exist yet. Run once at startup.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA_DDL).execute(&self.pool).await?;
        Ok(())
    }

    /// Identifier format check. Path identifiers that are not valid UUIDs
    /// never reach the database.
    pub fn parse_id(id: &str) -> Result<Uuid, StoreError> {
        Uuid::parse_str(id).map_err(|_| StoreError::MalformedId(id.to_string()))
    }

    /// All products, newest first.
    pub async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    /// Look up exactly one product. `NotFound` echoes the requested id.
    pub async fn find_by_id(&self, id: &str) -> Result<Product, StoreError> {
        let uuid = Self::parse_id(id)?;
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(uuid)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Validate and persist a new product; the database assigns id and
    /// created_at.
    pub async fn insert(&self, new: &NewProduct) -> Result<Product, StoreError> {
        new.validate().map_err(StoreError::Validation)?;

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (name, category, description, image, full_description,
                 brand, rating, features, applications, specifications)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(&new.description)
        .bind(&new.image)
        .bind(&new.full_description)
        .bind(&new.brand)
        .bind(new.rating)
        .bind(&new.features)
        .bind(&new.applications)
        .bind(sqlx::types::Json(&new.specifications))
        .fetch_one(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        Ok(product)
    }

    /// Validate and persist a mutated product. The row is matched by its
    /// immutable id; `NotFound` if it vanished between load and save.
    pub async fn update(&self, product: &Product) -> Result<Product, StoreError> {
        product.validate().map_err(StoreError::Validation)?;

        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = $2, category = $3, description = $4, image = $5,
                full_description = $6, brand = $7, rating = $8,
                features = $9, applications = $10, specifications = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.description)
        .bind(&product.image)
        .bind(&product.full_description)
        .bind(&product.brand)
        .bind(product.rating)
        .bind(&product.features)
        .bind(&product.applications)
        .bind(sqlx::types::Json(&product.specifications))
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx)?
        .ok_or_else(|| StoreError::NotFound(product.id.to_string()))
    }

    /// Remove a product unconditionally once found.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// Map unique-constraint violations (SQLSTATE 23505) to `Duplicate` naming
/// the offending field; everything else passes through as `Sqlx`.
fn classify_sqlx(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let field = db_err
                .try_downcast_ref::<PgDatabaseError>()
                .and_then(|pg| pg.constraint())
                .map(constraint_field)
                .unwrap_or_else(|| "unknown".to_string());
            return StoreError::Duplicate(field);
        }
    }
    StoreError::Sqlx(err)
}

/// Recover the column name from a Postgres constraint name such as
/// `products_name_key`.
fn constraint_field(constraint: &str) -> String {
    constraint
        .strip_prefix("products_")
        .and_then(|s| s.strip_suffix("_key"))
        .unwrap_or(constraint)
        .to_string()
}
