use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FieldError;

/// Brand applied when a creation payload omits `brand`.
pub const DEFAULT_BRAND: &str = "Fester";

/// Rating applied when a creation payload omits `rating`.
pub const DEFAULT_RATING: f64 = 5.0;

/// Fixed-shape specifications record. Every persisted product carries all
/// four keys; omitted keys deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specifications {
    pub presentation: String,
    pub coverage: String,
    pub drying_time: String,
    pub colors: String,
}

/// A persisted catalog product. `id` and `created_at` are assigned by the
/// store and never change afterwards.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub full_description: String,
    pub brand: String,
    pub rating: f64,
    pub features: Vec<String>,
    pub applications: Vec<String>,
    #[sqlx(json)]
    pub specifications: Specifications,
    pub created_at: DateTime<Utc>,
}

/// Field values for a product that has not been persisted yet. The store
/// assigns `id` and `created_at` on insert.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub description: String,
    pub image: String,
    pub full_description: String,
    pub brand: String,
    pub rating: f64,
    pub features: Vec<String>,
    pub applications: Vec<String>,
    pub specifications: Specifications,
}

/// Field-level validation shared by insert and update: the required string
/// fields must be non-empty on every persisted product. All offending fields
/// are collected, not just the first.
pub fn validate_fields(
    name: &str,
    category: &str,
    description: &str,
    image: &str,
    full_description: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("name", name),
        ("category", category),
        ("description", description),
        ("image", image),
        ("fullDescription", full_description),
    ] {
        if value.is_empty() {
            errors.push(FieldError {
                field: field.to_string(),
                message: "This field is required".to_string(),
            });
        }
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        validate_fields(
            &self.name,
            &self.category,
            &self.description,
            &self.image,
            &self.full_description,
        )
    }
}

impl Product {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        validate_fields(
            &self.name,
            &self.category,
            &self.description,
            &self.image,
            &self.full_description,
        )
    }
}
