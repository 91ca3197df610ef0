// PUT /products/:id - bearer credential required

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use super::payload;
use crate::error::ApiError;
use crate::store::FieldError;
use crate::AppState;

/// Partial update: load, overwrite only the allow-listed fields explicitly
/// present in the payload, persist. Absence means "leave untouched", never
/// "clear to default". Read-modify-write without concurrency control;
/// concurrent updates to the same id may race.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let mut product = state.store.find_by_id(&id).await?;

    let fields = body.as_object().ok_or_else(|| {
        ApiError::Validation(vec![FieldError {
            field: "payload".to_string(),
            message: "must be a JSON object".to_string(),
        }])
    })?;

    let updated_fields = payload::apply_updates(&mut product, fields)?;
    let saved = state.store.update(&product).await?;

    tracing::info!(product_id = %saved.id, ?updated_fields, "product updated");

    Ok(Json(json!({
        "success": true,
        "message": "Product updated successfully",
        "updatedFields": updated_fields,
        "data": saved,
    })))
}
