// POST /products - bearer credential required

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};

use super::payload;
use crate::error::ApiError;
use crate::AppState;

/// Validate the payload, apply defaults for absent optionals, persist.
/// Missing required fields reject the whole request; no partial creation.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let new_product = payload::new_product_from(&body)?;
    let saved = state.store.insert(&new_product).await?;

    tracing::info!(product_id = %saved.id, "product created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Product created successfully",
            "data": saved,
        })),
    ))
}
