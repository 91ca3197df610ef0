// GET /products - public

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

/// List every product, most recently created first.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let products = state.store.find_all().await?;

    Ok(Json(json!({
        "success": true,
        "count": products.len(),
        "data": products,
    })))
}
