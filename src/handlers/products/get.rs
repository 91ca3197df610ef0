// GET /products/:id - public

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = state.store.find_by_id(&id).await?;

    Ok(Json(json!({
        "success": true,
        "data": product,
    })))
}
