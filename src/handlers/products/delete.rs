// DELETE /products/:id - bearer credential required

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

/// Load, snapshot, remove. The response echoes the snapshot taken before
/// deletion, not a store re-read.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let product = state.store.find_by_id(&id).await?;

    let snapshot = json!({
        "id": product.id,
        "name": product.name,
        "category": product.category,
    });

    state.store.delete(product.id).await?;

    tracing::info!(product_id = %product.id, "product deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Product deleted successfully",
        "deletedProduct": snapshot,
    })))
}
