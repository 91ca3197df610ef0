pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod store;

use axum::{
    http::HeaderValue,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::store::ProductStore;

/// Shared handler state. Built once at startup and cloned per request; the
/// store handle is the only dependency the core carries.
#[derive(Clone)]
pub struct AppState {
    pub store: ProductStore,
}

/// Assemble the router. Middleware is composed as an explicit ordered
/// pipeline: tracing, then CORS, then the bearer gate on mutating routes
/// only.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/products", get(handlers::products::list))
        .route("/products/:id", get(handlers::products::get));

    let protected = Router::new()
        .route("/products", post(handlers::products::create))
        .route(
            "/products/:id",
            put(handlers::products::update).delete(handlers::products::delete),
        )
        .route_layer(axum_middleware::from_fn(middleware::require_bearer));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public)
        .merge(protected)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Permissive CORS is a development convenience only; everywhere else the
/// configured origin whitelist applies.
fn cors_layer() -> CorsLayer {
    let config = config::config();
    if config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> axum::Json<Value> {
    axum::Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn health() -> axum::Json<Value> {
    axum::Json(json!({ "success": true, "status": "ok" }))
}
