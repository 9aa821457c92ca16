//! Route definitions

use super::handlers;
use super::state::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Suggestion routes share one rate limiter
    let suggest = Router::new()
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/suggestions", get(handlers::suggestions))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            handlers::rate_limit,
        ));

    Router::new()
        .route("/", get(handlers::index))
        .route("/accept", post(handlers::accept))
        .route("/history", get(handlers::history))
        .route("/stats", get(handlers::stats))
        .route("/health", get(handlers::health))
        .merge(suggest)
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
