use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware, state::AppState};

pub mod algorithm;

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api/algorithm",
            Router::new()
                .route("/sort-tasks", post(algorithm::sort_tasks))
                .route("/allocate-tasks", post(algorithm::allocate_tasks))
                .route("/balance-workload", post(algorithm::balance_workload))
                .route("/handle-urgent", post(algorithm::handle_urgent))
                .layer(from_fn(middleware::invocation_middleware)),
        )
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now()
    }))
}
