//! Route table and the health endpoint.

pub mod categories;

use axum::routing::get;
use axum::{Json, Router, extract::State};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use arbor_core::responses::ApiResponse;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/categories",
            get(categories::list).post(categories::create),
        )
        .route("/api/categories/tree", get(categories::tree))
        .route(
            "/api/categories/:id",
            get(categories::find_by_id)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route("/api/categories/:id/tree", get(categories::subtree))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(serde_json::json!({
        "status": "ok",
        "service": "arbord",
        "time": chrono::Utc::now(),
        "database": state.db_path,
    })))
}
