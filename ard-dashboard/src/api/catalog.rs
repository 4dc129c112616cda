//! Model catalog endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::services::CategoryGroup;
use crate::AppState;

/// GET /api/models response
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    /// Models grouped by category, first-seen category order
    pub categories: Vec<CategoryGroup>,
    pub model_count: usize,
}

/// GET /api/models
pub async fn list_models(State(state): State<AppState>) -> Json<CatalogResponse> {
    let catalog = state.controller.catalog();
    Json(CatalogResponse {
        categories: catalog.grouped(),
        model_count: catalog.list().len(),
    })
}

/// Build catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new().route("/api/models", get(list_models))
}
