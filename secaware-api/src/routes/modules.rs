/// Training module endpoints
///
/// Served straight from the in-process catalog.
///
/// # Endpoints
///
/// - `GET /api/modules` - List modules in presentation order
/// - `GET /api/modules/:module_id` - Get one module

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    Json,
};
use secaware_shared::catalog::Module;

/// List modules
///
/// Returns at most 100 modules, ordered by their `order` field.
pub async fn list_modules(State(state): State<AppState>) -> Json<Vec<Module>> {
    Json(state.catalog.modules().to_vec())
}

/// Get a module by id
///
/// # Errors
///
/// - `404 Not Found`: No module with this id
pub async fn get_module(
    State(state): State<AppState>,
    Path(module_id): Path<String>,
) -> ApiResult<Json<Module>> {
    state
        .catalog
        .module(&module_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Module not found".to_string()))
}
