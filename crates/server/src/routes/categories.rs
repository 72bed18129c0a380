//! Category route handlers.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use phone_catalog_core::{Category, CategoryId, NewCategory};

use crate::error::{ApiResponse, Result};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<Category>>> {
    let categories = state.categories().list()?;
    Ok(ApiResponse::success(
        categories,
        "Categories retrieved successfully",
    ))
}

/// GET /api/v1/categories/{id}
pub async fn show(
    State(state): State<AppState>,
    id: std::result::Result<Path<String>, PathRejection>,
) -> Result<ApiResponse<Category>> {
    let Path(id) = id?;
    let category = state.categories().get(&CategoryId::new(id))?;
    Ok(ApiResponse::success(
        category,
        "Category retrieved successfully",
    ))
}

/// POST /api/v1/categories
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewCategory>, JsonRejection>,
) -> Result<(StatusCode, ApiResponse<Category>)> {
    let Json(new) = payload?;
    let category = state.categories().create(new)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(category, "Category created successfully"),
    ))
}
