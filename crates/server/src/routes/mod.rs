//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                           - Health check
//!
//! # Phones
//! GET    /api/v1/phones                  - Paginated listing (?page=0&size=10)
//! POST   /api/v1/phones                  - Create a phone
//! GET    /api/v1/phones/{id}             - Phone detail
//! PUT    /api/v1/phones/{id}             - Replace a phone
//! DELETE /api/v1/phones/{id}             - Delete a phone
//! GET    /api/v1/phones/search           - Text search (?query=)
//! GET    /api/v1/phones/brand/{brand}    - Filter by brand
//! GET    /api/v1/phones/type/{usageType} - Filter by usage type
//! GET    /api/v1/phones/price-range      - Filter by price (?minPrice=&maxPrice=)
//!
//! # Categories
//! GET  /api/v1/categories                - Category listing
//! POST /api/v1/categories                - Create a category
//! GET  /api/v1/categories/{id}           - Category detail
//! ```

pub mod categories;
pub mod phones;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the phone routes router.
pub fn phone_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(phones::list).post(phones::create))
        .route("/search", get(phones::search))
        .route("/price-range", get(phones::by_price_range))
        .route("/brand/{brand}", get(phones::by_brand))
        .route("/type/{usage_type}", get(phones::by_usage_type))
        .route(
            "/{id}",
            get(phones::show)
                .put(phones::update)
                .delete(phones::delete),
        )
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/{id}", get(categories::show))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/phones", phone_routes())
        .nest("/api/v1/categories", category_routes())
}
