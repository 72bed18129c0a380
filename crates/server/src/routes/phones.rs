//! Phone route handlers.
//!
//! Thin glue over [`phone_catalog::Catalog`]: extract and check request
//! parameters, call the façade, wrap the result in an [`ApiResponse`].

use std::str::FromStr;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use phone_catalog_core::{Page, PageRequest, PhoneId, PhoneRecord, PhoneRequest};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{ApiResponse, AppError, Result};
use crate::state::AppState;

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl PaginationQuery {
    fn into_request(self) -> Result<PageRequest> {
        let page = self.page.unwrap_or(0);
        let size = self
            .size
            .unwrap_or_else(|| i64::try_from(PageRequest::DEFAULT_SIZE).unwrap_or(10));

        let page = usize::try_from(page)
            .map_err(|_| AppError::BadRequest("Page number must be 0 or greater".to_string()))?;
        let size = usize::try_from(size)
            .map_err(|_| AppError::BadRequest("Page size must be at least 1".to_string()))?;

        Ok(PageRequest::new(page, size)?)
    }
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// Price range query parameters. Parsed by hand so bad numbers get a useful message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

type Phones = ApiResponse<Vec<PhoneRecord>>;
type PathParam = std::result::Result<Path<String>, PathRejection>;
type PhoneBody = std::result::Result<Json<PhoneRequest>, JsonRejection>;

/// List phones one page at a time.
///
/// GET /api/v1/phones?page=0&size=10
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<PaginationQuery>, QueryRejection>,
) -> Result<ApiResponse<Page<PhoneRecord>>> {
    let Query(query) = query?;
    let page = state.catalog().find_all_paginated(query.into_request()?)?;
    Ok(ApiResponse::success(page, "Phones retrieved successfully"))
}

/// GET /api/v1/phones/{id}
pub async fn show(
    State(state): State<AppState>,
    id: PathParam,
) -> Result<ApiResponse<PhoneRecord>> {
    let Path(id) = id?;
    let phone = state.catalog().find_by_id(&PhoneId::new(id))?;
    Ok(ApiResponse::success(phone, "Phone retrieved successfully"))
}

/// POST /api/v1/phones
pub async fn create(
    State(state): State<AppState>,
    payload: PhoneBody,
) -> Result<(StatusCode, ApiResponse<PhoneRecord>)> {
    let Json(request) = payload?;
    let phone = state.catalog().create(request.into_attributes()?)?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(phone, "Phone created successfully"),
    ))
}

/// PUT /api/v1/phones/{id}
pub async fn update(
    State(state): State<AppState>,
    id: PathParam,
    payload: PhoneBody,
) -> Result<ApiResponse<PhoneRecord>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let phone = state
        .catalog()
        .update(&PhoneId::new(id), request.into_attributes()?)?;
    Ok(ApiResponse::success(phone, "Phone updated successfully"))
}

/// DELETE /api/v1/phones/{id}
pub async fn delete(State(state): State<AppState>, id: PathParam) -> Result<ApiResponse<()>> {
    let Path(id) = id?;
    state.catalog().delete(&PhoneId::new(id))?;
    Ok(ApiResponse::empty("Phone deleted successfully"))
}

/// GET /api/v1/phones/search?query=pro
pub async fn search(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Phones> {
    let Query(query) = query?;
    let text = required(query.query.as_deref(), "Search query")?;
    let phones = state.catalog().search(text)?;
    Ok(ApiResponse::success(phones, "Search completed successfully"))
}

/// GET /api/v1/phones/brand/{brand}
pub async fn by_brand(State(state): State<AppState>, brand: PathParam) -> Result<Phones> {
    let Path(brand) = brand?;
    let brand = required(Some(brand.as_str()), "Brand")?;
    let phones = state.catalog().find_by_brand(brand)?;
    Ok(ApiResponse::success(phones, "Phones retrieved successfully"))
}

/// GET /api/v1/phones/type/{usageType}
pub async fn by_usage_type(State(state): State<AppState>, usage_type: PathParam) -> Result<Phones> {
    let Path(usage_type) = usage_type?;
    let usage_type = required(Some(usage_type.as_str()), "Usage type")?;
    let phones = state.catalog().find_by_usage_type(usage_type)?;
    Ok(ApiResponse::success(phones, "Phones retrieved successfully"))
}

/// GET /api/v1/phones/price-range?minPrice=500&maxPrice=1000
pub async fn by_price_range(
    State(state): State<AppState>,
    query: std::result::Result<Query<PriceRangeQuery>, QueryRejection>,
) -> Result<Phones> {
    let Query(query) = query?;
    let min = price_param(query.min_price.as_deref(), "minPrice")?;
    let max = price_param(query.max_price.as_deref(), "maxPrice")?;

    let phones = state.catalog().find_by_price_range(min, max)?;
    Ok(ApiResponse::success(phones, "Phones retrieved successfully"))
}

/// Reject a missing or blank text parameter. Anything else is passed on
/// exactly as sent, surrounding whitespace included.
fn required<'a>(value: Option<&'a str>, label: &str) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!("{label} must not be blank"))),
    }
}

fn price_param(value: Option<&str>, name: &str) -> Result<Decimal> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{name} is required")))?;

    let price = Decimal::from_str(raw)
        .map_err(|_| AppError::BadRequest(format!("{name} must be a number")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::BadRequest(format!("{name} must be 0 or greater")));
    }
    Ok(price)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let request = PaginationQuery::default().into_request().unwrap();
        assert_eq!(request.page(), 0);
        assert_eq!(request.size(), PageRequest::DEFAULT_SIZE);
    }

    #[test]
    fn test_pagination_rejects_negative_page_and_zero_size() {
        let negative = PaginationQuery {
            page: Some(-1),
            size: None,
        };
        assert!(matches!(
            negative.into_request(),
            Err(AppError::BadRequest(_))
        ));

        let empty = PaginationQuery {
            page: None,
            size: Some(0),
        };
        assert!(matches!(empty.into_request(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_required_keeps_raw_value_and_rejects_blank() {
        assert_eq!(required(Some(" apple"), "Brand").unwrap(), " apple");
        assert!(required(Some("   "), "Brand").is_err());
        assert!(required(None, "Brand").is_err());
    }

    #[test]
    fn test_price_param() {
        assert_eq!(
            price_param(Some("999.50"), "minPrice").unwrap(),
            Decimal::new(99950, 2)
        );
        assert_eq!(price_param(Some("0"), "minPrice").unwrap(), Decimal::ZERO);
        assert!(price_param(Some("-1"), "minPrice").is_err());
        assert!(price_param(Some("cheap"), "minPrice").is_err());
        assert!(price_param(None, "minPrice").is_err());
    }
}
