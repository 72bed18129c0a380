//! Integration tests for the phone catalog.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p phone-catalog-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_phones` - Phone endpoints driven through the router in-process
//! - `api_categories` - Category endpoints
//! - `catalog_concurrency` - Read/write visibility with many threads
//!
//! Shared helpers live here so each test file stays focused on behavior.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use chrono::{TimeZone, Utc};
use phone_catalog::{Catalog, CategoryRegistry, seed};
use phone_catalog_core::{CurrencyCode, PhoneAttributes};
use phone_catalog_server::{AppState, ServerConfig, app};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Router over an empty catalog.
#[must_use]
pub fn empty_app() -> Router {
    app(AppState::new(&ServerConfig::default()))
}

/// Router over a catalog loaded with the sample phones and categories.
#[must_use]
pub fn seeded_app() -> Router {
    let catalog = Catalog::default();
    let categories = CategoryRegistry::new();
    seed::seed(&catalog, &categories).unwrap();
    app(AppState::with_catalog(catalog, categories))
}

/// Send one request and decode the JSON envelope.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, json)
}

/// A valid phone request body.
#[must_use]
pub fn phone_json(name: &str, brand: &str, price: u32) -> Value {
    json!({
        "name": name,
        "brand": brand,
        "description": format!("{brand} {name} smartphone"),
        "price": price,
        "currency": "USD",
        "usageTypes": ["Gaming", "Photography"],
        "imageUrl": "https://example.com/phone.jpg",
        "releaseDate": "2024-01-17T00:00:00Z",
        "storageGB": 256,
        "ramGB": 8,
        "batteryCapacityMAh": 5000,
        "screenSizeInches": 6.5,
        "cameraCount": 3,
        "is5G": true,
        "isWaterResistant": true,
        "hasWirelessCharging": false,
        "rating": 4.5
    })
}

/// Valid attributes for driving the catalog directly.
#[must_use]
pub fn attributes(name: &str, brand: &str, price: i64) -> PhoneAttributes {
    PhoneAttributes {
        name: name.to_string(),
        brand: brand.to_string(),
        description: format!("{brand} {name} smartphone"),
        price: Decimal::from(price),
        currency: CurrencyCode::USD,
        usage_types: vec!["Gaming".to_string()],
        image_url: "https://example.com/phone.jpg".to_string(),
        release_date: Utc.with_ymd_and_hms(2024, 1, 17, 0, 0, 0).unwrap(),
        storage_gb: 128,
        ram_gb: 8,
        battery_capacity_mah: 4500,
        screen_size_inches: 6.1,
        camera_count: 2,
        is_5g: true,
        is_water_resistant: false,
        has_wireless_charging: false,
        rating: 4.0,
    }
}

/// Names of the phones in a `data` array, in order.
#[must_use]
pub fn names(data: &Value) -> Vec<String> {
    data.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|p| p["name"].as_str().map(ToString::to_string))
                .collect()
        })
        .unwrap_or_default()
}
