//! Integration tests for the phone endpoints.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; no
//! network or external services are needed.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use phone_catalog_integration_tests::{empty_app, names, phone_json, seeded_app, send};
use serde_json::json;

// ============================================================================
// Health & Listing
// ============================================================================

#[tokio::test]
async fn test_health() {
    let app = empty_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_list_sample_phones_paginated() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/v1/phones?page=0&size=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Phones retrieved successfully");
    assert_eq!(
        names(&body["data"]["content"]),
        ["iPhone 15 Pro", "Samsung Galaxy S24 Ultra"]
    );
    assert_eq!(body["data"]["totalElements"], 5);
    assert_eq!(body["data"]["totalPages"], 3);
    assert_eq!(body["data"]["page"], 0);
    assert_eq!(body["data"]["size"], 2);

    let (_, last) = send(&app, "GET", "/api/v1/phones?page=2&size=2", None).await;
    assert_eq!(names(&last["data"]["content"]), ["Xiaomi 14 Ultra"]);
}

#[tokio::test]
async fn test_list_defaults_and_bad_parameters() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/v1/phones", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["size"], 10);
    assert_eq!(names(&body["data"]["content"]).len(), 5);

    let (status, _) = send(&app, "GET", "/api/v1/phones?page=-1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/v1/phones?size=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"]["size"], "Page size must be at least 1");

    let (status, _) = send(&app, "GET", "/api/v1/phones?page=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ============================================================================
// CRUD
// ============================================================================

#[tokio::test]
async fn test_create_get_update_delete() {
    let app = empty_app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/v1/phones",
        Some(phone_json("Pixel 9", "Google", 899)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Phone created successfully");
    let phone = &created["data"];
    let id = phone["id"].as_str().unwrap().to_string();
    assert_eq!(phone["reviewCount"], 0);
    assert_eq!(phone["createdAt"], phone["updatedAt"]);
    assert_eq!(phone["storageGB"], 256);
    assert_eq!(phone["is5G"], true);

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/phones/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["name"], "Pixel 9");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/v1/phones/{id}"),
        Some(phone_json("Pixel 9 Pro", "Google", 999)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["id"], id.as_str());
    assert_eq!(updated["data"]["name"], "Pixel 9 Pro");
    assert_eq!(updated["data"]["createdAt"], phone["createdAt"]);

    let (_, search) = send(&app, "GET", "/api/v1/phones/search?query=pro", None).await;
    assert_eq!(names(&search["data"]), ["Pixel 9 Pro"]);

    let (status, deleted) = send(&app, "DELETE", &format!("/api/v1/phones/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Phone deleted successfully");

    let (status, missing) = send(&app, "GET", &format!("/api/v1/phones/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(missing["success"], false);
    assert_eq!(missing["message"], format!("Phone not found with id: {id}"));

    let (_, search) = send(&app, "GET", "/api/v1/phones/search?query=pro", None).await;
    assert!(names(&search["data"]).is_empty());
}

#[tokio::test]
async fn test_unknown_id_is_not_found_for_every_verb() {
    let app = seeded_app();

    let (status, _) = send(&app, "GET", "/api/v1/phones/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/v1/phones/nope",
        Some(phone_json("Pixel 9", "Google", 899)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/api/v1/phones/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/v1/phones", None).await;
    assert_eq!(body["data"]["totalElements"], 5);
}

#[tokio::test]
async fn test_validation_errors_are_reported_per_field() {
    let app = empty_app();

    let mut invalid = phone_json("X", "Google", 899);
    invalid["price"] = json!(0);
    invalid["currency"] = json!("dollars");
    invalid["imageUrl"] = json!("ftp://example.com/phone.jpg");
    invalid["batteryCapacityMAh"] = json!(500);

    let (status, body) = send(&app, "POST", "/api/v1/phones", Some(invalid)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Validation failed");
    let errors = &body["data"];
    assert_eq!(
        errors["name"],
        "Phone name must be between 2 and 100 characters"
    );
    assert_eq!(errors["price"], "Price must be greater than 0");
    assert_eq!(
        errors["currency"],
        "Currency must be a 3-letter code (e.g., USD, EUR)"
    );
    assert_eq!(errors["imageUrl"], "Image URL must be a valid HTTP/HTTPS URL");
    assert_eq!(
        errors["batteryCapacityMAh"],
        "Battery capacity must be at least 1000 mAh"
    );

    let (_, listing) = send(&app, "GET", "/api/v1/phones", None).await;
    assert_eq!(listing["data"]["totalElements"], 0);
}

#[tokio::test]
async fn test_missing_and_negative_fields_are_reported_per_field() {
    let app = empty_app();

    let mut body = phone_json("Pixel 9", "Google", 899);
    body.as_object_mut().unwrap().remove("name");
    body["storageGB"] = json!(-1);

    let (status, response) = send(&app, "POST", "/api/v1/phones", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["message"], "Validation failed");
    assert_eq!(response["data"]["name"], "Phone name is required");
    assert_eq!(response["data"]["storageGB"], "Storage must be at least 1 GB");

    let (status, response) = send(&app, "POST", "/api/v1/phones", Some(json!({"name": "Pixel"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["data"]["price"], "Price is required");
    assert_eq!(response["data"]["releaseDate"], "Release date is required");
    assert!(response["data"]["name"].is_null());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = empty_app();

    let mut body = phone_json("Pixel 9", "Google", 899);
    body["storageGB"] = json!("lots");

    let (status, response) = send(&app, "POST", "/api/v1/phones", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["success"], false);
    assert!(response["message"]
        .as_str()
        .unwrap()
        .starts_with("Malformed request body"));
}

#[tokio::test]
async fn test_price_is_numeric_and_local_release_dates_accepted() {
    let app = empty_app();

    let mut body = phone_json("Pixel 9", "Google", 899);
    body["releaseDate"] = json!("2024-01-17T00:00:00");

    let (status, created) = send(&app, "POST", "/api/v1/phones", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["price"].as_f64(), Some(899.0));
    assert!(created["data"]["releaseDate"]
        .as_str()
        .unwrap()
        .starts_with("2024-01-17T00:00:00"));
}

#[tokio::test]
async fn test_undecodable_path_gets_error_envelope() {
    let app = empty_app();

    for uri in [
        "/api/v1/phones/%FF",
        "/api/v1/phones/brand/%FF",
        "/api/v1/phones/type/%FF",
        "/api/v1/categories/%FF",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["success"], false, "{uri}");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid path parameter"));
    }

    let (status, body) = send(&app, "DELETE", "/api/v1/phones/%FF", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

// ============================================================================
// Filters
// ============================================================================

#[tokio::test]
async fn test_filters_over_sample_data() {
    let app = seeded_app();

    let (status, body) = send(&app, "GET", "/api/v1/phones/brand/samsung", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body["data"]), ["Samsung Galaxy S24 Ultra"]);

    let (_, body) = send(&app, "GET", "/api/v1/phones/type/business", None).await;
    assert_eq!(
        names(&body["data"]),
        ["iPhone 15 Pro", "Samsung Galaxy S24 Ultra", "Google Pixel 8 Pro"]
    );

    let (_, body) = send(
        &app,
        "GET",
        "/api/v1/phones/price-range?minPrice=900&maxPrice=1000",
        None,
    )
    .await;
    assert_eq!(names(&body["data"]), ["iPhone 15 Pro", "Google Pixel 8 Pro"]);

    let (_, body) = send(&app, "GET", "/api/v1/phones/search?query=ULTRA", None).await;
    assert_eq!(
        names(&body["data"]),
        ["Samsung Galaxy S24 Ultra", "Xiaomi 14 Ultra"]
    );

    let (status, body) = send(&app, "GET", "/api/v1/phones/search?query=nokia", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_filter_parameter_checks() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/phones/price-range?minPrice=1300&maxPrice=1000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Minimum price cannot be greater than maximum price"
    );

    let (status, _) = send(
        &app,
        "GET",
        "/api/v1/phones/price-range?minPrice=-5&maxPrice=1000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/phones/price-range?minPrice=5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/phones/search?query=%20%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/phones/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/v1/phones/brand/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/v1/phones/brand/%20samsung", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_cached_filter_sees_later_writes() {
    let app = seeded_app();

    let (_, before) = send(&app, "GET", "/api/v1/phones/brand/google", None).await;
    assert_eq!(names(&before["data"]), ["Google Pixel 8 Pro"]);

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/phones",
        Some(phone_json("Pixel 9", "Google", 899)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, after) = send(&app, "GET", "/api/v1/phones/brand/google", None).await;
    assert_eq!(names(&after["data"]), ["Google Pixel 8 Pro", "Pixel 9"]);
}
