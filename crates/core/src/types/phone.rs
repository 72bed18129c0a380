//! Phone records and their validated input attributes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::currency::CurrencyCode;
use super::id::PhoneId;
use super::validation::ValidationErrors;

/// Every field of a phone that a client supplies on create and update.
///
/// Field names follow the public JSON shape (`storageGB`, `is5G`, ...).
/// Clients send a [`PhoneRequest`](super::request::PhoneRequest), which is
/// checked into this type. Call [`PhoneAttributes::validate`] before
/// accepting a value into a store.
///
/// ## Constraints
///
/// - `name`: 2-100 characters, `brand`: 2-50, `description`: 10-500
/// - `price`: greater than 0 and at most 1,000,000
/// - `usageTypes`: at least one non-blank entry
/// - `imageUrl`: starts with `http://` or `https://`
/// - `storageGB`, `ramGB` >= 1, `batteryCapacityMAh` >= 1000
/// - `screenSizeInches` in 3.0-10.0, `cameraCount` in 1-10, `rating` in 0.0-5.0
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneAttributes {
    pub name: String,
    pub brand: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: CurrencyCode,
    pub usage_types: Vec<String>,
    pub image_url: String,
    pub release_date: DateTime<Utc>,
    #[serde(rename = "storageGB")]
    pub storage_gb: u32,
    #[serde(rename = "ramGB")]
    pub ram_gb: u32,
    #[serde(rename = "batteryCapacityMAh")]
    pub battery_capacity_mah: u32,
    pub screen_size_inches: f64,
    pub camera_count: u32,
    #[serde(rename = "is5G")]
    pub is_5g: bool,
    pub is_water_resistant: bool,
    pub has_wireless_charging: bool,
    pub rating: f64,
}

impl PhoneAttributes {
    pub const NAME_LENGTH: (usize, usize) = (2, 100);
    pub const BRAND_LENGTH: (usize, usize) = (2, 50);
    pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 500);
    pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
    pub const MIN_BATTERY_MAH: u32 = 1000;
    pub const SCREEN_SIZE_INCHES: (f64, f64) = (3.0, 10.0);
    pub const CAMERA_COUNT: (u32, u32) = (1, 10);
    pub const RATING: (f64, f64) = (0.0, 5.0);

    /// Check every field constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationErrors`] map with one message per failing field.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_text(
            &mut errors,
            "name",
            "Phone name",
            &self.name,
            Self::NAME_LENGTH,
        );
        check_text(&mut errors, "brand", "Brand", &self.brand, Self::BRAND_LENGTH);
        check_text(
            &mut errors,
            "description",
            "Description",
            &self.description,
            Self::DESCRIPTION_LENGTH,
        );

        if self.price <= Decimal::ZERO {
            errors.add("price", "Price must be greater than 0");
        } else if self.price > Self::MAX_PRICE {
            errors.add("price", "Price cannot exceed 1,000,000");
        }

        if self.usage_types.is_empty() {
            errors.add("usageTypes", "At least one usage type is required");
        } else if self.usage_types.iter().any(|t| t.trim().is_empty()) {
            errors.add("usageTypes", "Usage types cannot be blank");
        }

        if self.image_url.trim().is_empty() {
            errors.add("imageUrl", "Image URL is required");
        } else if !(self.image_url.starts_with("http://") || self.image_url.starts_with("https://"))
        {
            errors.add("imageUrl", "Image URL must be a valid HTTP/HTTPS URL");
        }

        if self.storage_gb < 1 {
            errors.add("storageGB", "Storage must be at least 1 GB");
        }
        if self.ram_gb < 1 {
            errors.add("ramGB", "RAM must be at least 1 GB");
        }
        if self.battery_capacity_mah < Self::MIN_BATTERY_MAH {
            errors.add(
                "batteryCapacityMAh",
                "Battery capacity must be at least 1000 mAh",
            );
        }

        let (min_screen, max_screen) = Self::SCREEN_SIZE_INCHES;
        if self.screen_size_inches.is_nan() || self.screen_size_inches < min_screen {
            errors.add("screenSizeInches", "Screen size must be at least 3.0 inches");
        } else if self.screen_size_inches > max_screen {
            errors.add("screenSizeInches", "Screen size cannot exceed 10.0 inches");
        }

        let (min_cameras, max_cameras) = Self::CAMERA_COUNT;
        if self.camera_count < min_cameras {
            errors.add("cameraCount", "Must have at least 1 camera");
        } else if self.camera_count > max_cameras {
            errors.add("cameraCount", "Cannot have more than 10 cameras");
        }

        let (min_rating, max_rating) = Self::RATING;
        if self.rating.is_nan() || self.rating < min_rating {
            errors.add("rating", "Rating must be at least 0.0");
        } else if self.rating > max_rating {
            errors.add("rating", "Rating cannot exceed 5.0");
        }

        errors.into_result()
    }
}

fn check_text(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: &str,
    (min, max): (usize, usize),
) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        return;
    }
    let len = value.chars().count();
    if len < min || len > max {
        errors.add(
            field,
            format!("{label} must be between {min} and {max} characters"),
        );
    }
}

/// A phone as held by the catalog.
///
/// `id` and `created_at` never change after creation; `updated_at` is
/// refreshed on every replace and is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRecord {
    pub id: PhoneId,
    #[serde(flatten)]
    pub attributes: PhoneAttributes,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PhoneRecord {
    /// Build a brand-new record: zero reviews, `created_at == updated_at == now`.
    #[must_use]
    pub fn new(id: PhoneId, attributes: PhoneAttributes, now: DateTime<Utc>) -> Self {
        Self {
            id,
            attributes,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
