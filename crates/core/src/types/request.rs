//! Phone request bodies as sent by clients.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use super::currency::CurrencyCode;
use super::phone::PhoneAttributes;
use super::validation::ValidationErrors;

/// Body of a phone create or update request.
///
/// Every field is optional and whole numbers are signed, so a missing or
/// negative value survives deserialization and is reported against its own
/// field by [`PhoneRequest::into_attributes`].
///
/// `releaseDate` accepts RFC 3339 (`2024-01-17T00:00:00Z`), a local
/// date-time without offset (`2024-01-17T00:00:00`, read as UTC) or a bare
/// date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub currency: Option<String>,
    pub usage_types: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub release_date: Option<String>,
    #[serde(rename = "storageGB")]
    pub storage_gb: Option<i64>,
    #[serde(rename = "ramGB")]
    pub ram_gb: Option<i64>,
    #[serde(rename = "batteryCapacityMAh")]
    pub battery_capacity_mah: Option<i64>,
    pub screen_size_inches: Option<f64>,
    pub camera_count: Option<i64>,
    #[serde(rename = "is5G")]
    pub is_5g: Option<bool>,
    pub is_water_resistant: Option<bool>,
    pub has_wireless_charging: Option<bool>,
    pub rating: Option<f64>,
}

impl PhoneRequest {
    /// Check every field and build validated [`PhoneAttributes`].
    ///
    /// A missing field gets "... is required"; a present one gets the first
    /// format or range rule it breaks. Booleans default to `false`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationErrors`] map with one message per failing field.
    pub fn into_attributes(self) -> Result<PhoneAttributes, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let price = self.price.unwrap_or_else(|| {
            errors.add("price", "Price is required");
            Decimal::ZERO
        });

        let currency = match self.currency.as_deref().map(CurrencyCode::parse) {
            Some(Ok(code)) => code,
            Some(Err(_)) => {
                errors.add(
                    "currency",
                    "Currency must be a 3-letter code (e.g., USD, EUR)",
                );
                CurrencyCode::USD
            }
            None => {
                errors.add("currency", "Currency is required");
                CurrencyCode::USD
            }
        };

        let release_date = match self.release_date.as_deref().map(parse_release_date) {
            Some(Some(date)) => date,
            Some(None) => {
                errors.add(
                    "releaseDate",
                    "Release date must be a date-time such as 2024-01-17T00:00:00",
                );
                DateTime::<Utc>::UNIX_EPOCH
            }
            None => {
                errors.add("releaseDate", "Release date is required");
                DateTime::<Utc>::UNIX_EPOCH
            }
        };

        let storage_gb = count(&mut errors, "storageGB", "Storage capacity", self.storage_gb);
        let ram_gb = count(&mut errors, "ramGB", "RAM capacity", self.ram_gb);
        let battery_capacity_mah = count(
            &mut errors,
            "batteryCapacityMAh",
            "Battery capacity",
            self.battery_capacity_mah,
        );
        let camera_count = count(&mut errors, "cameraCount", "Camera count", self.camera_count);

        let screen_size_inches = self.screen_size_inches.unwrap_or_else(|| {
            errors.add("screenSizeInches", "Screen size is required");
            0.0
        });
        let rating = self.rating.unwrap_or_else(|| {
            errors.add("rating", "Rating is required");
            0.0
        });

        let attributes = PhoneAttributes {
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            price,
            currency,
            usage_types: self.usage_types.unwrap_or_default(),
            image_url: self.image_url.unwrap_or_default(),
            release_date,
            storage_gb,
            ram_gb,
            battery_capacity_mah,
            screen_size_inches,
            camera_count,
            is_5g: self.is_5g.unwrap_or(false),
            is_water_resistant: self.is_water_resistant.unwrap_or(false),
            has_wireless_charging: self.has_wireless_charging.unwrap_or(false),
            rating,
        };

        if let Err(rules) = attributes.validate() {
            errors.merge(rules);
        }
        errors.into_result().map(|()| attributes)
    }
}

/// Negative values map to 0 so the minimum-value rule reports them.
fn count(errors: &mut ValidationErrors, field: &str, label: &str, value: Option<i64>) -> u32 {
    match value {
        None => {
            errors.add(field, format!("{label} is required"));
            0
        }
        Some(v) if v < 0 => 0,
        Some(v) => u32::try_from(v).unwrap_or_else(|_| {
            errors.add(field, format!("{label} is too large"));
            u32::MAX
        }),
    }
}

fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}
