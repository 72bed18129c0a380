//! Sample catalog data loaded at start-up.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use phone_catalog_core::{CurrencyCode, NewCategory, PhoneAttributes};
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;

use crate::catalog::Catalog;
use crate::categories::CategoryRegistry;
use crate::error::Result;

/// Default categories.
#[must_use]
pub fn sample_categories() -> Vec<NewCategory> {
    vec![
        NewCategory::new("Budget", "Affordable smartphones for everyone"),
        NewCategory::new("Flagship", "Top-of-the-line premium phones"),
        NewCategory::new("Gaming", "Phones optimized for gaming"),
        NewCategory::new("Camera", "Best camera phones"),
        NewCategory::new("Foldable", "Latest foldable phones"),
    ]
}

struct SamplePhone {
    name: &'static str,
    brand: &'static str,
    description: &'static str,
    price: i64,
    usage_types: &'static [&'static str],
    image_url: &'static str,
    release_date: (i32, u32, u32),
    storage_gb: u32,
    ram_gb: u32,
    battery_capacity_mah: u32,
    screen_size_inches: f64,
    camera_count: u32,
    wireless_charging: bool,
    rating: f64,
}

const SAMPLE_PHONES: &[SamplePhone] = &[
    SamplePhone {
        name: "iPhone 15 Pro",
        brand: "Apple",
        description: "Latest iPhone with A17 Pro chip",
        price: 999,
        usage_types: &["Gaming", "Photography", "Business"],
        image_url: "https://example.com/iphone15pro.jpg",
        release_date: (2023, 9, 22),
        storage_gb: 256,
        ram_gb: 8,
        battery_capacity_mah: 4441,
        screen_size_inches: 6.1,
        camera_count: 3,
        wireless_charging: true,
        rating: 4.8,
    },
    SamplePhone {
        name: "Samsung Galaxy S24 Ultra",
        brand: "Samsung",
        description: "Premium Android flagship",
        price: 1199,
        usage_types: &["Gaming", "Photography", "Business"],
        image_url: "https://example.com/s24ultra.jpg",
        release_date: (2024, 1, 17),
        storage_gb: 512,
        ram_gb: 12,
        battery_capacity_mah: 5000,
        screen_size_inches: 6.8,
        camera_count: 4,
        wireless_charging: true,
        rating: 4.7,
    },
    SamplePhone {
        name: "Google Pixel 8 Pro",
        brand: "Google",
        description: "Best camera phone with AI features",
        price: 999,
        usage_types: &["Photography", "Business"],
        image_url: "https://example.com/pixel8pro.jpg",
        release_date: (2023, 10, 4),
        storage_gb: 256,
        ram_gb: 12,
        battery_capacity_mah: 4950,
        screen_size_inches: 6.7,
        camera_count: 3,
        wireless_charging: true,
        rating: 4.6,
    },
    SamplePhone {
        name: "OnePlus 12",
        brand: "OnePlus",
        description: "Fast performance with great value",
        price: 799,
        usage_types: &["Gaming", "Photography"],
        image_url: "https://example.com/oneplus12.jpg",
        release_date: (2024, 1, 23),
        storage_gb: 256,
        ram_gb: 16,
        battery_capacity_mah: 5400,
        screen_size_inches: 6.82,
        camera_count: 3,
        wireless_charging: false,
        rating: 4.5,
    },
    SamplePhone {
        name: "Xiaomi 14 Ultra",
        brand: "Xiaomi",
        description: "Professional photography phone",
        price: 1299,
        usage_types: &["Photography", "Gaming"],
        image_url: "https://example.com/xiaomi14ultra.jpg",
        release_date: (2024, 2, 22),
        storage_gb: 512,
        ram_gb: 16,
        battery_capacity_mah: 5000,
        screen_size_inches: 6.73,
        camera_count: 4,
        wireless_charging: true,
        rating: 4.4,
    },
];

impl SamplePhone {
    fn attributes(&self) -> PhoneAttributes {
        let (year, month, day) = self.release_date;
        let release_date = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map_or(DateTime::<Utc>::UNIX_EPOCH, |dt| dt.and_utc());

        PhoneAttributes {
            name: self.name.to_owned(),
            brand: self.brand.to_owned(),
            description: self.description.to_owned(),
            price: Decimal::from(self.price),
            currency: CurrencyCode::USD,
            usage_types: self.usage_types.iter().map(|&t| t.to_owned()).collect(),
            image_url: self.image_url.to_owned(),
            release_date,
            storage_gb: self.storage_gb,
            ram_gb: self.ram_gb,
            battery_capacity_mah: self.battery_capacity_mah,
            screen_size_inches: self.screen_size_inches,
            camera_count: self.camera_count,
            is_5g: true,
            is_water_resistant: true,
            has_wireless_charging: self.wireless_charging,
            rating: self.rating,
        }
    }
}

/// The five demo phones.
#[must_use]
pub fn sample_phones() -> Vec<PhoneAttributes> {
    SAMPLE_PHONES.iter().map(SamplePhone::attributes).collect()
}

/// Load the sample phones and categories.
///
/// Phones go through [`Catalog::import`], so the cache is invalidated
/// exactly as for user writes. Each gets a random review count in
/// `100..1100` and a creation time up to a year in the past.
///
/// # Errors
///
/// Returns the first error raised while inserting.
pub fn seed(catalog: &Catalog, categories: &CategoryRegistry) -> Result<usize> {
    let mut rng = rand::rng();
    let mut phones = 0;

    for attributes in sample_phones() {
        let created_at = Utc::now() - TimeDelta::days(rng.random_range(0..365));
        catalog.import(attributes, rng.random_range(100..1100), created_at)?;
        phones += 1;
    }
    for category in sample_categories() {
        categories.create(category)?;
    }

    info!(phones, "Sample catalog loaded");
    Ok(phones)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_is_valid() {
        for phone in sample_phones() {
            assert!(phone.validate().is_ok(), "{} is invalid", phone.name);
        }
        for category in sample_categories() {
            assert!(category.validate().is_ok(), "{} is invalid", category.name);
        }
    }

    #[test]
    fn test_seed_loads_everything() {
        let catalog = Catalog::default();
        let categories = CategoryRegistry::new();

        assert_eq!(seed(&catalog, &categories).unwrap(), 5);
        assert_eq!(catalog.find_all().unwrap().len(), 5);
        assert_eq!(categories.list().unwrap().len(), 5);

        let year_ago = Utc::now() - TimeDelta::days(365);
        for phone in catalog.find_all().unwrap() {
            assert!((100..1100).contains(&phone.review_count));
            assert!(phone.created_at > year_ago);
            assert!(phone.created_at <= phone.updated_at);
        }
        assert_eq!(catalog.find_by_brand("google").unwrap().len(), 1);
    }
}
