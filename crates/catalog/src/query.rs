//! Stateless queries over a [`Snapshot`].
//!
//! Every function here is a linear scan that preserves the snapshot's
//! iteration order. Matching on text is case-insensitive substring matching;
//! there is no ranking and no index.

use std::sync::Arc;

use phone_catalog_core::{Page, PageRequest, PhoneId, PhoneRecord};
use rust_decimal::Decimal;

use crate::store::Snapshot;

type Matches = Vec<Arc<PhoneRecord>>;

fn filter(snapshot: &Snapshot, predicate: impl Fn(&PhoneRecord) -> bool) -> Matches {
    snapshot
        .iter()
        .filter(|record| predicate(record))
        .cloned()
        .collect()
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Every record in the snapshot.
#[must_use]
pub fn find_all(snapshot: &Snapshot) -> Matches {
    snapshot.iter().cloned().collect()
}

/// The record with the given id, if present.
#[must_use]
pub fn find_by_id(snapshot: &Snapshot, id: &PhoneId) -> Option<Arc<PhoneRecord>> {
    snapshot.iter().find(|record| &record.id == id).cloned()
}

/// Records whose brand contains `brand`, ignoring case.
#[must_use]
pub fn find_by_brand(snapshot: &Snapshot, brand: &str) -> Matches {
    let brand = brand.to_lowercase();
    filter(snapshot, |record| {
        contains_ignore_case(&record.attributes.brand, &brand)
    })
}

/// Records with at least one usage type containing `usage_type`, ignoring case.
#[must_use]
pub fn find_by_usage_type(snapshot: &Snapshot, usage_type: &str) -> Matches {
    let usage_type = usage_type.to_lowercase();
    filter(snapshot, |record| {
        record
            .attributes
            .usage_types
            .iter()
            .any(|t| contains_ignore_case(t, &usage_type))
    })
}

/// Records with `min <= price <= max`.
///
/// The caller must reject `min > max` before calling; such a range simply
/// matches nothing here.
#[must_use]
pub fn find_by_price_range(snapshot: &Snapshot, min: Decimal, max: Decimal) -> Matches {
    debug_assert!(min <= max, "price range must be checked by the caller");
    filter(snapshot, |record| {
        (min..=max).contains(&record.attributes.price)
    })
}

/// Records whose name, brand or description contains `query`, ignoring case.
#[must_use]
pub fn search(snapshot: &Snapshot, query: &str) -> Matches {
    let query = query.to_lowercase();
    filter(snapshot, |record| {
        let attrs = &record.attributes;
        contains_ignore_case(&attrs.name, &query)
            || contains_ignore_case(&attrs.brand, &query)
            || contains_ignore_case(&attrs.description, &query)
    })
}

/// Slice one page out of `results`.
///
/// A page past the end is empty but still reports the full total.
#[must_use]
pub fn paginate<T: Clone>(results: &[T], request: PageRequest) -> Page<T> {
    let total = results.len();
    let start = request.offset().min(total);
    let end = start.saturating_add(request.size()).min(total);
    let content = results.get(start..end).map_or_else(Vec::new, <[T]>::to_vec);
    Page::new(content, total, request)
}
