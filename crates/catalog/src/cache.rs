//! Cache of derived query results.
//!
//! Results are keyed by a canonical [`QueryKey`] and stored in a bounded
//! `moka` cache. There is no per-entry expiry: entries live until the next
//! [`QueryCache::flush_all`].
//!
//! Every lookup and insert is tagged with the cache [`Epoch`] observed when
//! the read began. A flush bumps the epoch before clearing `moka`, so a
//! result computed from a snapshot that raced with a write is stored under a
//! stale epoch and can never be returned to a later reader.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache;
use phone_catalog_core::{PhoneId, PhoneRecord};
use rust_decimal::Decimal;

/// Canonical description of a cacheable read.
///
/// Text parameters are lowercased (matching is case-insensitive) and prices
/// are normalized, so requests with the same effective parameters share a
/// key. Each variant renders with its own prefix, so keys never collide
/// across kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Phone(PhoneId),
    All,
    Brand(String),
    UsageType(String),
    PriceRange { min: Decimal, max: Decimal },
    Search(String),
}

impl QueryKey {
    #[must_use]
    pub fn brand(brand: &str) -> Self {
        Self::Brand(brand.to_lowercase())
    }

    #[must_use]
    pub fn usage_type(usage_type: &str) -> Self {
        Self::UsageType(usage_type.to_lowercase())
    }

    #[must_use]
    pub fn price_range(min: Decimal, max: Decimal) -> Self {
        Self::PriceRange {
            min: min.normalize(),
            max: max.normalize(),
        }
    }

    #[must_use]
    pub fn search(query: &str) -> Self {
        Self::Search(query.to_lowercase())
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phone(id) => write!(f, "phone:{id}"),
            Self::All => f.write_str("all"),
            Self::Brand(brand) => write!(f, "brand:{brand}"),
            Self::UsageType(usage_type) => write!(f, "type:{usage_type}"),
            Self::PriceRange { min, max } => write!(f, "price:{min}-{max}"),
            Self::Search(query) => write!(f, "search:{query}"),
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Phone(Arc<PhoneRecord>),
    Phones(Arc<[Arc<PhoneRecord>]>),
}

/// Generation of the cache contents. Changes on every flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Epoch(u64);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    epoch: Epoch,
    query: String,
}

/// Thread-safe store of query results with whole-cache invalidation.
pub struct QueryCache {
    entries: Cache<CacheKey, CacheValue>,
    epoch: AtomicU64,
}

impl QueryCache {
    /// Default maximum number of cached results.
    pub const DEFAULT_CAPACITY: u64 = 1000;

    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            entries: Cache::builder().max_capacity(max_capacity).build(),
            epoch: AtomicU64::new(0),
        }
    }

    /// The current epoch. Take this before reading the store.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        Epoch(self.epoch.load(Ordering::SeqCst))
    }

    #[must_use]
    pub fn get(&self, epoch: Epoch, key: &QueryKey) -> Option<CacheValue> {
        self.entries.get(&CacheKey {
            epoch,
            query: key.to_string(),
        })
    }

    /// Store a result computed during `epoch`. Overwrites any previous value.
    ///
    /// Results from an epoch that has already been flushed are dropped.
    pub fn put(&self, epoch: Epoch, key: &QueryKey, value: CacheValue) {
        if epoch != self.epoch() {
            return;
        }
        self.entries.insert(
            CacheKey {
                epoch,
                query: key.to_string(),
            },
            value,
        );
    }

    /// Invalidate every cached result.
    ///
    /// Once this returns, no `get` can observe an entry stored before it.
    pub fn flush_all(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.entries.invalidate_all();
    }

    /// Approximate number of live entries, after applying pending evictions.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::{apple, record};

    fn phones() -> CacheValue {
        CacheValue::Phones(vec![Arc::new(record("a", apple()))].into())
    }

    #[test]
    fn test_canonical_keys() {
        assert_eq!(QueryKey::All.to_string(), "all");
        assert_eq!(QueryKey::Phone(PhoneId::new("x")).to_string(), "phone:x");
        assert_eq!(QueryKey::brand("Apple").to_string(), "brand:apple");
        assert_eq!(QueryKey::usage_type("Gaming").to_string(), "type:gaming");
        assert_eq!(QueryKey::search("PRO").to_string(), "search:pro");
        assert_eq!(
            QueryKey::price_range(Decimal::new(100_000, 2), Decimal::from(1300)).to_string(),
            "price:1000-1300"
        );
    }

    #[test]
    fn test_equivalent_parameters_share_a_key() {
        assert_eq!(QueryKey::brand("APPLE"), QueryKey::brand("apple"));
        assert_eq!(
            QueryKey::price_range(Decimal::new(1000, 0), Decimal::new(13000, 1)),
            QueryKey::price_range(Decimal::new(100_000, 2), Decimal::from(1300))
        );
    }

    #[test]
    fn test_kinds_never_collide() {
        let keys = [
            QueryKey::Phone(PhoneId::new("all")),
            QueryKey::All,
            QueryKey::brand("all"),
            QueryKey::usage_type("all"),
            QueryKey::search("all"),
            QueryKey::price_range(Decimal::ONE, Decimal::TWO),
        ];
        let rendered: std::collections::HashSet<_> = keys.iter().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), keys.len());
    }

    #[test]
    fn test_get_put() {
        let cache = QueryCache::default();
        let epoch = cache.epoch();
        assert!(cache.get(epoch, &QueryKey::All).is_none());

        cache.put(epoch, &QueryKey::All, phones());
        assert!(matches!(
            cache.get(epoch, &QueryKey::All),
            Some(CacheValue::Phones(list)) if list.len() == 1
        ));
        assert!(cache.get(epoch, &QueryKey::brand("apple")).is_none());
    }

    #[test]
    fn test_flush_all_hides_previous_entries() {
        let cache = QueryCache::default();
        let before = cache.epoch();
        cache.put(before, &QueryKey::All, phones());

        cache.flush_all();
        let after = cache.epoch();

        assert_ne!(before, after);
        assert!(cache.get(after, &QueryKey::All).is_none());
        assert!(cache.get(before, &QueryKey::All).is_none());
    }

    #[test]
    fn test_put_from_flushed_epoch_is_dropped() {
        let cache = QueryCache::default();
        let stale = cache.epoch();
        cache.flush_all();

        cache.put(stale, &QueryKey::All, phones());
        assert!(cache.get(cache.epoch(), &QueryKey::All).is_none());
        assert_eq!(cache.entry_count(), 0);
    }
}
