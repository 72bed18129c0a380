//! The catalog façade: cached reads over the record store, invalidating writes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use phone_catalog_core::{Page, PageRequest, PhoneAttributes, PhoneId, PhoneRecord};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::cache::{CacheValue, QueryCache, QueryKey};
use crate::error::{CatalogError, Result};
use crate::query;
use crate::store::{RecordStore, Snapshot};

/// Single entry point for phone reads and writes.
///
/// Reads consult the [`QueryCache`] first and fall back to scanning a
/// [`Snapshot`] of the [`RecordStore`]. Every successful write flushes the
/// whole cache before returning.
///
/// Cheap to clone; clones share the same store and cache.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<RecordStore>,
    cache: Arc<QueryCache>,
}

/// Flushes the query cache when dropped.
///
/// Armed right after a store mutation commits so the flush runs on every
/// exit path of the write, including unwinding.
struct FlushOnDrop<'a>(&'a QueryCache);

impl Drop for FlushOnDrop<'_> {
    fn drop(&mut self) {
        self.0.flush_all();
        debug!("Query cache flushed");
    }
}

impl Catalog {
    #[must_use]
    pub const fn new(store: Arc<RecordStore>, cache: Arc<QueryCache>) -> Self {
        Self { store, cache }
    }

    /// A catalog over a fresh, empty store.
    #[must_use]
    pub fn with_cache_capacity(max_capacity: u64) -> Self {
        Self::new(
            Arc::new(RecordStore::new()),
            Arc::new(QueryCache::new(max_capacity)),
        )
    }

    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Get a phone by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no phone has this id.
    #[instrument(skip(self), fields(id = %id))]
    pub fn find_by_id(&self, id: &PhoneId) -> Result<PhoneRecord> {
        let key = QueryKey::Phone(id.clone());
        let epoch = self.cache.epoch();

        if let Some(CacheValue::Phone(record)) = self.cache.get(epoch, &key) {
            debug!("Cache hit for phone");
            return Ok(PhoneRecord::clone(&record));
        }

        let record = self.store.get(id)?;
        self.cache
            .put(epoch, &key, CacheValue::Phone(Arc::new(record.clone())));
        Ok(record)
    }

    /// All phones in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store is unusable.
    #[instrument(skip(self))]
    pub fn find_all(&self) -> Result<Vec<PhoneRecord>> {
        Ok(project(&self.cached_list(QueryKey::All, query::find_all)?))
    }

    /// One page of all phones, computed from the cached full listing.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store is unusable.
    #[instrument(skip(self))]
    pub fn find_all_paginated(&self, request: PageRequest) -> Result<Page<PhoneRecord>> {
        let all = self.cached_list(QueryKey::All, query::find_all)?;
        Ok(query::paginate(&all, request).map(|record| PhoneRecord::clone(&record)))
    }

    /// Phones whose brand contains `brand`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store is unusable.
    #[instrument(skip(self))]
    pub fn find_by_brand(&self, brand: &str) -> Result<Vec<PhoneRecord>> {
        let list = self.cached_list(QueryKey::brand(brand), |snapshot| {
            query::find_by_brand(snapshot, brand)
        })?;
        Ok(project(&list))
    }

    /// Phones with a usage type containing `usage_type`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store is unusable.
    #[instrument(skip(self))]
    pub fn find_by_usage_type(&self, usage_type: &str) -> Result<Vec<PhoneRecord>> {
        let list = self.cached_list(QueryKey::usage_type(usage_type), |snapshot| {
            query::find_by_usage_type(snapshot, usage_type)
        })?;
        Ok(project(&list))
    }

    /// Phones priced within `min..=max`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidRange` if `min > max`, before any scan.
    #[instrument(skip(self))]
    pub fn find_by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<PhoneRecord>> {
        if min > max {
            return Err(CatalogError::InvalidRange { min, max });
        }
        let list = self.cached_list(QueryKey::price_range(min, max), |snapshot| {
            query::find_by_price_range(snapshot, min, max)
        })?;
        Ok(project(&list))
    }

    /// Phones whose name, brand or description contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store is unusable.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> Result<Vec<PhoneRecord>> {
        let list = self.cached_list(QueryKey::search(query), |snapshot| {
            query::search(snapshot, query)
        })?;
        Ok(project(&list))
    }

    fn cached_list(
        &self,
        key: QueryKey,
        run: impl FnOnce(&Snapshot) -> Vec<Arc<PhoneRecord>>,
    ) -> Result<Arc<[Arc<PhoneRecord>]>> {
        let epoch = self.cache.epoch();

        if let Some(CacheValue::Phones(list)) = self.cache.get(epoch, &key) {
            debug!(key = %key, "Cache hit");
            return Ok(list);
        }

        debug!(key = %key, "Cache miss");
        let snapshot = self.store.snapshot()?;
        let list: Arc<[Arc<PhoneRecord>]> = run(&snapshot).into();
        self.cache
            .put(epoch, &key, CacheValue::Phones(Arc::clone(&list)));
        Ok(list)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Create a phone.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the attributes are invalid; the
    /// store and cache are left untouched.
    #[instrument(skip_all, fields(name = %attributes.name))]
    pub fn create(&self, attributes: PhoneAttributes) -> Result<PhoneRecord> {
        attributes.validate()?;

        let record = self.store.insert(attributes)?;
        let _flush = FlushOnDrop(&self.cache);

        info!(id = %record.id, "Phone created");
        Ok(record)
    }

    /// Create a phone that already has reviews and an earlier creation time,
    /// e.g. when loading sample data.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the attributes are invalid.
    #[instrument(skip_all, fields(name = %attributes.name))]
    pub fn import(
        &self,
        attributes: PhoneAttributes,
        review_count: u32,
        created_at: DateTime<Utc>,
    ) -> Result<PhoneRecord> {
        attributes.validate()?;

        let record = self.store.import(attributes, review_count, created_at)?;
        let _flush = FlushOnDrop(&self.cache);

        info!(id = %record.id, "Phone imported");
        Ok(record)
    }

    /// Replace every attribute of an existing phone.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for invalid attributes or
    /// `CatalogError::NotFound` if the id does not exist. The cache is not
    /// flushed in either case.
    #[instrument(skip(self, attributes), fields(id = %id))]
    pub fn update(&self, id: &PhoneId, attributes: PhoneAttributes) -> Result<PhoneRecord> {
        attributes.validate()?;

        let record = self.store.replace(id, attributes)?;
        let _flush = FlushOnDrop(&self.cache);

        info!("Phone updated");
        Ok(record)
    }

    /// Delete a phone, returning its last state.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id does not exist; the cache is
    /// not flushed in that case.
    #[instrument(skip(self), fields(id = %id))]
    pub fn delete(&self, id: &PhoneId) -> Result<PhoneRecord> {
        let record = self
            .store
            .remove(id)?
            .ok_or_else(|| CatalogError::phone_not_found(id))?;
        let _flush = FlushOnDrop(&self.cache);

        info!("Phone deleted");
        Ok(record)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_cache_capacity(QueryCache::DEFAULT_CAPACITY)
    }
}

fn project(list: &[Arc<PhoneRecord>]) -> Vec<PhoneRecord> {
    list.iter().map(|record| PhoneRecord::clone(record)).collect()
}
