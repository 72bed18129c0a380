//! The authoritative in-memory phone record store.
//!
//! Records are kept behind a `RwLock`, so lookups and snapshots from many
//! threads proceed in parallel while writes are exclusive. Each record is an
//! immutable `Arc<PhoneRecord>`: a replace swaps the `Arc` instead of
//! mutating in place, so a [`Snapshot`] taken earlier keeps seeing the old
//! value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeDelta, Utc};
use phone_catalog_core::{PhoneAttributes, PhoneId, PhoneRecord};

use crate::error::{CatalogError, Result};

struct StoredPhone {
    /// Insertion sequence, used to give snapshots a stable order.
    seq: u64,
    record: Arc<PhoneRecord>,
}

/// Owns every live [`PhoneRecord`].
///
/// Construct one per process (or per test) and hand it to a
/// [`Catalog`](crate::Catalog) by `Arc`. Writes made here directly do not
/// flush any query cache; mutate through the catalog once it is shared.
#[derive(Default)]
pub struct RecordStore {
    records: RwLock<HashMap<PhoneId, StoredPhone>>,
    next_seq: AtomicU64,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new record under a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if any field is out of range; the
    /// store is left untouched in that case.
    pub fn insert(&self, attributes: PhoneAttributes) -> Result<PhoneRecord> {
        self.insert_record(attributes, 0, None)
    }

    /// Like [`insert`](Self::insert) but for existing catalog data: a preset
    /// review count and an earlier creation time. `updated_at` is now, and a
    /// `created_at` in the future is clamped to now.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if any field is out of range.
    pub fn import(
        &self,
        attributes: PhoneAttributes,
        review_count: u32,
        created_at: DateTime<Utc>,
    ) -> Result<PhoneRecord> {
        self.insert_record(attributes, review_count, Some(created_at))
    }

    fn insert_record(
        &self,
        attributes: PhoneAttributes,
        review_count: u32,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<PhoneRecord> {
        attributes.validate()?;

        let mut records = self.write()?;
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut id = PhoneId::generate();
        while records.contains_key(&id) {
            id = PhoneId::generate();
        }

        let now = Utc::now();
        let mut record = PhoneRecord::new(id.clone(), attributes, now);
        record.review_count = review_count;
        record.created_at = created_at.map_or(now, |at| at.min(now));
        let record = Arc::new(record);
        records.insert(
            id,
            StoredPhone {
                seq,
                record: Arc::clone(&record),
            },
        );

        Ok(PhoneRecord::clone(&record))
    }

    /// Look up a single record.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no record has this id.
    pub fn get(&self, id: &PhoneId) -> Result<PhoneRecord> {
        self.read()?
            .get(id)
            .map(|stored| PhoneRecord::clone(&stored.record))
            .ok_or_else(|| CatalogError::phone_not_found(id))
    }

    /// Overwrite every field except `id`, `created_at` and `review_count`.
    ///
    /// `updated_at` is set to the current time, bumped forward if needed so
    /// it is strictly later than the previous value.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for bad input (checked first) or
    /// `CatalogError::NotFound` if the id does not exist.
    pub fn replace(&self, id: &PhoneId, attributes: PhoneAttributes) -> Result<PhoneRecord> {
        attributes.validate()?;

        let mut records = self.write()?;
        let stored = records
            .get_mut(id)
            .ok_or_else(|| CatalogError::phone_not_found(id))?;

        let previous = &stored.record;
        let record = Arc::new(PhoneRecord {
            id: previous.id.clone(),
            attributes,
            review_count: previous.review_count,
            created_at: previous.created_at,
            updated_at: next_update_time(previous.updated_at, Utc::now()),
        });
        stored.record = Arc::clone(&record);

        Ok(PhoneRecord::clone(&record))
    }

    /// Remove a record, returning it if it existed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store lock is poisoned.
    pub fn remove(&self, id: &PhoneId) -> Result<Option<PhoneRecord>> {
        Ok(self
            .write()?
            .remove(id)
            .map(|stored| PhoneRecord::clone(&stored.record)))
    }

    /// Remove a record. Returns `true` if one existed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store lock is poisoned.
    pub fn delete(&self, id: &PhoneId) -> Result<bool> {
        Ok(self.remove(id)?.is_some())
    }

    /// Take a point-in-time copy of all live records in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store lock is poisoned.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut entries: Vec<(u64, Arc<PhoneRecord>)> = self
            .read()?
            .values()
            .map(|stored| (stored.seq, Arc::clone(&stored.record)))
            .collect();
        entries.sort_unstable_by_key(|(seq, _)| *seq);

        Ok(Snapshot {
            records: entries.into_iter().map(|(_, record)| record).collect(),
        })
    }

    /// Number of live records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Internal` if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<PhoneId, StoredPhone>>> {
        self.records
            .read()
            .map_err(|_| CatalogError::poisoned("record store"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<PhoneId, StoredPhone>>> {
        self.records
            .write()
            .map_err(|_| CatalogError::poisoned("record store"))
    }
}

fn next_update_time(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + TimeDelta::microseconds(1))
}

/// An immutable, independently iterable copy of the store's records.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: Vec<Arc<PhoneRecord>>,
}

impl Snapshot {
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PhoneRecord>> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<PhoneRecord> for Snapshot {
    fn from_iter<I: IntoIterator<Item = PhoneRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(Arc::new).collect(),
        }
    }
}
