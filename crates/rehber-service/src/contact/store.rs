//! Persistence boundary for imported contacts.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rehber_core::constants::DEFAULT_BATCH_SIZE;
use rehber_core::types::{ImportSource, OwnerRef};

use crate::error::{ServiceError, ServiceResult};

use super::record::NormalizedContactRecord;

/// A record as persisted by a [`ContactStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
    pub id: uuid::Uuid,
    pub imported_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: NormalizedContactRecord,
}

/// Storage the importer writes to.
///
/// Implementations enforce uniqueness on `(owner_ref, external_id,
/// import_source)`.
pub trait ContactStore: Send + Sync {
    /// ## Summary
    /// Persists `records` and returns the rows actually created.
    ///
    /// With `ignore_conflicts`, records whose key already exists (in the
    /// store or earlier in the same call) are skipped.
    ///
    /// ## Errors
    /// Returns `ServiceError::Conflict` on a duplicate key when
    /// `ignore_conflicts` is false, or `ServiceError::StoreError` when the
    /// store is unusable. Nothing is written when an error is returned.
    fn bulk_create(
        &self,
        records: Vec<NormalizedContactRecord>,
        ignore_conflicts: bool,
    ) -> ServiceResult<Vec<StoredContact>>;

    /// ## Summary
    /// Returns every contact owned by `owner`, oldest first.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` when the store is unusable.
    fn list(&self, owner: &OwnerRef) -> ServiceResult<Vec<StoredContact>>;
}

impl<T: ContactStore + ?Sized> ContactStore for Arc<T> {
    fn bulk_create(
        &self,
        records: Vec<NormalizedContactRecord>,
        ignore_conflicts: bool,
    ) -> ServiceResult<Vec<StoredContact>> {
        (**self).bulk_create(records, ignore_conflicts)
    }

    fn list(&self, owner: &OwnerRef) -> ServiceResult<Vec<StoredContact>> {
        (**self).list(owner)
    }
}

type UniqueKey = (Option<OwnerRef>, String, ImportSource);

fn unique_key(record: &NormalizedContactRecord) -> UniqueKey {
    (
        record.owner_ref.clone(),
        record.external_id.clone(),
        record.import_source,
    )
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<StoredContact>,
    keys: HashSet<UniqueKey>,
}

/// Process-local [`ContactStore`].
#[derive(Debug)]
pub struct InMemoryContactStore {
    inner: Mutex<Inner>,
    batch_size: usize,
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl InMemoryContactStore {
    /// Creates an empty store that inserts `batch_size` rows at a time.
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            batch_size: batch_size.max(1),
        }
    }

    /// ## Summary
    /// Returns the number of stored rows across all owners.
    ///
    /// ## Errors
    /// Returns `ServiceError::StoreError` if the lock is poisoned.
    pub fn len(&self) -> ServiceResult<usize> {
        Ok(self.lock()?.rows.len())
    }

    /// ## Errors
    /// Returns `ServiceError::StoreError` if the lock is poisoned.
    pub fn is_empty(&self) -> ServiceResult<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self) -> ServiceResult<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_poisoned| ServiceError::StoreError("contact store lock poisoned".into()))
    }
}

impl ContactStore for InMemoryContactStore {
    #[tracing::instrument(skip(self, records), fields(records = records.len()))]
    fn bulk_create(
        &self,
        records: Vec<NormalizedContactRecord>,
        ignore_conflicts: bool,
    ) -> ServiceResult<Vec<StoredContact>> {
        let mut inner = self.lock()?;

        if !ignore_conflicts {
            let mut seen = HashSet::with_capacity(records.len());
            for record in &records {
                let key = unique_key(record);
                if inner.keys.contains(&key) || !seen.insert(key) {
                    return Err(ServiceError::Conflict(format!(
                        "contact {} already exists",
                        record.external_id
                    )));
                }
            }
        }

        let mut created = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        let mut batch = Vec::with_capacity(self.batch_size.min(records.len()));

        for record in records {
            if !inner.keys.insert(unique_key(&record)) {
                skipped += 1;
                continue;
            }
            batch.push(StoredContact {
                id: uuid::Uuid::now_v7(),
                imported_at: Utc::now(),
                record,
            });
            if batch.len() == self.batch_size {
                tracing::trace!(rows = batch.len(), "Flushing batch");
                created.extend_from_slice(&batch);
                inner.rows.append(&mut batch);
            }
        }
        if !batch.is_empty() {
            tracing::trace!(rows = batch.len(), "Flushing batch");
            created.extend_from_slice(&batch);
            inner.rows.append(&mut batch);
        }

        tracing::debug!(created = created.len(), skipped, "Bulk create finished");
        Ok(created)
    }

    fn list(&self, owner: &OwnerRef) -> ServiceResult<Vec<StoredContact>> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .iter()
            .filter(|row| row.record.owner_ref.as_ref() == Some(owner))
            .cloned()
            .collect())
    }
}
