use crate::error::StorageError;
use crate::record::UrlRecord;
use async_trait::async_trait;
use jiff::Timestamp;

/// How a [`Snapshot`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The slot has never been written.
    Vacant,
    /// The slot was read and deserialized.
    Loaded,
    /// The slot exists but could not be read or parsed. The collection is
    /// reported as empty instead of failing.
    EmptyOnCorruption,
}

/// The full persisted collection, as read in one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub records: Vec<UrlRecord>,
    pub status: LoadStatus,
}

impl Snapshot {
    pub fn vacant() -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::Vacant,
        }
    }

    pub fn loaded(records: Vec<UrlRecord>) -> Self {
        Self {
            records,
            status: LoadStatus::Loaded,
        }
    }

    pub fn empty_on_corruption() -> Self {
        Self {
            records: Vec::new(),
            status: LoadStatus::EmptyOnCorruption,
        }
    }

    /// Consumes the snapshot, returning its records with `expired`
    /// recomputed against `now`.
    pub fn into_fresh_records(self, now: Timestamp) -> Vec<UrlRecord> {
        let mut records = self.records;
        for record in &mut records {
            record.refresh_expiry(now);
        }
        records
    }
}

/// Whole-collection persistence for URL records.
///
/// Every mutation is a read-modify-write: callers `load` the entire
/// collection, change it in memory, and `save` the entire collection back.
/// There is no partial update and no conflict detection between writers.
#[async_trait]
pub trait UrlStore: Send + Sync + 'static {
    /// Reads the whole collection. Never fails; see [`LoadStatus`].
    async fn load(&self) -> Snapshot;

    /// Replaces the whole collection.
    async fn save(&self, records: &[UrlRecord]) -> Result<(), StorageError>;
}
