use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use wormhole_core::{Snapshot, StorageError, UrlRecord, UrlStore};

/// In-memory implementation of [`UrlStore`].
///
/// Clones share the same slot, so one instance can be handed to both the
/// shortener and the redirector. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    slot: RwLock<Option<Vec<UrlRecord>>>,
    saves: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new, never-written store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose slot already holds `records`.
    pub fn with_records(records: Vec<UrlRecord>) -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: RwLock::new(Some(records)),
                ..Inner::default()
            }),
        }
    }

    /// Number of successful `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `save` fail with [`StorageError::Unavailable`].
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlStore for InMemoryStore {
    async fn load(&self) -> Snapshot {
        match self.inner.slot.read().await.as_ref() {
            Some(records) => Snapshot::loaded(records.clone()),
            None => Snapshot::vacant(),
        }
    }

    async fn save(&self, records: &[UrlRecord]) -> Result<(), StorageError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "in-memory store is refusing writes".to_string(),
            ));
        }

        *self.inner.slot.write().await = Some(records.to_vec());
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use wormhole_core::{LoadStatus, ShortCode};

    fn record(code: &str) -> UrlRecord {
        let created_at = Timestamp::from_second(1_700_000_000).unwrap();
        UrlRecord {
            id: format!("{}-0", created_at.as_millisecond()),
            original_url: "https://example.com".to_string(),
            short_code: ShortCode::new_unchecked(code),
            short_url: format!("https://worm.hole/{code}"),
            created_at,
            expires_at: created_at + SignedDuration::from_mins(30),
            validity_minutes: 30,
            clicks: Vec::new(),
            expired: false,
        }
    }

    #[tokio::test]
    async fn new_store_is_vacant() {
        let store = InMemoryStore::new();
        let snapshot = store.load().await;
        assert_eq!(snapshot.status, LoadStatus::Vacant);
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_whole_collection() {
        let store = InMemoryStore::new();
        store.save(&[record("a"), record("b")]).await.unwrap();
        store.save(&[record("c")]).await.unwrap();

        let snapshot = store.load().await;
        assert_eq!(snapshot.status, LoadStatus::Loaded);
        assert_eq!(snapshot.records, vec![record("c")]);
        assert_eq!(store.save_count(), 2);
    }

    #[tokio::test]
    async fn clones_share_the_slot() {
        let store = InMemoryStore::new();
        let other = store.clone();
        store.save(&[record("a")]).await.unwrap();
        assert_eq!(other.load().await.records.len(), 1);
    }

    #[tokio::test]
    async fn failing_saves_leave_slot_untouched() {
        let store = InMemoryStore::with_records(vec![record("a")]);
        store.set_fail_saves(true);

        let err = store.save(&[]).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(store.load().await.records, vec![record("a")]);
        assert_eq!(store.save_count(), 0);
    }
}
