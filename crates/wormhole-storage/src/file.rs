// # File Store
//
// Keeps the whole collection in a single JSON file (the "named slot").
//
// ## Crash behavior
//
// - Writes go to `<path>.tmp` first and are renamed over the slot, so a
//   crash mid-write leaves the previous collection in place.
// - A slot that cannot be read or parsed loads as an empty collection
//   (`LoadStatus::EmptyOnCorruption`). It is overwritten by the next save.
//
// ## File format
//
// ```json
// [
//   {
//     "id": "1736424000000-0",
//     "originalUrl": "https://example.com",
//     "shortCode": "aZ3kQ9",
//     "shortUrl": "https://url-shortener-8g5h.onrender.com/aZ3kQ9",
//     "createdAt": "2025-01-09T12:00:00Z",
//     "expiresAt": "2025-01-09T12:30:00Z",
//     "validityMinutes": 30,
//     "clicks": [],
//     "isExpired": false
//   }
// ]
// ```

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace, warn};
use wormhole_core::{Snapshot, StorageError, UrlRecord, UrlStore};

/// File-backed implementation of [`UrlStore`].
///
/// # Example
///
/// ```rust,no_run
/// use wormhole_core::UrlStore;
/// use wormhole_storage::FileStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileStore::new("/var/lib/wormhole/urls.json");
/// let snapshot = store.load().await;
/// store.save(&snapshot.records).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get path to temporary file for atomic writes
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        let Some(parent) = self.path.parent() else {
            return Ok(());
        };
        if parent.as_os_str().is_empty() {
            return Ok(());
        }

        fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::Unavailable(format!(
                "failed to create store directory {}: {}",
                parent.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl UrlStore for FileStore {
    async fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file does not exist yet");
                return Snapshot::vacant();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to read store file, treating as empty"
                );
                return Snapshot::empty_on_corruption();
            }
        };

        if content.trim().is_empty() {
            return Snapshot::vacant();
        }

        match serde_json::from_str::<Vec<UrlRecord>>(&content) {
            Ok(records) => {
                debug!(path = %self.path.display(), count = records.len(), "loaded store");
                Snapshot::loaded(records)
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store file is corrupted, treating as empty"
                );
                Snapshot::empty_on_corruption()
            }
        }
    }

    async fn save(&self, records: &[UrlRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_vec(records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.ensure_parent_dir().await?;

        let temp_path = self.temp_path();
        let written = match write_temp(&temp_path, &json).await {
            Ok(()) => fs::rename(&temp_path, &self.path).await.map_err(|e| {
                StorageError::Operation(format!(
                    "failed to rename {} to {}: {}",
                    temp_path.display(),
                    self.path.display(),
                    e
                ))
            }),
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                debug!(path = %temp_path.display(), error = %cleanup, "temp file not removed");
            }
            return Err(e);
        }

        trace!(path = %self.path.display(), count = records.len(), "store written");
        Ok(())
    }
}

/// Writes `bytes` to `path` and flushes it to disk.
async fn write_temp(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(path).await.map_err(|e| {
        StorageError::Operation(format!(
            "failed to create temp file {}: {}",
            path.display(),
            e
        ))
    })?;

    file.write_all(bytes).await.map_err(|e| {
        StorageError::Operation(format!(
            "failed to write temp file {}: {}",
            path.display(),
            e
        ))
    })?;

    file.sync_all().await.map_err(|e| {
        StorageError::Operation(format!(
            "failed to flush temp file {}: {}",
            path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::{SignedDuration, Timestamp};
    use tempfile::tempdir;
    use wormhole_core::{ClickEvent, LoadStatus, Location, ShortCode, TrafficSource};

    fn record(code: &str) -> UrlRecord {
        let created_at = Timestamp::from_millisecond(1_736_424_000_123).unwrap();
        UrlRecord {
            id: format!("{}-0", created_at.as_millisecond()),
            original_url: "https://example.com/some/path?q=1".to_string(),
            short_code: ShortCode::new_unchecked(code),
            short_url: format!("https://worm.hole/{code}"),
            created_at,
            expires_at: created_at + SignedDuration::from_mins(45),
            validity_minutes: 45,
            clicks: vec![ClickEvent {
                id: "1736424001000-77".to_string(),
                timestamp: created_at + SignedDuration::from_secs(1),
                source: TrafficSource::Twitter,
                location: Location::Sydney,
                user_agent: Some("curl/8.5.0".to_string()),
            }],
            expired: false,
        }
    }

    #[tokio::test]
    async fn missing_file_is_vacant() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("urls.json"));

        let snapshot = store.load().await;
        assert_eq!(snapshot.status, LoadStatus::Vacant);
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn round_trip_preserves_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        let store = FileStore::new(&path);

        let records = vec![record("abc123"), record("XyZ")];
        store.save(&records).await.unwrap();
        assert!(path.exists());

        // Load through a new instance to make sure nothing is cached
        let snapshot = FileStore::new(&path).load().await;
        assert_eq!(snapshot.status, LoadStatus::Loaded);
        assert_eq!(snapshot.records, records);
    }

    #[tokio::test]
    async fn corrupted_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        fs::write(&path, b"corrupted json data").await.unwrap();

        let snapshot = FileStore::new(&path).load().await;
        assert_eq!(snapshot.status, LoadStatus::EmptyOnCorruption);
        assert!(snapshot.records.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_loads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        fs::write(&path, br#"{"version": "1.0"}"#).await.unwrap();

        let snapshot = FileStore::new(&path).load().await;
        assert_eq!(snapshot.status, LoadStatus::EmptyOnCorruption);
    }

    #[tokio::test]
    async fn empty_file_is_vacant() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        fs::write(&path, b"").await.unwrap();

        assert_eq!(FileStore::new(&path).load().await.status, LoadStatus::Vacant);
    }

    #[tokio::test]
    async fn save_overwrites_corrupted_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        fs::write(&path, b"[{").await.unwrap();

        let store = FileStore::new(&path);
        store.save(&[record("abc")]).await.unwrap();

        let snapshot = store.load().await;
        assert_eq!(snapshot.status, LoadStatus::Loaded);
        assert_eq!(snapshot.records.len(), 1);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("urls.json");
        let store = FileStore::new(&path);

        store.save(&[record("abc")]).await.unwrap();
        assert!(path.exists());
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("urls.json");
        // A non-empty directory cannot be replaced by a file
        fs::create_dir(&path).await.unwrap();
        fs::write(path.join("keep"), b"x").await.unwrap();

        let store = FileStore::new(&path);
        let err = store.save(&[record("abc")]).await.unwrap_err();
        assert!(matches!(err, StorageError::Operation(_)));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn temp_path_sits_next_to_slot() {
        let store = FileStore::new("/tmp/wormhole/urls.json");
        assert_eq!(
            store.temp_path(),
            PathBuf::from("/tmp/wormhole/urls.json.tmp")
        );
    }
}
