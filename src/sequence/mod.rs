//! Durable booking sequence allocation.
//!
//! The booking counter is a single scalar persisted as JSON in a flat file
//! (`{"lastSequence": 42}`). Each allocation reads the persisted value,
//! increments it, and writes it back before returning, so a restarted
//! process resumes where the previous one stopped.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::contracts::{CounterStore, SequenceAllocator, SequenceError};

/// File name of the counter record inside the data directory.
pub const COUNTER_FILE_NAME: &str = "booking_counter.json";

/// Formats a sequence number as a display booking identifier.
///
/// The number is zero-padded to six digits; larger values render wider
/// rather than truncating. The prefix is concatenated directly, no
/// separator: `format_booking_id("MDS", 1) == "MDS000001"`.
pub fn format_booking_id(prefix: &str, sequence: u64) -> String {
    format!("{prefix}{sequence:06}")
}

/// On-disk counter record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CounterRecord {
    last_sequence: u64,
}

/// Flat-file [`CounterStore`].
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the backing file with a zero counter if absent. Idempotent
    /// and safe to call on every startup.
    pub async fn init(&self) -> Result<(), SequenceError> {
        if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| SequenceError::PersistFailed(e.to_string()))?;
        }
        self.save(0).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterStore for FileCounterStore {
    async fn load(&self) -> Result<Option<u64>, SequenceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SequenceError::Unreadable(e.to_string())),
        };
        let record: CounterRecord =
            serde_json::from_str(&raw).map_err(|e| SequenceError::Unreadable(e.to_string()))?;
        Ok(Some(record.last_sequence))
    }

    async fn save(&self, value: u64) -> Result<(), SequenceError> {
        let raw = serde_json::to_string(&CounterRecord {
            last_sequence: value,
        })
        .map_err(|e| SequenceError::PersistFailed(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| SequenceError::PersistFailed(e.to_string()))
    }
}

/// Durable allocator over any [`CounterStore`].
///
/// The whole read-increment-persist cycle runs under one async mutex, so
/// concurrent in-process calls never observe the same starting value. The
/// mutual exclusion is explicit rather than an accident of blocking I/O, and
/// survives swapping the backing store.
///
/// The lock is process-wide only: two processes sharing one backing file can
/// still race and issue duplicate identifiers. Multi-process deployment
/// needs a store with atomic increment support.
pub struct DurableSequenceAllocator<S = FileCounterStore> {
    store: S,
    lock: Mutex<()>,
    resets: AtomicU64,
}

impl<S: CounterStore> DurableSequenceAllocator<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            resets: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl DurableSequenceAllocator<FileCounterStore> {
    /// Opens a file-backed allocator rooted at `data_dir`, creating the
    /// counter file with a zero value if absent.
    ///
    /// An unwritable directory is not fatal here: the failure is logged and
    /// surfaces again on each allocation attempt instead.
    pub async fn open(data_dir: impl AsRef<Path>) -> Self {
        let store = FileCounterStore::new(data_dir.as_ref().join(COUNTER_FILE_NAME));
        if let Err(e) = store.init().await {
            tracing::warn!(
                path = %store.path().display(),
                error = %e,
                "could not initialize booking counter file"
            );
        }
        Self::new(store)
    }
}

impl<S: CounterStore> SequenceAllocator for DurableSequenceAllocator<S> {
    async fn allocate_next(&self) -> Result<u64, SequenceError> {
        let _guard = self.lock.lock().await;

        let current = match self.store.load().await {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(e) => {
                // Graceful degradation: corrupt state restarts the sequence
                // rather than blocking all future bookings.
                self.resets.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    error = %e,
                    "booking counter state unreadable, restarting sequence from zero"
                );
                0
            }
        };

        let next = current.checked_add(1).ok_or(SequenceError::Overflow)?;

        // Persist before returning; a failed save must not hand out `next`.
        self.store.save(next).await?;

        Ok(next)
    }

    async fn current(&self) -> Result<u64, SequenceError> {
        let _guard = self.lock.lock().await;
        Ok(self.store.load().await.ok().flatten().unwrap_or(0))
    }

    fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_pads_to_six_digits() {
        assert_eq!(format_booking_id("MDS", 1), "MDS000001");
        assert_eq!(format_booking_id("MDS", 999_999), "MDS999999");
    }

    #[test]
    fn format_overflows_width_without_truncating() {
        assert_eq!(format_booking_id("MDS", 1_000_000), "MDS1000000");
    }

    #[test]
    fn format_accepts_empty_prefix() {
        assert_eq!(format_booking_id("", 5), "000005");
    }

    #[tokio::test]
    async fn allocations_increase_by_exactly_one_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let allocator = DurableSequenceAllocator::open(dir.path()).await;

        for expected in 1..=50u64 {
            assert_eq!(allocator.allocate_next().await.unwrap(), expected);
        }
        assert_eq!(allocator.current().await.unwrap(), 50);
    }

    #[tokio::test]
    async fn counter_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let allocator = DurableSequenceAllocator::open(dir.path()).await;
            for _ in 0..7 {
                allocator.allocate_next().await.unwrap();
            }
        }

        let allocator = DurableSequenceAllocator::open(dir.path()).await;
        assert_eq!(allocator.current().await.unwrap(), 7);
        assert_eq!(allocator.allocate_next().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn corrupt_state_restarts_from_one() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COUNTER_FILE_NAME);
        tokio::fs::write(&path, "{not json").await.unwrap();

        let allocator = DurableSequenceAllocator::open(dir.path()).await;
        assert_eq!(allocator.allocate_next().await.unwrap(), 1);
        assert_eq!(allocator.resets(), 1);

        // The recovered value is persisted as the new state.
        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(raw, r#"{"lastSequence":1}"#);
    }

    /// Store pinned at a fixed value that records whether a save happened.
    struct PinnedStore {
        value: u64,
        saved: std::sync::atomic::AtomicBool,
    }

    impl CounterStore for PinnedStore {
        async fn load(&self) -> Result<Option<u64>, SequenceError> {
            Ok(Some(self.value))
        }

        async fn save(&self, _value: u64) -> Result<(), SequenceError> {
            self.saved.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn exhausted_counter_reports_overflow_without_persisting() {
        let allocator = DurableSequenceAllocator::new(PinnedStore {
            value: u64::MAX,
            saved: std::sync::atomic::AtomicBool::new(false),
        });

        let err = allocator.allocate_next().await.unwrap_err();
        assert!(matches!(err, SequenceError::Overflow));
        assert!(
            !allocator.store().saved.load(Ordering::SeqCst),
            "an overflowed allocation must not persist anything"
        );
    }

    #[tokio::test]
    async fn init_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCounterStore::new(dir.path().join(COUNTER_FILE_NAME));
        store.init().await.unwrap();
        store.save(9).await.unwrap();
        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(9));
    }
}
