//! Bounded in-memory session store.
//!
//! Records live in a moka cache keyed by session id. Each entry is evicted
//! once its own expiry date passes, and the cache holds at most
//! [`SESSION_STORE_CAPACITY`] sessions, so abandoned carts do not pile up for
//! the life of the process.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::session_store::{self, SessionStore};

/// Maximum number of live sessions kept in memory.
pub const SESSION_STORE_CAPACITY: u64 = 100_000;

/// Session store backed by a moka cache with per-record expiry.
#[derive(Clone, Debug)]
pub struct CacheSessionStore {
    cache: Cache<Id, Record>,
}

impl CacheSessionStore {
    /// Create a store holding at most `max_capacity` sessions.
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(RecordExpiry)
            .build();
        Self { cache }
    }

    /// Number of sessions currently held, after pending evictions run.
    pub async fn session_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for CacheSessionStore {
    fn default() -> Self {
        Self::new(SESSION_STORE_CAPACITY)
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        Ok(self
            .cache
            .get(session_id)
            .await
            .filter(|record| time_to_live(record) > Duration::ZERO))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}

/// Expires each cache entry at the record's own expiry date.
struct RecordExpiry;

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(
        &self,
        _key: &Id,
        record: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(time_to_live(record))
    }

    // Saving refreshes the inactivity window, so the new record decides.
    fn expire_after_update(
        &self,
        _key: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(time_to_live(record))
    }
}

fn time_to_live(record: &Record) -> Duration {
    (record.expiry_date - OffsetDateTime::now_utc())
        .try_into()
        .unwrap_or(Duration::ZERO)
}
