//! TTL cache for remote API responses.
//!
//! The dashboard polls faster than some upstreams should be hit (the weather
//! widget refreshes every 60 s but a sample is considered fresh for that whole
//! window), so responses are kept in a small fjall keyspace with an expiry
//! timestamp and read back until stale.

use anyhow::{Result, anyhow};
use fjall::Keyspace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt::Debug;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::OnceCell;
use tokio::task;

static GLOBAL_CACHE: OnceCell<TtlCache> = OnceCell::const_new();

#[derive(Serialize, Deserialize)]
struct StoredEntry<T> {
    value: T,
    /// Unix timestamp (seconds) after which the entry is stale
    fresh_until: u64,
}

pub struct TtlCache {
    store: Keyspace,
}

impl TtlCache {
    fn open(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        let db = fjall::Database::builder(&path).open()?;
        let store = db.keyspace("responses", fjall::KeyspaceCreateOptions::default)?;
        Ok(TtlCache { store })
    }

    /// Stores a serializable value with a time-to-live.
    #[tracing::instrument(name = "put_cache", level = "debug", skip(self, value))]
    pub async fn put<T: Serialize + Send + Debug + 'static>(
        &self,
        key: &str,
        value: T,
        ttl: Duration,
    ) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let fresh_until = SystemTime::now()
            .checked_add(ttl)
            .ok_or(anyhow!("TTL overflow"))?
            .duration_since(UNIX_EPOCH)?
            .as_secs();
        let entry = StoredEntry { value, fresh_until };
        let bytes = postcard::to_stdvec(&entry)?;

        task::spawn_blocking(move || store.insert(key, bytes)).await??;
        Ok(())
    }

    /// Retrieves a value if it exists and has not expired.
    /// Returns `None` for cache misses or expired entries.
    #[tracing::instrument(name = "query_cache", level = "debug", skip(self))]
    pub async fn get<T: DeserializeOwned + Send + 'static>(&self, key: &str) -> Result<Option<T>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes: Option<Vec<u8>> =
            task::spawn_blocking(move || -> Result<Option<Vec<u8>>> {
                Ok(store.get(key_bytes)?.map(|v| v.to_vec()))
            })
            .await??;

        let Some(bytes) = maybe_bytes else {
            tracing::debug!("Key not found");
            return Ok(None);
        };

        let entry: StoredEntry<T> = postcard::from_bytes(&bytes)?;
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        if now < entry.fresh_until {
            tracing::debug!("Key found and still fresh");
            Ok(Some(entry.value))
        } else {
            tracing::debug!("Key found but expired");
            self.remove(key).await?;
            Ok(None)
        }
    }

    /// Manually removes a key from the cache.
    pub async fn remove(&self, key: &str) -> Result<()> {
        let key = key.as_bytes().to_vec();
        let store = self.store.clone();
        task::spawn_blocking(move || store.remove(key)).await??;
        Ok(())
    }
}

/// Initializes the global cache. **Must be called once before use.**
pub fn init(path: impl AsRef<Path>) -> Result<()> {
    let cache = TtlCache::open(path)?;
    GLOBAL_CACHE
        .set(cache)
        .map_err(|_| anyhow!("Cache already initialized"))?;
    Ok(())
}

fn get_cache() -> Result<&'static TtlCache> {
    GLOBAL_CACHE
        .get()
        .ok_or_else(|| anyhow!("Cache not initialized. Call cache::init() first."))
}

// Public, ergonomic API endpoints that use the global cache.
pub async fn put<T: Serialize + Send + Debug + 'static>(
    key: &str,
    value: T,
    ttl: Duration,
) -> Result<()> {
    get_cache()?.put(key, value, ttl).await
}

pub async fn get<T: DeserializeOwned + Send + 'static>(key: &str) -> Result<Option<T>> {
    get_cache()?.get(key).await
}
