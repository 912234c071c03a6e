//! Object cache trait and in-memory implementation.

use chrono::{DateTime, Duration, Utc};
use color_eyre::{eyre::eyre, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::traits::{CachedEntity, Cacheable};

/// Trait for object cache backends.
///
/// Writes are best-effort from the caller's point of view: a failed `put`
/// must never turn into a failed request.
pub trait ObjectCache: Send + Sync {
  /// Store an entity under its group and key for `ttl`. Last writer wins.
  fn put<T: Cacheable>(&self, entity: &T, ttl: Duration) -> Result<()>;

  /// Get a live entity by key. Expired entries read as a miss.
  fn get<T: Cacheable>(&self, key: &str) -> Result<Option<CachedEntity<T>>>;
}

/// Storage implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl ObjectCache for NoopStorage {
  fn put<T: Cacheable>(&self, _entity: &T, _ttl: Duration) -> Result<()> {
    Ok(()) // Discard
  }

  fn get<T: Cacheable>(&self, _key: &str) -> Result<Option<CachedEntity<T>>> {
    Ok(None) // Always miss
  }
}

struct Entry {
  data: Value,
  cached_at: DateTime<Utc>,
  expires_at: DateTime<Utc>,
}

/// In-memory, TTL-based cache storage.
///
/// Entities are stored as serialized JSON keyed by `(group, key)`, so one
/// storage can hold any number of `Cacheable` types side by side.
#[derive(Default)]
pub struct MemoryStorage {
  entries: Mutex<HashMap<(&'static str, String), Entry>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of entries currently held, expired or not.
  #[cfg(test)]
  pub(crate) fn len(&self) -> Result<usize> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    Ok(entries.len())
  }
}

impl ObjectCache for MemoryStorage {
  fn put<T: Cacheable>(&self, entity: &T, ttl: Duration) -> Result<()> {
    let data = serde_json::to_value(entity)
      .map_err(|e| eyre!("Failed to serialize {} entity: {}", T::cache_group(), e))?;

    let cached_at = Utc::now();
    let expires_at = cached_at
      .checked_add_signed(ttl)
      .ok_or_else(|| eyre!("Cache ttl out of range: {}", ttl))?;

    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    // Every write sweeps expired entries, so the map only holds live posts
    // plus the one being written.
    entries.retain(|_, entry| cached_at < entry.expires_at);
    entries.insert(
      (T::cache_group(), entity.cache_key()),
      Entry {
        data,
        cached_at,
        expires_at,
      },
    );

    Ok(())
  }

  fn get<T: Cacheable>(&self, key: &str) -> Result<Option<CachedEntity<T>>> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    let lookup = (T::cache_group(), key.to_string());
    let Some(entry) = entries.get(&lookup) else {
      return Ok(None);
    };

    if Utc::now() >= entry.expires_at {
      entries.remove(&lookup);
      return Ok(None);
    }

    let entity: T = serde_json::from_value(entry.data.clone())
      .map_err(|e| eyre!("Failed to deserialize cached {} {}: {}", T::cache_group(), key, e))?;

    Ok(Some(CachedEntity {
      entity,
      cached_at: entry.cached_at,
      expires_at: entry.expires_at,
    }))
  }
}
