//! Core traits and types for the object cache.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};

/// Trait for entities that can be placed in the object cache.
///
/// Implementors provide a key that is unique within their group.
pub trait Cacheable: Clone + Send + Sync + Serialize + DeserializeOwned {
  /// Unique identifier for this entity within its group (e.g., a post id)
  fn cache_key(&self) -> String;

  /// Cache group the entity lives in (e.g., "posts")
  fn cache_group() -> &'static str;
}

/// A single cached entity.
#[derive(Debug, Clone)]
pub struct CachedEntity<T> {
  /// The cached entity
  pub entity: T,
  /// When the entity was cached
  pub cached_at: DateTime<Utc>,
  /// When the entity stops being served
  pub expires_at: DateTime<Utc>,
}
