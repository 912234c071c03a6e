//! Short-lived object cache.
//!
//! Synthesized posts have identifiers that exist nowhere in real storage, so a
//! host lookup by identifier would fail. This module provides the side-channel
//! that makes such lookups succeed for a few seconds after a fetch:
//! - Entities are keyed by `(group, key)` via the `Cacheable` trait
//! - Every entry carries its own TTL; expired entries read as a miss
//! - `NoopStorage` turns caching off without touching call sites

mod storage;
mod traits;

pub use storage::{MemoryStorage, NoopStorage, ObjectCache};
pub use traits::{CachedEntity, Cacheable};
