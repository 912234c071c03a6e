//! Caching implementations for remote types.

use crate::cache::Cacheable;

use super::types::ContentItem;

/// Cache group the host looks in for posts by id.
pub const POSTS_GROUP: &str = "posts";

impl Cacheable for ContentItem {
  fn cache_key(&self) -> String {
    self.id.to_string()
  }

  fn cache_group() -> &'static str {
    POSTS_GROUP
  }
}
