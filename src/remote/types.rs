use serde::{Deserialize, Serialize};

/// Post type tag carried by every synthesized item.
pub const POST_TYPE: &str = "external-post";

/// Added to remote ids so synthesized ids never collide with local ones,
/// as long as local ids stay below this value.
pub const ID_OFFSET: u64 = 1_000_000_000;

/// Content item in the shape the host renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
  pub id: u64,
  pub post_type: String,
  pub slug: String,
  pub title: String,
  pub content: String,
  pub excerpt: String,
  pub date: String,
  pub date_gmt: String,
  pub modified: String,
  pub modified_gmt: String,
  /// Set on synthesized items: the host must not re-inflate this object
  /// from its own storage or cache.
  pub raw: bool,
}

impl ContentItem {
  /// Host identifier for a remote id. `None` on overflow.
  pub fn synthesized_id(remote_id: u64) -> Option<u64> {
    ID_OFFSET.checked_add(remote_id)
  }

  /// Whether `id` falls in the range reserved for remote items.
  pub fn is_synthesized_id(id: u64) -> bool {
    id >= ID_OFFSET
  }

  /// Id of this item on the remote side, if it was synthesized.
  pub fn remote_id(&self) -> Option<u64> {
    Self::is_synthesized_id(self.id).then(|| self.id - ID_OFFSET)
  }
}
