//! Serde-deserializable types matching the remote posts endpoint.
//!
//! These types are separate from `ContentItem` so that the wire schema is
//! checked field by field: a post missing a required field fails to decode
//! instead of producing a partial item.

use serde::Deserialize;
use serde_json::Value;

use super::error::TransportError;
use super::types::{ContentItem, POST_TYPE};

#[derive(Debug, Deserialize)]
pub struct ApiRendered {
  pub rendered: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiPost {
  pub id: u64,
  pub slug: String,
  pub title: ApiRendered,
  pub content: ApiRendered,
  pub excerpt: ApiRendered,
  pub date: String,
  pub date_gmt: String,
  pub modified: String,
  pub modified_gmt: String,
}

impl ApiPost {
  pub fn into_content_item(self) -> Result<ContentItem, TransportError> {
    let id = ContentItem::synthesized_id(self.id)
      .ok_or_else(|| TransportError::Malformed(format!("post id {} is out of range", self.id)))?;

    Ok(ContentItem {
      id,
      post_type: POST_TYPE.to_string(),
      slug: self.slug,
      title: self.title.rendered,
      content: self.content.rendered,
      excerpt: self.excerpt.rendered,
      date: self.date,
      date_gmt: self.date_gmt,
      modified: self.modified,
      modified_gmt: self.modified_gmt,
      raw: true,
    })
  }
}

/// Decode the first post of a posts-endpoint body.
///
/// An empty body, `null` and `[]` all mean "no match". Only the first element
/// is decoded, so junk further down the array is ignored.
pub fn first_post(body: &str) -> Result<Option<ApiPost>, TransportError> {
  if body.trim().is_empty() {
    return Ok(None);
  }

  let posts: Option<Vec<Value>> = serde_json::from_str(body)?;
  match posts.and_then(|posts| posts.into_iter().next()) {
    Some(Value::Null) | None => Ok(None),
    Some(first) => Ok(Some(serde_json::from_value(first)?)),
  }
}
