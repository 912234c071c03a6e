//! Scripted transport for tests. Records every requested URL.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

use super::client::{RawResponse, Transport};
use super::error::TransportError;

#[derive(Default)]
struct Script {
  responses: HashMap<String, RawResponse>,
  network_down: bool,
  requests: Vec<Url>,
}

/// Answers by the `slug` query parameter; unknown slugs get `200 []`.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
  script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn respond(self, slug: &str, status: u16, body: &str) -> Self {
    self.script.lock().unwrap().responses.insert(
      slug.to_string(),
      RawResponse {
        status,
        body: body.to_string(),
      },
    );
    self
  }

  pub fn respond_ok(self, slug: &str, body: &str) -> Self {
    self.respond(slug, 200, body)
  }

  pub fn fail_network(self) -> Self {
    self.script.lock().unwrap().network_down = true;
    self
  }

  pub fn requests(&self) -> Vec<Url> {
    self.script.lock().unwrap().requests.clone()
  }
}

impl Transport for ScriptedTransport {
  async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
    let mut script = self.script.lock().unwrap();
    script.requests.push(url.clone());

    if script.network_down {
      return Err(TransportError::Request {
        url: url.to_string(),
        source: "connection refused".into(),
      });
    }

    let slug = url
      .query_pairs()
      .find(|(key, _)| key == "slug")
      .map(|(_, value)| value.into_owned())
      .unwrap_or_default();

    Ok(script.responses.get(&slug).cloned().unwrap_or(RawResponse {
      status: 200,
      body: "[]".to_string(),
    }))
  }
}

/// Single-post response body in the remote API's format.
pub(crate) fn post_json(id: u64, slug: &str) -> String {
  serde_json::json!([{
    "id": id,
    "slug": slug,
    "title": { "rendered": "Hello" },
    "content": { "rendered": "<p>Hi</p>" },
    "excerpt": { "rendered": "Hi" },
    "date": "2024-01-01T00:00:00",
    "date_gmt": "2024-01-01T00:00:00",
    "modified": "2024-01-01T00:00:00",
    "modified_gmt": "2024-01-01T00:00:00",
  }])
  .to_string()
}
