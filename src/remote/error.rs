use thiserror::Error;

/// Failure talking to the remote API or understanding its answer.
#[derive(Debug, Error)]
pub enum TransportError {
  #[error("request to {url} failed: {source}")]
  Request {
    url: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("{url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("failed to decode response: {0}")]
  Decode(#[from] serde_json::Error),

  #[error("malformed post: {0}")]
  Malformed(String),
}

/// Result of a failed slug lookup.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("no posts found for slug {slug:?}")]
  NotFound { slug: String },

  #[error(transparent)]
  Transport(#[from] TransportError),
}

impl FetchError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, FetchError::NotFound { .. })
  }
}
