use chrono::Duration;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::ACCEPT;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};
use url::Url;

use crate::cache::ObjectCache;
use crate::config::Config;

use super::api_types::first_post;
use super::error::{FetchError, TransportError};
use super::types::ContentItem;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
  pub status: u16,
  pub body: String,
}

impl RawResponse {
  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

/// Outbound HTTP GET, the only network operation the fetcher needs.
pub trait Transport: Send + Sync {
  fn get(&self, url: &Url) -> impl Future<Output = Result<RawResponse, TransportError>> + Send;
}

/// `Transport` backed by reqwest.
#[derive(Clone)]
pub struct HttpTransport {
  client: reqwest::Client,
}

impl HttpTransport {
  pub fn new(config: &Config) -> Result<Self> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
      env!("CARGO_PKG_NAME"),
      "/",
      env!("CARGO_PKG_VERSION")
    ));

    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }

    let client = builder
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client })
  }
}

impl Transport for HttpTransport {
  async fn get(&self, url: &Url) -> Result<RawResponse, TransportError> {
    let request_error = |e: reqwest::Error| TransportError::Request {
      url: url.to_string(),
      source: Box::new(e),
    };

    let response = self
      .client
      .get(url.clone())
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(request_error)?;

    let status = response.status().as_u16();
    let body = response.text().await.map_err(request_error)?;

    Ok(RawResponse { status, body })
  }
}

/// Looks up posts on the remote API by slug and maps them to `ContentItem`s.
///
/// Every call goes to the network. Successful lookups are also written to the
/// object cache so the host can resolve the synthesized id for a short while.
pub struct RemoteFetcher<T: Transport, C: ObjectCache> {
  transport: T,
  cache: Arc<C>,
  endpoint: Url,
  cache_ttl: Duration,
}

impl<T: Transport, C: ObjectCache> RemoteFetcher<T, C> {
  pub fn new(transport: T, cache: Arc<C>, config: &Config) -> Result<Self> {
    Ok(Self {
      transport,
      cache,
      endpoint: config.posts_endpoint()?,
      cache_ttl: config.cache_ttl(),
    })
  }

  /// URL of the lookup for `slug`, with the slug percent-encoded.
  pub fn posts_url(&self, slug: &str) -> Url {
    let mut url = self.endpoint.clone();
    url.query_pairs_mut().append_pair("slug", slug);
    url
  }

  /// Fetch the first remote post whose slug matches.
  pub async fn fetch_by_slug(&self, slug: &str) -> Result<ContentItem, FetchError> {
    // An unfiltered lookup would return the latest posts, not a match
    if slug.is_empty() {
      return Err(FetchError::NotFound {
        slug: String::new(),
      });
    }

    let url = self.posts_url(slug);
    debug!(%url, "fetching remote post");

    let response = self.transport.get(&url).await?;
    if !response.is_success() {
      return Err(
        TransportError::Status {
          url: url.to_string(),
          status: response.status,
        }
        .into(),
      );
    }

    let post = first_post(&response.body)?.ok_or_else(|| FetchError::NotFound {
      slug: slug.to_string(),
    })?;
    let item = post.into_content_item()?;

    if let Err(e) = self.cache.put(&item, self.cache_ttl) {
      warn!(id = item.id, error = %e, "failed to cache remote post");
    }

    Ok(item)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::{MemoryStorage, NoopStorage};
  use crate::remote::testing::{post_json, ScriptedTransport};
  use crate::remote::POST_TYPE;

  fn fetcher<C: ObjectCache>(
    transport: &ScriptedTransport,
    cache: C,
  ) -> RemoteFetcher<ScriptedTransport, C> {
    RemoteFetcher::new(transport.clone(), Arc::new(cache), &Config::default()).unwrap()
  }

  #[test]
  fn test_posts_url_encodes_slug() {
    let transport = ScriptedTransport::new();
    let fetcher = fetcher(&transport, NoopStorage);

    let url = fetcher.posts_url("a&b=c d");
    assert_eq!(
      url.as_str(),
      "https://www.alleyinteractive.com/wp-json/wp/v2/posts?slug=a%26b%3Dc+d"
    );
    assert_eq!(
      url.query_pairs().next().map(|(k, v)| (k.into_owned(), v.into_owned())),
      Some(("slug".to_string(), "a&b=c d".to_string()))
    );
  }

  #[tokio::test]
  async fn test_fetch_sends_encoded_slug() {
    let transport = ScriptedTransport::new().respond_ok("a&b=c d", &post_json(7, "a&b=c d"));
    let fetcher = fetcher(&transport, NoopStorage);

    let item = fetcher.fetch_by_slug("a&b=c d").await.unwrap();
    assert_eq!(item.slug, "a&b=c d");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].query(), Some("slug=a%26b%3Dc+d"));
    assert_eq!(requests[0].query_pairs().count(), 1);
  }

  #[tokio::test]
  async fn test_fetch_maps_first_match() {
    let transport = ScriptedTransport::new().respond_ok("hello", &post_json(42, "hello"));
    let fetcher = fetcher(&transport, NoopStorage);

    let item = fetcher.fetch_by_slug("hello").await.unwrap();
    assert_eq!(item.id, 1_000_000_042);
    assert_eq!(item.slug, "hello");
    assert_eq!(item.post_type, POST_TYPE);
    assert_eq!(transport.requests().len(), 1);
  }

  #[tokio::test]
  async fn test_fetch_not_found() {
    let transport = ScriptedTransport::new();
    let fetcher = fetcher(&transport, NoopStorage);

    let err = fetcher.fetch_by_slug("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(transport.requests().len(), 1);
  }

  #[tokio::test]
  async fn test_empty_slug_skips_network() {
    let transport = ScriptedTransport::new();
    let fetcher = fetcher(&transport, NoopStorage);

    assert!(fetcher.fetch_by_slug("").await.unwrap_err().is_not_found());
    assert!(transport.requests().is_empty());
  }

  #[tokio::test]
  async fn test_non_2xx_is_transport_error() {
    let transport = ScriptedTransport::new().respond("hello", 500, "[]");
    let fetcher = fetcher(&transport, NoopStorage);

    let err = fetcher.fetch_by_slug("hello").await.unwrap_err();
    assert!(matches!(
      err,
      FetchError::Transport(TransportError::Status { status: 500, .. })
    ));
  }

  #[tokio::test]
  async fn test_network_failure_is_transport_error() {
    let transport = ScriptedTransport::new().fail_network();
    let fetcher = fetcher(&transport, NoopStorage);

    let err = fetcher.fetch_by_slug("hello").await.unwrap_err();
    assert!(matches!(
      err,
      FetchError::Transport(TransportError::Request { .. })
    ));
  }

  #[tokio::test]
  async fn test_malformed_body_is_transport_error() {
    let transport = ScriptedTransport::new().respond_ok("hello", "not json");
    let fetcher = fetcher(&transport, NoopStorage);

    let err = fetcher.fetch_by_slug("hello").await.unwrap_err();
    assert!(matches!(
      err,
      FetchError::Transport(TransportError::Decode(_))
    ));
  }

  #[tokio::test]
  async fn test_fetch_is_repeatable() {
    let transport = ScriptedTransport::new().respond_ok("hello", &post_json(42, "hello"));
    let fetcher = fetcher(&transport, MemoryStorage::new());

    let first = fetcher.fetch_by_slug("hello").await.unwrap();
    let second = fetcher.fetch_by_slug("hello").await.unwrap();

    assert_eq!(first, second);
    // The fetch itself is never served from cache
    assert_eq!(transport.requests().len(), 2);
  }

  #[tokio::test]
  async fn test_fetch_writes_object_cache() {
    let transport = ScriptedTransport::new().respond_ok("hello", &post_json(42, "hello"));
    let cache = Arc::new(MemoryStorage::new());
    let fetcher =
      RemoteFetcher::new(transport.clone(), Arc::clone(&cache), &Config::default()).unwrap();

    let item = fetcher.fetch_by_slug("hello").await.unwrap();

    let cached = cache.get::<ContentItem>("1000000042").unwrap().unwrap();
    assert_eq!(cached.entity, item);
    assert_eq!(
      (cached.expires_at - cached.cached_at).num_seconds(),
      Config::default().cache.ttl_secs as i64
    );
  }

  #[tokio::test]
  async fn test_expired_posts_do_not_accumulate() {
    let mut transport = ScriptedTransport::new();
    for id in 0..200 {
      let slug = format!("post-{}", id);
      transport = transport.respond_ok(&slug, &post_json(id, &slug));
    }

    let cache = Arc::new(MemoryStorage::new());
    let config = Config::from_yaml_str("cache:\n  ttl_secs: 0\n").unwrap();
    let fetcher = RemoteFetcher::new(transport, Arc::clone(&cache), &config).unwrap();

    for id in 0..200 {
      fetcher.fetch_by_slug(&format!("post-{}", id)).await.unwrap();
    }

    assert!(cache.len().unwrap() <= 1);
  }
}
