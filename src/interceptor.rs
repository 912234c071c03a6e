//! Pre-query hook that answers virtual post type queries from the remote API.

use tracing::{debug, info, warn};

use crate::cache::ObjectCache;
use crate::host::{HookFuture, PreQueryHook, QueryDescriptor};
use crate::remote::{ContentItem, FetchError, RemoteFetcher, Transport, POST_TYPE};

/// Overrides queries for exactly [`POST_TYPE`] with the remote post matching
/// the requested slug.
///
/// Anything else passes through untouched: other post types, a missing slug,
/// and every fetch failure. Failures are logged, never returned.
pub struct QueryInterceptor<T: Transport, C: ObjectCache> {
  fetcher: RemoteFetcher<T, C>,
}

impl<T: Transport, C: ObjectCache> QueryInterceptor<T, C> {
  pub fn new(fetcher: RemoteFetcher<T, C>) -> Self {
    Self { fetcher }
  }

  pub async fn intercept(
    &self,
    posts: Option<Vec<ContentItem>>,
    query: &mut QueryDescriptor,
  ) -> Option<Vec<ContentItem>> {
    if !query.targets_only(POST_TYPE) {
      return posts;
    }

    let Some(slug) = query.slug().map(str::to_string) else {
      debug!("virtual post type query without a slug, passing through");
      return posts;
    };

    match self.fetcher.fetch_by_slug(&slug).await {
      Ok(item) => {
        query.cache_results = false;
        query.suppress_filters = true;
        query.found_posts = 1;
        query.max_num_pages = 1;

        info!(%slug, id = item.id, "serving remote post");
        Some(vec![item])
      }
      Err(e @ FetchError::NotFound { .. }) => {
        debug!(error = %e, "remote lookup found nothing");
        posts
      }
      Err(e) => {
        warn!(%slug, error = %e, "remote lookup failed");
        posts
      }
    }
  }
}

impl<T: Transport, C: ObjectCache> PreQueryHook for QueryInterceptor<T, C> {
  fn pre_query<'a>(
    &'a self,
    posts: Option<Vec<ContentItem>>,
    query: &'a mut QueryDescriptor,
  ) -> HookFuture<'a> {
    Box::pin(self.intercept(posts, query))
  }
}
