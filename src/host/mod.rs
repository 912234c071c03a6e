//! The host-side seams the bridge plugs into.
//!
//! `Host` is a minimal in-process stand-in for the content-management system:
//! it keeps a post type registry, runs pre-query hooks in priority order, and
//! resolves posts by id through the object cache. Query execution against real
//! storage is out of scope; when no hook overrides a query, `pre_query`
//! returns `None` and the host would fall back to its own engine.

mod query;

pub use query::QueryDescriptor;

use color_eyre::{eyre::eyre, Result};
use futures::future::BoxFuture;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::remote::ContentItem;

/// Priority hooks get unless they ask for another one.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Registration options for a post type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTypeArgs {
  /// Reachable on the front end
  pub public: bool,
  /// Listed in the admin UI
  pub show_ui: bool,
  pub exclude_from_search: bool,
  pub can_export: bool,
}

impl Default for PostTypeArgs {
  fn default() -> Self {
    Self {
      public: false,
      show_ui: false,
      exclude_from_search: false,
      can_export: true,
    }
  }
}

/// A boxed future resolving to a hook's (possibly overridden) result set
pub type HookFuture<'a> = BoxFuture<'a, Option<Vec<ContentItem>>>;

/// Hook run before the host executes a query.
///
/// Receives the result set produced by earlier hooks (`None` if nobody has
/// overridden the query yet). Returning `Some` short-circuits normal
/// execution with that result set.
pub trait PreQueryHook: Send + Sync {
  fn pre_query<'a>(
    &'a self,
    posts: Option<Vec<ContentItem>>,
    query: &'a mut QueryDescriptor,
  ) -> HookFuture<'a>;
}

struct Subscription {
  priority: i32,
  hook: Arc<dyn PreQueryHook>,
}

pub struct Host<C: ObjectCache> {
  post_types: BTreeMap<String, PostTypeArgs>,
  pre_query_hooks: Vec<Subscription>,
  cache: Arc<C>,
}

impl<C: ObjectCache> Host<C> {
  pub fn new(cache: C) -> Self {
    Self {
      post_types: BTreeMap::new(),
      pre_query_hooks: Vec::new(),
      cache: Arc::new(cache),
    }
  }

  /// Shared handle to the host's object cache.
  pub fn cache(&self) -> Arc<C> {
    Arc::clone(&self.cache)
  }

  /// Register a post type. Names are unique.
  pub fn register_post_type(&mut self, name: &str, args: PostTypeArgs) -> Result<()> {
    if self.post_types.contains_key(name) {
      return Err(eyre!("Post type {} is already registered", name));
    }

    self.post_types.insert(name.to_string(), args);
    Ok(())
  }

  pub fn post_type(&self, name: &str) -> Option<&PostTypeArgs> {
    self.post_types.get(name)
  }

  /// Subscribe a pre-query hook. Lower priorities run first; equal
  /// priorities run in subscription order.
  pub fn add_pre_query_hook(&mut self, priority: i32, hook: Arc<dyn PreQueryHook>) {
    let index = self
      .pre_query_hooks
      .partition_point(|existing| existing.priority <= priority);
    self
      .pre_query_hooks
      .insert(index, Subscription { priority, hook });
  }

  pub fn pre_query_hook_count(&self) -> usize {
    self.pre_query_hooks.len()
  }

  /// Run the pre-query hook chain for `query`.
  pub async fn pre_query(&self, query: &mut QueryDescriptor) -> Option<Vec<ContentItem>> {
    let mut posts = None;
    for subscription in &self.pre_query_hooks {
      posts = subscription.hook.pre_query(posts, query).await;
    }
    posts
  }

  /// Look up a post by id in the object cache.
  pub fn get_post(&self, id: u64) -> Result<Option<ContentItem>> {
    Ok(
      self
        .cache
        .get::<ContentItem>(&id.to_string())?
        .map(|cached| cached.entity),
    )
  }
}
