//! One-time wiring of the remote post type into a host.

use color_eyre::Result;
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::Config;
use crate::host::{Host, PostTypeArgs, DEFAULT_PRIORITY};
use crate::interceptor::QueryInterceptor;
use crate::remote::{RemoteFetcher, Transport, POST_TYPE};

/// Registration for the virtual post type: reachable on the front end, but
/// hidden from the admin UI, search and exports.
pub fn external_post_args() -> PostTypeArgs {
  PostTypeArgs {
    public: true,
    show_ui: false,
    exclude_from_search: true,
    can_export: false,
  }
}

/// Register [`POST_TYPE`] on `host` and subscribe the query interceptor.
///
/// Call once at startup. A second call on the same host fails on the
/// duplicate registration and leaves the hook chain unchanged.
pub fn setup<T, C>(host: &mut Host<C>, config: &Config, transport: T) -> Result<()>
where
  T: Transport + 'static,
  C: ObjectCache + 'static,
{
  let fetcher = RemoteFetcher::new(transport, host.cache(), config)?;

  host.register_post_type(POST_TYPE, external_post_args())?;
  host.add_pre_query_hook(DEFAULT_PRIORITY, Arc::new(QueryInterceptor::new(fetcher)));

  Ok(())
}
