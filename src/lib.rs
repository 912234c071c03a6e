//! Serve posts from a remote WordPress-style REST API as if they were stored
//! locally.
//!
//! A query for the virtual [`POST_TYPE`] by slug is intercepted before the
//! host executes it, answered from the remote API, and handed back as a
//! regular [`ContentItem`] whose id sits above [`ID_OFFSET`] so it can never
//! collide with a local post.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod host;
pub mod interceptor;
pub mod remote;

pub use bootstrap::setup;
pub use config::Config;
pub use host::{Host, QueryDescriptor};
pub use interceptor::QueryInterceptor;
pub use remote::{ContentItem, FetchError, HttpTransport, RemoteFetcher, ID_OFFSET, POST_TYPE};
