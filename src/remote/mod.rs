//! Remote posts API: wire types, the HTTP transport and the slug fetcher.

pub mod api_types;
pub mod cache;
pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;

pub use cache::POSTS_GROUP;
pub use client::{HttpTransport, RawResponse, RemoteFetcher, Transport};
pub use error::{FetchError, TransportError};
pub use types::{ContentItem, ID_OFFSET, POST_TYPE};
