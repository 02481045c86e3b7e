/// Shared infrastructure concerns
///
/// HTTP plumbing and response caching used by every module's adapters.
pub mod http_client;
pub mod query_cache;

pub use http_client::{RetryPolicy, StudioHttpClient};
pub use query_cache::QueryCache;
