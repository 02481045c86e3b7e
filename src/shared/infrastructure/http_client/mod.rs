pub mod retry_policy;
pub mod studio_client;

pub use retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
pub use studio_client::StudioHttpClient;
