//! HTTP client shared by every Studio and search-index adapter
//!
//! Handles rate limiting, bearer authentication, retries and the mapping of
//! HTTP statuses onto `AppError`, so adapters only deal with URLs and DTOs.

use super::retry_policy::{is_retryable_error, is_retryable_status, RateLimitInfo, RetryPolicy};
use crate::shared::config::AppConfig;
use crate::shared::errors::{ApiError, AppError, AppResult};
use crate::shared::utils::LogContext;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("course-authoring/", env!("CARGO_PKG_VERSION"));

/// HTTP client that handles rate limiting and retries
pub struct StudioHttpClient {
    client: Client,
    rate_limiter: DefaultDirectRateLimiter,
    retry_policy: RetryPolicy,
    base_url: String,
    bearer_token: Option<String>,
    service_name: String,
}

impl StudioHttpClient {
    /// Client for the Studio REST API described by `config`
    pub fn for_studio(config: &AppConfig) -> AppResult<Self> {
        Self::new(
            "Studio",
            &config.studio_base_url,
            config.access_token.clone(),
            RetryPolicy::studio(),
            config.requests_per_second,
            config.http_timeout,
        )
    }

    /// Client for the search index at `url`, authenticated with its API key
    pub fn for_search(url: &str, api_key: &str, config: &AppConfig) -> AppResult<Self> {
        Self::new(
            "Search",
            url,
            Some(api_key.to_string()),
            RetryPolicy::search(),
            config.requests_per_second,
            config.http_timeout,
        )
    }

    pub fn new(
        service_name: &str,
        base_url: &str,
        bearer_token: Option<String>,
        retry_policy: RetryPolicy,
        requests_per_second: f64,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rate_limiter: Self::create_rate_limiter(requests_per_second, 3)?,
            retry_policy,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
            service_name: service_name.to_string(),
        })
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(
        requests_per_second: f64,
        burst_size: u32,
    ) -> AppResult<DefaultDirectRateLimiter> {
        if !(requests_per_second > 0.0) {
            return Err(AppError::ConfigError(
                "Request rate must be positive".to_string(),
            ));
        }

        let period = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .map_err(|_| AppError::ConfigError("Request rate is too low".to_string()))?;
        let burst = NonZeroU32::new(burst_size).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(period)
            .ok_or_else(|| AppError::ConfigError("Request rate is too high".to_string()))?
            .allow_burst(burst);

        Ok(GovernorRateLimiter::direct(quota))
    }

    /// Absolute URL for a path relative to the base URL
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T>(&self, path: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_retries(Method::GET, path, &[], None, self.retry_policy.max_retries)
            .await
    }

    pub async fn get_with_query<T>(&self, path: &str, query: &[(&str, String)]) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_retries(Method::GET, path, query, None, self.retry_policy.max_retries)
            .await
    }

    pub async fn post_json<T>(&self, path: &str, body: &Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_retries(Method::POST, path, &[], Some(body), self.retry_policy.max_retries)
            .await
    }

    /// POST sent exactly once, for requests that must not be repeated
    pub async fn post_json_once<T>(&self, path: &str, body: &Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_retries(Method::POST, path, &[], Some(body), 0)
            .await
    }

    pub async fn patch_json<T>(&self, path: &str, body: &Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request_with_retries(Method::PATCH, path, &[], Some(body), self.retry_policy.max_retries)
            .await
    }

    /// Make a request with automatic retries and rate limiting
    async fn request_with_retries<T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        max_retries: u32,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let attempts = max_retries + 1;
        let started = Instant::now();
        LogContext::api_call(&self.service_name, &url, "", None);

        for attempt in 0..attempts {
            self.rate_limiter.until_ready().await;

            let response = match self.send(&method, &url, query, body).await {
                Ok(response) => response,
                Err(e) => {
                    if is_retryable_error(&e) && attempt + 1 < attempts {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        warn!(
                            "{} {} {} failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.service_name,
                            method,
                            url,
                            attempt + 1,
                            attempts,
                            e,
                            delay
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(e.into());
                }
            };

            let status = response.status().as_u16();
            if response.status().is_success() {
                LogContext::api_call(
                    &self.service_name,
                    &url,
                    &status.to_string(),
                    Some(started.elapsed().as_millis() as u64),
                );
                return self.parse_response(response).await;
            }

            if is_retryable_status(status) && attempt + 1 < attempts {
                let info = RateLimitInfo::from_headers(response.headers());
                let delay = self
                    .retry_policy
                    .calculate_delay(attempt, info.retry_after);
                warn!(
                    "{} {} {} returned {} (attempt {}/{}). Retrying in {:?}",
                    self.service_name,
                    method,
                    url,
                    status,
                    attempt + 1,
                    attempts,
                    delay
                );
                sleep(delay).await;
                continue;
            }

            return Err(self.error_from_response(&method, &url, response).await);
        }

        Err(AppError::ApiError(format!(
            "{} {} {} failed after {} attempts",
            self.service_name, method, url, attempts
        )))
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Response, reqwest::Error> {
        let mut request = self
            .client
            .request(method.clone(), url)
            .header("Accept", "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        request.send().await
    }

    async fn error_from_response(&self, method: &Method, url: &str, response: Response) -> AppError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        debug!("{} {} {} error body: {}", self.service_name, method, url, body);

        let context = match status {
            403 | 404 => format!("{} {}", method, url),
            _ if body.trim().is_empty() => format!("{} {}", method, url),
            _ => body,
        };
        ApiError::from_status(status, context).into()
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.service_name, e
            ))
        })?;

        // Endpoints that answer 204 are read as JSON null
        let text = if response_text.trim().is_empty() {
            "null"
        } else {
            response_text.as_str()
        };

        serde_json::from_str(text).map_err(|e| {
            let preview: String = response_text.chars().take(200).collect();
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}",
                self.service_name, e, preview
            ))
        })
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
