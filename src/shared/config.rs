//! Runtime configuration, read from the environment (and `.env` via dotenvy)

use crate::shared::errors::{AppError, AppResult};
use std::path::PathBuf;
use std::time::Duration;

/// Block types the content libraries cannot hold
pub const DEFAULT_UNSUPPORTED_BLOCKS: &[&str] = &[
    "conditional",
    "step-builder",
    "problem-builder",
    "library_content",
    "itembank",
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub studio_base_url: String,
    pub access_token: Option<String>,
    pub unsupported_block_types: Vec<String>,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    pub http_timeout: Duration,
    pub requests_per_second: f64,
    pub cache_ttl: Duration,
    pub plugin_slots_config: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let studio_base_url = lookup("STUDIO_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::ConfigError("STUDIO_BASE_URL is not set".to_string()))?
            .trim_end_matches('/')
            .to_string();

        if !studio_base_url.starts_with("http://") && !studio_base_url.starts_with("https://") {
            return Err(AppError::ConfigError(format!(
                "STUDIO_BASE_URL must be an http(s) URL, got '{}'",
                studio_base_url
            )));
        }

        let unsupported_block_types = match lookup("LIBRARY_UNSUPPORTED_BLOCKS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_UNSUPPORTED_BLOCKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        let requests_per_second = match lookup("HTTP_REQUESTS_PER_SECOND") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                AppError::ConfigError(format!("HTTP_REQUESTS_PER_SECOND is not a number: '{}'", raw))
            })?,
            None => 5.0,
        };
        if requests_per_second <= 0.0 {
            return Err(AppError::ConfigError(
                "HTTP_REQUESTS_PER_SECOND must be positive".to_string(),
            ));
        }

        Ok(Self {
            studio_base_url,
            access_token: lookup("STUDIO_ACCESS_TOKEN").filter(|v| !v.is_empty()),
            unsupported_block_types,
            poll_interval: Duration::from_millis(parse_u64(
                &lookup,
                "MIGRATION_POLL_INTERVAL_MS",
                2000,
            )?),
            poll_timeout: Duration::from_secs(parse_u64(
                &lookup,
                "MIGRATION_POLL_TIMEOUT_SECS",
                600,
            )?),
            http_timeout: Duration::from_secs(parse_u64(&lookup, "HTTP_TIMEOUT_SECS", 30)?),
            requests_per_second,
            cache_ttl: Duration::from_secs(parse_u64(&lookup, "QUERY_CACHE_TTL_SECS", 60)?),
            plugin_slots_config: lookup("PLUGIN_SLOTS_CONFIG").map(PathBuf::from),
        })
    }

    /// Minimal configuration pointing at a given Studio, for tests and tooling
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            studio_base_url: base_url.trim_end_matches('/').to_string(),
            access_token: None,
            unsupported_block_types: DEFAULT_UNSUPPORTED_BLOCKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            poll_interval: Duration::from_millis(2000),
            poll_timeout: Duration::from_secs(600),
            http_timeout: Duration::from_secs(30),
            requests_per_second: 5.0,
            cache_ttl: Duration::from_secs(60),
            plugin_slots_config: None,
        }
    }
}

fn parse_u64<F>(lookup: &F, key: &str, default: u64) -> AppResult<u64>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| AppError::ConfigError(format!("{} is not a valid number: '{}'", key, raw))),
        None => Ok(default),
    }
}
