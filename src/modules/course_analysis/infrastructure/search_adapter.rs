//! Meilisearch-compatible adapter for block queries
//!
//! The index location and key come from Studio on first use and are kept for
//! the life of the adapter.

use super::models::MultiSearchResponse;
use crate::modules::course_analysis::domain::{BlockSearchRepository, BlockTypeCounts, CourseRepository};
use crate::shared::config::AppConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::StudioHttpClient;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Hits returned when listing usage keys
const USAGE_KEY_PAGE_SIZE: u64 = 1000;

struct SearchClient {
    http_client: StudioHttpClient,
    index_name: String,
}

pub struct BlockSearchRepositoryImpl {
    course_repo: Arc<dyn CourseRepository>,
    config: AppConfig,
    client: OnceCell<SearchClient>,
}

impl BlockSearchRepositoryImpl {
    pub fn new(course_repo: Arc<dyn CourseRepository>, config: AppConfig) -> Self {
        Self {
            course_repo,
            config,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> AppResult<&SearchClient> {
        self.client
            .get_or_try_init(|| async {
                let search = self.course_repo.get_search_config().await?;
                log::debug!(
                    "Search: using index '{}' at {}",
                    search.index_name,
                    search.url
                );
                Ok::<_, AppError>(SearchClient {
                    http_client: StudioHttpClient::for_search(
                        &search.url,
                        &search.api_key,
                        &self.config,
                    )?,
                    index_name: search.index_name,
                })
            })
            .await
    }

    async fn multi_search(&self, mut query: Value) -> AppResult<MultiSearchResponse> {
        let client = self.client().await?;
        query["indexUid"] = Value::String(client.index_name.clone());
        let body = json!({ "queries": [query] });
        client.http_client.post_json("/multi-search", &body).await
    }

    async fn facet_counts(&self, filter: Vec<String>) -> AppResult<BlockTypeCounts> {
        let response = self
            .multi_search(json!({
                "facets": ["block_type"],
                "filter": filter,
                "limit": 0,
            }))
            .await?;

        Ok(response
            .results
            .into_iter()
            .next()
            .and_then(|result| result.facet_distribution)
            .and_then(|mut facets| facets.remove("block_type"))
            .map(|counts| counts.into_iter().collect())
            .unwrap_or_default())
    }
}

pub(crate) fn context_filter(course_id: &str) -> String {
    format!("context_key = {}", quoted(course_id))
}

pub(crate) fn in_filter(attribute: &str, values: &[String]) -> String {
    let list: Vec<String> = values.iter().map(|v| quoted(v)).collect();
    format!("{} IN [{}]", attribute, list.join(", "))
}

fn quoted(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

#[async_trait]
impl BlockSearchRepository for BlockSearchRepositoryImpl {
    async fn block_type_counts(&self, course_id: &str) -> AppResult<BlockTypeCounts> {
        self.facet_counts(vec![context_filter(course_id)]).await
    }

    async fn usage_keys_of_types(
        &self,
        course_id: &str,
        block_types: &[String],
    ) -> AppResult<Vec<String>> {
        if block_types.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .multi_search(json!({
                "filter": [context_filter(course_id), in_filter("block_type", block_types)],
                "attributesToRetrieve": ["usage_key"],
                "limit": USAGE_KEY_PAGE_SIZE,
            }))
            .await?;

        let hits = response
            .results
            .into_iter()
            .next()
            .map(|result| result.hits)
            .unwrap_or_default();

        Ok(hits
            .iter()
            .filter_map(|hit| hit.get("usage_key").and_then(Value::as_str))
            .map(str::to_string)
            .collect())
    }

    async fn descendant_block_type_counts(
        &self,
        course_id: &str,
        parent_usage_keys: &[String],
    ) -> AppResult<BlockTypeCounts> {
        if parent_usage_keys.is_empty() {
            return Ok(BlockTypeCounts::new());
        }

        self.facet_counts(vec![
            context_filter(course_id),
            in_filter("breadcrumbs.usage_key", parent_usage_keys),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_filter_quotes_course_id() {
        assert_eq!(
            context_filter("course-v1:A+B+C"),
            "context_key = \"course-v1:A+B+C\""
        );
    }

    #[test]
    fn test_in_filter_escapes_values() {
        let values = vec!["problem-builder".to_string(), "odd\"type".to_string()];
        assert_eq!(
            in_filter("block_type", &values),
            "block_type IN [\"problem-builder\", \"odd\\\"type\"]"
        );
    }
}
