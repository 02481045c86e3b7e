use super::super::entities::BlockTypeCounts;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Block queries against the studio search index
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockSearchRepository: Send + Sync {
    /// Block type facet counts for every block of a course
    async fn block_type_counts(&self, course_id: &str) -> AppResult<BlockTypeCounts>;

    /// Usage keys of the course blocks whose type is one of `block_types`
    async fn usage_keys_of_types(
        &self,
        course_id: &str,
        block_types: &[String],
    ) -> AppResult<Vec<String>>;

    /// Block type facet counts for descendants of the given blocks
    async fn descendant_block_type_counts(
        &self,
        course_id: &str,
        parent_usage_keys: &[String],
    ) -> AppResult<BlockTypeCounts>;
}
