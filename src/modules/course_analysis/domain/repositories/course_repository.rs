use super::super::entities::{CourseDetails, LibraryBlockLimits, SearchIndexConfig};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Course and library metadata served by Studio
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn get_course_details(&self, course_id: &str) -> AppResult<CourseDetails>;

    async fn get_block_limits(&self) -> AppResult<LibraryBlockLimits>;

    async fn get_search_config(&self) -> AppResult<SearchIndexConfig>;
}
