use super::models::{BlockLimitsModel, CourseDetailsModel, SearchConfigModel};
use crate::modules::course_analysis::domain::{
    CourseDetails, CourseRepository, LibraryBlockLimits, SearchIndexConfig,
};
use crate::shared::errors::AppResult;
use crate::shared::StudioHttpClient;
use async_trait::async_trait;
use std::sync::Arc;

pub struct CourseRepositoryImpl {
    http_client: Arc<StudioHttpClient>,
}

impl CourseRepositoryImpl {
    pub fn new(http_client: Arc<StudioHttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl CourseRepository for CourseRepositoryImpl {
    async fn get_course_details(&self, course_id: &str) -> AppResult<CourseDetails> {
        let model: CourseDetailsModel = self
            .http_client
            .get(&format!(
                "/api/contentstore/v1/course_details/{}",
                urlencoding::encode(course_id)
            ))
            .await?;

        // Older Studio releases only send `name`
        let title = model
            .title
            .or(model.name)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| course_id.to_string());

        Ok(CourseDetails {
            course_id: model.course_id.unwrap_or_else(|| course_id.to_string()),
            title,
        })
    }

    async fn get_block_limits(&self) -> AppResult<LibraryBlockLimits> {
        let model: BlockLimitsModel = self.http_client.get("/api/libraries/v2/block_limits/").await?;
        Ok(LibraryBlockLimits {
            max_blocks_per_content_library: model.max_blocks_per_content_library,
        })
    }

    async fn get_search_config(&self) -> AppResult<SearchIndexConfig> {
        let model: SearchConfigModel = self.http_client.get("/api/content_search/v2/studio/").await?;
        Ok(SearchIndexConfig {
            url: model.url,
            index_name: model.index_name,
            api_key: model.api_key,
        })
    }
}
