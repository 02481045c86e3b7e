use crate::modules::course_analysis::domain::{
    BlockSearchRepository, BlockSummary, BlockTypeAggregator, BlockTypeCounts, CourseDetails,
    CourseRepository, ImportReview, LibraryBlockLimits, ReviewInputs,
};
use crate::modules::migration::domain::{MigrationInfo, MigrationRepository};
use crate::shared::errors::AppResult;
use crate::shared::utils::{logger::TimedOperation, Validator};
use crate::shared::QueryCache;
use crate::{log_debug, log_info};
use std::sync::Arc;

/// Analysis behind the "review import details" step
pub struct CourseAnalysisService {
    course_repo: Arc<dyn CourseRepository>,
    search_repo: Arc<dyn BlockSearchRepository>,
    migration_repo: Arc<dyn MigrationRepository>,
    aggregator: BlockTypeAggregator,
    cache: QueryCache,
}

impl CourseAnalysisService {
    pub fn new(
        course_repo: Arc<dyn CourseRepository>,
        search_repo: Arc<dyn BlockSearchRepository>,
        migration_repo: Arc<dyn MigrationRepository>,
        aggregator: BlockTypeAggregator,
        cache: QueryCache,
    ) -> Self {
        Self {
            course_repo,
            search_repo,
            migration_repo,
            aggregator,
            cache,
        }
    }

    pub async fn course_details(&self, course_id: &str) -> AppResult<CourseDetails> {
        Validator::validate_course_key(course_id)?;
        self.cache
            .get_or_fetch(QueryCache::key(&["courseDetails", course_id]), || {
                self.course_repo.get_course_details(course_id)
            })
            .await
    }

    pub async fn block_limits(&self) -> AppResult<LibraryBlockLimits> {
        self.cache
            .get_or_fetch(QueryCache::key(&["blockLimits"]), || {
                self.course_repo.get_block_limits()
            })
            .await
    }

    pub async fn migration_info(&self, course_id: &str) -> AppResult<MigrationInfo> {
        let source_keys = vec![course_id.to_string()];
        self.cache
            .get_or_fetch(QueryCache::key(&["migrationInfo", course_id]), || async {
                self.migration_repo.get_migration_info(&source_keys).await
            })
            .await
    }

    pub async fn block_type_counts(&self, course_id: &str) -> AppResult<BlockTypeCounts> {
        self.cache
            .get_or_fetch(QueryCache::key(&["blockTypes", course_id]), || {
                self.search_repo.block_type_counts(course_id)
            })
            .await
    }

    /// Block summary of a course, counting children of unsupported blocks as unsupported
    pub async fn analyze_course(&self, course_id: &str) -> AppResult<BlockSummary> {
        Validator::validate_course_key(course_id)?;
        let counts = self.block_type_counts(course_id).await?;

        let present_unsupported: Vec<String> = self
            .aggregator
            .unsupported_types()
            .iter()
            .filter(|t| counts.get(t) > 0)
            .cloned()
            .collect();

        let children = if present_unsupported.is_empty() {
            BlockTypeCounts::new()
        } else {
            let parents = self
                .search_repo
                .usage_keys_of_types(course_id, &present_unsupported)
                .await?;
            log_debug!(
                "Course {} has {} unsupported blocks that may hold children",
                course_id,
                parents.len()
            );
            self.search_repo
                .descendant_block_type_counts(course_id, &parents)
                .await?
        };

        Ok(self.aggregator.aggregate(&counts, Some(&children)))
    }

    /// Everything needed to decide whether `course_id` can be imported into `library_id`
    pub async fn review_import(&self, course_id: &str, library_id: &str) -> AppResult<ImportReview> {
        Validator::validate_course_key(course_id)?;
        Validator::validate_library_key(library_id)?;
        let timer = TimedOperation::new("review_import");

        let (course, summary, migration_info, block_limits) = futures::try_join!(
            self.course_details(course_id),
            self.analyze_course(course_id),
            self.migration_info(course_id),
            self.block_limits(),
        )?;

        let review = ImportReview::evaluate(ReviewInputs {
            library_id: library_id.to_string(),
            course: Some(course),
            summary: Some(summary),
            migration_info: Some(migration_info),
            block_limits: Some(block_limits),
        });

        timer.finish_with_info(course_id);
        log_info!(
            "Review of {} into {}: {}",
            course_id,
            library_id,
            review.banner.message()
        );
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::course_analysis::domain::repositories::{
        MockBlockSearchRepository, MockCourseRepository,
    };
    use crate::modules::course_analysis::domain::ReviewBanner;
    use crate::modules::migration::domain::repositories::MockMigrationRepository;
    use std::time::Duration;

    const COURSE: &str = "course-v1:OpenedX+DemoX+2025";
    const LIBRARY: &str = "lib:OpenedX:demo";

    fn course_repo(limit: u64) -> MockCourseRepository {
        let mut repo = MockCourseRepository::new();
        repo.expect_get_course_details().returning(|id| {
            Ok(CourseDetails {
                course_id: id.to_string(),
                title: "Demo Course".to_string(),
            })
        });
        repo.expect_get_block_limits().returning(move || {
            Ok(LibraryBlockLimits {
                max_blocks_per_content_library: limit,
            })
        });
        repo
    }

    fn empty_migration_repo() -> MockMigrationRepository {
        let mut repo = MockMigrationRepository::new();
        repo.expect_get_migration_info()
            .returning(|_| Ok(MigrationInfo::default()));
        repo
    }

    fn service(
        course_repo: MockCourseRepository,
        search_repo: MockBlockSearchRepository,
        migration_repo: MockMigrationRepository,
    ) -> CourseAnalysisService {
        CourseAnalysisService::new(
            Arc::new(course_repo),
            Arc::new(search_repo),
            Arc::new(migration_repo),
            BlockTypeAggregator::new(vec![
                "library_content".to_string(),
                "problem-builder".to_string(),
            ]),
            QueryCache::new(Duration::from_secs(60)),
        )
    }

    fn outline() -> BlockTypeCounts {
        BlockTypeCounts::new()
            .with("chapter", 1)
            .with("sequential", 2)
            .with("vertical", 3)
    }

    #[tokio::test]
    async fn test_analyze_counts_children_of_unsupported_blocks() {
        let mut search = MockBlockSearchRepository::new();
        search.expect_block_type_counts().returning(|_| {
            Ok(outline()
                .with("library_content", 1)
                .with("html", 1)
                .with("problem", 4))
        });
        search
            .expect_usage_keys_of_types()
            .withf(|_, types| types.len() == 1 && types[0] == "library_content")
            .returning(|_, _| Ok(vec!["block-v1:OpenedX+DemoX+2025+type@library_content+block@lc".to_string()]));
        search
            .expect_descendant_block_type_counts()
            .times(1)
            .returning(|_, _| Ok(BlockTypeCounts::new().with("problem", 2)));

        let service = service(course_repo(100), search, empty_migration_repo());
        let summary = service.analyze_course(COURSE).await.unwrap();

        assert_eq!(summary.blocks_display(), "9/12");
        assert_eq!(summary.components_display(), "3/6");
        assert_eq!(summary.percentage_display(), "25.00");
    }

    #[tokio::test]
    async fn test_analyze_skips_child_lookup_when_everything_is_supported() {
        let mut search = MockBlockSearchRepository::new();
        search
            .expect_block_type_counts()
            .returning(|_| Ok(outline().with("html", 5).with("problem", 3)));
        search.expect_usage_keys_of_types().never();
        search.expect_descendant_block_type_counts().never();

        let service = service(course_repo(100), search, empty_migration_repo());
        let summary = service.analyze_course(COURSE).await.unwrap();

        assert_eq!(summary.total_blocks, 14);
        assert_eq!(summary.total_components, 8);
    }

    #[tokio::test]
    async fn test_review_blocks_oversized_course() {
        let mut search = MockBlockSearchRepository::new();
        search
            .expect_block_type_counts()
            .returning(|_| Ok(outline().with("problem-builder", 1).with("html", 25)));
        search.expect_usage_keys_of_types().returning(|_, _| Ok(Vec::new()));
        search
            .expect_descendant_block_type_counts()
            .returning(|_, _| Ok(BlockTypeCounts::new()));

        let service = service(course_repo(20), search, empty_migration_repo());
        let review = service.review_import(COURSE, LIBRARY).await.unwrap();

        assert!(review.import_blocked);
        assert_eq!(review.banner, ReviewBanner::ImportBlocked { limit: 20 });
    }

    #[tokio::test]
    async fn test_course_details_are_cached() {
        let mut repo = MockCourseRepository::new();
        repo.expect_get_course_details().times(1).returning(|id| {
            Ok(CourseDetails {
                course_id: id.to_string(),
                title: "Demo Course".to_string(),
            })
        });

        let service = service(repo, MockBlockSearchRepository::new(), empty_migration_repo());
        let first = service.course_details(COURSE).await.unwrap();
        let second = service.course_details(COURSE).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_review_rejects_malformed_keys() {
        let service = service(
            MockCourseRepository::new(),
            MockBlockSearchRepository::new(),
            MockMigrationRepository::new(),
        );
        assert!(service.review_import("not-a-course", LIBRARY).await.is_err());
        assert!(service.review_import(COURSE, "not-a-library").await.is_err());
    }
}
