use super::poller::MigrationStatusPoller;
use crate::modules::course_analysis::application::CourseAnalysisService;
use crate::modules::migration::domain::{
    BulkMigrationRequest, ImportStatus, MigrationRepository, MigrationStatusReconciler,
    MigrationSummary, MigrationTask, TargetCollection, UnsupportedReason,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{TimedOperation, Validator};
use crate::shared::QueryCache;
use crate::{log_error, log_info};
use serde::Serialize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// What the import details page shows for one migration task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDetailsView {
    pub task_uuid: String,
    pub course_id: Option<String>,
    pub course_title: Option<String>,
    pub status: ImportStatus,
    pub partial: bool,
    pub target_collection: Option<TargetCollection>,
    /// Where "view imported content" leads
    pub content_link: Option<String>,
    pub summary: Option<MigrationSummary>,
    pub unsupported_reasons: Vec<UnsupportedReason>,
    pub can_retry: bool,
}

impl ImportDetailsView {
    pub fn from_task(task: &MigrationTask, course_title: Option<String>) -> Self {
        let status = MigrationStatusReconciler::reconcile(task);
        let parameter = task.course_parameter();
        let target_collection = parameter.and_then(|p| p.target_collection.clone());

        let content_link = match status {
            ImportStatus::Succeeded => parameter.and_then(|p| p.target.as_ref()).map(|library| {
                match &target_collection {
                    Some(collection) => format!("/library/{}/collection/{}", library, collection.key),
                    None => format!("/library/{}", library),
                }
            }),
            _ => None,
        };

        Self {
            task_uuid: task.uuid.clone(),
            course_id: parameter.map(|p| p.source.clone()),
            course_title,
            status,
            partial: MigrationStatusReconciler::is_partial(task),
            target_collection,
            content_link,
            summary: parameter.and_then(|p| p.migration_summary.clone()),
            unsupported_reasons: parameter
                .map(|p| p.unsupported_reasons.clone())
                .unwrap_or_default(),
            can_retry: status == ImportStatus::Failed,
        }
    }

    pub fn headline(&self) -> String {
        let course = self
            .course_title
            .as_deref()
            .or(self.course_id.as_deref())
            .unwrap_or("the course");
        match self.status {
            ImportStatus::InProgress => format!("Import of {} is in progress", course),
            ImportStatus::Failed => format!("Import of {} failed", course),
            ImportStatus::Succeeded if self.partial => {
                format!("{} was partially imported; some content is unsupported", course)
            }
            ImportStatus::Succeeded => match &self.target_collection {
                Some(collection) => format!(
                    "{} has been imported to the collection {}",
                    course, collection.title
                ),
                None => format!("{} has been imported", course),
            },
        }
    }
}

/// Submits course imports and follows their migration tasks
pub struct MigrationService {
    migration_repo: Arc<dyn MigrationRepository>,
    analysis: Arc<CourseAnalysisService>,
    poller: MigrationStatusPoller,
    cache: QueryCache,
}

impl MigrationService {
    pub fn new(
        migration_repo: Arc<dyn MigrationRepository>,
        analysis: Arc<CourseAnalysisService>,
        poller: MigrationStatusPoller,
        cache: QueryCache,
    ) -> Self {
        Self {
            migration_repo,
            analysis,
            poller,
            cache,
        }
    }

    /// Start importing one course into a library
    pub async fn submit_course_import(&self, course_id: &str, library_id: &str) -> AppResult<MigrationTask> {
        Validator::validate_course_key(course_id)?;
        Validator::validate_library_key(library_id)?;

        let request = BulkMigrationRequest::course_import(course_id, library_id);
        let task = self.migration_repo.submit_bulk_migration(&request).await?;

        // A new migration changes what "previously imported" reports
        self.cache
            .invalidate(&QueryCache::key(&["migrationInfo", course_id]));
        log_info!(
            "Submitted import of {} into {} as task {}",
            course_id,
            library_id,
            task.uuid
        );
        Ok(task)
    }

    /// Submit the import again after a failure
    ///
    /// On failure the error carries the text the user is shown, and the
    /// caller may simply try again.
    pub async fn retry_import(&self, course_id: &str, library_id: &str) -> AppResult<MigrationTask> {
        let title = self.course_title(course_id).await;
        match self.submit_course_import(course_id, library_id).await {
            Ok(task) => {
                log_info!("{} is being imported again (task {})", title, task.uuid);
                Ok(task)
            }
            Err(
                e @ (AppError::ValidationError(_)
                | AppError::PermissionDenied(_)
                | AppError::Unauthorized(_)),
            ) => Err(e),
            Err(e) => {
                log_error!("Retrying import of {} failed: {}", course_id, e);
                Err(AppError::ExternalServiceError(format!(
                    "Failed to import {}",
                    title
                )))
            }
        }
    }

    pub async fn get_task(&self, uuid: &str) -> AppResult<MigrationTask> {
        self.migration_repo.get_migration_task(uuid).await
    }

    /// Current state of an import, reconciled for display
    pub async fn get_import_details(&self, uuid: &str) -> AppResult<ImportDetailsView> {
        let task = self.get_task(uuid).await?;
        let title = match task.course_parameter() {
            Some(p) => Some(self.course_title(&p.source).await),
            None => None,
        };
        Ok(ImportDetailsView::from_task(&task, title))
    }

    /// Follow a task until it finishes, times out, or `cancel` fires
    pub async fn watch_import<F>(
        &self,
        uuid: &str,
        cancel: &CancellationToken,
        on_update: F,
    ) -> AppResult<ImportDetailsView>
    where
        F: FnMut(&MigrationTask) + Send,
    {
        let timer = TimedOperation::new("watch_import");
        let task = self.poller.watch(uuid, cancel, on_update).await?;
        timer.finish();
        if let Some(parameter) = task.course_parameter() {
            self.cache
                .invalidate(&QueryCache::key(&["migrationInfo", parameter.source.as_str()]));
        }
        let title = match task.course_parameter() {
            Some(p) => Some(self.course_title(&p.source).await),
            None => None,
        };
        Ok(ImportDetailsView::from_task(&task, title))
    }

    // Title for messages; falls back to the key when details are unavailable
    async fn course_title(&self, course_id: &str) -> String {
        match self.analysis.course_details(course_id).await {
            Ok(details) => details.title,
            Err(_) => course_id.to_string(),
        }
    }
}
