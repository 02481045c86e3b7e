use super::service::{ImportDetailsView, MigrationService};
use crate::modules::migration::domain::MigrationTask;
use crate::shared::application::use_case::{Query, UseCase};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use async_trait::async_trait;
use std::sync::Arc;

/// Command to import a course into a content library
#[derive(Debug, Clone)]
pub struct StartCourseImport {
    pub course_id: String,
    pub library_id: String,
    /// Submit as a retry of a failed import
    pub retry: bool,
}

pub struct StartCourseImportHandler {
    migration_service: Arc<MigrationService>,
}

impl StartCourseImportHandler {
    pub fn new(migration_service: Arc<MigrationService>) -> Self {
        Self { migration_service }
    }
}

#[async_trait]
impl UseCase<StartCourseImport, MigrationTask> for StartCourseImportHandler {
    async fn execute(&self, command: StartCourseImport) -> AppResult<MigrationTask> {
        if command.retry {
            self.migration_service
                .retry_import(&command.course_id, &command.library_id)
                .await
        } else {
            self.migration_service
                .submit_course_import(&command.course_id, &command.library_id)
                .await
        }
    }
}

/// Query for the reconciled state of one migration task
#[derive(Debug, Clone)]
pub struct GetImportStatus {
    pub task_uuid: String,
}

pub struct GetImportStatusHandler {
    migration_service: Arc<MigrationService>,
}

impl GetImportStatusHandler {
    pub fn new(migration_service: Arc<MigrationService>) -> Self {
        Self { migration_service }
    }
}

#[async_trait]
impl Query<GetImportStatus, ImportDetailsView> for GetImportStatusHandler {
    async fn execute(&self, query: GetImportStatus) -> AppResult<ImportDetailsView> {
        Validator::validate_task_uuid(&query.task_uuid)?;
        self.migration_service
            .get_import_details(&query.task_uuid)
            .await
    }
}
