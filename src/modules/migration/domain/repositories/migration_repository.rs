use super::super::entities::{BulkMigrationRequest, MigrationInfo, MigrationTask};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Access to the backend migration tasks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MigrationRepository: Send + Sync {
    /// Submit a bulk migration, returning the created task
    async fn submit_bulk_migration(&self, request: &BulkMigrationRequest) -> AppResult<MigrationTask>;

    async fn get_migration_task(&self, uuid: &str) -> AppResult<MigrationTask>;

    /// Previous migrations of each source key
    async fn get_migration_info(&self, source_keys: &[String]) -> AppResult<MigrationInfo>;
}
