//! Studio adapter for the modulestore migrator API

use super::{mapper::MigrationMapper, models::*};
use crate::modules::migration::domain::{
    BulkMigrationRequest, MigrationInfo, MigrationRepository, MigrationTask,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::StudioHttpClient;
use async_trait::async_trait;
use std::sync::Arc;

const MIGRATOR_API: &str = "/api/modulestore_migrator/v1";

pub struct MigrationRepositoryImpl {
    http_client: Arc<StudioHttpClient>,
}

impl MigrationRepositoryImpl {
    pub fn new(http_client: Arc<StudioHttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl MigrationRepository for MigrationRepositoryImpl {
    async fn submit_bulk_migration(&self, request: &BulkMigrationRequest) -> AppResult<MigrationTask> {
        let body = serde_json::to_value(request)?;
        log::debug!("Migrator: submitting bulk migration {:?}", body);

        let model: TaskStatusModel = self
            .http_client
            .post_json_once(&format!("{}/bulk_modulestore_migrate/", MIGRATOR_API), &body)
            .await?;

        Ok(MigrationMapper::map_task(model))
    }

    async fn get_migration_task(&self, uuid: &str) -> AppResult<MigrationTask> {
        if uuid.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Migration task id cannot be empty".to_string(),
            ));
        }

        let model: TaskStatusModel = self
            .http_client
            .get(&format!(
                "{}/migrations/{}/",
                MIGRATOR_API,
                urlencoding::encode(uuid)
            ))
            .await?;

        Ok(MigrationMapper::map_task(model))
    }

    async fn get_migration_info(&self, source_keys: &[String]) -> AppResult<MigrationInfo> {
        if source_keys.is_empty() {
            return Ok(MigrationInfo::default());
        }

        let model: MigrationInfoModel = self
            .http_client
            .get_with_query(
                &format!("{}/migration_info/", MIGRATOR_API),
                &[("source_keys", source_keys.join(","))],
            )
            .await?;

        Ok(MigrationMapper::map_migration_info(model))
    }
}
