use super::entities::AdvancedSettings;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// Course policy settings as served by Studio
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvancedSettingsRepository: Send + Sync {
    async fn get_settings(&self, course_id: &str) -> AppResult<AdvancedSettings>;

    /// Send new values keyed by camelCase name, returning the updated settings
    async fn update_settings(
        &self,
        course_id: &str,
        values: &BTreeMap<String, Value>,
    ) -> AppResult<AdvancedSettings>;
}
