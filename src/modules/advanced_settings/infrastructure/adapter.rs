use super::models::{SettingValueModel, SettingsModel};
use crate::modules::advanced_settings::domain::{
    AdvancedSetting, AdvancedSettings, AdvancedSettingsRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{to_camel_case, to_snake_case};
use crate::shared::StudioHttpClient;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

const ADVANCED_SETTINGS_API: &str = "/api/contentstore/v0/advanced_settings";

pub struct AdvancedSettingsRepositoryImpl {
    http_client: Arc<StudioHttpClient>,
}

impl AdvancedSettingsRepositoryImpl {
    pub fn new(http_client: Arc<StudioHttpClient>) -> Self {
        Self { http_client }
    }

    fn path(course_id: &str) -> String {
        format!("{}/{}", ADVANCED_SETTINGS_API, urlencoding::encode(course_id))
    }

    /// Setting names become camelCase; values are left exactly as sent
    fn map_settings(model: SettingsModel) -> AdvancedSettings {
        AdvancedSettings(
            model
                .into_iter()
                .map(|(name, s)| {
                    (
                        to_camel_case(&name),
                        AdvancedSetting {
                            value: s.value,
                            display_name: s.display_name,
                            help: s.help,
                            deprecated: s.deprecated,
                            hide_on_enabled_publisher: s.hide_on_enabled_publisher,
                        },
                    )
                })
                .collect(),
        )
    }

    fn patch_body(values: &BTreeMap<String, Value>) -> AppResult<Value> {
        let body: BTreeMap<String, SettingValueModel> = values
            .iter()
            .map(|(name, value)| {
                (
                    to_snake_case(name),
                    SettingValueModel {
                        value: value.clone(),
                    },
                )
            })
            .collect();
        Ok(serde_json::to_value(body)?)
    }
}

fn describe_forbidden(course_id: &str, err: AppError) -> AppError {
    match err {
        AppError::PermissionDenied(_) => AppError::PermissionDenied(format!(
            "You do not have permission to edit advanced settings of {}",
            course_id
        )),
        other => other,
    }
}

#[async_trait]
impl AdvancedSettingsRepository for AdvancedSettingsRepositoryImpl {
    async fn get_settings(&self, course_id: &str) -> AppResult<AdvancedSettings> {
        let model: SettingsModel = self
            .http_client
            .get_with_query(&Self::path(course_id), &[("fetch_all", "0".to_string())])
            .await
            .map_err(|e| describe_forbidden(course_id, e))?;

        Ok(Self::map_settings(model))
    }

    async fn update_settings(
        &self,
        course_id: &str,
        values: &BTreeMap<String, Value>,
    ) -> AppResult<AdvancedSettings> {
        let body = Self::patch_body(values)?;
        log::debug!("Advanced settings: PATCH {} {}", course_id, body);

        let model: SettingsModel = self
            .http_client
            .patch_json(&Self::path(course_id), &body)
            .await
            .map_err(|e| describe_forbidden(course_id, e))?;

        Ok(Self::map_settings(model))
    }
}
