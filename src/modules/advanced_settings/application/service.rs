use crate::modules::advanced_settings::domain::{
    AdvancedSettings, AdvancedSettingsRepository, SaveOutcome, SettingEdits, SettingsJsonValidator,
    SettingsValidation,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;
use crate::shared::QueryCache;
use crate::{log_info, log_warn};
use std::sync::Arc;

pub struct AdvancedSettingsService {
    settings_repo: Arc<dyn AdvancedSettingsRepository>,
    cache: QueryCache,
}

impl AdvancedSettingsService {
    pub fn new(settings_repo: Arc<dyn AdvancedSettingsRepository>, cache: QueryCache) -> Self {
        Self {
            settings_repo,
            cache,
        }
    }

    fn cache_key(course_id: &str) -> Vec<String> {
        QueryCache::key(&["advancedSettings", course_id])
    }

    pub async fn get_settings(&self, course_id: &str) -> AppResult<AdvancedSettings> {
        Validator::validate_course_key(course_id)?;
        self.cache
            .get_or_fetch(Self::cache_key(course_id), || {
                self.settings_repo.get_settings(course_id)
            })
            .await
    }

    pub fn validate(&self, edits: &SettingEdits) -> AppResult<SettingsValidation> {
        for name in edits.keys() {
            Validator::validate_setting_name(name)?;
        }
        Ok(SettingsJsonValidator::validate(edits))
    }

    /// Validate the edits and, when they are all valid JSON, send them
    ///
    /// Invalid edits are returned as data together with their repaired form;
    /// nothing is sent in that case.
    pub async fn save(&self, course_id: &str, edits: &SettingEdits) -> AppResult<SaveOutcome> {
        Validator::validate_course_key(course_id)?;
        let validation = self.validate(edits)?;
        if !validation.is_valid {
            log_warn!(
                "Not saving {} settings of {}: {} invalid",
                edits.len(),
                course_id,
                validation.errors.len()
            );
            return Ok(SaveOutcome::Invalid { validation });
        }

        let values = SettingsJsonValidator::parse_array_or_object_values(&validation.edited_settings);
        let settings = self.settings_repo.update_settings(course_id, &values).await?;

        self.cache.invalidate_prefix(&Self::cache_key(course_id));
        log_info!("Saved {} advanced settings of {}", values.len(), course_id);
        Ok(SaveOutcome::Saved { settings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::advanced_settings::domain::repositories::MockAdvancedSettingsRepository;
    use crate::modules::advanced_settings::domain::AdvancedSetting;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    const COURSE: &str = "course-v1:OpenedX+DemoX+2025";

    fn settings_with(name: &str, value: serde_json::Value) -> AdvancedSettings {
        let mut map = BTreeMap::new();
        map.insert(
            name.to_string(),
            AdvancedSetting {
                value,
                display_name: name.to_string(),
                help: String::new(),
                deprecated: false,
                hide_on_enabled_publisher: false,
            },
        );
        AdvancedSettings(map)
    }

    fn edits(pairs: &[(&str, &str)]) -> SettingEdits {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_get_settings_is_cached() {
        let mut repo = MockAdvancedSettingsRepository::new();
        repo.expect_get_settings()
            .times(1)
            .returning(|_| Ok(settings_with("advancedModules", json!([]))));

        let service = AdvancedSettingsService::new(Arc::new(repo), QueryCache::new(Duration::from_secs(60)));
        service.get_settings(COURSE).await.unwrap();
        service.get_settings(COURSE).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_edits_are_not_sent() {
        let mut repo = MockAdvancedSettingsRepository::new();
        repo.expect_update_settings().never();

        let service = AdvancedSettingsService::new(Arc::new(repo), QueryCache::new(Duration::from_secs(60)));
        let outcome = service
            .save(COURSE, &edits(&[("displayName", "hello")]))
            .await
            .unwrap();

        match outcome {
            SaveOutcome::Invalid { validation } => {
                assert_eq!(validation.edited_settings["displayName"], "\"hello\"");
            }
            other => panic!("expected invalid outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_sends_parsed_values_and_invalidates_cache() {
        let mut repo = MockAdvancedSettingsRepository::new();
        repo.expect_get_settings()
            .times(2)
            .returning(|_| Ok(settings_with("advancedModules", json!([]))));
        repo.expect_update_settings()
            .withf(|_, values| {
                values.get("advancedModules") == Some(&json!(["poll"]))
                    && values.get("daysEarlyForBeta") == Some(&json!("3"))
            })
            .times(1)
            .returning(|_, _| Ok(settings_with("advancedModules", json!(["poll"]))));

        let service = AdvancedSettingsService::new(Arc::new(repo), QueryCache::new(Duration::from_secs(60)));
        service.get_settings(COURSE).await.unwrap();

        let outcome = service
            .save(
                COURSE,
                &edits(&[("advancedModules", "[\"poll\"]"), ("daysEarlyForBeta", "3")]),
            )
            .await
            .unwrap();
        assert!(matches!(outcome, SaveOutcome::Saved { .. }));

        // The cached GET was dropped, so this goes back to the server
        service.get_settings(COURSE).await.unwrap();
    }
}
