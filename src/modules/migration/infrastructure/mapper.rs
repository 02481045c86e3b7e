use super::models::*;
use crate::modules::migration::domain::{
    MigrationInfo, MigrationParameter, MigrationSummary, MigrationTask, PreviousMigration,
    TargetCollection, TaskState, UnsupportedReason,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Converts migrator wire models into domain entities
pub struct MigrationMapper;

impl MigrationMapper {
    pub fn map_task(model: TaskStatusModel) -> MigrationTask {
        MigrationTask {
            uuid: model.uuid,
            state: model
                .state
                .map(TaskState::from)
                .unwrap_or(TaskState::Pending),
            state_text: model.state_text,
            completed_steps: model.completed_steps.unwrap_or(0),
            total_steps: model.total_steps.unwrap_or(0),
            attempts: model.attempts.unwrap_or(0),
            created: model.created.as_deref().and_then(parse_timestamp),
            modified: model.modified.as_deref().and_then(parse_timestamp),
            artifacts: model.artifacts,
            parameters: model
                .parameters
                .into_iter()
                .map(Self::map_parameter)
                .collect(),
        }
    }

    fn map_parameter(model: ParameterModel) -> MigrationParameter {
        MigrationParameter {
            id: model.id,
            source: model.source,
            target: model.target,
            is_failed: model.is_failed,
            target_collection: model.target_collection.map(|c| TargetCollection {
                key: c.key,
                title: c.title,
            }),
            composition_level: model.composition_level.as_deref().and_then(parse_enum),
            repeat_handling_strategy: model.repeat_handling_strategy.as_deref().and_then(parse_enum),
            preserve_url_slugs: model.preserve_url_slugs,
            target_collection_slug: model.target_collection_slug,
            forward_source_to_target: model.forward_source_to_target,
            migration_summary: model.migration_summary.map(|s| MigrationSummary {
                total_blocks: s.total_blocks,
                sections: s.sections,
                subsections: s.subsections,
                units: s.units,
                components: s.components,
                unsupported: s.unsupported,
            }),
            unsupported_reasons: model
                .unsupported_reasons
                .into_iter()
                .map(|r| UnsupportedReason {
                    block_name: r.block_name,
                    block_type: r.block_type,
                    reason: r.reason,
                })
                .collect(),
        }
    }

    pub fn map_migration_info(model: MigrationInfoModel) -> MigrationInfo {
        MigrationInfo(
            model
                .into_iter()
                .map(|(source, migrations)| {
                    let migrations = migrations
                        .into_iter()
                        .map(|m| PreviousMigration {
                            source_key: m.source_key,
                            target_key: m.target_key,
                            target_title: m.target_title,
                            target_collection_key: m.target_collection_key,
                            target_collection_title: m.target_collection_title,
                        })
                        .collect();
                    (source, migrations)
                })
                .collect(),
        )
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// Unknown enum strings are dropped rather than failing the whole task
fn parse_enum<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_value(Value::String(raw.to_string())).ok()
}
