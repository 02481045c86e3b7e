use super::value_objects::{CompositionLevel, RepeatHandlingStrategy, TaskState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection created in the library for an imported course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetCollection {
    pub key: String,
    pub title: String,
}

/// Counts reported by the backend once a course import is done
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationSummary {
    pub total_blocks: u64,
    pub sections: u64,
    pub subsections: u64,
    pub units: u64,
    pub components: u64,
    pub unsupported: u64,
}

/// Why one block of the source could not be imported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedReason {
    pub block_name: String,
    pub block_type: String,
    pub reason: String,
}

/// One source course inside a bulk migration task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationParameter {
    pub id: Option<i64>,
    pub source: String,
    pub target: Option<String>,
    pub is_failed: bool,
    pub target_collection: Option<TargetCollection>,
    pub composition_level: Option<CompositionLevel>,
    pub repeat_handling_strategy: Option<RepeatHandlingStrategy>,
    pub preserve_url_slugs: bool,
    pub target_collection_slug: Option<String>,
    pub forward_source_to_target: bool,
    pub migration_summary: Option<MigrationSummary>,
    pub unsupported_reasons: Vec<UnsupportedReason>,
}

impl MigrationParameter {
    /// Parameter carrying only the fields the reconciler reads
    pub fn new(source: impl Into<String>, is_failed: bool) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: None,
            is_failed,
            target_collection: None,
            composition_level: None,
            repeat_handling_strategy: None,
            preserve_url_slugs: false,
            target_collection_slug: None,
            forward_source_to_target: false,
            migration_summary: None,
            unsupported_reasons: Vec::new(),
        }
    }
}

/// Read-only projection of a backend migration task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationTask {
    pub uuid: String,
    pub state: TaskState,
    pub state_text: Option<String>,
    pub completed_steps: u32,
    pub total_steps: u32,
    pub attempts: u32,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub artifacts: Vec<String>,
    pub parameters: Vec<MigrationParameter>,
}

impl MigrationTask {
    pub fn new(uuid: impl Into<String>, state: TaskState, parameters: Vec<MigrationParameter>) -> Self {
        Self {
            uuid: uuid.into(),
            state,
            state_text: None,
            completed_steps: 0,
            total_steps: 0,
            attempts: 0,
            created: None,
            modified: None,
            artifacts: Vec::new(),
            parameters,
        }
    }

    /// Courses are imported one per task, so the first parameter is the import
    pub fn course_parameter(&self) -> Option<&MigrationParameter> {
        self.parameters.first()
    }
}

/// Body of a bulk "migrate into library" request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkMigrationRequest {
    pub sources: Vec<String>,
    pub target: String,
    pub create_collections: bool,
    pub repeat_handling_strategy: RepeatHandlingStrategy,
    pub composition_level: CompositionLevel,
}

impl BulkMigrationRequest {
    /// Import one course into a library, creating a collection for it
    pub fn course_import(course_id: &str, library_id: &str) -> Self {
        Self {
            sources: vec![course_id.to_string()],
            target: library_id.to_string(),
            create_collections: true,
            repeat_handling_strategy: RepeatHandlingStrategy::Fork,
            composition_level: CompositionLevel::Section,
        }
    }
}

/// A previous migration of a source into some target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousMigration {
    pub source_key: String,
    pub target_key: String,
    pub target_title: String,
    pub target_collection_key: Option<String>,
    pub target_collection_title: Option<String>,
}

/// Previous migrations grouped by source key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MigrationInfo(pub HashMap<String, Vec<PreviousMigration>>);

impl MigrationInfo {
    /// Previous migration of `source_key` into `target_key`, if any
    pub fn find(&self, source_key: &str, target_key: &str) -> Option<&PreviousMigration> {
        self.0
            .get(source_key)
            .and_then(|migrations| migrations.iter().find(|m| m.target_key == target_key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(|migrations| migrations.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn previous(source: &str, target: &str) -> PreviousMigration {
        PreviousMigration {
            source_key: source.to_string(),
            target_key: target.to_string(),
            target_title: "Library".to_string(),
            target_collection_key: None,
            target_collection_title: None,
        }
    }

    #[test]
    fn test_course_import_request_defaults() {
        let request = BulkMigrationRequest::course_import("course-v1:A+B+C", "lib:A:lib");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["sources"], serde_json::json!(["course-v1:A+B+C"]));
        assert_eq!(body["target"], "lib:A:lib");
        assert_eq!(body["create_collections"], true);
        assert_eq!(body["repeat_handling_strategy"], "fork");
        assert_eq!(body["composition_level"], "section");
    }

    #[test]
    fn test_migration_info_find_matches_target() {
        let mut map = HashMap::new();
        map.insert(
            "course-v1:A+B+C".to_string(),
            vec![previous("course-v1:A+B+C", "lib:A:other"), previous("course-v1:A+B+C", "lib:A:lib")],
        );
        let info = MigrationInfo(map);

        assert!(info.find("course-v1:A+B+C", "lib:A:lib").is_some());
        assert!(info.find("course-v1:A+B+C", "lib:A:missing").is_none());
        assert!(info.find("course-v1:X+Y+Z", "lib:A:lib").is_none());
        assert!(!info.is_empty());
        assert!(MigrationInfo::default().is_empty());
    }
}
