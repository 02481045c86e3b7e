// Wire models for the modulestore migrator API (snake_case on the wire)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatusModel {
    pub uuid: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub state_text: Option<String>,
    #[serde(default)]
    pub completed_steps: Option<u32>,
    #[serde(default)]
    pub total_steps: Option<u32>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub artifacts: Vec<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterModel {
    #[serde(default)]
    pub id: Option<i64>,
    pub source: String,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default, alias = "isFailed")]
    pub is_failed: bool,
    #[serde(default, alias = "targetCollection")]
    pub target_collection: Option<CollectionModel>,
    #[serde(default)]
    pub composition_level: Option<String>,
    #[serde(default)]
    pub repeat_handling_strategy: Option<String>,
    #[serde(default)]
    pub preserve_url_slugs: bool,
    #[serde(default)]
    pub target_collection_slug: Option<String>,
    #[serde(default)]
    pub forward_source_to_target: bool,
    #[serde(default)]
    pub migration_summary: Option<SummaryModel>,
    #[serde(default)]
    pub unsupported_reasons: Vec<UnsupportedReasonModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionModel {
    pub key: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryModel {
    pub total_blocks: u64,
    pub sections: u64,
    pub subsections: u64,
    pub units: u64,
    pub components: u64,
    pub unsupported: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnsupportedReasonModel {
    #[serde(default)]
    pub block_name: String,
    #[serde(default)]
    pub block_type: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousMigrationModel {
    pub source_key: String,
    pub target_key: String,
    #[serde(default)]
    pub target_title: String,
    #[serde(default)]
    pub target_collection_key: Option<String>,
    #[serde(default)]
    pub target_collection_title: Option<String>,
}

pub type MigrationInfoModel = HashMap<String, Vec<PreviousMigrationModel>>;
