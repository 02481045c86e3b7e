// Wire models for Studio course/library metadata and the search index

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDetailsModel {
    #[serde(default, alias = "courseId", alias = "course_key", alias = "id")]
    pub course_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockLimitsModel {
    #[serde(alias = "maxBlocksPerContentLibrary")]
    pub max_blocks_per_content_library: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfigModel {
    pub url: String,
    pub index_name: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiSearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResultModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultModel {
    #[serde(default)]
    pub hits: Vec<Value>,
    #[serde(default)]
    pub facet_distribution: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
}
