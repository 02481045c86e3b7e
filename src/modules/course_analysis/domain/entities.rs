use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural block types; everything else is a component
pub const STRUCTURAL_BLOCK_TYPES: [&str; 3] = ["chapter", "sequential", "vertical"];

/// Block type name to number of blocks of that type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTypeCounts(pub BTreeMap<String, u64>);

impl BlockTypeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, block_type: &str, count: u64) -> Self {
        self.0.insert(block_type.to_string(), count);
        self
    }

    pub fn get(&self, block_type: &str) -> u64 {
        self.0.get(block_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, u64)> for BlockTypeCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetails {
    pub course_id: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryBlockLimits {
    pub max_blocks_per_content_library: u64,
}

/// Where the studio search index lives and how to query it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchIndexConfig {
    pub url: String,
    pub index_name: String,
    pub api_key: String,
}
