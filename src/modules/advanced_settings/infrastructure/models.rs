// Wire models for the contentstore advanced settings API (snake_case on the wire)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingModel {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub hide_on_enabled_publisher: bool,
}

pub type SettingsModel = BTreeMap<String, SettingModel>;

/// Entry of a PATCH body: only the value is sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingValueModel {
    pub value: Value,
}
