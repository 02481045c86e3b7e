use serde::Deserialize;
use std::collections::BTreeMap;

/// Top-level slot configuration document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSlotsFileModel {
    #[serde(default)]
    pub plugin_slots: BTreeMap<String, SlotConfigModel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfigModel {
    #[serde(default = "default_keep_default")]
    pub keep_default: bool,
    #[serde(default)]
    pub plugins: Vec<OperationModel>,
}

fn default_keep_default() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationModel {
    pub op: String,
    pub widget: Option<WidgetModel>,
    /// Hide may name the widget directly or through `widget.id`
    pub widget_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetModel {
    pub id: String,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(rename = "type", default)]
    pub widget_type: Option<String>,
    pub component: Option<String>,
    pub url: Option<String>,
    pub title: Option<String>,
}
