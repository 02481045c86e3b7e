use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One course policy setting as shown in the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSetting {
    pub value: Value,
    pub display_name: String,
    pub help: String,
    pub deprecated: bool,
    pub hide_on_enabled_publisher: bool,
}

impl AdvancedSetting {
    /// Text the editor starts from: the value as indented JSON
    pub fn editable_text(&self) -> String {
        pretty_json(&self.value)
    }
}

/// Settings of one course, keyed by camelCase setting name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdvancedSettings(pub BTreeMap<String, AdvancedSetting>);

impl AdvancedSettings {
    pub fn get(&self, name: &str) -> Option<&AdvancedSetting> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Settings in display order; deprecated ones only when asked for
    pub fn visible(&self, show_deprecated: bool) -> impl Iterator<Item = (&String, &AdvancedSetting)> {
        self.0
            .iter()
            .filter(move |(_, setting)| show_deprecated || !setting.deprecated)
    }
}

/// Free-text edits keyed by camelCase setting name
pub type SettingEdits = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingError {
    pub key: String,
    pub message: String,
}

/// Outcome of validating an edit bag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsValidation {
    pub is_valid: bool,
    pub errors: Vec<SettingError>,
    /// The edits after best-effort repair
    pub edited_settings: SettingEdits,
}

/// Outcome of a save attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SaveOutcome {
    /// Nothing was sent; the edits must be fixed first
    Invalid { validation: SettingsValidation },
    Saved { settings: AdvancedSettings },
}

/// JSON with four-space indentation, as the editor shows it
pub fn pretty_json(value: &Value) -> String {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8(out).unwrap_or_else(|_| value.to_string()),
        Err(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn setting(value: Value, deprecated: bool) -> AdvancedSetting {
        AdvancedSetting {
            value,
            display_name: "Setting".to_string(),
            help: String::new(),
            deprecated,
            hide_on_enabled_publisher: false,
        }
    }

    #[test]
    fn test_editable_text_uses_four_spaces() {
        let text = setting(json!(["drag-and-drop-v2"]), false).editable_text();
        assert_eq!(text, "[\n    \"drag-and-drop-v2\"\n]");
        assert_eq!(setting(json!(true), false).editable_text(), "true");
    }

    #[test]
    fn test_visible_hides_deprecated_by_default() {
        let mut map = BTreeMap::new();
        map.insert("advancedModules".to_string(), setting(json!([]), false));
        map.insert("xqaKey".to_string(), setting(json!(""), true));
        let settings = AdvancedSettings(map);

        assert_eq!(settings.visible(false).count(), 1);
        assert_eq!(settings.visible(true).count(), 2);
    }
}
