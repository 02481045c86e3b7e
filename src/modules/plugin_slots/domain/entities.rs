use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Id of the widget a slot renders when nothing is configured
pub const DEFAULT_CONTENTS_ID: &str = "default_contents";

/// Named extension point of the authoring UI
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotName(String);

impl SlotName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WidgetKind {
    /// The slot's own content
    DefaultContents,
    /// A component from the widget catalog
    DirectPlugin { component: String },
    /// Content loaded from another origin
    IframePlugin { url: String, title: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    pub priority: i32,
    #[serde(flatten)]
    pub kind: WidgetKind,
}

impl Widget {
    pub fn default_contents(priority: i32) -> Self {
        Self {
            id: DEFAULT_CONTENTS_ID.to_string(),
            priority,
            kind: WidgetKind::DefaultContents,
        }
    }

    pub fn direct(id: &str, component: &str, priority: i32) -> Self {
        Self {
            id: id.to_string(),
            priority,
            kind: WidgetKind::DirectPlugin {
                component: component.to_string(),
            },
        }
    }
}

/// Change applied to a slot's widget list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PluginOperation {
    Insert { widget: Widget },
    /// Swap the widget that has the same id
    Replace { widget: Widget },
    #[serde(rename_all = "camelCase")]
    Hide { widget_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotConfig {
    pub keep_default: bool,
    pub plugins: Vec<PluginOperation>,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            keep_default: true,
            plugins: Vec::new(),
        }
    }
}

/// Operations per slot, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PluginSlotsConfig {
    pub slots: BTreeMap<SlotName, SlotConfig>,
}

/// A component that configuration may place in a slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub component: String,
    pub description: String,
}

/// Widgets known at startup, keyed by widget id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WidgetCatalog(BTreeMap<String, CatalogEntry>);

impl WidgetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, widget_id: &str, component: &str, description: &str) -> Self {
        self.0.insert(
            widget_id.to_string(),
            CatalogEntry {
                component: component.to_string(),
                description: description.to_string(),
            },
        );
        self
    }

    pub fn get(&self, widget_id: &str) -> Option<&CatalogEntry> {
        self.0.get(widget_id)
    }

    pub fn contains(&self, widget_id: &str) -> bool {
        self.0.contains_key(widget_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogEntry)> {
        self.0.iter()
    }
}
