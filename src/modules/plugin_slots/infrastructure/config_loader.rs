use super::models::{OperationModel, PluginSlotsFileModel, WidgetModel};
use crate::modules::plugin_slots::domain::{
    PluginOperation, PluginSlotsConfig, SlotConfig, SlotName, Widget, WidgetCatalog, WidgetKind,
    DEFAULT_CONTENTS_ID,
};
use crate::shared::errors::{AppError, AppResult};
use crate::{log_debug, log_info};
use std::path::Path;

const DEFAULT_PRIORITY: i32 = 50;

pub struct PluginSlotsConfigLoader;

impl PluginSlotsConfigLoader {
    /// Read the slot configuration file; a missing path means no configuration
    pub fn load(path: Option<&Path>, catalog: &WidgetCatalog) -> AppResult<PluginSlotsConfig> {
        let Some(path) = path else {
            log_debug!("No plugin slot configuration, using defaults");
            return Ok(PluginSlotsConfig::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::ConfigError(format!(
                "Cannot read plugin slot config {}: {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::parse(&raw, catalog)?;
        log_info!(
            "Loaded plugin slot config from {} ({} slots)",
            path.display(),
            config.slots.len()
        );
        Ok(config)
    }

    pub fn parse(raw: &str, catalog: &WidgetCatalog) -> AppResult<PluginSlotsConfig> {
        let file: PluginSlotsFileModel = serde_json::from_str(raw)
            .map_err(|e| AppError::ConfigError(format!("Invalid plugin slot config: {}", e)))?;

        let mut config = PluginSlotsConfig::default();
        for (slot, slot_model) in file.plugin_slots {
            let plugins = slot_model
                .plugins
                .into_iter()
                .map(|op| map_operation(&slot, op, catalog))
                .collect::<AppResult<Vec<_>>>()?;

            config.slots.insert(
                SlotName::new(slot),
                SlotConfig {
                    keep_default: slot_model.keep_default,
                    plugins,
                },
            );
        }
        Ok(config)
    }
}

fn map_operation(
    slot: &str,
    op: OperationModel,
    catalog: &WidgetCatalog,
) -> AppResult<PluginOperation> {
    match op.op.to_ascii_lowercase().as_str() {
        "insert" => Ok(PluginOperation::Insert {
            widget: map_widget(slot, required_widget(slot, &op.op, op.widget)?, catalog)?,
        }),
        "replace" => Ok(PluginOperation::Replace {
            widget: map_widget(slot, required_widget(slot, &op.op, op.widget)?, catalog)?,
        }),
        "hide" => {
            let widget_id = op
                .widget_id
                .or_else(|| op.widget.map(|w| w.id))
                .ok_or_else(|| {
                    AppError::ConfigError(format!("Slot '{}': hide needs a widgetId", slot))
                })?;
            Ok(PluginOperation::Hide { widget_id })
        }
        other => Err(AppError::ConfigError(format!(
            "Slot '{}': unknown operation '{}'",
            slot, other
        ))),
    }
}

fn required_widget(slot: &str, op: &str, widget: Option<WidgetModel>) -> AppResult<WidgetModel> {
    widget.ok_or_else(|| AppError::ConfigError(format!("Slot '{}': {} needs a widget", slot, op)))
}

fn map_widget(slot: &str, model: WidgetModel, catalog: &WidgetCatalog) -> AppResult<Widget> {
    let priority = model.priority.unwrap_or(DEFAULT_PRIORITY);

    let kind = match model.widget_type.as_deref() {
        Some("IFRAME_PLUGIN") | Some("iframe") => WidgetKind::IframePlugin {
            url: model.url.ok_or_else(|| {
                AppError::ConfigError(format!(
                    "Slot '{}': iframe widget '{}' has no url",
                    slot, model.id
                ))
            })?,
            title: model.title,
        },
        _ if model.id == DEFAULT_CONTENTS_ID => WidgetKind::DefaultContents,
        None | Some("DIRECT_PLUGIN") | Some("direct") => {
            // Components come from the catalog unless spelled out
            let component = match model.component {
                Some(component) => component,
                None => catalog
                    .get(&model.id)
                    .map(|entry| entry.component.clone())
                    .unwrap_or_default(),
            };
            WidgetKind::DirectPlugin { component }
        }
        Some(other) => {
            return Err(AppError::ConfigError(format!(
                "Slot '{}': widget '{}' has unknown type '{}'",
                slot, model.id, other
            )))
        }
    };

    Ok(Widget {
        id: model.id,
        priority,
        kind,
    })
}
