use super::super::entities::{
    PluginOperation, PluginSlotsConfig, SlotConfig, SlotName, Widget, WidgetCatalog, WidgetKind,
    DEFAULT_CONTENTS_ID,
};
use crate::shared::errors::{AppError, AppResult};
use std::collections::{BTreeMap, HashSet};

/// Slot configuration checked against the widget catalog
///
/// Construction fails on any widget id the catalog does not know, so a bad
/// configuration is caught at startup instead of when a slot is rendered.
#[derive(Debug, Clone)]
pub struct SlotRegistry {
    defaults: BTreeMap<SlotName, Vec<Widget>>,
    config: PluginSlotsConfig,
}

impl SlotRegistry {
    pub fn new(
        catalog: &WidgetCatalog,
        defaults: BTreeMap<SlotName, Vec<Widget>>,
        config: PluginSlotsConfig,
    ) -> AppResult<Self> {
        for (slot, slot_config) in &config.slots {
            Self::check_slot(catalog, slot, slot_config, defaults.get(slot))?;
        }

        Ok(Self { defaults, config })
    }

    fn check_slot(
        catalog: &WidgetCatalog,
        slot: &SlotName,
        slot_config: &SlotConfig,
        defaults: Option<&Vec<Widget>>,
    ) -> AppResult<()> {
        let mut known: HashSet<&str> = defaults
            .map(|widgets| widgets.iter().map(|w| w.id.as_str()).collect())
            .unwrap_or_default();
        known.insert(DEFAULT_CONTENTS_ID);

        for operation in &slot_config.plugins {
            match operation {
                PluginOperation::Insert { widget } | PluginOperation::Replace { widget } => {
                    if widget.id.trim().is_empty() {
                        return Err(AppError::ConfigError(format!(
                            "Slot '{}' has a widget without an id",
                            slot
                        )));
                    }
                    if let WidgetKind::DirectPlugin { .. } = widget.kind {
                        if !catalog.contains(&widget.id) {
                            return Err(AppError::ConfigError(format!(
                                "Slot '{}' uses unknown widget '{}'",
                                slot, widget.id
                            )));
                        }
                    }
                    known.insert(widget.id.as_str());
                }
                PluginOperation::Hide { widget_id } => {
                    if !known.contains(widget_id.as_str()) && !catalog.contains(widget_id) {
                        return Err(AppError::ConfigError(format!(
                            "Slot '{}' hides unknown widget '{}'",
                            slot, widget_id
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Widgets the slot renders, in ascending priority
    pub fn resolve(&self, slot: &SlotName) -> Vec<Widget> {
        let defaults = self
            .defaults
            .get(slot)
            .cloned()
            .unwrap_or_else(|| vec![Widget::default_contents(50)]);

        match self.config.slots.get(slot) {
            Some(slot_config) => apply_operations(defaults, slot_config),
            None => defaults,
        }
    }

    /// Every slot that has defaults or configuration
    pub fn slot_names(&self) -> Vec<SlotName> {
        let mut names: Vec<SlotName> = self
            .defaults
            .keys()
            .chain(self.config.slots.keys())
            .cloned()
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

/// Apply a slot's operations in declaration order, then order by priority
pub fn apply_operations(defaults: Vec<Widget>, slot_config: &SlotConfig) -> Vec<Widget> {
    let mut widgets = if slot_config.keep_default {
        defaults
    } else {
        Vec::new()
    };

    for operation in &slot_config.plugins {
        match operation {
            PluginOperation::Insert { widget } => widgets.push(widget.clone()),
            PluginOperation::Replace { widget } => {
                if let Some(existing) = widgets.iter_mut().find(|w| w.id == widget.id) {
                    *existing = widget.clone();
                }
            }
            PluginOperation::Hide { widget_id } => widgets.retain(|w| &w.id != widget_id),
        }
    }

    // Stable: equal priorities keep declaration order
    widgets.sort_by_key(|w| w.priority);
    widgets
}
