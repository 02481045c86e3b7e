use crate::modules::plugin_slots::domain::{
    builtin_catalog, builtin_defaults, CatalogEntry, SlotName, SlotRegistry, Widget, WidgetCatalog,
};
use crate::modules::plugin_slots::infrastructure::PluginSlotsConfigLoader;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::AppConfig;
use crate::log_debug;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSlot {
    pub slot: SlotName,
    pub widgets: Vec<Widget>,
}

pub struct PluginSlotService {
    catalog: WidgetCatalog,
    registry: SlotRegistry,
}

impl PluginSlotService {
    /// Built-in catalog and defaults plus the configured slot file
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let catalog = builtin_catalog();
        let slots = PluginSlotsConfigLoader::load(config.plugin_slots_config.as_deref(), &catalog)?;
        let registry = SlotRegistry::new(&catalog, builtin_defaults(), slots)?;
        Ok(Self { catalog, registry })
    }

    pub fn new(catalog: WidgetCatalog, registry: SlotRegistry) -> Self {
        Self { catalog, registry }
    }

    pub fn resolve(&self, slot: &str) -> AppResult<ResolvedSlot> {
        let slot = SlotName::new(slot);
        if !self.registry.slot_names().contains(&slot) {
            return Err(AppError::NotFound(format!("plugin slot '{}'", slot)));
        }

        let widgets = self.registry.resolve(&slot);
        log_debug!("Slot {} resolved to {} widgets", slot, widgets.len());
        Ok(ResolvedSlot { slot, widgets })
    }

    pub fn resolve_all(&self) -> Vec<ResolvedSlot> {
        self.registry
            .slot_names()
            .into_iter()
            .map(|slot| ResolvedSlot {
                widgets: self.registry.resolve(&slot),
                slot,
            })
            .collect()
    }

    pub fn catalog(&self) -> Vec<(String, CatalogEntry)> {
        self.catalog
            .iter()
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect()
    }
}
