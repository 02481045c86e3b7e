pub mod entities;
pub mod services;

pub use entities::{
    CatalogEntry, PluginOperation, PluginSlotsConfig, SlotConfig, SlotName, Widget, WidgetCatalog,
    WidgetKind, DEFAULT_CONTENTS_ID,
};
pub use services::{builtin_catalog, builtin_defaults, SlotRegistry, SLOT_NAMES};
