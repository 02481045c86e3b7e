pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::{PluginSlotService, ResolvedSlot};
pub use domain::{PluginOperation, SlotName, SlotRegistry, Widget, WidgetCatalog};
