pub mod service;

pub use service::{PluginSlotService, ResolvedSlot};
