pub mod builtin;
pub mod slot_registry;

pub use builtin::{builtin_catalog, builtin_defaults, SLOT_NAMES};
pub use slot_registry::{apply_operations, SlotRegistry};
