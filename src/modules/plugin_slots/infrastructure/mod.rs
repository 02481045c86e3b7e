pub mod config_loader;
pub mod models;

pub use config_loader::PluginSlotsConfigLoader;
