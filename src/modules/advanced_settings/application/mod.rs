pub mod service;

pub use service::AdvancedSettingsService;
