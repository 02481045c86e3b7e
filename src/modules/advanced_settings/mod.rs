pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::AdvancedSettingsService;
pub use domain::{AdvancedSettings, AdvancedSettingsRepository, SaveOutcome, SettingsValidation};
pub use infrastructure::AdvancedSettingsRepositoryImpl;
