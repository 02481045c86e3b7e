pub mod entities;
pub mod repositories;
pub mod services;

pub use entities::{
    AdvancedSetting, AdvancedSettings, SaveOutcome, SettingEdits, SettingError, SettingsValidation,
};
pub use repositories::AdvancedSettingsRepository;
pub use services::SettingsJsonValidator;
