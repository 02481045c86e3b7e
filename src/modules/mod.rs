pub mod advanced_settings;
pub mod course_analysis;
pub mod migration;
pub mod plugin_slots;
