pub mod json_validator;

pub use json_validator::{SettingsJsonValidator, INCORRECT_JSON_MESSAGE};
