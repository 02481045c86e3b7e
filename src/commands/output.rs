use crate::shared::errors::AppError;
use serde::Serialize;
use serde_json::Value;

const PERMISSION_DENIED_MESSAGE: &str = "It looks like you're trying to access a page you don't have permission to view. Contact your admin if you think this is a mistake.";

/// Result of one CLI command: a JSON value plus its human-readable rendering
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    pub value: Value,
    pub text: String,
}

impl CommandOutput {
    pub fn new<T: Serialize>(data: &T, text: impl Into<String>) -> Self {
        Self {
            value: serde_json::to_value(data).unwrap_or(Value::Null),
            text: text.into(),
        }
    }

    pub fn render(&self, json: bool) -> String {
        if json {
            serde_json::to_string_pretty(&self.value).unwrap_or_else(|_| self.value.to_string())
        } else {
            self.text.clone()
        }
    }
}

/// One-line message shown when a command fails
pub fn error_message(err: &AppError) -> String {
    match err {
        AppError::PermissionDenied(_) => PERMISSION_DENIED_MESSAGE.to_string(),
        err if err.is_connection_error() => format!("Network error: {}", err),
        err => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_modes() {
        let output = CommandOutput::new(&json!({"status": "Succeeded"}), "Import succeeded");
        assert_eq!(output.render(false), "Import succeeded");
        assert!(output.render(true).contains("\"status\": \"Succeeded\""));
    }

    #[test]
    fn test_error_messages() {
        let denied = error_message(&AppError::PermissionDenied("/advanced_settings".into()));
        assert!(denied.starts_with("It looks like"));
        let offline = error_message(&AppError::ExternalServiceError("Request timeout".into()));
        assert!(offline.starts_with("Network error"));
        assert_eq!(
            error_message(&AppError::NotFound("task".into())),
            "Not found: task"
        );
    }
}
