use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a migration task as reported by the backend
///
/// Unknown strings are kept and treated as non-terminal, so a new backend
/// state never breaks polling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    Pending,
    InProgress,
    Succeeded,
    Failed,
    Canceled,
    Other(String),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Canceled => "Canceled",
            Self::Other(state) => state,
        }
    }
}

impl From<String> for TaskState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => Self::Pending,
            "In Progress" => Self::InProgress,
            "Succeeded" => Self::Succeeded,
            "Failed" => Self::Failed,
            "Canceled" | "Cancelled" => Self::Canceled,
            _ => Self::Other(value),
        }
    }
}

impl From<TaskState> for String {
    fn from(value: TaskState) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse status shown for a course import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportStatus {
    #[serde(rename = "In Progress")]
    InProgress,
    Failed,
    Succeeded,
}

impl fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => f.write_str("In Progress"),
            Self::Failed => f.write_str("Failed"),
            Self::Succeeded => f.write_str("Succeeded"),
        }
    }
}

/// What the backend does when a block already exists in the target library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatHandlingStrategy {
    Skip,
    #[default]
    Fork,
    Update,
}

/// Granularity of the containers created in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionLevel {
    Component,
    Unit,
    Subsection,
    #[default]
    Section,
}
