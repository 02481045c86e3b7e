pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{ImportDetailsView, MigrationService, MigrationStatusPoller};
pub use domain::{ImportStatus, MigrationRepository, MigrationTask, TaskState};
pub use infrastructure::MigrationRepositoryImpl;
