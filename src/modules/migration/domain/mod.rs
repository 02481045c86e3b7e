pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{
    BulkMigrationRequest, MigrationInfo, MigrationParameter, MigrationSummary, MigrationTask,
    PreviousMigration, TargetCollection, UnsupportedReason,
};
pub use repositories::MigrationRepository;
pub use services::MigrationStatusReconciler;
pub use value_objects::{CompositionLevel, ImportStatus, RepeatHandlingStrategy, TaskState};
