pub mod poller;
pub mod service;
pub mod use_cases;

pub use poller::MigrationStatusPoller;
pub use service::{ImportDetailsView, MigrationService};
pub use use_cases::{GetImportStatus, GetImportStatusHandler, StartCourseImport, StartCourseImportHandler};
