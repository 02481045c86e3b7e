pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::CourseAnalysisService;
pub use domain::{BlockSearchRepository, BlockSummary, BlockTypeAggregator, CourseRepository, ImportReview};
pub use infrastructure::{BlockSearchRepositoryImpl, CourseRepositoryImpl};
