pub mod entities;
pub mod repositories;
pub mod services;

pub use entities::{BlockTypeCounts, CourseDetails, LibraryBlockLimits, SearchIndexConfig};
pub use repositories::{BlockSearchRepository, CourseRepository};
pub use services::{BlockSummary, BlockTypeAggregator, ImportReview, ReviewBanner, ReviewInputs};
