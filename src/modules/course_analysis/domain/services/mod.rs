pub mod block_type_aggregator;
pub mod import_review;

pub use block_type_aggregator::{BlockSummary, BlockTypeAggregator};
pub use import_review::{ImportReview, ReviewBanner, ReviewInputs};
