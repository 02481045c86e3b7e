pub mod service;

pub use service::CourseAnalysisService;
