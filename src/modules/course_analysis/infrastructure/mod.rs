pub mod models;
pub mod search_adapter;
pub mod studio_adapter;

pub use search_adapter::BlockSearchRepositoryImpl;
pub use studio_adapter::CourseRepositoryImpl;
