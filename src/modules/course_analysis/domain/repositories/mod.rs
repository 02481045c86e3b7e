pub mod block_search_repository;
pub mod course_repository;

pub use block_search_repository::BlockSearchRepository;
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use block_search_repository::MockBlockSearchRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
