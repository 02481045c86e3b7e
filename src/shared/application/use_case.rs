use crate::shared::errors::AppResult;
/// Base trait for all use cases following CQRS pattern
///
/// This trait provides a standard interface for command/query handlers
/// following the Single Responsibility Principle.
///
/// # Example
///
/// ```ignore
/// struct StartCourseImport {
///     course_id: String,
///     library_id: String,
/// }
///
/// #[async_trait]
/// impl UseCase<StartCourseImport, MigrationTaskRef> for StartCourseImportHandler {
///     async fn execute(&self, command: StartCourseImport) -> AppResult<MigrationTaskRef> {
///         // Use case logic here
///     }
/// }
/// ```
use async_trait::async_trait;

/// Base trait for use cases (command handlers)
#[async_trait]
pub trait UseCase<TCommand, TResult> {
    /// Execute the use case with the given command
    async fn execute(&self, command: TCommand) -> AppResult<TResult>;
}

/// Base trait for queries (query handlers)
#[async_trait]
pub trait Query<TQuery, TResult> {
    /// Execute the query
    async fn execute(&self, query: TQuery) -> AppResult<TResult>;
}
