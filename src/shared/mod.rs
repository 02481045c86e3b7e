// Shared Kernel - Domain Driven Design
// Following Clean Architecture + Hexagonal Architecture patterns

pub mod application; // Shared application layer patterns
pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (HTTP, caching)
pub mod utils; // Shared utilities

pub use config::AppConfig;
pub use infrastructure::{QueryCache, StudioHttpClient};
