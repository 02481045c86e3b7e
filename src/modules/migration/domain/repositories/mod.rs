pub mod migration_repository;

pub use migration_repository::MigrationRepository;
#[cfg(test)]
pub use migration_repository::MockMigrationRepository;
