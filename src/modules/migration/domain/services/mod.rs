pub mod reconciler;

pub use reconciler::MigrationStatusReconciler;
