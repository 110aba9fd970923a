//! Embedded schema migrations.

mod migrate_result;
mod run_migration;

pub use migrate_result::MigrationResult;
pub use run_migration::{get_applied_migrations, run_pending_migrations};
