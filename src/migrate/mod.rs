//! Schema migration engine: ordered migration units, an applied-migrations
//! ledger, and transactional forward/backward execution.

mod runner;

pub use runner::MigrationRunner;

use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::orm::DataContext;

/// One migration unit.
///
/// `name()` is the migration identifier and must sort in intended execution
/// order (timestamp-prefixed names work well). Whether `down()` fully
/// reverses `up()` is the author's responsibility; the runner only checks
/// that the statements execute.
#[async_trait]
pub trait Migration: Send + Sync {
    /// Sortable identifier, e.g. `20240105_create_members`.
    fn name(&self) -> &str;

    /// Human-readable description of what this migration does.
    fn description(&self) -> &str;

    /// Apply the migration.
    async fn up(&self, ctx: &mut DataContext) -> Result<(), DataAccessError>;

    /// Reverse the migration.
    async fn down(&self, ctx: &mut DataContext) -> Result<(), DataAccessError>;
}
