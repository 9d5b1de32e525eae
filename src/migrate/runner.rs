use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::DataAccessError;
use crate::orm::DataContext;
use crate::types::Value;

use super::Migration;

/// The ledger table recording applied migrations. The ledger, never the
/// supplied migration list alone, decides what is pending.
pub(crate) const LEDGER_TABLE: &str = "schema_migrations";

const LEDGER_DDL: &str = "CREATE TABLE IF NOT EXISTS schema_migrations (\
    id INTEGER PRIMARY KEY AUTOINCREMENT, \
    migration_name TEXT NOT NULL UNIQUE, \
    applied_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP)";

/// Runs migration units in order, tracking them in the ledger.
///
/// Discovery is external: the runner consumes a ready-made list of units and
/// sorts it by name. Each `up`/`down` executes inside a transaction (SQLite
/// DDL is transactional), so a failed migration leaves neither schema
/// changes nor a ledger entry behind, and re-running the batch is safe.
pub struct MigrationRunner {
    migrations: Vec<Box<dyn Migration>>,
}

impl MigrationRunner {
    /// Build a runner over the supplied units, sorted by migration name.
    #[must_use]
    pub fn new(mut migrations: Vec<Box<dyn Migration>>) -> Self {
        migrations.sort_by(|a, b| a.name().cmp(b.name()));
        Self { migrations }
    }

    /// Names already recorded in the ledger, in application order.
    pub async fn applied(ctx: &mut DataContext) -> Result<Vec<String>, DataAccessError> {
        ctx.execute_batch(LEDGER_DDL).await?;
        let result = ctx
            .run_query(
                &format!("SELECT migration_name FROM {LEDGER_TABLE} ORDER BY id"),
                &[],
            )
            .await?;
        Ok(result
            .rows
            .iter()
            .filter_map(|row| row.get("migration_name"))
            .filter_map(|value| value.as_text().map(str::to_owned))
            .collect())
    }

    /// Names of supplied units not yet in the ledger, in execution order.
    pub async fn pending(&self, ctx: &mut DataContext) -> Result<Vec<String>, DataAccessError> {
        let applied: HashSet<String> = Self::applied(ctx).await?.into_iter().collect();
        Ok(self
            .migrations
            .iter()
            .filter(|m| !applied.contains(m.name()))
            .map(|m| m.name().to_owned())
            .collect())
    }

    /// Apply every pending migration, in order, fail-fast.
    ///
    /// Returns the names applied by this run. On failure the failing
    /// migration is rolled back, the batch halts, and the error reports
    /// which migration failed and that the ledger was not updated for it;
    /// remaining pending migrations are not attempted.
    pub async fn run(&self, ctx: &mut DataContext) -> Result<Vec<String>, DataAccessError> {
        let applied: HashSet<String> = Self::applied(ctx).await?.into_iter().collect();
        let mut applied_now = Vec::new();
        for migration in &self.migrations {
            let name = migration.name();
            if applied.contains(name) {
                continue;
            }
            info!(migration = name, description = migration.description(), "applying migration");
            if let Err(err) = apply_one(ctx, migration.as_ref()).await {
                warn!(migration = name, error = %err, "migration failed; halting batch");
                return Err(DataAccessError::Migration {
                    name: name.to_owned(),
                    ledger_updated: false,
                    source: Box::new(err),
                });
            }
            applied_now.push(name.to_owned());
        }
        Ok(applied_now)
    }

    /// Reverse the most recently applied migration, removing its ledger row.
    ///
    /// Returns the reverted name, or `None` when the ledger is empty. A unit
    /// recorded in the ledger but absent from the supplied list is an
    /// `InvalidInput` error; the runner cannot reverse what it cannot see.
    pub async fn revert_last(
        &self,
        ctx: &mut DataContext,
    ) -> Result<Option<String>, DataAccessError> {
        let Some(last) = Self::applied(ctx).await?.pop() else {
            return Ok(None);
        };
        let Some(migration) = self.migrations.iter().find(|m| m.name() == last) else {
            return Err(DataAccessError::InvalidInput(format!(
                "ledger records `{last}` but no such migration was supplied"
            )));
        };
        info!(migration = %last, "reverting migration");
        ctx.begin_transaction().await?;
        let result: Result<(), DataAccessError> = async {
            migration.down(ctx).await?;
            ctx.run_query(
                &format!("DELETE FROM {LEDGER_TABLE} WHERE migration_name = ?"),
                &[Value::Text(last.clone())],
            )
            .await?;
            Ok(())
        }
        .await;
        match result {
            Ok(()) => {
                ctx.commit().await?;
                Ok(Some(last))
            }
            Err(err) => {
                let _ = ctx.roll_back().await;
                Err(DataAccessError::Migration {
                    name: last,
                    ledger_updated: false,
                    source: Box::new(err),
                })
            }
        }
    }
}

async fn apply_one(
    ctx: &mut DataContext,
    migration: &dyn Migration,
) -> Result<(), DataAccessError> {
    ctx.begin_transaction().await?;
    let result: Result<(), DataAccessError> = async {
        migration.up(ctx).await?;
        ctx.run_query(
            &format!("INSERT INTO {LEDGER_TABLE} (migration_name) VALUES (?)"),
            &[Value::Text(migration.name().to_owned())],
        )
        .await?;
        Ok(())
    }
    .await;
    match result {
        Ok(()) => ctx.commit().await,
        Err(err) => {
            let _ = ctx.roll_back().await;
            Err(err)
        }
    }
}
