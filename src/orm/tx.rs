//! Transaction control for [`DataContext`].
//!
//! Nested `begin_transaction` calls open a savepoint stack: the outermost
//! level is a real `BEGIN IMMEDIATE`, inner levels are `SAVEPOINT`s released
//! or rolled back independently. `commit`/`roll_back` below depth one is a
//! `TransactionState` error.

use tracing::debug;

use crate::error::DataAccessError;

use super::DataContext;

impl DataContext {
    /// Current transaction depth; zero means idle.
    #[must_use]
    pub fn transaction_depth(&self) -> u32 {
        self.tx_depth
    }

    /// Open a transaction, or a savepoint when one is already active.
    pub async fn begin_transaction(&mut self) -> Result<(), DataAccessError> {
        let sql = if self.tx_depth == 0 {
            "BEGIN IMMEDIATE".to_owned()
        } else {
            format!("SAVEPOINT sp_{}", self.tx_depth)
        };
        debug!(depth = self.tx_depth, "begin transaction");
        self.provider.execute_batch(sql).await?;
        self.tx_depth += 1;
        Ok(())
    }

    /// Commit the innermost transaction level.
    ///
    /// # Errors
    /// `TransactionState` when no transaction is active.
    pub async fn commit(&mut self) -> Result<(), DataAccessError> {
        if self.tx_depth == 0 {
            return Err(DataAccessError::TransactionState(
                "commit without an active transaction".into(),
            ));
        }
        let sql = if self.tx_depth == 1 {
            "COMMIT".to_owned()
        } else {
            format!("RELEASE SAVEPOINT sp_{}", self.tx_depth - 1)
        };
        debug!(depth = self.tx_depth, "commit");
        self.provider.execute_batch(sql).await?;
        self.tx_depth -= 1;
        Ok(())
    }

    /// Roll back the innermost transaction level. Inner savepoint levels
    /// roll back to their savepoint without disturbing the outer transaction.
    ///
    /// # Errors
    /// `TransactionState` when no transaction is active.
    pub async fn roll_back(&mut self) -> Result<(), DataAccessError> {
        if self.tx_depth == 0 {
            return Err(DataAccessError::TransactionState(
                "rollback without an active transaction".into(),
            ));
        }
        let sql = if self.tx_depth == 1 {
            "ROLLBACK".to_owned()
        } else {
            let name = format!("sp_{}", self.tx_depth - 1);
            format!("ROLLBACK TO SAVEPOINT {name}; RELEASE SAVEPOINT {name}")
        };
        debug!(depth = self.tx_depth, "rollback");
        self.provider.execute_batch(sql).await?;
        self.tx_depth -= 1;
        Ok(())
    }
}
