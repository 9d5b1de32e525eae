use rusqlite::ErrorCode;
use thiserror::Error;

/// Error taxonomy for the data access core.
///
/// Backend-specific error codes are translated into these kinds at the
/// connection boundary; nothing above the worker sees a raw driver error.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// A required parameter was empty or an unconditional mutation was refused.
    /// Raised locally, before any SQL is sent to the backend.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The backend rejected the SQL (constraint violation, syntax error, ...).
    #[error("Query error: {0}")]
    Query(String),

    /// The backend could not be reached or the connection was lost.
    #[error("Connection error: {0}")]
    Connection(String),

    /// `commit`/`roll_back` without an active transaction, or similar misuse.
    #[error("Transaction state error: {0}")]
    TransactionState(String),

    /// Lock wait timeout or deadlock reported by the backend.
    #[error("Concurrency error: {0}")]
    Concurrency(String),

    /// A migration's `up`/`down` failed. `ledger_updated` reports whether the
    /// migration ledger reflects the migration at the time of the error; on a
    /// rolled-back failure it is always `false`, so re-running is safe.
    #[error("Migration `{name}` failed (ledger updated: {ledger_updated}): {source}")]
    Migration {
        name: String,
        ledger_updated: bool,
        #[source]
        source: Box<DataAccessError>,
    },
}

impl From<rusqlite::Error> for DataAccessError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    DataAccessError::Concurrency(err.to_string())
                }
                ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied => {
                    DataAccessError::Connection(err.to_string())
                }
                _ => DataAccessError::Query(err.to_string()),
            },
            _ => DataAccessError::Query(err.to_string()),
        }
    }
}
