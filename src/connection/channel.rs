use tokio::sync::oneshot;

use crate::error::DataAccessError;
use crate::results::ResultSet;
use crate::types::Value;

/// Commands accepted by the SQLite worker thread.
pub(crate) enum Command {
    ExecuteBatch {
        sql: String,
        respond_to: oneshot::Sender<Result<(), DataAccessError>>,
    },
    Select {
        sql: String,
        params: Vec<Value>,
        respond_to: oneshot::Sender<Result<ResultSet, DataAccessError>>,
    },
    SelectNamed {
        sql: String,
        params: Vec<(String, Value)>,
        respond_to: oneshot::Sender<Result<ResultSet, DataAccessError>>,
    },
    Execute {
        sql: String,
        params: Vec<Value>,
        respond_to: oneshot::Sender<Result<DmlOutcome, DataAccessError>>,
    },
    Shutdown,
}

/// What a DML statement reports back.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DmlOutcome {
    pub rows_affected: usize,
    pub last_insert_id: i64,
}
