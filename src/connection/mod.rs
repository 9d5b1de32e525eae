//! Connection provider: one SQLite connection owned by a dedicated worker
//! thread. Async callers talk to it over a command channel and get results
//! back on oneshot channels, so every statement executes serially on the one
//! handle, which is also what makes implicit transaction participation safe.

pub mod config;
mod channel;
mod params;
mod worker;

pub use config::DataConfig;

use std::sync::mpsc::{self, Sender};
use std::thread;

use tokio::sync::oneshot;

use crate::error::DataAccessError;
use crate::results::ResultSet;
use crate::types::Value;

pub(crate) use channel::DmlOutcome;

use channel::Command;
use worker::{open_connection, run_worker};

/// Handle to the worker thread owning the live connection.
///
/// The provider exclusively owns the connection; the ORM facade and the
/// migration runner borrow it per call and never hold it across operations.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    sender: Sender<Command>,
}

impl ConnectionProvider {
    /// Open the database described by `config` and spawn the worker thread.
    ///
    /// # Errors
    /// Returns `DataAccessError::Connection` if the database cannot be opened
    /// or the worker thread cannot be spawned.
    pub async fn connect(config: &DataConfig) -> Result<Self, DataAccessError> {
        let (sender, receiver) = mpsc::channel::<Command>();
        let (ready_tx, ready_rx) = oneshot::channel();
        let config = config.clone();
        thread::Builder::new()
            .name("parish-sqlite-worker".to_owned())
            .spawn(move || {
                let conn = match open_connection(&config) {
                    Ok(conn) => {
                        let _ = ready_tx.send(Ok(()));
                        conn
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };
                run_worker(&conn, &receiver);
            })
            .map_err(|err| {
                DataAccessError::Connection(format!("failed to spawn SQLite worker thread: {err}"))
            })?;
        ready_rx.await.map_err(|_| {
            DataAccessError::Connection("SQLite worker exited before reporting readiness".into())
        })??;
        Ok(Self { sender })
    }

    fn send_command(&self, command: Command) -> Result<(), DataAccessError> {
        self.sender
            .send(command)
            .map_err(|_| DataAccessError::Connection("SQLite worker closed".into()))
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, DataAccessError>>) -> Command,
        drop_message: &'static str,
    ) -> Result<T, DataAccessError> {
        let (tx, rx) = oneshot::channel();
        self.send_command(build(tx))?;
        rx.await
            .map_err(|_| DataAccessError::Connection(drop_message.into()))?
    }

    /// Execute a multi-statement batch (DDL scripts, transaction control).
    pub(crate) async fn execute_batch(&self, sql: String) -> Result<(), DataAccessError> {
        self.request(
            |respond_to| Command::ExecuteBatch { sql, respond_to },
            "SQLite worker dropped while executing batch",
        )
        .await
    }

    /// Execute a SELECT with positional parameters.
    pub(crate) async fn select(
        &self,
        sql: String,
        params: Vec<Value>,
    ) -> Result<ResultSet, DataAccessError> {
        self.request(
            |respond_to| Command::Select {
                sql,
                params,
                respond_to,
            },
            "SQLite worker dropped while executing select",
        )
        .await
    }

    /// Execute a SELECT with named parameters; placeholders absent from the
    /// statement are skipped rather than rejected.
    pub(crate) async fn select_named(
        &self,
        sql: String,
        params: Vec<(String, Value)>,
    ) -> Result<ResultSet, DataAccessError> {
        self.request(
            |respond_to| Command::SelectNamed {
                sql,
                params,
                respond_to,
            },
            "SQLite worker dropped while executing named select",
        )
        .await
    }

    /// Execute a DML statement; reports affected rows and last insert rowid.
    pub(crate) async fn execute(
        &self,
        sql: String,
        params: Vec<Value>,
    ) -> Result<DmlOutcome, DataAccessError> {
        self.request(
            |respond_to| Command::Execute {
                sql,
                params,
                respond_to,
            },
            "SQLite worker dropped while executing statement",
        )
        .await
    }

    /// Ask the worker to finish its queue and exit. Dropping the last handle
    /// has the same effect.
    pub fn close(&self) {
        let _ = self.sender.send(Command::Shutdown);
    }
}
