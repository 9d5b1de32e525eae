//! Data access core for the Parish church-management application.
//!
//! Three subsystems, layered leaf-first:
//!
//! - [`sql`] translates structured CRUD/join requests into parameterized
//!   SQL text plus an ordered binding list;
//! - [`orm`] is the [`orm::DataContext`] facade: CRUD, soft deletion,
//!   transaction control, and the raw-SQL escape hatch, all against one
//!   worker-owned SQLite connection ([`connection`]);
//! - [`schema`] + [`migrate`] provide a fluent table [`schema::Blueprint`]
//!   compiled to DDL, and a ledger-tracked forward/backward migration
//!   runner.
//!
//! ```no_run
//! use parish_data::prelude::*;
//!
//! # async fn demo() -> Result<(), DataAccessError> {
//! let mut ctx = DataContext::connect(&DataConfig::memory()).await?;
//! let member = ctx
//!     .insert("members", &[("name", Value::from("Ada")), ("deleted", Value::Bool(false))])
//!     .await?;
//! let found = ctx
//!     .get_where("members", &Conditions::new().eq("id", member.get("id").unwrap().clone()))
//!     .await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod error;
pub mod migrate;
pub mod orm;
pub mod prelude;
pub mod results;
pub mod schema;
pub mod sql;
pub mod types;

pub use connection::DataConfig;
pub use error::DataAccessError;
pub use orm::DataContext;
