//! Convenience re-exports for application code.

pub use crate::connection::DataConfig;
pub use crate::error::DataAccessError;
pub use crate::migrate::{Migration, MigrationRunner};
pub use crate::orm::DataContext;
pub use crate::results::{ResultSet, Row};
pub use crate::schema::Blueprint;
pub use crate::sql::{Conditions, JoinClause, JoinType, QueryAndParams, SelectBuilder};
pub use crate::types::Value;
