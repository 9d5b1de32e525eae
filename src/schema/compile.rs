//! DDL compiler: renders a [`Blueprint`] into SQLite statements.

use crate::error::DataAccessError;
use crate::types::Value;

use super::blueprint::{Blueprint, BlueprintKind, ColumnDef, ColumnType, DefaultClause, DropOp};

impl Blueprint {
    /// Compile this blueprint to an ordered list of DDL statements.
    ///
    /// CREATE blueprints emit one `CREATE TABLE` followed by `CREATE INDEX`
    /// statements. ALTER blueprints emit destructive changes first, in
    /// dependency-safe order (drop index before drop column), then additive
    /// ones.
    ///
    /// # Errors
    /// `InvalidInput` when the blueprint is empty or mixes operations its
    /// kind does not allow.
    pub fn compile(&self) -> Result<Vec<String>, DataAccessError> {
        match self.kind {
            BlueprintKind::Create => self.compile_create(),
            BlueprintKind::Alter => self.compile_alter(),
        }
    }

    fn compile_create(&self) -> Result<Vec<String>, DataAccessError> {
        if self.columns.is_empty() {
            return Err(DataAccessError::InvalidInput(format!(
                "create blueprint for `{}` declares no columns",
                self.table
            )));
        }
        if !self.drops.is_empty() {
            return Err(DataAccessError::InvalidInput(format!(
                "create blueprint for `{}` cannot drop columns or indexes",
                self.table
            )));
        }
        let columns: Vec<String> = self.columns.iter().map(render_column).collect();
        let mut statements = vec![format!(
            "CREATE TABLE {} ({})",
            self.table,
            columns.join(", ")
        )];
        statements.extend(self.render_indexes());
        Ok(statements)
    }

    fn compile_alter(&self) -> Result<Vec<String>, DataAccessError> {
        if self.columns.is_empty() && self.indexes.is_empty() && self.drops.is_empty() {
            return Err(DataAccessError::InvalidInput(format!(
                "alter blueprint for `{}` declares no changes",
                self.table
            )));
        }
        if self.columns.iter().any(|c| c.primary_key) {
            return Err(DataAccessError::InvalidInput(format!(
                "alter blueprint for `{}` cannot add a primary key column",
                self.table
            )));
        }

        let mut statements = Vec::new();
        // Destructive changes first; indexes must go before the columns they
        // may have been built on.
        for drop in &self.drops {
            if let DropOp::Index(name) = drop {
                statements.push(format!("DROP INDEX IF EXISTS {name}"));
            }
        }
        for drop in &self.drops {
            if let DropOp::Column(name) = drop {
                statements.push(format!("ALTER TABLE {} DROP COLUMN {name}", self.table));
            }
        }
        for column in &self.columns {
            statements.push(format!(
                "ALTER TABLE {} ADD COLUMN {}",
                self.table,
                render_column(column)
            ));
        }
        statements.extend(self.render_indexes());
        Ok(statements)
    }

    fn render_indexes(&self) -> Vec<String> {
        self.indexes
            .iter()
            .map(|index| {
                format!(
                    "CREATE {}INDEX {} ON {} ({})",
                    if index.unique { "UNIQUE " } else { "" },
                    index.name,
                    self.table,
                    index.columns.join(", ")
                )
            })
            .collect()
    }
}

fn render_column(column: &ColumnDef) -> String {
    let mut sql = format!("{} {}", column.name, render_type(&column.ty));
    if column.primary_key {
        sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        return sql;
    }
    if !column.nullable {
        sql.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        sql.push_str(&format!(" DEFAULT {}", render_default(default)));
    }
    if column.unique {
        sql.push_str(" UNIQUE");
    }
    sql
}

fn render_type(ty: &ColumnType) -> String {
    match ty {
        ColumnType::Integer => "INTEGER".to_owned(),
        ColumnType::Float => "REAL".to_owned(),
        ColumnType::Text => "TEXT".to_owned(),
        ColumnType::Varchar(length) => format!("VARCHAR({length})"),
        ColumnType::Boolean => "BOOLEAN".to_owned(),
        ColumnType::Timestamp => "DATETIME".to_owned(),
        ColumnType::Blob => "BLOB".to_owned(),
    }
}

fn render_default(default: &DefaultClause) -> String {
    match default {
        DefaultClause::CurrentTimestamp => "CURRENT_TIMESTAMP".to_owned(),
        DefaultClause::Value(value) => match value {
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => i64::from(*b).to_string(),
            Value::Null => "NULL".to_owned(),
            Value::Text(s) => format!("'{}'", s.replace('\'', "''")),
            Value::Timestamp(dt) => format!("'{}'", dt.format("%F %T")),
            Value::Blob(_) => "NULL".to_owned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_renders_columns_in_declaration_order() {
        let mut bp = Blueprint::create("test_users");
        bp.id();
        bp.string("name", 255);
        bp.string("email", 255).unique();
        bp.integer("age").nullable();
        bp.soft_deletes();
        let statements = bp.compile().unwrap();
        assert_eq!(
            statements,
            vec![
                "CREATE TABLE test_users (id INTEGER PRIMARY KEY AUTOINCREMENT, \
                 name VARCHAR(255) NOT NULL, email VARCHAR(255) NOT NULL UNIQUE, \
                 age INTEGER, deleted BOOLEAN NOT NULL DEFAULT 0)"
            ]
        );
    }

    #[test]
    fn indexes_compile_after_the_table() {
        let mut bp = Blueprint::create("members");
        bp.id();
        bp.string("email", 255);
        bp.index(&["email"]);
        let statements = bp.compile().unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[1],
            "CREATE INDEX idx_members_email ON members (email)"
        );
    }

    #[test]
    fn alter_emits_drops_before_adds_and_index_drops_first() {
        let mut bp = Blueprint::alter("members");
        bp.integer("visit_count").default_value(0);
        bp.drop_column("legacy_code");
        bp.drop_index("idx_members_legacy_code");
        let statements = bp.compile().unwrap();
        assert_eq!(
            statements,
            vec![
                "DROP INDEX IF EXISTS idx_members_legacy_code",
                "ALTER TABLE members DROP COLUMN legacy_code",
                "ALTER TABLE members ADD COLUMN visit_count INTEGER NOT NULL DEFAULT 0",
            ]
        );
    }

    #[test]
    fn empty_blueprints_are_rejected() {
        assert!(Blueprint::create("t").compile().is_err());
        assert!(Blueprint::alter("t").compile().is_err());
    }

    #[test]
    fn text_defaults_are_quoted() {
        let mut bp = Blueprint::create("settings");
        bp.string("locale", 8).default_value("en'US");
        let statements = bp.compile().unwrap();
        assert!(statements[0].contains("DEFAULT 'en''US'"));
    }
}
