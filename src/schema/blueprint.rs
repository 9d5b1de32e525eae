use crate::types::Value;

/// Column data types understood by the DDL compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
    Varchar(u32),
    Boolean,
    Timestamp,
    Blob,
}

/// Rendered DEFAULT clause source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DefaultClause {
    Value(Value),
    CurrentTimestamp,
}

/// One column declaration inside a blueprint.
///
/// Modifier methods return `&mut Self`, and the blueprint hands out a
/// mutable borrow of the most recently added column only; once the next
/// column is declared, earlier ones can no longer be altered.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub(crate) name: String,
    pub(crate) ty: ColumnType,
    pub(crate) nullable: bool,
    pub(crate) unique: bool,
    pub(crate) primary_key: bool,
    pub(crate) default: Option<DefaultClause>,
}

impl ColumnDef {
    fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_owned(),
            ty,
            nullable: false,
            unique: false,
            primary_key: false,
            default: None,
        }
    }

    /// Allow NULL for this column (columns are NOT NULL by default).
    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = true;
        self
    }

    /// Add a UNIQUE constraint to this column.
    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    /// Set a literal DEFAULT for this column.
    pub fn default_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(DefaultClause::Value(value.into()));
        self
    }

    /// DEFAULT CURRENT_TIMESTAMP.
    pub fn default_now(&mut self) -> &mut Self {
        self.default = Some(DefaultClause::CurrentTimestamp);
        self
    }
}

/// An index declaration.
#[derive(Debug, Clone)]
pub(crate) struct IndexDef {
    pub(crate) name: String,
    pub(crate) columns: Vec<String>,
    pub(crate) unique: bool,
}

/// A destructive ALTER operation.
#[derive(Debug, Clone)]
pub(crate) enum DropOp {
    Column(String),
    Index(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlueprintKind {
    Create,
    Alter,
}

/// Fluent, in-memory description of a table's structure, compiled once to
/// DDL and then discarded.
#[derive(Debug, Clone)]
pub struct Blueprint {
    pub(crate) table: String,
    pub(crate) kind: BlueprintKind,
    pub(crate) columns: Vec<ColumnDef>,
    pub(crate) indexes: Vec<IndexDef>,
    pub(crate) drops: Vec<DropOp>,
}

impl Blueprint {
    /// Blueprint for a new table.
    #[must_use]
    pub fn create(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            kind: BlueprintKind::Create,
            columns: Vec::new(),
            indexes: Vec::new(),
            drops: Vec::new(),
        }
    }

    /// Blueprint altering an existing table. Added columns/indexes and drops
    /// may be mixed; the compiler emits drops first, indexes before the
    /// columns they were built on.
    #[must_use]
    pub fn alter(table: &str) -> Self {
        Self {
            table: table.to_owned(),
            kind: BlueprintKind::Alter,
            columns: Vec::new(),
            indexes: Vec::new(),
            drops: Vec::new(),
        }
    }

    fn add_column(&mut self, name: &str, ty: ColumnType) -> &mut ColumnDef {
        self.columns.push(ColumnDef::new(name, ty));
        self.columns.last_mut().unwrap()
    }

    /// Auto-incrementing integer primary key named `id`.
    pub fn id(&mut self) -> &mut ColumnDef {
        let column = self.add_column("id", ColumnType::Integer);
        column.primary_key = true;
        column
    }

    /// Bounded string column.
    pub fn string(&mut self, name: &str, length: u32) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Varchar(length))
    }

    /// Unbounded text column.
    pub fn text(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Text)
    }

    pub fn integer(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Integer)
    }

    pub fn float(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Float)
    }

    pub fn boolean(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Boolean)
    }

    pub fn timestamp(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Timestamp)
    }

    pub fn blob(&mut self, name: &str) -> &mut ColumnDef {
        self.add_column(name, ColumnType::Blob)
    }

    /// The `deleted` flag used by soft deletion, NOT NULL DEFAULT 0.
    pub fn soft_deletes(&mut self) -> &mut ColumnDef {
        self.boolean("deleted").default_value(false)
    }

    /// `created_at`/`updated_at` bookkeeping columns.
    pub fn timestamps(&mut self) {
        self.timestamp("created_at").default_now();
        self.timestamp("updated_at").nullable();
    }

    /// Declare an index over `columns`, auto-named `idx_<table>_<cols>`.
    pub fn index(&mut self, columns: &[&str]) {
        self.push_index(columns, false);
    }

    /// Declare a unique index over `columns`.
    pub fn unique_index(&mut self, columns: &[&str]) {
        self.push_index(columns, true);
    }

    fn push_index(&mut self, columns: &[&str], unique: bool) {
        let name = format!("idx_{}_{}", self.table, columns.join("_"));
        self.indexes.push(IndexDef {
            name,
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            unique,
        });
    }

    /// Drop a column (ALTER blueprints only; rejected at compile time
    /// otherwise).
    pub fn drop_column(&mut self, name: &str) {
        self.drops.push(DropOp::Column(name.to_owned()));
    }

    /// Drop an index by name.
    pub fn drop_index(&mut self, name: &str) {
        self.drops.push(DropOp::Index(name.to_owned()));
    }
}
