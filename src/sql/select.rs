use crate::error::DataAccessError;
use crate::types::Value;

use super::join::{JoinClause, render_joins};
use super::{Conditions, QueryAndParams, SOFT_DELETE_FILTER, render_named, render_positional};

/// Fluent builder for SELECT statements.
///
/// Produces parameterized SQL plus an ordered binding list; soft-delete
/// filtering is on by default and must be opted out of explicitly.
#[derive(Debug, Clone)]
pub struct SelectBuilder<'a> {
    table: &'a str,
    fields: Vec<String>,
    conditions: Option<&'a Conditions>,
    joins: &'a [JoinClause],
    order_by: Option<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    include_deleted: bool,
}

impl<'a> SelectBuilder<'a> {
    #[must_use]
    pub fn new(table: &'a str) -> Self {
        Self {
            table,
            fields: vec!["*".to_owned()],
            conditions: None,
            joins: &[],
            order_by: None,
            limit: None,
            offset: None,
            include_deleted: false,
        }
    }

    /// Override the projected columns (default `*`).
    #[must_use]
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| (*f).to_owned()).collect();
        self
    }

    #[must_use]
    pub fn conditions(mut self, conditions: &'a Conditions) -> Self {
        self.conditions = Some(conditions);
        self
    }

    #[must_use]
    pub fn joins(mut self, joins: &'a [JoinClause]) -> Self {
        self.joins = joins;
        self
    }

    #[must_use]
    pub fn order_by(mut self, order_by: &str) -> Self {
        self.order_by = Some(order_by.to_owned());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Skip the implicit `deleted = 0` filter.
    #[must_use]
    pub fn include_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    fn head(&self) -> String {
        let mut sql = format!("SELECT {} FROM {}", self.fields.join(", "), self.table);
        sql.push_str(&render_joins(self.joins));
        sql
    }

    fn tail(&self, sql: &mut String) -> Result<(), DataAccessError> {
        if let Some(order_by) = &self.order_by {
            sql.push_str(&format!(" ORDER BY {order_by}"));
        }
        match (self.limit, self.offset) {
            (Some(limit), Some(offset)) => {
                sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}"));
            }
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(_)) => {
                return Err(DataAccessError::InvalidInput(
                    "offset requires a limit".to_owned(),
                ));
            }
            (None, None) => {}
        }
        Ok(())
    }

    fn where_fragments(&self, fragments: &mut Vec<String>) {
        if !self.include_deleted {
            fragments.push(SOFT_DELETE_FILTER.to_owned());
        }
    }

    /// Build with positional `?` placeholders.
    pub fn build(self) -> Result<QueryAndParams, DataAccessError> {
        let mut sql = self.head();
        let mut binds = Vec::new();
        let mut fragments = match self.conditions {
            Some(conditions) => render_positional(conditions, &mut binds)?,
            None => Vec::new(),
        };
        self.where_fragments(&mut fragments);
        if !fragments.is_empty() {
            sql.push_str(&format!(" WHERE {}", fragments.join(" AND ")));
        }
        self.tail(&mut sql)?;
        Ok(QueryAndParams::new(sql, binds))
    }

    /// Build with named placeholders, for join selects whose conditions and
    /// predicates reference a caller-supplied params map. Literal condition
    /// values are given generated names and returned alongside the SQL.
    pub fn build_named(self) -> Result<(String, Vec<(String, Value)>), DataAccessError> {
        let mut sql = self.head();
        let mut binds = Vec::new();
        let mut fragments = match self.conditions {
            Some(conditions) => render_named(conditions, &mut binds),
            None => Vec::new(),
        };
        self.where_fragments(&mut fragments);
        if !fragments.is_empty() {
            sql.push_str(&format!(" WHERE {}", fragments.join(" AND ")));
        }
        self.tail(&mut sql)?;
        Ok((sql, binds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_select_filters_soft_deleted_rows() {
        let q = SelectBuilder::new("members").build().unwrap();
        assert_eq!(q.sql, "SELECT * FROM members WHERE deleted = 0");
        assert!(q.params.is_empty());
    }

    #[test]
    fn include_deleted_drops_the_filter() {
        let q = SelectBuilder::new("members").include_deleted().build().unwrap();
        assert_eq!(q.sql, "SELECT * FROM members");
    }

    #[test]
    fn conditions_and_paging_render_in_order() {
        let conds = Conditions::new().eq("age", 25);
        let q = SelectBuilder::new("members")
            .fields(&["id", "name"])
            .conditions(&conds)
            .order_by("id DESC")
            .limit(10)
            .offset(20)
            .build()
            .unwrap();
        assert_eq!(
            q.sql,
            "SELECT id, name FROM members WHERE age = ? AND deleted = 0 ORDER BY id DESC LIMIT 10 OFFSET 20"
        );
        assert_eq!(q.params, vec![Value::Int(25)]);
    }

    #[test]
    fn offset_without_limit_is_rejected() {
        let err = SelectBuilder::new("members").offset(5).build().unwrap_err();
        assert!(matches!(err, DataAccessError::InvalidInput(_)));
    }

    #[test]
    fn named_build_renders_joins_and_placeholders() {
        let conds = Conditions::new().param("u1.age", ":age");
        let joins = vec![JoinClause::inner(
            "test_users u2",
            "u2.age = u1.age AND u2.id != u1.id",
        )];
        let (sql, binds) = SelectBuilder::new("test_users u1")
            .fields(&["u1.id", "u2.id"])
            .joins(&joins)
            .conditions(&conds)
            .include_deleted()
            .build_named()
            .unwrap();
        assert_eq!(
            sql,
            "SELECT u1.id, u2.id FROM test_users u1 INNER JOIN test_users u2 ON u2.age = u1.age AND u2.id != u1.id WHERE u1.age = :age"
        );
        assert!(binds.is_empty());
    }
}
