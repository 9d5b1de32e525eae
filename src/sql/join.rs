use std::fmt;

/// Supported join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Left => write!(f, "LEFT"),
            JoinType::Right => write!(f, "RIGHT"),
        }
    }
}

/// One join in a multi-table read: a table reference (optionally aliased,
/// e.g. `"test_users u2"`), a raw ON predicate, and the join type.
///
/// Predicates are rendered verbatim, never parsed; binding happens only in
/// filter values, so predicate text is the caller's responsibility.
#[derive(Debug, Clone)]
pub struct JoinClause {
    pub table: String,
    pub on: String,
    pub join_type: JoinType,
}

impl JoinClause {
    #[must_use]
    pub fn inner(table: &str, on: &str) -> Self {
        Self {
            table: table.to_owned(),
            on: on.to_owned(),
            join_type: JoinType::Inner,
        }
    }

    #[must_use]
    pub fn left(table: &str, on: &str) -> Self {
        Self {
            table: table.to_owned(),
            on: on.to_owned(),
            join_type: JoinType::Left,
        }
    }

    #[must_use]
    pub fn right(table: &str, on: &str) -> Self {
        Self {
            table: table.to_owned(),
            on: on.to_owned(),
            join_type: JoinType::Right,
        }
    }
}

/// Render joins in declaration order; order is caller-authoritative and is
/// never rearranged.
pub(crate) fn render_joins(joins: &[JoinClause]) -> String {
    let mut sql = String::new();
    for join in joins {
        sql.push_str(&format!(
            " {} JOIN {} ON {}",
            join.join_type, join.table, join.on
        ));
    }
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_render_in_declaration_order() {
        let joins = vec![
            JoinClause::inner("orders o", "o.user_id = u.id"),
            JoinClause::left("payments p", "p.order_id = o.id"),
        ];
        assert_eq!(
            render_joins(&joins),
            " INNER JOIN orders o ON o.user_id = u.id LEFT JOIN payments p ON p.order_id = o.id"
        );
    }

    #[test]
    fn join_type_keywords() {
        assert_eq!(JoinType::Inner.to_string(), "INNER");
        assert_eq!(JoinType::Left.to_string(), "LEFT");
        assert_eq!(JoinType::Right.to_string(), "RIGHT");
    }
}
