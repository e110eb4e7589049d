//! SQL expression fragments with their own bound parameters.
//!
//! An [`Expr`] is spliced into a [`Statement`](crate::Statement) as SQL text rather than bound as
//! a single value. Its placeholders are always written as `?`; the statement rewrites them into
//! the dialect's placeholder syntax when the expression is pushed. Use [`raw`] to embed ad-hoc
//! SQL, which taints the statement it ends up in.

use crate::{Arguments, BuildOutcome, Expression, Statement, Value};

/// A SQL expression fragment with optional bound parameters.
///
/// This type is intentionally not `Encode`; it is meant to be embedded into composed SQL, not
/// bound as a single value.
#[derive(Debug, Clone)]
pub struct Expr {
    /// SQL for the expression fragment.
    pub(crate) sql: String,
    /// Arguments referenced by the expression fragment.
    pub(crate) arguments: Arguments,
    /// Whether the expression is tainted with raw SQL.
    pub(crate) tainted: bool,
}

impl Expr {
    /// A curated fragment whose `?` placeholders are filled from `arguments`, in order.
    pub(crate) fn bound(sql: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            arguments: arguments.into(),
            tainted: false,
        }
    }

    /// Returns the SQL text for this expression.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Returns the arguments referenced by this expression.
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns `true` if this expression includes raw SQL and should be treated as tainted.
    pub fn tainted(&self) -> bool {
        self.tainted
    }
}

impl Expression for Expr {
    fn build(&self, stmt: &mut Statement) -> BuildOutcome {
        stmt.push_expr(self);
        BuildOutcome::Written
    }
}

/// Embed raw SQL as an expression and taint the resulting statement.
pub fn raw(sql: &str) -> Expr {
    Expr {
        sql: sql.to_string(),
        arguments: Arguments::default(),
        tainted: true,
    }
}

/// Embed raw SQL with `?` placeholders bound to `arguments`, tainting the resulting statement.
pub fn raw_with<I, V>(sql: &str, arguments: I) -> Expr
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    Expr {
        sql: sql.to_string(),
        arguments: arguments
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .into(),
        tainted: true,
    }
}

/// The SQL `NULL` literal.
pub fn null() -> Expr {
    Expr::bound("NULL", Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_expr_is_tainted() {
        assert!(raw("1").tainted());
        assert!(raw_with("? + 1", [1]).tainted());
    }

    #[test]
    fn null_expr_is_not_tainted() {
        let expr = null();
        assert_eq!(expr.sql(), "NULL");
        assert!(!expr.tainted());
        assert!(expr.arguments().is_empty());
    }
}
