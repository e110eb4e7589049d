use std::fmt::{self, Display, Formatter};

use crate::{
    Arguments, Dialect, Error, Options, Result, Value, encode::Encode, expr::Expr,
    logger::RenderLogger,
};

/// Why an expression wrote nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The statement's dialect has no rendering for this expression.
    UnsupportedDialect(String),
    /// A key path, or a set path, names no element.
    EmptyPath,
    /// No operation was selected on the expression.
    Unconfigured,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnsupportedDialect(name) => write!(f, "unsupported dialect {name}"),
            SkipReason::EmptyPath => f.write_str("empty path"),
            SkipReason::Unconfigured => f.write_str("unconfigured"),
        }
    }
}

/// What building an [`Expression`] did to the statement.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutcome {
    /// A fragment (possibly with arguments) was appended.
    Written,
    /// Nothing was appended.
    Skipped(SkipReason),
}

impl BuildOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, BuildOutcome::Written)
    }

    /// Turn a skipped build into an error, for callers that treat "no fragment" as a bug.
    pub fn require_fragment(self) -> Result<()> {
        match self {
            BuildOutcome::Written => Ok(()),
            BuildOutcome::Skipped(SkipReason::UnsupportedDialect(name)) => {
                Err(Error::UnsupportedDialect(name))
            }
            BuildOutcome::Skipped(SkipReason::EmptyPath) => Err(Error::EmptyPath),
            BuildOutcome::Skipped(SkipReason::Unconfigured) => Err(Error::Unconfigured),
        }
    }
}

impl Display for BuildOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BuildOutcome::Written => f.write_str("written"),
            BuildOutcome::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

/// Something that renders itself into a [`Statement`].
pub trait Expression {
    /// Append this expression's SQL and arguments to `stmt`.
    fn build(&self, stmt: &mut Statement) -> BuildOutcome;
}

impl<E> Expression for &E
where
    E: Expression + ?Sized,
{
    fn build(&self, stmt: &mut Statement) -> BuildOutcome {
        (**self).build(stmt)
    }
}

/// Incrementally build a SQL statement with bound parameters for one dialect.
///
/// Identifiers are quoted and placeholders numbered according to the dialect, so expressions
/// never need to know either rule.
#[derive(Debug, Clone, Default)]
pub struct Statement {
    /// Accumulated SQL string.
    sql: String,
    /// Bound arguments.
    arguments: Arguments,
    /// Dialect and logging configuration.
    options: Options,
    /// Whether the statement is tainted with raw SQL.
    tainted: bool,
}

impl Statement {
    /// Create an empty statement for a dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self::with_options(Options::new(dialect))
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            sql: String::new(),
            arguments: Arguments::default(),
            options,
            tainted: false,
        }
    }

    pub fn dialect(&self) -> &Dialect {
        &self.options.dialect
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    /// Returns `true` if raw SQL has been pushed into this statement.
    pub fn tainted(&self) -> bool {
        self.tainted
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Append SQL text.
    pub fn write_str(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    pub fn write_char(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Append an identifier, quoted for the dialect.
    pub fn write_quoted(&mut self, ident: &str) {
        let quoted = self.options.dialect.quote_identifier(ident);
        self.sql.push_str(&quoted);
    }

    /// Append raw SQL and mark the statement as tainted.
    pub fn push_raw(&mut self, raw: &str) {
        self.sql.push_str(raw);
        self.tainted = true;
    }

    /// Bind an already encoded value and append its placeholder.
    pub fn bind(&mut self, value: impl Into<Value>) {
        self.arguments.push(value.into());
        self.write_placeholder();
    }

    /// Encode and bind a value, appending its placeholder.
    pub fn push_bind<T: Encode>(&mut self, value: T) -> Result<()> {
        self.arguments.add(value)?;
        self.write_placeholder();
        Ok(())
    }

    fn write_placeholder(&mut self) {
        if self.options.dialect.numbered_placeholders() {
            self.sql.push('$');
            self.sql.push_str(&self.arguments.len().to_string());
        } else {
            self.sql.push('?');
        }
    }

    /// Splice an [`Expr`] into the statement.
    ///
    /// Each `?` outside quotes consumes the next argument of the expression and is rewritten into
    /// the dialect's placeholder. Once the arguments run out, any further `?` is copied as-is, so
    /// raw PostgreSQL such as `data ? 'key'` survives.
    pub fn push_expr(&mut self, expr: &Expr) {
        let mut args = expr.arguments.iter();
        let mut quote: Option<char> = None;

        for c in expr.sql.chars() {
            match (quote, c) {
                (Some(q), c) if c == q => {
                    quote = None;
                    self.sql.push(c);
                }
                (Some(_), c) => self.sql.push(c),
                (None, '\'' | '"' | '`') => {
                    quote = Some(c);
                    self.sql.push(c);
                }
                (None, '?') => match args.next() {
                    Some(value) => self.bind(value.clone()),
                    None => self.sql.push('?'),
                },
                (None, c) => self.sql.push(c),
            }
        }

        self.tainted |= expr.tainted;
    }

    /// Render an expression into this statement and log the fragment it wrote.
    pub fn build<E>(&mut self, expr: &E) -> BuildOutcome
    where
        E: Expression + ?Sized,
    {
        let sql_start = self.sql.len();
        let args_start = self.arguments.len();

        let outcome = expr.build(self);

        let logger = RenderLogger::new(self.options.dialect.name(), &self.options.log_settings);
        logger.finish(
            &outcome,
            &self.sql[sql_start..],
            self.arguments.len() - args_start,
        );
        outcome
    }

    /// The SQL with every placeholder replaced by its argument as a literal.
    ///
    /// For display only; the result is not meant to be executed.
    pub fn explain(&self) -> String {
        let args = self.arguments.as_slice();
        let numbered = self.options.dialect.numbered_placeholders();
        let mut out = String::with_capacity(self.sql.len());
        let mut next = 0;
        let mut quote: Option<char> = None;
        let mut chars = self.sql.chars().peekable();

        while let Some(c) = chars.next() {
            match (quote, c) {
                (Some(q), c) if c == q => {
                    quote = None;
                    out.push(c);
                }
                (Some(_), c) => out.push(c),
                (None, '\'' | '"' | '`') => {
                    quote = Some(c);
                    out.push(c);
                }
                (None, '?') if !numbered => {
                    match args.get(next) {
                        Some(value) => out.push_str(&value.to_sql_literal()),
                        None => out.push('?'),
                    }
                    next += 1;
                }
                (None, '$') if numbered && chars.peek().is_some_and(char::is_ascii_digit) => {
                    let mut digits = String::new();
                    while let Some(d) = chars.next_if(char::is_ascii_digit) {
                        digits.push(d);
                    }
                    match digits
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|i| args.get(i))
                    {
                        Some(value) => out.push_str(&value.to_sql_literal()),
                        None => {
                            out.push('$');
                            out.push_str(&digits);
                        }
                    }
                }
                (None, c) => out.push(c),
            }
        }

        out
    }

    /// Consume the statement, returning its SQL and arguments.
    pub fn into_parts(self) -> (String, Arguments) {
        (self.sql, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{raw, raw_with};

    #[test]
    fn placeholders_follow_dialect() {
        let mut stmt = Statement::new(Dialect::Postgres);
        stmt.write_str("a = ");
        stmt.bind(1);
        stmt.write_str(" AND b = ");
        stmt.bind("x");
        assert_eq!(stmt.sql(), "a = $1 AND b = $2");

        let mut stmt = Statement::new(Dialect::MySql);
        stmt.write_str("a = ");
        stmt.bind(1);
        assert_eq!(stmt.sql(), "a = ?");
    }

    #[test]
    fn push_expr_renumbers_placeholders() {
        let mut stmt = Statement::new(Dialect::Postgres);
        stmt.bind(0);
        stmt.write_str(", ");
        stmt.push_expr(&raw_with("? + '?' + ?", [1, 2]));
        assert_eq!(stmt.sql(), "$1, $2 + '?' + $3");
        assert_eq!(stmt.arguments().len(), 3);
        assert!(stmt.tainted());
    }

    #[test]
    fn push_expr_keeps_unbound_question_marks() {
        let mut stmt = Statement::new(Dialect::Postgres);
        stmt.push_expr(&raw("data::jsonb ? 'key'"));
        assert_eq!(stmt.sql(), "data::jsonb ? 'key'");
    }

    #[test]
    fn explain_inlines_arguments() {
        let mut stmt = Statement::new(Dialect::Sqlite);
        stmt.write_str("SELECT '?', ");
        stmt.bind("it's");
        stmt.write_str(", ");
        stmt.bind(true);
        assert_eq!(stmt.explain(), "SELECT '?', 'it''s', true");

        let mut stmt = Statement::new(Dialect::Postgres);
        for i in 0..11 {
            stmt.bind(i);
            stmt.write_char(' ');
        }
        assert_eq!(stmt.explain(), "0 1 2 3 4 5 6 7 8 9 10 ");
    }

    #[test]
    fn require_fragment_maps_skips_to_errors() {
        assert!(BuildOutcome::Written.require_fragment().is_ok());
        assert!(matches!(
            BuildOutcome::Skipped(SkipReason::EmptyPath).require_fragment(),
            Err(Error::EmptyPath)
        ));
        assert!(matches!(
            BuildOutcome::Skipped(SkipReason::UnsupportedDialect("oracle".into()))
                .require_fragment(),
            Err(Error::UnsupportedDialect(name)) if name == "oracle"
        ));
    }
}
