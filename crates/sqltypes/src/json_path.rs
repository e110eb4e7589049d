//! Dialect-aware JSON path expressions.
//!
//! A [`JsonPath`] targets one JSON column and renders one operation on it: a key-existence test,
//! an equality or `LIKE` comparison against the value at a path, a plain extraction, or a series
//! of in-place assignments. The same expression renders for MySQL (and MariaDB), PostgreSQL and
//! SQLite:
//!
//! ```
//! use sqltypes::{Dialect, JsonPath, Statement};
//!
//! let query = JsonPath::new("attributes").has_key(["orgs", "orga"]);
//!
//! let mut stmt = Statement::new(Dialect::MySql);
//! stmt.build(&query).require_fragment()?;
//! assert_eq!(stmt.sql(), "JSON_EXTRACT(`attributes`,?) IS NOT NULL");
//! assert_eq!(
//!     stmt.explain(),
//!     "JSON_EXTRACT(`attributes`,'$.orgs.orga') IS NOT NULL"
//! );
//!
//! let mut stmt = Statement::new(Dialect::Postgres);
//! stmt.build(&query).require_fragment()?;
//! assert_eq!(stmt.sql(), "\"attributes\"::jsonb -> $1 ? $2");
//! # Ok::<(), sqltypes::Error>(())
//! ```
//!
//! Path keys and values are always bound as parameters. Keys are not escaped, so they are
//! expected to be identifiers chosen by the application, not raw user input.

use crate::{BuildOutcome, Dialect, Expression, SkipReason, Statement, Value, expr::Expr, value::DataType};

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Split a dotted path such as `orgs.orga` or `tags[0]` into segments.
///
/// A leading `$` or `$.` is ignored. Bracketed text that is not a number is treated as a key.
pub fn path_segments(path: &str) -> Vec<PathSegment> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let mut segments = Vec::new();

    for part in path.split('.') {
        let (name, mut rest) = match part.find('[') {
            Some(i) => part.split_at(i),
            None => (part, ""),
        };
        if !name.is_empty() {
            segments.push(PathSegment::Key(name.to_string()));
        }
        while let Some(open) = rest.strip_prefix('[') {
            let Some(close) = open.find(']') else {
                segments.push(PathSegment::Key(open.to_string()));
                break;
            };
            let inner = &open[..close];
            segments.push(match inner.parse::<usize>() {
                Ok(i) => PathSegment::Index(i),
                Err(_) => PathSegment::Key(inner.trim_matches('"').to_string()),
            });
            rest = &open[close + 1..];
        }
    }

    segments
}

/// The value assigned by [`JsonPath::set`].
#[derive(Debug, Clone)]
pub enum SetValue {
    /// Bound as a parameter. Text tagged [`DataType::Json`] is inserted as a JSON document.
    Value(Value),
    /// Spliced verbatim, with its own parameters.
    Expr(Expr),
}

impl From<Value> for SetValue {
    fn from(value: Value) -> Self {
        SetValue::Value(value)
    }
}

impl From<Expr> for SetValue {
    fn from(expr: Expr) -> Self {
        SetValue::Expr(expr)
    }
}

impl From<serde_json::Value> for SetValue {
    fn from(doc: serde_json::Value) -> Self {
        SetValue::Value(Value::tagged_text(doc.to_string(), DataType::Json))
    }
}

macro_rules! set_value_from {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for SetValue {
                fn from(value: $ty) -> Self {
                    SetValue::Value(value.into())
                }
            }
        )+
    };
}

set_value_from!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, &str, String);

/// The operation a [`JsonPath`] renders.
#[derive(Debug, Clone)]
pub enum JsonMode {
    /// The path exists.
    HasKey { keys: Vec<String> },
    /// The value at the path equals `value`.
    Equals { keys: Vec<String>, value: Value },
    /// The text at the path matches the `LIKE` pattern `value`.
    Likes { keys: Vec<String>, value: Value },
    /// The value at the path.
    Extract { keys: Vec<String> },
    /// The column with every assignment applied, in order.
    Set { assignments: Vec<(String, SetValue)> },
}

impl JsonMode {
    /// The key path, for modes that take one.
    pub fn keys(&self) -> Option<&[String]> {
        match self {
            JsonMode::HasKey { keys }
            | JsonMode::Equals { keys, .. }
            | JsonMode::Likes { keys, .. }
            | JsonMode::Extract { keys } => Some(keys),
            JsonMode::Set { .. } => None,
        }
    }

    /// True when a key path, or any set path, names no element.
    fn has_empty_path(&self) -> bool {
        match self {
            JsonMode::Set { assignments } => assignments
                .iter()
                .any(|(path, _)| path_segments(path).is_empty()),
            _ => self.keys().is_some_and(<[String]>::is_empty),
        }
    }
}

/// A JSON path expression on one column.
///
/// Each configuration call replaces the previous operation; the last call wins. The exception is
/// [`set`](Self::set), which appends to an existing list of assignments.
#[derive(Debug, Clone)]
pub struct JsonPath {
    column: String,
    mode: Option<JsonMode>,
}

/// Shorthand for [`JsonPath::new`].
pub fn json_path(column: impl Into<String>) -> JsonPath {
    JsonPath::new(column)
}

fn collect_keys<I, K>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = K>,
    K: Into<String>,
{
    keys.into_iter().map(Into::into).collect()
}

impl JsonPath {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            mode: None,
        }
    }

    /// Test that the path exists in the document.
    #[must_use]
    pub fn has_key<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.mode = Some(JsonMode::HasKey {
            keys: collect_keys(keys),
        });
        self
    }

    /// Compare the value at the path with `value`.
    ///
    /// On MySQL and SQLite booleans are written as `true`/`false` literals rather than bound,
    /// since drivers bind them as integers, which never equal a JSON boolean.
    #[must_use]
    pub fn equals<V, I, K>(mut self, value: V, keys: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.mode = Some(JsonMode::Equals {
            keys: collect_keys(keys),
            value: value.into(),
        });
        self
    }

    /// Match the value at the path against a `LIKE` pattern.
    #[must_use]
    pub fn likes<V, I, K>(mut self, pattern: V, keys: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.mode = Some(JsonMode::Likes {
            keys: collect_keys(keys),
            value: pattern.into(),
        });
        self
    }

    /// Extract the value at the path, for use in a projection or comparison.
    #[must_use]
    pub fn extract<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.mode = Some(JsonMode::Extract {
            keys: collect_keys(keys),
        });
        self
    }

    /// Assign `value` at a dotted `path` such as `orgs.orga` or `tags[0]`.
    ///
    /// Repeated calls accumulate. Assignments are applied in call order and are neither merged
    /// nor deduplicated.
    #[must_use]
    pub fn set(mut self, path: impl Into<String>, value: impl Into<SetValue>) -> Self {
        let assignment = (path.into(), value.into());
        match &mut self.mode {
            Some(JsonMode::Set { assignments }) => assignments.push(assignment),
            _ => {
                self.mode = Some(JsonMode::Set {
                    assignments: vec![assignment],
                })
            }
        }
        self
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn mode(&self) -> Option<&JsonMode> {
        self.mode.as_ref()
    }
}

impl Expression for JsonPath {
    fn build(&self, stmt: &mut Statement) -> BuildOutcome {
        let Some(mode) = &self.mode else {
            return BuildOutcome::Skipped(SkipReason::Unconfigured);
        };

        let dialect = stmt.dialect().clone();
        if let Dialect::Unsupported(name) = &dialect {
            return BuildOutcome::Skipped(SkipReason::UnsupportedDialect(name.clone()));
        }

        if mode.has_empty_path() {
            return BuildOutcome::Skipped(SkipReason::EmptyPath);
        }

        match dialect {
            Dialect::Postgres => self.build_postgres(mode, stmt),
            _ => self.build_json_functions(mode, stmt),
        }

        BuildOutcome::Written
    }
}

impl JsonPath {
    /// MySQL, MariaDB and SQLite share the `JSON_EXTRACT`/`JSON_SET` function family.
    fn build_json_functions(&self, mode: &JsonMode, stmt: &mut Statement) {
        match mode {
            JsonMode::HasKey { keys } => {
                self.write_extract(keys, stmt);
                stmt.write_str(" IS NOT NULL");
            }
            JsonMode::Equals { keys, value } => {
                self.write_extract(keys, stmt);
                stmt.write_str(" = ");
                write_scalar(value, stmt);
            }
            JsonMode::Likes { keys, value } => {
                self.write_extract(keys, stmt);
                stmt.write_str(" LIKE ");
                stmt.bind(value.clone());
            }
            JsonMode::Extract { keys } => self.write_extract(keys, stmt),
            JsonMode::Set { assignments } => {
                stmt.write_str("JSON_SET(");
                stmt.write_quoted(&self.column);
                for (path, value) in assignments {
                    stmt.write_char(',');
                    stmt.bind(dollar_path(path));
                    stmt.write_char(',');
                    match value {
                        SetValue::Expr(expr) => stmt.push_expr(expr),
                        SetValue::Value(v) if v.type_info() == DataType::Json => {
                            let doc = json_document(v, stmt.dialect());
                            stmt.push_expr(&doc);
                        }
                        SetValue::Value(v) => write_scalar(v, stmt),
                    }
                }
                stmt.write_char(')');
            }
        }
    }

    fn write_extract(&self, keys: &[String], stmt: &mut Statement) {
        stmt.write_str("JSON_EXTRACT(");
        stmt.write_quoted(&self.column);
        stmt.write_char(',');
        stmt.bind(format!("$.{}", keys.join(".")));
        stmt.write_char(')');
    }

    fn build_postgres(&self, mode: &JsonMode, stmt: &mut Statement) {
        match mode {
            JsonMode::HasKey { keys } => {
                stmt.write_quoted(&self.column);
                stmt.write_str("::jsonb");
                if let Some((last, parents)) = keys.split_last() {
                    for key in parents {
                        stmt.write_str(" -> ");
                        stmt.bind(key.as_str());
                    }
                    stmt.write_str(" ? ");
                    stmt.bind(last.as_str());
                }
            }
            JsonMode::Equals { keys, value } => {
                self.write_extract_path_text(keys, stmt);
                stmt.write_str(" = ");
                stmt.bind(value.stringify());
            }
            JsonMode::Likes { keys, value } => {
                self.write_extract_path_text(keys, stmt);
                stmt.write_str(" LIKE ");
                stmt.bind(value.stringify());
            }
            JsonMode::Extract { keys } => {
                stmt.write_quoted(&self.column);
                stmt.write_str("::jsonb");
                for key in keys {
                    stmt.write_str(" -> ");
                    stmt.bind(key.as_str());
                }
            }
            JsonMode::Set { assignments } => {
                // jsonb_set(jsonb_set(col, p1, v1, true), p2, v2, true): the first assignment is
                // innermost, so assignments apply in call order.
                for _ in assignments {
                    stmt.write_str("jsonb_set(");
                }
                stmt.write_quoted(&self.column);
                stmt.write_str("::jsonb");
                for (path, value) in assignments {
                    stmt.write_char(',');
                    stmt.bind(text_array_path(path));
                    stmt.write_char(',');
                    match value {
                        SetValue::Expr(expr) => stmt.push_expr(expr),
                        SetValue::Value(v) => {
                            stmt.bind(v.to_json().to_string());
                            stmt.write_str("::jsonb");
                        }
                    }
                    stmt.write_str(",true)");
                }
            }
        }
    }

    fn write_extract_path_text(&self, keys: &[String], stmt: &mut Statement) {
        stmt.write_str("json_extract_path_text(");
        stmt.write_quoted(&self.column);
        stmt.write_str("::json,");
        for (idx, key) in keys.iter().enumerate() {
            if idx > 0 {
                stmt.write_char(',');
            }
            stmt.bind(key.as_str());
        }
        stmt.write_char(')');
    }
}

/// Booleans become literals; everything else is bound.
fn write_scalar(value: &Value, stmt: &mut Statement) {
    match value {
        Value::Bool { value, .. } => stmt.write_str(if *value { "true" } else { "false" }),
        _ => stmt.bind(value.clone()),
    }
}

/// Wrap JSON text so the database stores it as a document rather than a string.
fn json_document(value: &Value, dialect: &Dialect) -> Expr {
    let sql = match dialect {
        Dialect::MySql => "CAST(? AS JSON)",
        Dialect::MariaDb => "JSON_EXTRACT(?,'$')",
        _ => "JSON(?)",
    };
    Expr::bound(sql, vec![value.clone()])
}

/// `orgs.orga` becomes `$.orgs.orga`; paths already rooted at `$` are left alone.
fn dollar_path(path: &str) -> String {
    if path.starts_with('$') {
        path.to_string()
    } else {
        format!("$.{path}")
    }
}

/// `orgs.tags[0]` becomes the PostgreSQL text array `{orgs,tags,0}`.
fn text_array_path(path: &str) -> String {
    let items: Vec<String> = path_segments(path)
        .into_iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => quote_array_item(&key),
            PathSegment::Index(i) => i.to_string(),
        })
        .collect();
    format!("{{{}}}", items.join(","))
}

fn quote_array_item(item: &str) -> String {
    let needs_quotes = item.is_empty()
        || item.eq_ignore_ascii_case("null")
        || item
            .chars()
            .any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\') || c.is_whitespace());
    if needs_quotes {
        format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        item.to_string()
    }
}
