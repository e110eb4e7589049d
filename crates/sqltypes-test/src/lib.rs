use anyhow::{anyhow, bail};
use serde_json::Value as Json;
use sqltypes::{
    Dialect, Expression, JsonMode, JsonPath, PathSegment, SetValue, Statement, Value,
    path_segments,
};

/// Every dialect with a rendering.
pub const DIALECTS: [Dialect; 4] = [
    Dialect::MySql,
    Dialect::MariaDb,
    Dialect::Postgres,
    Dialect::Sqlite,
];

/// Render an expression into a fresh statement, failing if it wrote nothing.
pub fn render<E>(dialect: Dialect, expr: &E) -> anyhow::Result<Statement>
where
    E: Expression + ?Sized,
{
    let mut stmt = Statement::new(dialect);
    stmt.build(expr).require_fragment()?;
    Ok(stmt)
}

/// Split a dotted set path into the keys a comparison takes.
pub fn keys_of(path: &str) -> Vec<String> {
    path_segments(path)
        .into_iter()
        .map(|segment| match segment {
            PathSegment::Key(key) => key,
            PathSegment::Index(i) => i.to_string(),
        })
        .collect()
}

/// A single JSON column held in memory, evaluating [`JsonPath`] expressions the way the supported
/// databases do. Stands in for a live database in round-trip tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Json>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document, returning its row index.
    pub fn insert(&mut self, doc: Json) -> usize {
        self.rows.push(doc);
        self.rows.len() - 1
    }

    pub fn get(&self, row: usize) -> Option<&Json> {
        self.rows.get(row)
    }

    /// Apply a `set` expression to one row.
    pub fn update(&mut self, row: usize, path: &JsonPath) -> anyhow::Result<()> {
        let Some(JsonMode::Set { assignments }) = path.mode() else {
            bail!("update needs a set expression, got {:?}", path.mode());
        };
        let doc = self
            .rows
            .get_mut(row)
            .ok_or_else(|| anyhow!("no row {row}"))?;
        for (target, value) in assignments {
            let value = match value {
                SetValue::Value(v) => v.to_json(),
                SetValue::Expr(e) => bail!("cannot evaluate raw SQL {:?}", e.sql()),
            };
            assign(doc, &path_segments(target), value)?;
        }
        Ok(())
    }

    /// Rows matched by a predicate expression, in insertion order.
    pub fn matching(&self, path: &JsonPath) -> anyhow::Result<Vec<usize>> {
        let mode = path.mode().ok_or_else(|| anyhow!("unconfigured expression"))?;
        let mut found = Vec::new();
        for (idx, doc) in self.rows.iter().enumerate() {
            let hit = match mode {
                JsonMode::HasKey { keys } => lookup(doc, keys).is_some(),
                JsonMode::Equals { keys, value } => {
                    lookup(doc, keys).is_some_and(|v| json_equals(v, value))
                }
                JsonMode::Likes { keys, value } => {
                    let pattern = value.as_text()?;
                    lookup(doc, keys)
                        .and_then(Json::as_str)
                        .is_some_and(|text| like(text, pattern))
                }
                JsonMode::Extract { .. } | JsonMode::Set { .. } => {
                    bail!("{mode:?} is not a predicate")
                }
            };
            if hit && !keys_empty(mode) {
                found.push(idx);
            }
        }
        Ok(found)
    }
}

fn keys_empty(mode: &JsonMode) -> bool {
    mode.keys().is_some_and(<[String]>::is_empty)
}

fn lookup<'a>(doc: &'a Json, keys: &[String]) -> Option<&'a Json> {
    keys.iter().try_fold(doc, |current, key| match current {
        Json::Object(map) => map.get(key),
        Json::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Like `JSON_SET` and `jsonb_set(.., true)`: only the final element may be created, and an
/// array grows only when the final index equals its length. A missing parent leaves the document
/// unchanged.
fn assign(doc: &mut Json, path: &[PathSegment], value: Json) -> anyhow::Result<()> {
    let Some((first, rest)) = path.split_first() else {
        *doc = value;
        return Ok(());
    };
    let child = match (first, doc) {
        (PathSegment::Key(key), Json::Object(map)) => {
            if rest.is_empty() {
                map.insert(key.clone(), value);
                return Ok(());
            }
            map.get_mut(key)
        }
        (PathSegment::Index(i), Json::Array(items)) => {
            if rest.is_empty() && *i == items.len() {
                items.push(value);
                return Ok(());
            }
            items.get_mut(*i)
        }
        (segment, other) => bail!("cannot apply {segment:?} to {other}"),
    };
    match child {
        Some(child) => assign(child, rest, value),
        None => Ok(()),
    }
}

/// Compare an extracted JSON value with a bound parameter.
fn json_equals(found: &Json, want: &Value) -> bool {
    match want {
        Value::Null { .. } => found.is_null(),
        Value::Bool { value, .. } => found.as_bool() == Some(*value),
        Value::Integer { value, .. } => {
            found.as_i64() == Some(*value) || found.as_f64() == Some(*value as f64)
        }
        Value::Double { value, .. } => found.as_f64() == Some(*value),
        Value::Text { value, .. } => found.as_str() == Some(value.as_str()),
        Value::Blob { .. } => false,
    }
}

/// SQL `LIKE`: `%` matches any run of characters, `_` exactly one.
pub fn like(text: &str, pattern: &str) -> bool {
    fn go(t: &[char], p: &[char]) -> bool {
        match p.split_first() {
            None => t.is_empty(),
            Some(('%', rest)) => (0..=t.len()).any(|i| go(&t[i..], rest)),
            Some(('_', rest)) => !t.is_empty() && go(&t[1..], rest),
            Some((c, rest)) => t.first() == Some(c) && go(&t[1..], rest),
        }
    }
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    go(&t, &p)
}

// Check the SQL an expression renders to, one test per dialect
#[macro_export]
macro_rules! test_render {
    ($name:ident($expr:expr, $($dialect:ident => $sql:expr),+ $(,)?)) => {
        paste::item! {
            $(
                #[test]
                fn [< test_render_ $name _ $dialect:snake >] () -> anyhow::Result<()> {
                    let stmt = $crate::render(sqltypes::Dialect::$dialect, &$expr)?;
                    assert_eq!(
                        stmt.explain(),
                        $sql,
                        "rendered: {}\narguments: {:?}",
                        stmt.sql(),
                        stmt.arguments()
                    );
                    Ok(())
                }
            )+
        }
    };
}

// Test that stored values decode as expected and that the decoded values survive a round trip
#[macro_export]
macro_rules! test_codec {
    ($name:ident<$ty:ty>($($stored:expr => $value:expr),+ $(,)?)) => {
        paste::item! {
            #[test]
            fn [< test_codec_ $name >] () -> anyhow::Result<()> {
                use sqltypes::{decode::Decode, encode::Encode};

                $(
                    let stored: sqltypes::Value = $stored.into();
                    let decoded = <$ty as Decode<'_>>::decode(&stored)?;
                    assert_eq!(decoded, $value, "decoding {:?}", stored);

                    let encoded = <$ty as Encode>::encode($value)?;
                    let round_trip = <$ty as Decode<'_>>::decode(&encoded)?;
                    assert_eq!(round_trip, $value, "round trip via {:?}", encoded);
                )+

                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like() {
        assert!(like("admin", "adm%"));
        assert!(like("admin", "_dmin"));
        assert!(like("admin", "%"));
        assert!(!like("admin", "user%"));
        assert!(!like("admin", "admi"));
    }

    #[test]
    fn test_set_needs_existing_parents() -> anyhow::Result<()> {
        let mut store = MemoryStore::new();
        let doc = serde_json::json!({"role": "admin", "tags": ["a"]});
        let row = store.insert(doc.clone());
        store.update(
            row,
            &JsonPath::new("attributes")
                .set("flags.active", true)
                .set("tags[3]", "z"),
        )?;
        assert_eq!(store.get(row), Some(&doc));

        store.update(
            row,
            &JsonPath::new("attributes")
                .set("flags", serde_json::json!({}))
                .set("flags.active", true)
                .set("tags[1]", "b"),
        )?;
        assert_eq!(
            store.get(row),
            Some(&serde_json::json!({
                "role": "admin",
                "flags": {"active": true},
                "tags": ["a", "b"],
            }))
        );
        Ok(())
    }
}
