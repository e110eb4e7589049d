//! JSON documents stored in JSON columns.
//!
//! [`Json<T>`] serializes any serde type, [`JsonMap`] is an untyped object, and [`RawJson`] keeps
//! the document text exactly as stored.

use std::{
    fmt::{self, Display, Formatter},
    ops::{Deref, DerefMut},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::DeserializeOwned};
use serde_json::{Map, value::RawValue};

use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    expr::{self, Expr},
    types::ColumnType,
    value::{DataType, Value},
};

fn json_column_type(dialect: &Dialect) -> Option<&'static str> {
    match dialect {
        Dialect::MySql | Dialect::MariaDb | Dialect::Sqlite => Some("JSON"),
        Dialect::Postgres => Some("JSONB"),
        Dialect::Unsupported(_) => None,
    }
}

/// Wrap encoded JSON text for insertion. MySQL needs an explicit cast to store text as a JSON
/// document; MariaDB has no JSON type and takes the text as-is.
fn json_value_expr(value: Value, dialect: &Dialect) -> Expr {
    let sql = match dialect {
        Dialect::MySql => "CAST(? AS JSON)",
        _ => "?",
    };
    Expr::bound(sql, vec![value])
}

fn json_text(value: &Value) -> Result<&str, DecodeError> {
    compatible!(value, DataType::Json | DataType::Text | DataType::Blob);
    value.as_text()
}

/// A typed JSON document.
///
/// ```
/// use sqltypes::{Value, decode::Decode, encode::Encode, types::Json};
///
/// let encoded = Json(vec![1, 2, 3]).encode()?;
/// assert_eq!(encoded, Value::text("[1,2,3]"));
/// let decoded: Json<Vec<i32>> = Json::decode(&encoded)?;
/// assert_eq!(*decoded, [1, 2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: Serialize> Json<T> {
    /// The expression to insert this document with on `dialect`.
    pub fn value_expr(self, dialect: &Dialect) -> Result<Expr, EncodeError> {
        Ok(json_value_expr(self.encode()?, dialect))
    }
}

impl<T> From<T> for Json<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: Serialize> Encode for Json<T> {
    fn encode(self) -> Result<Value, EncodeError> {
        let text = serde_json::to_string(&self.0)
            .map_err(|e| EncodeError::Conversion(format!("failed to serialize JSON: {e}")))?;
        Ok(Value::tagged_text(text, DataType::Json))
    }
}

impl<'r, T: DeserializeOwned> Decode<'r> for Json<T> {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        let text = json_text(value)?;
        serde_json::from_str(text)
            .map(Json)
            .map_err(|e| DecodeError::Conversion(format!("invalid JSON document: {e}")))
    }
}

impl<T> ColumnType for Json<T> {
    fn data_type() -> DataType {
        DataType::Json
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        json_column_type(dialect)
    }
}

/// An untyped JSON object. A `NULL` column decodes to an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonMap(pub Map<String, serde_json::Value>);

impl JsonMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The expression to insert this object with on `dialect`.
    pub fn value_expr(self, dialect: &Dialect) -> Result<Expr, EncodeError> {
        Ok(json_value_expr(self.encode()?, dialect))
    }
}

impl Deref for JsonMap {
    type Target = Map<String, serde_json::Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for JsonMap {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, serde_json::Value>> for JsonMap {
    fn from(map: Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, serde_json::Value)> for JsonMap {
    fn from_iter<I: IntoIterator<Item = (K, serde_json::Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl Encode for JsonMap {
    fn encode(self) -> Result<Value, EncodeError> {
        let text = serde_json::to_string(&self.0)
            .map_err(|e| EncodeError::Conversion(format!("failed to serialize JSON: {e}")))?;
        Ok(Value::tagged_text(text, DataType::Json))
    }
}

impl<'r> Decode<'r> for JsonMap {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        let text = json_text(value)?;
        serde_json::from_str(text)
            .map(JsonMap)
            .map_err(|e| DecodeError::Conversion(format!("invalid JSON object: {e}")))
    }
}

impl ColumnType for JsonMap {
    fn data_type() -> DataType {
        DataType::Json
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        json_column_type(dialect)
    }
}

/// JSON document text, kept verbatim.
///
/// An empty document encodes as `NULL`, and `NULL` decodes as the document `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawJson(String);

impl RawJson {
    /// Validate `text` as a JSON document.
    pub fn new(text: impl Into<String>) -> crate::Result<Self> {
        let text = text.into();
        if let Err(e) = serde_json::from_str::<&RawValue>(&text) {
            return Err(crate::Error::parse("JSON", &text, e));
        }
        Ok(Self(text))
    }

    /// The document `null`.
    pub fn null() -> Self {
        Self("null".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the document into a typed value.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_str(&self.0).map_err(|e| DecodeError::Conversion(e.to_string()))
    }

    /// The expression to insert this document with on `dialect`. Empty documents insert `NULL`.
    pub fn value_expr(self, dialect: &Dialect) -> Result<Expr, EncodeError> {
        if self.is_empty() {
            return Ok(expr::null());
        }
        Ok(json_value_expr(self.encode()?, dialect))
    }
}

impl Display for RawJson {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RawJson {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_unit();
        }
        let raw: &RawValue = serde_json::from_str(&self.0).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RawJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        Ok(Self(raw.get().to_string()))
    }
}

impl Encode for RawJson {
    fn encode(self) -> Result<Value, EncodeError> {
        if self.is_empty() {
            return Ok(Value::Null {
                type_info: Some(DataType::Json),
            });
        }
        Ok(Value::tagged_text(self.0, DataType::Json))
    }
}

impl<'r> Decode<'r> for RawJson {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Self::null());
        }
        let text = json_text(value)?;
        serde_json::from_str::<&RawValue>(text)
            .map_err(|e| DecodeError::Conversion(format!("invalid JSON document: {e}")))?;
        Ok(Self(text.to_string()))
    }
}

impl ColumnType for RawJson {
    fn data_type() -> DataType {
        DataType::Json
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        json_column_type(dialect)
    }
}
