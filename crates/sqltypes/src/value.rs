use std::{
    fmt::{self, Display, Formatter},
    str::from_utf8,
};

use crate::error::DecodeError;

/// Storage kinds understood by the codec layer.
///
/// The first six mirror the storage classes every supported database can bind. The rest are
/// tags attached by column types so that renderers can tell, for example, JSON text apart from
/// plain text.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum DataType {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Blob,

    Json,
    Uuid,
    Date,
    Time,
    Datetime,
    Url,
    Inet,
    Cidr,
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl DataType {
    pub fn is_null(&self) -> bool {
        matches!(self, DataType::Null)
    }

    /// Dialect-neutral name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Null => "null",
            DataType::Bool => "bool",
            DataType::Int => "int",
            DataType::Float => "float",
            DataType::Text => "string",
            DataType::Blob => "bytes",
            DataType::Json => "json",
            DataType::Uuid => "uuid",
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::Datetime => "datetime",
            DataType::Url => "url",
            DataType::Inet => "inet",
            DataType::Cidr => "cidr",
        }
    }
}

/// A database value plus optional type information.
///
/// Equality compares payloads only; the `type_info` tag is ignored.
#[derive(Clone, Debug)]
pub enum Value {
    Null {
        type_info: Option<DataType>,
    },
    Bool {
        value: bool,
        type_info: Option<DataType>,
    },
    Integer {
        value: i64,
        type_info: Option<DataType>,
    },
    Double {
        value: f64,
        type_info: Option<DataType>,
    },
    Text {
        value: String,
        type_info: Option<DataType>,
    },
    Blob {
        value: Vec<u8>,
        type_info: Option<DataType>,
    },
}

impl Value {
    pub fn null() -> Self {
        Value::Null { type_info: None }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Value::Text {
            value: value.into(),
            type_info: None,
        }
    }

    /// Text tagged with a specific [`DataType`].
    pub fn tagged_text(value: impl Into<String>, type_info: DataType) -> Self {
        Value::Text {
            value: value.into(),
            type_info: Some(type_info),
        }
    }

    pub fn blob(value: impl Into<Vec<u8>>) -> Self {
        Value::Blob {
            value: value.into(),
            type_info: None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null { .. })
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text { .. })
    }

    pub fn type_info(&self) -> DataType {
        match self {
            Value::Null { type_info } => type_info.unwrap_or(DataType::Null),
            Value::Bool { type_info, .. } => type_info.unwrap_or(DataType::Bool),
            Value::Integer { type_info, .. } => type_info.unwrap_or(DataType::Int),
            Value::Double { type_info, .. } => type_info.unwrap_or(DataType::Float),
            Value::Text { type_info, .. } => type_info.unwrap_or(DataType::Text),
            Value::Blob { type_info, .. } => type_info.unwrap_or(DataType::Blob),
        }
    }

    pub fn bool(&self) -> std::result::Result<bool, DecodeError> {
        match self {
            Value::Bool { value, .. } => Ok(*value),
            Value::Integer { value, .. } => Ok(*value != 0),
            _ => Err(DecodeError::Conversion("not a boolean".into())),
        }
    }

    pub fn int(&self) -> std::result::Result<i32, DecodeError> {
        Ok(i32::try_from(self.int64()?)?)
    }

    /// Integer payload. Numeric text is parsed, matching how drivers convert string columns.
    pub fn int64(&self) -> std::result::Result<i64, DecodeError> {
        match self {
            Value::Integer { value, .. } => Ok(*value),
            Value::Bool { value, .. } => Ok(i64::from(*value)),
            Value::Text { value, .. } => Ok(value.trim().parse::<i64>()?),
            _ => Err(DecodeError::Conversion("not an integer".into())),
        }
    }

    pub fn double(&self) -> std::result::Result<f64, DecodeError> {
        match self {
            Value::Double { value, .. } => Ok(*value),
            Value::Integer { value, .. } => Ok(*value as f64),
            Value::Text { value, .. } => Ok(value.trim().parse::<f64>()?),
            _ => Err(DecodeError::Conversion("not a float".into())),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        match self {
            Value::Blob { value, .. } => value.as_slice(),
            Value::Text { value, .. } => value.as_bytes(),
            _ => &[],
        }
    }

    /// Text payload. UTF-8 blobs are accepted, since several drivers hand text columns back as
    /// raw bytes.
    pub fn as_text(&self) -> std::result::Result<&str, DecodeError> {
        match self {
            Value::Text { value, .. } => Ok(value.as_str()),
            Value::Blob { value, .. } => {
                from_utf8(value).map_err(|e| DecodeError::Conversion(e.to_string()))
            }
            _ => Err(DecodeError::Conversion("not text".into())),
        }
    }

    /// Convert the value to its textual form. Text passes through untouched and NULL stays NULL.
    pub fn stringify(&self) -> Value {
        match self {
            Value::Null { .. } | Value::Text { .. } => self.clone(),
            Value::Bool { value, .. } => Value::text(value.to_string()),
            Value::Integer { value, .. } => Value::text(value.to_string()),
            Value::Double { value, .. } => Value::text(value.to_string()),
            Value::Blob { value, .. } => Value::text(String::from_utf8_lossy(value)),
        }
    }

    /// The JSON document this value stands for.
    ///
    /// Text tagged as [`DataType::Json`] is parsed; other text becomes a JSON string. Blobs become
    /// hex strings, and non-finite doubles become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null { .. } => serde_json::Value::Null,
            Value::Bool { value, .. } => serde_json::Value::Bool(*value),
            Value::Integer { value, .. } => serde_json::Value::from(*value),
            Value::Double { value, .. } => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text {
                value,
                type_info: Some(DataType::Json),
            } => serde_json::from_str(value)
                .unwrap_or_else(|_| serde_json::Value::String(value.clone())),
            Value::Text { value, .. } => serde_json::Value::String(value.clone()),
            Value::Blob { value, .. } => serde_json::Value::String(hex::encode(value)),
        }
    }

    /// Render the value as an SQL literal, for logging and statement explanation.
    pub fn to_sql_literal(&self) -> String {
        match self {
            Value::Null { .. } => "NULL".to_string(),
            Value::Bool { value, .. } => value.to_string(),
            Value::Integer { value, .. } => value.to_string(),
            Value::Double { value, .. } => value.to_string(),
            Value::Text { value, .. } => format!("'{}'", value.replace('\'', "''")),
            Value::Blob { value, .. } => format!("X'{}'", hex::encode_upper(value)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null { .. }, Value::Null { .. }) => true,
            (Value::Bool { value: a, .. }, Value::Bool { value: b, .. }) => a == b,
            (Value::Integer { value: a, .. }, Value::Integer { value: b, .. }) => a == b,
            (Value::Double { value: a, .. }, Value::Double { value: b, .. }) => a == b,
            (Value::Text { value: a, .. }, Value::Text { value: b, .. }) => a == b,
            (Value::Blob { value: a, .. }, Value::Blob { value: b, .. }) => a == b,
            _ => false,
        }
    }
}

macro_rules! value_from_int {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Integer {
                        value: i64::from(value),
                        type_info: None,
                    }
                }
            }
        )+
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool {
            value,
            type_info: None,
        }
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Double {
            value: value.into(),
            type_info: None,
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double {
            value,
            type_info: None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::text(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::blob(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::blob(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_else(Value::null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_type_info() {
        assert_eq!(Value::text("{}"), Value::tagged_text("{}", DataType::Json));
        assert_ne!(Value::text("1"), Value::from(1));
    }

    #[test]
    fn int64_parses_numeric_text() {
        assert_eq!(Value::text("6").int64().unwrap(), 6);
        assert!(Value::text("test").int64().is_err());
    }

    #[test]
    fn sql_literals() {
        assert_eq!(Value::text("it's").to_sql_literal(), "'it''s'");
        assert_eq!(Value::from(true).to_sql_literal(), "true");
        assert_eq!(Value::null().to_sql_literal(), "NULL");
        assert_eq!(Value::blob(vec![0xde, 0xad]).to_sql_literal(), "X'DEAD'");
    }

    #[test]
    fn json_text_is_parsed() {
        let v = Value::tagged_text(r#"{"a":1}"#, DataType::Json);
        assert_eq!(v.to_json(), serde_json::json!({"a": 1}));
        assert_eq!(Value::text("a").to_json(), serde_json::json!("a"));
        assert_eq!(Value::from(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn stringify_scalars() {
        assert_eq!(Value::from(19).stringify(), Value::text("19"));
        assert_eq!(Value::from(false).stringify(), Value::text("false"));
        assert!(Value::null().stringify().is_null());
    }
}
