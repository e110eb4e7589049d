//! UUIDs stored as text ([`Uuid`]) or as 16-byte blobs ([`BinUuid`]).

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    Dialect, Error,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

/// Length of the hyphenated text form.
const TEXT_LEN: usize = 36;

fn decode_uuid(value: &Value) -> Result<::uuid::Uuid, DecodeError> {
    compatible!(value, DataType::Uuid | DataType::Text | DataType::Blob);
    match value {
        Value::Blob { value, .. } if value.len() == 16 => ::uuid::Uuid::from_slice(value)
            .map_err(|e| DecodeError::Conversion(format!("invalid UUID: {e}"))),
        other => {
            let text = other.as_text()?;
            ::uuid::Uuid::parse_str(text.trim())
                .map_err(|e| DecodeError::Conversion(format!("invalid UUID {text:?}: {e}")))
        }
    }
}

fn now_v1() -> ::uuid::Uuid {
    ::uuid::Uuid::now_v1(&rand::random::<[u8; 6]>())
}

/// A UUID stored in its hyphenated text form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uuid(pub ::uuid::Uuid);

impl Uuid {
    /// A random (version 4) UUID.
    pub fn new_v4() -> Self {
        Self(::uuid::Uuid::new_v4())
    }

    /// A time-based (version 1) UUID with a random node id.
    pub fn new_v1() -> Self {
        Self(now_v1())
    }

    pub fn nil() -> Self {
        Self(::uuid::Uuid::nil())
    }

    pub fn parse(input: &str) -> crate::Result<Self> {
        ::uuid::Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| Error::parse("UUID", input, e))
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Nil UUIDs count as empty.
    pub fn is_empty(&self) -> bool {
        self.is_nil()
    }

    /// Length of the text form.
    pub fn len(&self) -> usize {
        TEXT_LEN
    }
}

impl Display for Uuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for Uuid {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<::uuid::Uuid> for Uuid {
    fn from(uuid: ::uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<BinUuid> for Uuid {
    fn from(uuid: BinUuid) -> Self {
        Self(uuid.0)
    }
}

impl Encode for Uuid {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::tagged_text(self.to_string(), DataType::Uuid))
    }
}

impl<'r> Decode<'r> for Uuid {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        decode_uuid(value).map(Self)
    }
}

impl ColumnType for Uuid {
    fn data_type() -> DataType {
        DataType::Uuid
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        match dialect {
            Dialect::MySql | Dialect::MariaDb => Some("LONGTEXT"),
            Dialect::Postgres => Some("UUID"),
            Dialect::Sqlite => Some("TEXT"),
            Dialect::Unsupported(_) => None,
        }
    }
}

/// A UUID stored as 16 raw bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BinUuid(pub ::uuid::Uuid);

impl BinUuid {
    pub fn new_v4() -> Self {
        Self(::uuid::Uuid::new_v4())
    }

    pub fn new_v1() -> Self {
        Self(now_v1())
    }

    pub fn nil() -> Self {
        Self(::uuid::Uuid::nil())
    }

    pub fn parse(input: &str) -> crate::Result<Self> {
        Uuid::parse(input).map(Self::from)
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn is_empty(&self) -> bool {
        self.is_nil()
    }

    /// Length of the text form.
    pub fn len(&self) -> usize {
        TEXT_LEN
    }

    /// Length of the stored form.
    pub fn len_bytes(&self) -> usize {
        self.0.as_bytes().len()
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Display for BinUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for BinUuid {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<::uuid::Uuid> for BinUuid {
    fn from(uuid: ::uuid::Uuid) -> Self {
        Self(uuid)
    }
}

impl From<Uuid> for BinUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.0)
    }
}

impl Encode for BinUuid {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Blob {
            value: self.0.as_bytes().to_vec(),
            type_info: Some(DataType::Uuid),
        })
    }
}

impl<'r> Decode<'r> for BinUuid {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        decode_uuid(value).map(Self)
    }
}

impl ColumnType for BinUuid {
    fn data_type() -> DataType {
        DataType::Blob
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        match dialect {
            Dialect::MySql | Dialect::MariaDb => Some("BINARY(16)"),
            Dialect::Postgres => Some("BYTEA"),
            Dialect::Sqlite => Some("BLOB"),
            Dialect::Unsupported(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        let id = BinUuid::new_v4();
        assert_eq!(id.len(), 36);
        assert_eq!(id.len_bytes(), 16);
        assert_eq!(id.to_string().len(), id.len());
        assert_eq!(Uuid::new_v4().to_string().len(), 36);
    }

    #[test]
    fn test_nil_is_empty() {
        assert!(Uuid::nil().is_nil());
        assert!(Uuid::nil().is_empty());
        assert!(!BinUuid::new_v4().is_empty());
        assert!(BinUuid::parse("00000000-0000-0000-0000-000000000000").unwrap().is_nil());
    }

    #[test]
    fn test_time_based() {
        let id = Uuid::new_v1();
        assert_eq!(id.0.get_version(), Some(::uuid::Version::Mac));
        assert_eq!(Uuid::decode(&id.encode().unwrap()).unwrap(), id);

        let id = BinUuid::new_v1();
        assert_eq!(id.0.get_version(), Some(::uuid::Version::Mac));
        assert_eq!(BinUuid::decode(&id.encode().unwrap()).unwrap(), id);
        assert_ne!(BinUuid::new_v1(), id);
    }

    #[test]
    fn test_decode_either_storage() {
        let id = Uuid::new_v4();
        let from_blob = Uuid::decode(&BinUuid::from(id).encode().unwrap()).unwrap();
        assert_eq!(from_blob, id);
        let from_text = BinUuid::decode(&id.encode().unwrap()).unwrap();
        assert_eq!(Uuid::from(from_text), id);
        assert!(Uuid::decode(&Value::text("not-a-uuid")).is_err());
        assert!(Uuid::decode(&Value::from(1)).is_err());
    }
}
