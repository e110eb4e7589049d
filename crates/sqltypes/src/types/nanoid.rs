use std::fmt::{self, Display, Formatter};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{ColumnType, same_everywhere},
    value::{DataType, Value},
};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated ids.
pub const NANOID_LEN: usize = 12;

/// A short random identifier over `[A-Za-z0-9]`.
///
/// An empty id is replaced by a freshly generated one when encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NanoId(String);

impl NanoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random id.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..NANOID_LEN)
            .map(|_| char::from(ALPHABET[rng.random_range(0..ALPHABET.len())]))
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for NanoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NanoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NanoId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Encode for NanoId {
    fn encode(self) -> Result<Value, EncodeError> {
        let id = if self.is_empty() { Self::generate() } else { self };
        Ok(Value::text(id.0))
    }
}

impl<'r> Decode<'r> for NanoId {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Text | DataType::Blob);
        value.as_text().map(Self::from)
    }
}

impl ColumnType for NanoId {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        same_everywhere(dialect, "VARCHAR(12)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let id = NanoId::generate();
        assert_eq!(id.as_str().len(), NANOID_LEN);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(id, NanoId::generate());
    }

    #[test]
    fn test_empty_encodes_fresh_id() {
        let encoded = NanoId::default().encode().unwrap();
        assert_eq!(encoded.as_text().unwrap().len(), NANOID_LEN);

        let encoded = NanoId::new("abc").encode().unwrap();
        assert_eq!(encoded, Value::text("abc"));
    }
}
