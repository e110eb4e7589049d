use std::{
    fmt::{self, Display, Formatter},
    ops::Deref,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    Dialect, Error,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{ColumnType, same_everywhere},
    value::{DataType, Value},
};

/// A URL stored as its serialized string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Url(pub ::url::Url);

impl Url {
    pub fn parse(input: &str) -> crate::Result<Self> {
        ::url::Url::parse(input)
            .map(Self)
            .map_err(|e| Error::parse("URL", input, e))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Url {
    type Target = ::url::Url;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::parse(s)
    }
}

impl From<::url::Url> for Url {
    fn from(url: ::url::Url) -> Self {
        Self(url)
    }
}

impl Encode for Url {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::tagged_text(String::from(self.0), DataType::Url))
    }
}

impl<'r> Decode<'r> for Url {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Url | DataType::Text | DataType::Blob);
        let text = value.as_text()?;
        ::url::Url::parse(text)
            .map(Self)
            .map_err(|e| DecodeError::Conversion(format!("invalid URL {text:?}: {e}")))
    }
}

impl ColumnType for Url {
    fn data_type() -> DataType {
        DataType::Url
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        same_everywhere(dialect, "TEXT")
    }
}
