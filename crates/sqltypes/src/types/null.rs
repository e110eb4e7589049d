use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

/// A value plus a validity flag. An invalid value encodes as `NULL`, and `NULL` decodes as an
/// invalid, defaulted value.
///
/// This is [`Option<T>`] for code that wants the payload in place even when it is absent;
/// conversions go both ways.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null<T> {
    pub value: T,
    pub valid: bool,
}

impl<T> Null<T> {
    /// A valid value.
    pub fn new(value: T) -> Self {
        Self { value, valid: true }
    }

    pub fn is_null(&self) -> bool {
        !self.valid
    }

    pub fn as_option(&self) -> Option<&T> {
        self.valid.then_some(&self.value)
    }

    pub fn into_option(self) -> Option<T> {
        self.valid.then_some(self.value)
    }
}

impl<T: Default> Null<T> {
    pub fn null() -> Self {
        Self {
            value: T::default(),
            valid: false,
        }
    }
}

impl<T: Default> From<Option<T>> for Null<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(Self::null, Self::new)
    }
}

impl<T> From<Null<T>> for Option<T> {
    fn from(value: Null<T>) -> Self {
        value.into_option()
    }
}

impl<T: Encode> Encode for Null<T> {
    fn encode(self) -> Result<Value, EncodeError> {
        if self.valid {
            self.value.encode()
        } else {
            Ok(Value::null())
        }
    }
}

impl<'r, T: Decode<'r> + Default> Decode<'r> for Null<T> {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        if value.is_null() {
            return Ok(Self::null());
        }
        T::decode(value).map(Self::new)
    }
}

impl<T: ColumnType> ColumnType for Null<T> {
    fn data_type() -> DataType {
        T::data_type()
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        T::column_type(dialect)
    }
}

impl<T: Serialize> Serialize for Null<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + Default> Deserialize<'de> for Null<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
