use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

impl Encode for &str {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::text(self))
    }
}

impl<'r> Decode<'r> for &'r str {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        compatible!(value, DataType::Text | DataType::Blob);
        value.as_text()
    }
}

impl Encode for String {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::text(self))
    }
}

impl<'r> Decode<'r> for String {
    fn decode(value: &'r Value) -> Result<Self, DecodeError> {
        // Every tagged text kind (JSON, UUID, URL...) is readable as a plain string.
        match value {
            Value::Text { value, .. } => Ok(value.clone()),
            Value::Null { .. } => Err(DecodeError::DataType(DataType::Null)),
            other => {
                compatible!(other, DataType::Blob);
                other.as_text().map(ToOwned::to_owned)
            }
        }
    }
}

fn text_column_type(dialect: &Dialect) -> Option<&'static str> {
    match dialect {
        Dialect::MySql | Dialect::MariaDb => Some("LONGTEXT"),
        Dialect::Postgres | Dialect::Sqlite => Some("TEXT"),
        Dialect::Unsupported(_) => None,
    }
}

impl ColumnType for &str {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        text_column_type(dialect)
    }
}

impl ColumnType for String {
    fn data_type() -> DataType {
        DataType::Text
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        text_column_type(dialect)
    }
}
