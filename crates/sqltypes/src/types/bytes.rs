use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

impl Encode for &[u8] {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::blob(self))
    }
}

impl<'r> Decode<'r> for &'r [u8] {
    fn decode(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        compatible!(value, DataType::Blob | DataType::Text);
        Ok(value.bytes())
    }
}

impl Encode for Vec<u8> {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::blob(self))
    }
}

impl<'r> Decode<'r> for Vec<u8> {
    fn decode(value: &'r Value) -> std::result::Result<Self, DecodeError> {
        compatible!(value, DataType::Blob | DataType::Text);
        Ok(value.bytes().to_owned())
    }
}

fn blob_column_type(dialect: &Dialect) -> Option<&'static str> {
    match dialect {
        Dialect::MySql | Dialect::MariaDb => Some("LONGBLOB"),
        Dialect::Postgres => Some("BYTEA"),
        Dialect::Sqlite => Some("BLOB"),
        Dialect::Unsupported(_) => None,
    }
}

impl ColumnType for Vec<u8> {
    fn data_type() -> DataType {
        DataType::Blob
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        blob_column_type(dialect)
    }
}

impl ColumnType for &[u8] {
    fn data_type() -> DataType {
        DataType::Blob
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        blob_column_type(dialect)
    }
}
