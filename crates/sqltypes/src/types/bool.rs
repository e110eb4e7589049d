use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::{ColumnType, same_everywhere},
    value::{DataType, Value},
};

impl Encode for bool {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Bool {
            value: self,
            type_info: None,
        })
    }
}

impl<'r> Decode<'r> for bool {
    fn decode(value: &'r Value) -> std::result::Result<bool, DecodeError> {
        compatible!(value, DataType::Bool | DataType::Int);
        value.bool()
    }
}

impl ColumnType for bool {
    fn data_type() -> DataType {
        DataType::Bool
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        same_everywhere(dialect, "BOOLEAN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_from_integer() {
        let v = Value::from(1);
        assert!(bool::decode(&v).unwrap());
        assert!(!bool::decode(&Value::from(0)).unwrap());
        assert!(bool::decode(&Value::text("true")).is_err());
    }
}
