use std::result::Result as StdResult;

use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

impl Encode for f32 {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Double {
            value: self.into(),
            type_info: None,
        })
    }
}

impl<'r> Decode<'r> for f32 {
    fn decode(value: &'r Value) -> StdResult<Self, DecodeError> {
        compatible!(value, DataType::Float | DataType::Int | DataType::Text);
        Ok(value.double()? as Self)
    }
}

impl Encode for f64 {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(Value::Double {
            value: self,
            type_info: None,
        })
    }
}

impl<'r> Decode<'r> for f64 {
    fn decode(value: &'r Value) -> StdResult<Self, DecodeError> {
        compatible!(value, DataType::Float | DataType::Int | DataType::Text);
        value.double()
    }
}

fn float_column_type(
    dialect: &Dialect,
    mysql: &'static str,
    postgres: &'static str,
) -> Option<&'static str> {
    match dialect {
        Dialect::MySql | Dialect::MariaDb => Some(mysql),
        Dialect::Postgres => Some(postgres),
        Dialect::Sqlite => Some("REAL"),
        Dialect::Unsupported(_) => None,
    }
}

impl ColumnType for f32 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        float_column_type(dialect, "FLOAT", "REAL")
    }
}

impl ColumnType for f64 {
    fn data_type() -> DataType {
        DataType::Float
    }

    fn column_type(dialect: &Dialect) -> Option<&'static str> {
        float_column_type(dialect, "DOUBLE", "DOUBLE PRECISION")
    }
}

#[cfg(test)]
mod tests {
    use std::{f32::consts::PI, f64::consts::E};

    use super::*;

    #[test]
    fn test_reference_encode() {
        let value = PI;
        let result = value.encode().unwrap();
        if let Value::Double { value: encoded, .. } = result {
            assert!((encoded - value as f64).abs() < 1e-6);
        } else {
            panic!("Expected Double value");
        }

        let result = E.encode().unwrap();
        if let Value::Double { value: encoded, .. } = result {
            assert!((encoded - E).abs() < f64::EPSILON);
        } else {
            panic!("Expected Double value");
        }
    }

    #[test]
    fn test_decode_widens_integers() {
        assert_eq!(f64::decode(&Value::from(3)).unwrap(), 3.0);
        assert_eq!(f64::decode(&Value::text("1.5")).unwrap(), 1.5);
    }
}
