use crate::{
    Dialect,
    decode::Decode,
    encode::Encode,
    error::{DecodeError, EncodeError},
    types::ColumnType,
    value::{DataType, Value},
};

// Numeric text is accepted, matching the string-to-integer conversion drivers perform.
macro_rules! int_codec {
    ($($ty:ty => $mysql:literal, $postgres:literal);+ $(;)?) => {
        $(
            impl Encode for $ty {
                fn encode(self) -> Result<Value, EncodeError> {
                    Ok(Value::Integer {
                        value: i64::from(self),
                        type_info: None,
                    })
                }
            }

            impl<'r> Decode<'r> for $ty {
                fn decode(value: &'r Value) -> std::result::Result<Self, DecodeError> {
                    compatible!(value, DataType::Int | DataType::Bool | DataType::Text);
                    Ok(value.int64()?.try_into()?)
                }
            }

            impl ColumnType for $ty {
                fn data_type() -> DataType {
                    DataType::Int
                }

                fn column_type(dialect: &Dialect) -> Option<&'static str> {
                    match dialect {
                        Dialect::MySql | Dialect::MariaDb => Some($mysql),
                        Dialect::Postgres => Some($postgres),
                        Dialect::Sqlite => Some("INTEGER"),
                        Dialect::Unsupported(_) => None,
                    }
                }
            }
        )+
    };
}

int_codec! {
    i8 => "TINYINT", "SMALLINT";
    i16 => "SMALLINT", "SMALLINT";
    i32 => "INT", "INTEGER";
    i64 => "BIGINT", "BIGINT";
    u8 => "TINYINT UNSIGNED", "SMALLINT";
    u16 => "SMALLINT UNSIGNED", "INTEGER";
    u32 => "INT UNSIGNED", "BIGINT";
}
