//! Provides [`Encode`] for encoding values for the database.
use crate::{Value, error::EncodeError};

/// Encode a single value to be sent to the database.
pub trait Encode {
    /// Converts `self` into the [`Value`] that is bound or stored for it, consuming the value.
    fn encode(self) -> Result<Value, EncodeError>
    where
        Self: Sized;
}

/// Marker trait for primitive types that can be encoded by reference
pub trait PrimitiveEncode: Encode + Copy + 'static {}

impl PrimitiveEncode for bool {}
impl PrimitiveEncode for i8 {}
impl PrimitiveEncode for i16 {}
impl PrimitiveEncode for i32 {}
impl PrimitiveEncode for i64 {}
impl PrimitiveEncode for u8 {}
impl PrimitiveEncode for u16 {}
impl PrimitiveEncode for u32 {}
impl PrimitiveEncode for f32 {}
impl PrimitiveEncode for f64 {}

impl<T> Encode for &T
where
    T: PrimitiveEncode,
{
    fn encode(self) -> Result<Value, EncodeError> {
        (*self).encode()
    }
}

impl<T> Encode for Option<T>
where
    T: Encode,
{
    fn encode(self) -> Result<Value, EncodeError> {
        if let Some(v) = self {
            v.encode()
        } else {
            Ok(Value::Null { type_info: None })
        }
    }
}

impl Encode for Value {
    fn encode(self) -> Result<Value, EncodeError> {
        Ok(self)
    }
}
