//! Conversions between Rust types and database values.
//!
//! # Types
//!
//! | Rust type                   | MySQL          | PostgreSQL | SQLite       |
//! |-----------------------------|----------------|------------|--------------|
//! | `bool`                      | BOOLEAN        | BOOLEAN    | BOOLEAN      |
//! | `i8`                        | TINYINT        | SMALLINT   | INTEGER      |
//! | `i16`                       | SMALLINT       | SMALLINT   | INTEGER      |
//! | `i32`                       | INT            | INTEGER    | INTEGER      |
//! | `i64`                       | BIGINT         | BIGINT     | INTEGER      |
//! | `u8`                        | TINYINT UNSIGNED  | SMALLINT | INTEGER     |
//! | `u16`                       | SMALLINT UNSIGNED | INTEGER  | INTEGER     |
//! | `u32`                       | INT UNSIGNED   | BIGINT     | INTEGER      |
//! | `f32`                       | FLOAT          | REAL       | REAL         |
//! | `f64`                       | DOUBLE         | DOUBLE PRECISION | REAL   |
//! | `&str`, [`String`]          | LONGTEXT       | TEXT       | TEXT         |
//! | `&[u8]`, `Vec<u8>`          | LONGBLOB       | BYTEA      | BLOB         |
//! | [`Json<T>`], [`JsonMap`], [`RawJson`] | JSON | JSONB      | JSON         |
//! | [`Uuid`]                    | LONGTEXT       | UUID       | TEXT         |
//! | [`BinUuid`]                 | BINARY(16)     | BYTEA      | BLOB         |
//! | [`Date`]                    | DATE           | DATE       | DATE         |
//! | [`Time`]                    | TIME           | TIME       | TIME         |
//! | [`Url`]                     | TEXT           | TEXT       | TEXT         |
//! | [`Cidr`]                    | VARCHAR(43)    | CIDR       | TEXT         |
//! | [`Inet`]                    | VARCHAR(39)    | INET       | TEXT         |
//! | [`NanoId`]                  | VARCHAR(12)    | VARCHAR(12) | VARCHAR(12) |
//!
//! `Null<T>` takes the column type of `T`.
//!
//! #### Note: Unsigned Integers
//!
//! `u8`, `u16` and `u32` are widened to `i64`. There is no `u64` support, since no supported
//! database can store the full range in a signed 64-bit column without changing its meaning.
//!
//! # Nullable
//!
//! `Option<T>` is supported where `T` implements `Encode` or `Decode`, and represents a
//! potentially `NULL` value. [`Null<T>`] carries the same information as a value plus a validity
//! flag.

use crate::{Dialect, value::DataType};

macro_rules! compatible {
    ($x:expr, $($y:path)|+) => {
        let t = $x.type_info();
        if !t.is_null() && !matches!(t, $($y)|+) {
            return Err(DecodeError::DataType(t))
        }
    };
}

/// The column type used to store a Rust type.
pub trait ColumnType {
    /// The storage kind values of this type encode to.
    fn data_type() -> DataType;

    /// The DDL column type for a dialect, or `None` if the dialect has none.
    fn column_type(dialect: &Dialect) -> Option<&'static str>;
}

pub mod json;
pub mod nanoid;
pub mod net;
pub mod null;
pub mod time;
pub mod url;
pub mod uuid;

mod bool;
mod bytes;
mod float;
mod int;
mod str;

pub use self::{
    json::{Json, JsonMap, RawJson},
    nanoid::NanoId,
    net::{Cidr, Inet},
    null::Null,
    time::{Date, Time},
    url::Url,
    uuid::{BinUuid, Uuid},
};

/// Shorthand for column types that are the same in every supported dialect.
fn same_everywhere(dialect: &Dialect, ddl: &'static str) -> Option<&'static str> {
    dialect.is_supported().then_some(ddl)
}
