//! Types for working with errors produced by sqltypes.

use std::{
    convert::Infallible,
    num::{ParseFloatError, ParseIntError, TryFromIntError},
};

use crate::value::DataType;

/// A specialized `Result` type for sqltypes.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning a Rust value into a [`Value`](crate::Value).
#[derive(thiserror::Error, Debug)]
pub enum EncodeError {
    #[error("encoding conversion error: {0}")]
    Conversion(String),
}

/// Errors raised while turning a stored [`Value`](crate::Value) back into a Rust value.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("incompatible source data type: {0}")]
    DataType(DataType),
    #[error("decoding conversion error: {0}")]
    Conversion(String),
}

impl From<Infallible> for DecodeError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}

impl From<TryFromIntError> for DecodeError {
    fn from(err: TryFromIntError) -> Self {
        DecodeError::Conversion(err.to_string())
    }
}

impl From<ParseIntError> for DecodeError {
    fn from(err: ParseIntError) -> Self {
        DecodeError::Conversion(err.to_string())
    }
}

impl From<ParseFloatError> for DecodeError {
    fn from(err: ParseFloatError) -> Self {
        DecodeError::Conversion(err.to_string())
    }
}

impl From<String> for DecodeError {
    fn from(err: String) -> Self {
        DecodeError::Conversion(err)
    }
}

/// Represents all the ways a method can fail within sqltypes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A value could not be encoded for storage.
    #[error("error occurred while encoding: {0}")]
    Encode(#[source] EncodeError),

    /// A stored value could not be decoded.
    #[error("error occurred while decoding: {0}")]
    Decode(#[source] DecodeError),

    /// Text handed to a constructor did not parse as the requested type.
    #[error("failed to parse {kind} from {input:?}: {message}")]
    Parse {
        kind: &'static str,
        input: String,
        message: String,
    },

    /// Invalid configuration, such as an unparsable database URL.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// An expression was built against a dialect it has no rendering for.
    #[error("no rendering for dialect {0:?}")]
    UnsupportedDialect(String),

    /// A JSON path expression was built without any path keys, or with an empty set path.
    #[error("JSON path expression has an empty path")]
    EmptyPath,

    /// A JSON path expression was built before any operation was selected.
    #[error("JSON path expression has no operation")]
    Unconfigured,
}

impl Error {
    pub(crate) fn parse(kind: &'static str, input: &str, message: impl ToString) -> Self {
        Error::Parse {
            kind,
            input: input.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<EncodeError> for Error {
    fn from(error: EncodeError) -> Self {
        Error::Encode(error)
    }
}

impl From<DecodeError> for Error {
    fn from(error: DecodeError) -> Self {
        Error::Decode(error)
    }
}
