//! Column types and dialect-aware JSON path expressions for SQL statement builders.
//!
//! Expressions render into a [`Statement`], which owns the SQL text, the bound [`Arguments`] and
//! the [`Dialect`] everything is rendered for. Column types implement [`Encode`](encode::Encode)
//! and [`Decode`](decode::Decode) against the dialect-neutral [`Value`].

mod arguments;
pub mod decode;
mod dialect;
pub mod encode;
mod error;
pub mod expr;
mod json_path;
mod logger;
mod options;
mod statement;
pub mod types;
mod value;

pub use crate::{
    arguments::Arguments,
    dialect::Dialect,
    error::{DecodeError, EncodeError, Error, Result},
    expr::Expr,
    json_path::{JsonMode, JsonPath, PathSegment, SetValue, json_path, path_segments},
    logger::LogSettings,
    options::Options,
    statement::{BuildOutcome, Expression, SkipReason, Statement},
    types::ColumnType,
    value::{DataType, Value},
};

#[doc(hidden)]
pub use crate::logger::private_level_filter_to_levels;
