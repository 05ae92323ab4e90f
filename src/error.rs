//! # Errors

use thiserror::Error;

/// `gridquery` errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The filter document is malformed and no filter tree was produced.
    #[error("parse error: {0}")]
    Parse(String),

    /// A literal in the filter document has no usable value.
    #[error("invalid value: {0}")]
    Value(String),

    /// An argument is outside its accepted range.
    #[error("invalid argument: {0}")]
    Argument(String),
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Construct an `Error::Parse` error from a string or existing error value.
///
/// It can take either just a string, or a format string with arguments.
///
/// # Example
///
/// ```
/// use gridquery::{parse_err, Result};
///
/// fn root_object(json: &str) -> Result<()> {
///     if !json.trim_start().starts_with('{') {
///         return Err(parse_err!("expected a JSON object, got {json:?}"));
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! parse_err {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Parse(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::Parse(format!($err))
    };
}

/// Construct an `Error::Value` error from a string or existing error value.
#[macro_export]
macro_rules! value_err {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Value(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::Value(format!($err))
    };
}

/// Construct an `Error::Argument` error from a string or existing error
/// value.
#[macro_export]
macro_rules! argument_err {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::Argument(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::Argument(format!($err))
    };
}
