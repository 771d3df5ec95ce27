//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where parsing of core values can fail.

use thiserror::Error;

/// Errors raised while parsing or validating core values.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid time value '{0}'")]
    InvalidTime(String),

    #[error("unknown vehicle class '{0}'")]
    UnknownVehicleClass(String),

    #[error("unknown departure procedure '{0}'")]
    UnknownDepartProcedure(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `ts-core`.
pub type CoreResult<T> = Result<T, CoreError>;
