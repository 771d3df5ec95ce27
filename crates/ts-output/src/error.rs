//! Error types for ts-output.

use thiserror::Error;

/// Errors that can occur when writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("attribute '{0}' written after the element's content started")]
    AttributeOutsideTag(String),

    #[error("close_tag called with no open element")]
    NoOpenTag,

    #[error("{0} element(s) still open")]
    UnclosedTags(usize),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
