//! Error types for htmlflow operations.

use thiserror::Error;

/// Errors that can occur while configuring or running a conversion.
///
/// Only caller mistakes and serializer failures surface here. Problems with
/// the shape of the input document are never errors; see
/// [`Diagnostic`](crate::Diagnostic).
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid style value: {0}")]
    InvalidStyle(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
