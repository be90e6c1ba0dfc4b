//! Error types for vocabulary extraction.
//!
//! Only structural problems are errors. Classification and paradigm
//! shortfalls are reported as [`crate::diagnostics::Warning`]s instead.

use thiserror::Error;

/// Fatal errors raised while parsing a dictionary export.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML tokenizer error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("Duplicate selector in stylesheet: {0}")]
    DuplicateSelector(String),

    #[error("Malformed declaration: {0}")]
    MalformedDeclaration(String),

    #[error("Malformed stylesheet: {0}")]
    MalformedStyleSheet(String),

    #[error("Unsupported style block: {0}")]
    UnsupportedStyle(String),

    #[error("Missing required element: {0}")]
    MissingElement(String),
}

pub type Result<T> = std::result::Result<T, Error>;
