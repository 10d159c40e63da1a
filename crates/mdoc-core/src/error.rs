//! Error types

use thiserror::Error;

/// A conversion hook referenced a type the active schema does not declare.
///
/// This means the document schema and the transform table disagree, as
/// opposed to malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("Unknown node type: {0}")]
    UnknownNodeType(String),

    #[error("Unknown mark type: {0}")]
    UnknownMarkType(String),
}

/// Errors surfaced by the public pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Invalid tree JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;
