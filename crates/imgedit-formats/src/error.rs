//! Error types for archive report parsing

use thiserror::Error;

/// Result type alias for format operations
pub type Result<T> = std::result::Result<T, FormatError>;

/// Errors that can occur when parsing tool-reported values
///
/// Most malformed input in this crate is skipped silently; an error is only
/// raised for values the caller explicitly asked to interpret.
#[derive(Debug, Error)]
pub enum FormatError {
    /// A `"<blocks>/<bytes>"` token did not contain two non-negative integers
    #[error("Invalid size token: expected '<blocks>/<bytes>', got {0:?}")]
    InvalidSizeToken(String),
}
