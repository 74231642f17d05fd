//! Error types for archive operations

use thiserror::Error;

/// Result type alias for archive operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while operating on an archive
///
/// Tool-side problems (a member that does not exist, a refused add) are not
/// errors here: the tool reports them only in its text, which comes back in
/// the drained report for the caller to inspect. Listing rows that do not
/// parse are logged and skipped, and download failures during tool
/// resolution are logged and skipped per URL, never raised.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Spawning or reading the tool failed
    #[error("Protocol error: {0}")]
    Protocol(#[from] imgedit_protocol::ProtocolError),

    /// Filesystem access around the archive or its report failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A download request failed (caught per URL during resolution)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
