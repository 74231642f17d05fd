//! Error types for protocol operations

use thiserror::Error;

/// Result type alias for protocol operations
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors that can occur while driving the external tool
///
/// Deliberately small: malformed report lines are discarded rather than
/// raised, and a non-zero exit is data (the [`std::process::ExitStatus`] on
/// the drain result), not an error. What remains is the operating-system
/// surface of spawning and reading a child process.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Spawning the tool or reading its output failed at the OS level
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
