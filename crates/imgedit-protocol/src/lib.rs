//! Child-process protocol layer for the external IMG archive editor
//!
//! The external tool has no machine-readable interface: every command is a
//! fresh child process whose mixed progress/report output on stdout is the
//! only success signal. This crate treats that output as a de-facto streaming
//! protocol:
//!
//! - [`ToolInvocation`]: one running command, owning the child process and
//!   its line stream jointly
//! - [`report::parse_report_line`]: the `"> label .... value"` line grammar
//! - [`CommandReport`]: ordered label/value pairs drained from one command
//! - [`ProtocolEvent`]: the tagged event view of an invocation
//!
//! Two drain policies cover the tool's command shapes: a full drain that
//! consumes the report and waits for exit (instant commands), and a partial
//! drain that takes a short bounded prefix and hands the still-running
//! invocation back to the caller (the long-running rebuild).
//!
//! The tool signals its own failures only in text, so this layer favors
//! silent degradation: unmatched lines are discarded and an empty report is
//! a valid outcome for the caller to interpret.
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgedit_protocol::{CommandKey, ToolInvocation};
//! use std::path::Path;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let invocation = ToolInvocation::spawn(
//!     Path::new("freimgedcs.exe"),
//!     CommandKey::List,
//!     Path::new("models/gta3.img"),
//!     None,
//!     None,
//! )?;
//! let (status, report) = invocation.drain().await?;
//! println!("exit {status}, {} report fields", report.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod invoke;
pub mod report;

// Re-export main types
pub use command::CommandKey;
pub use error::{ProtocolError, Result};
pub use invoke::{PARTIAL_DRAIN_PAIRS, ProtocolEvent, ToolInvocation};
pub use report::CommandReport;
