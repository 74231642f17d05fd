//! IMG archive operations driven through the external editor tool
//!
//! [`ImgArchive`] is the façade over the whole stack: it resolves the
//! external `freimgedcs` executable (search path, then a previously
//! downloaded copy, then an ordered list of download URLs), spawns it per
//! command through `imgedit-protocol`, and turns its textual and HTML
//! reports into the types from `imgedit-formats`.
//!
//! Operations map one-for-one onto the tool's commands: `list`, `add`,
//! `extract`, `rename`, `delete`, and the long-running `rebuild`, which
//! returns a resumable [`RebuildHandle`] streaming progress pairs while the
//! tool keeps working.
//!
//! The tool reports success and failure only in its own text, so this crate
//! raises errors for operating-system failures (spawn, read, file access)
//! and otherwise hands the drained report back for the caller to interpret.
//!
//! # Usage
//!
//! ```rust,no_run
//! use imgedit_client::{ImgArchive, ListOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let archive = ImgArchive::open("models/gta3.img").await;
//!     let listing = archive.list(ListOptions::default()).await?;
//!
//!     for (key, value) in listing.metadata.iter() {
//!         println!("{key}: {value}");
//!     }
//!     for entry in &listing.entries {
//!         println!("{entry}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod archive;
pub mod error;
pub mod locate;
pub mod rebuild;

// Re-export main types
pub use archive::{ArchiveListing, CommandOutcome, ImgArchive, ListOptions};
pub use error::{ClientError, Result};
pub use locate::{DEFAULT_DOWNLOAD_URLS, TOOL_BINARY_NAMES, ToolLocator};
pub use rebuild::{RebuildHandle, progress_percent};

// Re-export the protocol and format types that appear in this crate's API
pub use imgedit_formats::{ArchiveEntry, ArchiveMetadata, SizeQuantity, human_size};
pub use imgedit_protocol::{CommandKey, CommandReport, PARTIAL_DRAIN_PAIRS, ToolInvocation};
