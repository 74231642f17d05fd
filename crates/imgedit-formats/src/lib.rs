//! Value types and report-file parsing for IMG archive tool output
//!
//! The external `freimgedcs` editor describes archives through two textual
//! surfaces: padded `"label .... value"` report lines on stdout, and an HTML
//! file with two tables emitted as a side effect of the list command. This
//! crate holds the types derived from those surfaces:
//!
//! - [`SizeQuantity`]: the tool's `"<blocks>/<bytes>"` token with a cached
//!   human-readable rendering
//! - [`ArchiveEntry`]: one archive member row (name, offset, size)
//! - [`ArchiveMetadata`]: the ordered key/value description of the archive
//! - [`listing`]: the HTML report table extractor
//!
//! Parsing here is deliberately tolerant: the tool has no formal output
//! schema, so rows and values that do not fit the expected shape are skipped
//! rather than turned into errors.

#![warn(missing_docs)]

pub mod entry;
pub mod error;
pub mod listing;
pub mod metadata;
pub mod size;

// Re-export main types
pub use entry::ArchiveEntry;
pub use error::{FormatError, Result};
pub use listing::{ListingTables, parse_listing_report};
pub use metadata::ArchiveMetadata;
pub use size::{SizeQuantity, human_size};
