//! Archive member entries

use crate::error::Result;
use crate::size::SizeQuantity;
use std::fmt;

/// One member of an archive, as reported by the listing
///
/// The entry set is replaced wholesale on every listing and entries are never
/// mutated individually. Name uniqueness is not enforced at this layer; the
/// tool itself decides what it tolerates inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Member name, taken verbatim from the report
    pub name: String,
    /// Position inside the archive
    pub offset: SizeQuantity,
    /// Member size
    pub size: SizeQuantity,
}

impl ArchiveEntry {
    /// Build an entry from one `(offset, size, name)` listing row
    pub fn from_columns(offset: &str, size: &str, name: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            offset: SizeQuantity::parse(offset)?,
            size: SizeQuantity::parse(size)?,
        })
    }
}

impl fmt::Display for ArchiveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?} ({}) {}>", self.name, self.size, self.offset)
    }
}
