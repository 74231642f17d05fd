//! Command keys understood by the external tool

use std::fmt;

/// One of the tool's six commands
///
/// Rendered on the command line as `-<key>`, followed by the archive name
/// and up to two file arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKey {
    /// `lst`: list members; emits `<archive>.html` plus a short header
    List,
    /// `add`: add or replace a member from a source file
    Add,
    /// `xtr`: extract a member to a destination path
    Extract,
    /// `rnm`: rename a member
    Rename,
    /// `del`: delete a member
    Delete,
    /// `rbd`: rebuild the archive; long-running, streams progress pairs
    Rebuild,
}

impl CommandKey {
    /// The tool's short key for this command
    pub fn key(self) -> &'static str {
        match self {
            Self::List => "lst",
            Self::Add => "add",
            Self::Extract => "xtr",
            Self::Rename => "rnm",
            Self::Delete => "del",
            Self::Rebuild => "rbd",
        }
    }

    /// The command-line flag form, `-<key>`
    pub fn flag(self) -> String {
        format!("-{}", self.key())
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flag_rendering() {
        assert_eq!(CommandKey::List.flag(), "-lst");
        assert_eq!(CommandKey::Add.flag(), "-add");
        assert_eq!(CommandKey::Extract.flag(), "-xtr");
        assert_eq!(CommandKey::Rename.flag(), "-rnm");
        assert_eq!(CommandKey::Delete.flag(), "-del");
        assert_eq!(CommandKey::Rebuild.flag(), "-rbd");
    }
}
