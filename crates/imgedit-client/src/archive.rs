//! The archive façade: one handle, six operations

use crate::error::Result;
use crate::locate::ToolLocator;
use crate::rebuild::RebuildHandle;
use imgedit_formats::{ArchiveEntry, ArchiveMetadata, parse_listing_report};
use imgedit_protocol::{CommandKey, CommandReport, ToolInvocation};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tracing::{debug, warn};

/// Options for [`ImgArchive::list`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    /// Delete the side-effect HTML report after parsing it
    pub delete_report: bool,
}

/// A parsed listing
#[derive(Debug, Clone)]
pub struct ArchiveListing {
    /// The short header report drained from the list command itself
    pub header: CommandReport,
    /// Archive-level description, backfilled and human-scaled
    pub metadata: ArchiveMetadata,
    /// Member entries, replaced wholesale on every listing
    pub entries: Vec<ArchiveEntry>,
}

/// The outcome of one fully drained command
///
/// A non-zero exit is data, not an error: the tool signals its problems in
/// the report text, so both pieces come back together.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// How the tool process exited
    pub status: ExitStatus,
    /// Every matched report pair, in first-seen label order
    pub report: CommandReport,
}

/// Handle to one archive file, driving the external editor
///
/// Stateless between calls: nothing is cached, every operation spawns a
/// fresh tool process and derives its result from that process's output.
/// A handle must drive one invocation at a time; open a new handle to work
/// on a different archive file.
#[derive(Debug, Clone)]
pub struct ImgArchive {
    archive_path: PathBuf,
    executable: PathBuf,
}

impl ImgArchive {
    /// Open an archive, resolving the tool with the default locator
    ///
    /// Resolution failure is deferred, not raised: the handle keeps an empty
    /// executable path and the first operation fails with the OS spawn
    /// error.
    pub async fn open(archive_path: impl Into<PathBuf>) -> Self {
        let executable = ToolLocator::default().resolve().await.unwrap_or_default();
        Self::with_executable(archive_path, executable)
    }

    /// Open an archive with an explicitly chosen executable
    pub fn with_executable(
        archive_path: impl Into<PathBuf>,
        executable: impl Into<PathBuf>,
    ) -> Self {
        Self {
            archive_path: archive_path.into(),
            executable: executable.into(),
        }
    }

    /// The archive file this handle operates on
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// The resolved tool executable (empty when resolution failed)
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn invoke(
        &self,
        key: CommandKey,
        arg1: Option<&Path>,
        arg2: Option<&Path>,
    ) -> Result<ToolInvocation> {
        Ok(ToolInvocation::spawn(
            &self.executable,
            key,
            &self.archive_path,
            arg1,
            arg2,
        )?)
    }

    async fn run_to_end(
        &self,
        key: CommandKey,
        arg1: Option<&Path>,
        arg2: Option<&Path>,
    ) -> Result<CommandOutcome> {
        let invocation = self.invoke(key, arg1, arg2)?;
        let (status, report) = invocation.drain().await?;
        Ok(CommandOutcome { status, report })
    }

    /// Add or replace a member from a source file
    pub async fn add(&self, source: impl AsRef<Path>) -> Result<CommandOutcome> {
        self.run_to_end(CommandKey::Add, Some(source.as_ref()), None)
            .await
    }

    /// Extract a member to a destination path
    pub async fn extract(
        &self,
        member: &str,
        destination: impl AsRef<Path>,
    ) -> Result<CommandOutcome> {
        self.run_to_end(
            CommandKey::Extract,
            Some(Path::new(member)),
            Some(destination.as_ref()),
        )
        .await
    }

    /// Rename a member
    pub async fn rename(&self, old_name: &str, new_name: &str) -> Result<CommandOutcome> {
        self.run_to_end(
            CommandKey::Rename,
            Some(Path::new(old_name)),
            Some(Path::new(new_name)),
        )
        .await
    }

    /// Delete a member
    pub async fn delete(&self, member: &str) -> Result<CommandOutcome> {
        self.run_to_end(CommandKey::Delete, Some(Path::new(member)), None)
            .await
    }

    /// Rebuild the archive
    ///
    /// The only partially drained command: its output volume and duration
    /// are unbounded, so control returns after at most
    /// [`imgedit_protocol::PARTIAL_DRAIN_PAIRS`] pairs with the tool still
    /// running. The returned handle streams `(name, "done/total")` progress
    /// pairs until the rebuild completes.
    pub async fn rebuild(&self) -> Result<RebuildHandle> {
        let mut invocation = self.invoke(CommandKey::Rebuild, None, None)?;
        let header = invocation.drain_prefix().await?;
        Ok(RebuildHandle::new(invocation, header))
    }

    /// List the archive
    ///
    /// Runs the list command to completion, then reads the side-effect
    /// `<archive>.html` report. When the report is absent the metadata is
    /// synthesized from the filesystem and the entry list is empty; listing
    /// never fails just because the tool wrote nothing.
    pub async fn list(&self, options: ListOptions) -> Result<ArchiveListing> {
        let outcome = self.run_to_end(CommandKey::List, None, None).await?;
        let report_path = listing_report_path(&self.archive_path);

        if !report_path.is_file() {
            debug!(report = %report_path.display(), "listing report absent, synthesizing metadata");
            let mut metadata = ArchiveMetadata::new();
            metadata.ensure_file_fields(&self.archive_path);
            return Ok(ArchiveListing {
                header: outcome.report,
                metadata,
                entries: Vec::new(),
            });
        }

        let bytes = tokio::fs::read(&report_path).await?;
        if options.delete_report {
            tokio::fs::remove_file(&report_path).await?;
        }
        let tables = parse_listing_report(&String::from_utf8_lossy(&bytes));

        let mut metadata = ArchiveMetadata::from_rows(tables.metadata);
        metadata.ensure_file_fields(&self.archive_path);
        metadata.humanize_byte_values();

        let mut entries = Vec::new();
        for row in tables.contents.iter().skip(1) {
            let [offset, size, name, ..] = row.as_slice() else {
                warn!(cells = row.len(), "skipping short member row");
                continue;
            };
            match ArchiveEntry::from_columns(offset, size, name) {
                Ok(entry) => entries.push(entry),
                Err(error) => warn!(%error, name, "skipping unparsable member row"),
            }
        }

        Ok(ArchiveListing {
            header: outcome.report,
            metadata,
            entries,
        })
    }
}

/// The report file the list command writes next to the archive
fn listing_report_path(archive: &Path) -> PathBuf {
    let mut raw = archive.as_os_str().to_os_string();
    raw.push(".html");
    PathBuf::from(raw)
}
