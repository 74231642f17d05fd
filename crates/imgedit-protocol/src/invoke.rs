//! Tool invocation: spawn, line stream, and drain policies

use crate::command::CommandKey;
use crate::error::Result;
use crate::report::{CommandReport, parse_report_line};
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tracing::{debug, trace};

/// How many pairs a partial drain consumes before handing control back
pub const PARTIAL_DRAIN_PAIRS: usize = 5;

/// Tagged view of an invocation's protocol stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolEvent {
    /// The child process is running; carries its OS process id when known
    ProcessStarted(Option<u32>),
    /// One matched label/value pair from the report
    DataPair(String, String),
    /// Blank line or closed output: the report is complete
    EndOfReport,
}

/// One running tool command
///
/// Owns the child process and its stdout line stream jointly, so neither can
/// outlive the other. A handle must drive at most one invocation at a time;
/// this layer provides no locking.
///
/// An invocation left undrained holds the child and its pipe open. Callers
/// that abandon a stream early should [`close`](Self::close) it; as a last
/// resort the child is killed when the invocation is dropped.
#[derive(Debug)]
pub struct ToolInvocation {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    report_done: bool,
    started_emitted: bool,
}

impl ToolInvocation {
    /// Spawn the tool for one command
    ///
    /// Command shape: `[exe, "-<key>", <archive>, arg1?, arg2?]`. When the
    /// archive sits in an existing directory the child runs with that
    /// directory as its working directory, the archive is passed as its base
    /// name, and file arguments are rewritten relative to it when
    /// representable (otherwise passed through unchanged). Spawning never
    /// mutates this process's own working directory.
    pub fn spawn(
        executable: &Path,
        key: CommandKey,
        archive: &Path,
        arg1: Option<&Path>,
        arg2: Option<&Path>,
    ) -> Result<Self> {
        let work_dir = archive
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty() && dir.is_dir());
        let archive_arg: OsString = match (work_dir, archive.file_name()) {
            (Some(_), Some(name)) => name.to_os_string(),
            _ => archive.as_os_str().to_os_string(),
        };

        let mut command = Command::new(executable);
        command.arg(key.flag()).arg(&archive_arg);
        for file_arg in [arg1, arg2].into_iter().flatten() {
            command.arg(relativize(file_arg, work_dir));
        }
        if let Some(dir) = work_dir {
            command.current_dir(dir);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .kill_on_drop(true);

        debug!(%key, archive = %archive.display(), "spawning tool");
        let mut child = command.spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let lines = BufReader::new(stdout).lines();

        Ok(Self {
            child,
            lines,
            report_done: false,
            started_emitted: false,
        })
    }

    /// OS process id of the child, when it is still running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Next trimmed, non-empty report line
    ///
    /// Returns `None` at end-of-report: a blank line, or the tool closing
    /// its output. Later calls keep returning `None`.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        if self.report_done {
            return Ok(None);
        }
        match self.lines.next_line().await? {
            None => {
                self.report_done = true;
                Ok(None)
            }
            Some(raw) => {
                let line = raw.trim();
                if line.is_empty() {
                    self.report_done = true;
                    Ok(None)
                } else {
                    Ok(Some(line.to_string()))
                }
            }
        }
    }

    /// Next `(label, value)` pair, skipping lines outside the grammar
    pub async fn next_pair(&mut self) -> Result<Option<(String, String)>> {
        while let Some(line) = self.next_line().await? {
            if let Some(pair) = parse_report_line(&line) {
                return Ok(Some(pair));
            }
            trace!(line, "discarding unmatched report line");
        }
        Ok(None)
    }

    /// Next protocol event in tagged form
    ///
    /// The first call reports the started process; once the report ends,
    /// every further call yields [`ProtocolEvent::EndOfReport`].
    pub async fn next_event(&mut self) -> Result<ProtocolEvent> {
        if !self.started_emitted {
            self.started_emitted = true;
            return Ok(ProtocolEvent::ProcessStarted(self.id()));
        }
        Ok(match self.next_pair().await? {
            Some((label, value)) => ProtocolEvent::DataPair(label, value),
            None => ProtocolEvent::EndOfReport,
        })
    }

    /// Full drain: consume the report to its end, then wait for exit
    ///
    /// The report is read before waiting so a chatty tool cannot fill the
    /// pipe and stall; the process has exited by the time this returns.
    /// There is no timeout: a hung tool hangs the caller.
    pub async fn drain(mut self) -> Result<(ExitStatus, CommandReport)> {
        let mut report = CommandReport::new();
        while let Some((label, value)) = self.next_pair().await? {
            report.insert(label, value);
        }
        // The report can end at a blank line before the tool exits; swallow
        // whatever trails it so the pipe stays empty until exit.
        while self.lines.next_line().await?.is_some() {}
        let status = self.child.wait().await?;
        Ok((status, report))
    }

    /// Partial drain: at most [`PARTIAL_DRAIN_PAIRS`] pairs, no wait
    ///
    /// Control returns to the caller while the process keeps running; the
    /// invocation stays resumable through [`next_pair`](Self::next_pair) or
    /// [`next_event`](Self::next_event). The caller must eventually finish
    /// draining or [`close`](Self::close) the invocation.
    pub async fn drain_prefix(&mut self) -> Result<CommandReport> {
        let mut report = CommandReport::new();
        for _ in 0..PARTIAL_DRAIN_PAIRS {
            match self.next_pair().await? {
                Some((label, value)) => report.insert(label, value),
                None => break,
            }
        }
        Ok(report)
    }

    /// Exit status if the child has already finished, without blocking
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.child.try_wait()?)
    }

    /// Wait for the child to exit without consuming more output
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        Ok(self.child.wait().await?)
    }

    /// Kill the child and reap it
    ///
    /// The explicit release for a stream abandoned before its end.
    pub async fn close(mut self) -> Result<()> {
        if self.child.try_wait()?.is_none() {
            self.child.kill().await?;
        }
        Ok(())
    }
}

/// Rewrite a file argument relative to the working directory when
/// representable, otherwise pass it through unchanged
fn relativize(file_arg: &Path, work_dir: Option<&Path>) -> PathBuf {
    let Some(dir) = work_dir else {
        return file_arg.to_path_buf();
    };
    match file_arg.strip_prefix(dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => {
            trace!(
                file_arg = %file_arg.display(),
                work_dir = %dir.display(),
                "file argument not under archive directory, passing through"
            );
            file_arg.to_path_buf()
        }
    }
}
