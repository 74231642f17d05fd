//! Resumable rebuild progress

use crate::error::Result;
use imgedit_protocol::{CommandReport, ToolInvocation};
use std::process::ExitStatus;

/// A rebuild in flight
///
/// Holds the still-running invocation plus the short report prefix captured
/// before control returned to the caller. Progress arrives as
/// `(name, "done/total")` pairs; the caller pulls until the stream ends and
/// then [`finish`](Self::finish)es, or [`close`](Self::close)s early,
/// killing the tool mid-rebuild.
#[derive(Debug)]
pub struct RebuildHandle {
    invocation: ToolInvocation,
    header: CommandReport,
}

impl RebuildHandle {
    pub(crate) fn new(invocation: ToolInvocation, header: CommandReport) -> Self {
        Self { invocation, header }
    }

    /// Report pairs captured before control returned (at most five)
    pub fn header(&self) -> &CommandReport {
        &self.header
    }

    /// OS process id of the rebuild, while it is running
    pub fn id(&self) -> Option<u32> {
        self.invocation.id()
    }

    /// Next progress pair, `None` once the tool's report ends
    pub async fn next_progress(&mut self) -> Result<Option<(String, String)>> {
        Ok(self.invocation.next_pair().await?)
    }

    /// Exit status if the rebuild already finished, without blocking
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>> {
        Ok(self.invocation.try_wait()?)
    }

    /// Drain any remaining output and wait for the rebuild to exit
    pub async fn finish(self) -> Result<ExitStatus> {
        let (status, _) = self.invocation.drain().await?;
        Ok(status)
    }

    /// Abandon the rebuild, killing the tool
    pub async fn close(self) -> Result<()> {
        Ok(self.invocation.close().await?)
    }
}

/// Percentage complete from a `"done/total"` progress value
///
/// Takes the first whitespace-separated word of the value and reads it as
/// `<done>/<total>`. Anything malformed, and a zero total, reads as complete
/// (`100.0`): the tool's final lines do not always keep the fraction shape.
pub fn progress_percent(value: &str) -> f64 {
    let first_word = value.split_whitespace().next().unwrap_or("");
    let Some((done, total)) = first_word.split_once('/') else {
        return 100.0;
    };
    match (done.parse::<i64>(), total.parse::<i64>()) {
        (Ok(done), Ok(total)) if total != 0 => done as f64 / total as f64 * 100.0,
        _ => 100.0,
    }
}
