//! Integration tests driving a scripted stand-in for the external tool
#![cfg(unix)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use imgedit_protocol::{CommandKey, PARTIAL_DRAIN_PAIRS, ProtocolEvent, ToolInvocation};
use pretty_assertions::assert_eq;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-imgedcs");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("script should be written");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("script should be executable");
    path
}

#[tokio::test]
async fn full_drain_collects_report_and_waits_for_exit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("model.img");
    std::fs::write(&archive, b"").expect("archive placeholder");
    let tool = fake_tool(
        dir.path(),
        r#"echo "FREE IMG editor"
echo "> Archive Name ....... model.img"
echo "> Files ....... 12"
echo "> Archive Name ....... model2.img""#,
    );

    let invocation = ToolInvocation::spawn(&tool, CommandKey::List, &archive, None, None)
        .expect("spawn should succeed");
    let (status, report) = invocation.drain().await.expect("drain should succeed");

    assert!(status.success());
    let labels: Vec<&str> = report.labels().collect();
    assert_eq!(labels, vec!["Archive Name", "Files"]);
    assert_eq!(report.get("Archive Name"), Some("model2.img"));
}

#[tokio::test]
async fn blank_line_ends_the_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("model.img");
    let tool = fake_tool(
        dir.path(),
        r#"echo "> Files ....... 12"
echo ""
echo "> After Blank ....... ignored""#,
    );

    let invocation = ToolInvocation::spawn(&tool, CommandKey::List, &archive, None, None)
        .expect("spawn should succeed");
    let (status, report) = invocation.drain().await.expect("drain should succeed");

    assert!(status.success());
    assert_eq!(report.len(), 1);
    assert_eq!(report.get("Files"), Some("12"));
    assert_eq!(report.get("After Blank"), None);
}

#[tokio::test]
async fn partial_drain_leaves_the_process_running() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("model.img");
    let tool = fake_tool(
        dir.path(),
        r#"i=1
while [ $i -le 8 ]; do
  echo "> file$i ....... $i/8"
  i=$((i+1))
done
sleep 30"#,
    );

    let mut invocation = ToolInvocation::spawn(&tool, CommandKey::Rebuild, &archive, None, None)
        .expect("spawn should succeed");
    let report = invocation
        .drain_prefix()
        .await
        .expect("prefix drain should succeed");

    assert_eq!(report.len(), PARTIAL_DRAIN_PAIRS);
    assert_eq!(report.get("file5"), Some("5/8"));
    assert!(
        invocation
            .try_wait()
            .expect("try_wait should succeed")
            .is_none(),
        "process must not have been waited on"
    );

    // The stream is resumable exactly where the prefix stopped
    let (label, value) = invocation
        .next_pair()
        .await
        .expect("next_pair should succeed")
        .expect("a sixth pair is available");
    assert_eq!(label, "file6");
    assert_eq!(value, "6/8");

    invocation.close().await.expect("close should kill the child");
}

#[tokio::test]
async fn archive_and_file_arguments_are_rewritten_relative() {
    let dir = tempfile::tempdir().expect("tempdir");
    let canonical = dir.path().canonicalize().expect("canonicalize");
    let archive = canonical.join("model.img");
    let member = canonical.join("barrel.dff");
    let outside = PathBuf::from("/somewhere/else/barrel.dff");
    let tool = fake_tool(
        &canonical,
        r#"printf '> Received ....... %s\n' "$*"
printf '> Workdir ....... %s\n' "$(pwd)""#,
    );

    let invocation = ToolInvocation::spawn(
        &tool,
        CommandKey::Extract,
        &archive,
        Some(&member),
        Some(&outside),
    )
    .expect("spawn should succeed");
    let (_, report) = invocation.drain().await.expect("drain should succeed");

    assert_eq!(
        report.get("Received"),
        Some(format!("-xtr model.img barrel.dff {}", outside.display()).as_str())
    );
    assert_eq!(report.get("Workdir"), Some(canonical.display().to_string().as_str()));
}

#[tokio::test]
async fn event_view_is_tagged() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("model.img");
    let tool = fake_tool(dir.path(), r#"echo "> Files ....... 3""#);

    let mut invocation = ToolInvocation::spawn(&tool, CommandKey::List, &archive, None, None)
        .expect("spawn should succeed");

    let started = invocation.next_event().await.expect("event");
    assert!(matches!(started, ProtocolEvent::ProcessStarted(Some(_))));

    let pair = invocation.next_event().await.expect("event");
    assert_eq!(
        pair,
        ProtocolEvent::DataPair("Files".to_string(), "3".to_string())
    );

    assert_eq!(
        invocation.next_event().await.expect("event"),
        ProtocolEvent::EndOfReport
    );
    // End of report is sticky
    assert_eq!(
        invocation.next_event().await.expect("event"),
        ProtocolEvent::EndOfReport
    );

    invocation.close().await.expect("close");
}

#[tokio::test]
async fn spawning_a_missing_executable_fails_at_the_os_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("model.img");

    let result = ToolInvocation::spawn(
        Path::new("/nonexistent/freimgedcs.exe"),
        CommandKey::List,
        &archive,
        None,
        None,
    );
    assert!(result.is_err());
}
