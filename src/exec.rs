//! External process execution.
//!
//! Every external tool (git, svn, gpg, java) is invoked through this module.
//! Captured invocations get a timeout so a hung remote cannot stall the whole
//! walk; streaming invocations inherit stdio and run to completion.

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Timeout for ordinary captured invocations (fetch, push, tag, ...).
pub const TOOL_TIMEOUT_SECS: u64 = 180; // 3 minutes per repository
/// Clones of large repositories routinely outlive the ordinary timeout.
pub const CLONE_TIMEOUT_SECS: u64 = 900;

/// Runs a program in `path` with a timeout, capturing output.
/// Returns (success, stdout, stderr).
pub async fn run_tool(
    program: &str,
    path: &Path,
    args: &[&str],
    timeout_secs: u64,
) -> Result<(bool, String, String)> {
    let timeout_duration = Duration::from_secs(timeout_secs);

    let result = tokio::time::timeout(
        timeout_duration,
        Command::new(program).args(args).current_dir(path).output(),
    )
    .await;

    match result {
        Ok(Ok(output)) => Ok((
            output.status.success(),
            String::from_utf8_lossy(&output.stdout).trim().to_string(),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        )),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(anyhow::anyhow!(
            "{} operation timed out after {} seconds",
            program,
            timeout_secs
        )),
    }
}

/// Runs a program with stdio inherited, for tools whose output belongs on
/// the operator's terminal (Apache RAT, `for-each` shell commands).
/// Returns whether the process exited successfully. No timeout: these runs
/// are operator-supervised.
pub async fn stream_tool(program: &str, path: &Path, args: &[&str]) -> Result<bool> {
    let status = Command::new(program)
        .args(args)
        .current_dir(path)
        .status()
        .await?;
    Ok(status.success())
}

/// Runs a shell command line in `path` with stdio inherited.
pub async fn run_shell(path: &Path, command_line: &str) -> Result<bool> {
    #[cfg(unix)]
    let (shell, flag) = ("sh", "-c");
    #[cfg(windows)]
    let (shell, flag) = ("cmd", "/C");

    stream_tool(shell, path, &[flag, command_line]).await
}
