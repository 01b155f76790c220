//! Git command execution and repository-state queries.
//!
//! Thin wrappers over the `git` binary. Output parsing stays minimal: most
//! helpers report success plus trimmed stdout and leave interpretation to
//! the command handlers.

use anyhow::{bail, Result};
use std::path::Path;

use crate::exec::{run_tool, TOOL_TIMEOUT_SECS};

// Git command arguments
const GIT_DIFF_INDEX_ARGS: &[&str] = &["diff-index", "--quiet", "HEAD", "--"];
const GIT_CONFIG_GET_ARGS: &[&str] = &["config", "--get"];

/// Runs a git command in the specified directory with a timeout.
/// Returns (success, stdout, stderr).
pub async fn run_git(path: &Path, args: &[&str]) -> Result<(bool, String, String)> {
    run_tool("git", path, args, TOOL_TIMEOUT_SECS).await
}

/// Runs a git command in the current directory, failing with stderr attached
/// when git reports an error. Returns trimmed stdout.
pub async fn git_ok(args: &[&str]) -> Result<String> {
    let (success, stdout, stderr) = run_git(Path::new("."), args).await?;
    if !success {
        bail!("git {} failed: {}", args.join(" "), stderr);
    }
    Ok(stdout)
}

/// Reads a git config value from the specified repository.
/// Returns the config value if it exists, None if not found.
pub async fn get_git_config(path: &Path, key: &str) -> Result<Option<String>> {
    let mut args = Vec::from(GIT_CONFIG_GET_ARGS);
    args.push(key);

    match run_git(path, &args).await {
        Ok((true, value, _)) => {
            if value.is_empty() {
                Ok(None)
            } else {
                Ok(Some(value))
            }
        }
        Ok((false, _, _)) => Ok(None), // Key not found
        Err(e) => Err(e),
    }
}

/// Whether the work tree in `path` has uncommitted changes.
pub async fn has_uncommitted_changes(path: &Path) -> bool {
    !run_git(path, GIT_DIFF_INDEX_ARGS)
        .await
        .map(|(success, _, _)| success)
        .unwrap_or(false)
}

/// Whether `branch` exists locally in the repo at `path`.
pub async fn branch_exists(path: &Path, branch: &str) -> bool {
    run_git(
        path,
        &[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/heads/{branch}"),
        ],
    )
    .await
    .map(|(success, _, _)| success)
    .unwrap_or(false)
}

/// Whether `origin/<branch>` is known to the repo at `path`.
pub async fn remote_branch_exists(path: &Path, branch: &str) -> bool {
    run_git(
        path,
        &[
            "show-ref",
            "--verify",
            "--quiet",
            &format!("refs/remotes/origin/{branch}"),
        ],
    )
    .await
    .map(|(success, _, _)| success)
    .unwrap_or(false)
}

/// One-line log entries for commits on `branch` that are not on
/// `origin/<branch>` yet. Empty when the branch is fully pushed.
pub async fn unpushed_commits(path: &Path, branch: &str) -> Result<Vec<String>> {
    let range = format!("origin/{branch}..{branch}");
    let (success, stdout, stderr) = run_git(path, &["log", "--oneline", &range]).await?;
    if !success {
        bail!("git log {} failed: {}", range, stderr);
    }
    Ok(stdout.lines().map(str::to_string).collect())
}

/// Whether `tag` exists in the repo at `path`.
pub async fn tag_exists(path: &Path, tag: &str) -> bool {
    run_git(
        path,
        &["rev-parse", "--verify", "--quiet", &format!("refs/tags/{tag}")],
    )
    .await
    .map(|(success, _, _)| success)
    .unwrap_or(false)
}
