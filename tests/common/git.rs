//! Git fixture helpers for integration tests.

use anyhow::Result;
use std::path::Path;
use std::process::Command;

/// Whether a usable `git` binary is on the PATH.
pub fn is_git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

/// Initializes a git repository with test user config and signing disabled.
pub fn setup_git_repo(path: &Path) -> Result<()> {
    let init = Command::new("git")
        .args(["init", "-q"])
        .current_dir(path)
        .output()?;
    if !init.status.success() {
        anyhow::bail!("git init failed - is git installed?");
    }

    for (key, value) in [
        ("user.name", "Test User"),
        ("user.email", "test@example.com"),
        ("commit.gpgsign", "false"),
    ] {
        Command::new("git")
            .args(["config", key, value])
            .current_dir(path)
            .output()?;
    }
    Ok(())
}

/// Writes a file, stages it, and commits it.
pub fn create_test_commit(path: &Path, file_name: &str, content: &str, message: &str) -> Result<()> {
    std::fs::write(path.join(file_name), content)?;

    Command::new("git")
        .args(["add", file_name])
        .current_dir(path)
        .output()?;

    let commit = Command::new("git")
        .args(["commit", "-q", "-m", message])
        .current_dir(path)
        .output()?;
    if !commit.status.success() {
        anyhow::bail!(
            "failed to create commit: {}",
            String::from_utf8_lossy(&commit.stderr)
        );
    }
    Ok(())
}

/// Runs a git command in `path`, failing on a non-zero exit.
pub fn run(path: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).current_dir(path).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(())
}

/// Captures trimmed stdout of a git query, panicking on failure.
pub fn git_stdout(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}
