//! License-header audit via Apache RAT.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::exec::stream_tool;
use crate::registry::Repo;
use crate::walker::for_each_repo;

// Patterns excluded from every repo's audit, on top of the per-repo
// `rat_excludes` from the registry.
const COMMON_RAT_EXCLUDES: &[&str] = &[
    ".*",
    "*.json",
    "*.md",
    "*.txt",
    "*.wav",
    "*.xcodeproj",
    "node_modules",
    "thirdparty",
    "VERSION",
];

/// Runs Apache RAT over each repo and streams its report to the terminal.
/// RAT itself is an external jar; the operator points at it with
/// `--rat-jar`.
pub async fn handle_audit_license_headers_command(
    repos: &[&'static Repo],
    rat_jar: &Path,
) -> Result<()> {
    if !rat_jar.is_file() {
        bail!(
            "Apache RAT jar not found at {}. Download it from https://creadur.apache.org/rat/ \
             and point --rat-jar at it.",
            rat_jar.display()
        );
    }
    // Absolute before the walk: the walker changes directory per repo.
    let rat_jar: PathBuf = std::fs::canonicalize(rat_jar)?;

    for_each_repo(repos, |repo| {
        let rat_jar = rat_jar.clone();
        async move {
            println!("Auditing {} ({})", repo.title, repo.repo_name);

            let jar = rat_jar.to_string_lossy().into_owned();
            let mut args: Vec<&str> = vec!["-jar", &jar, "-d", "."];
            for pattern in COMMON_RAT_EXCLUDES.iter().chain(repo.rat_excludes).copied() {
                args.push("-e");
                args.push(pattern);
            }

            let ok = stream_tool("java", Path::new("."), &args).await?;
            if !ok {
                bail!("Apache RAT failed in {}", repo.repo_name);
            }
            Ok(())
        }
    })
    .await
}
