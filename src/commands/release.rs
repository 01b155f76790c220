//! Release-engineering commands: branch preparation, tagging, and the
//! tag/url listings used when assembling VOTE emails.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::git::{branch_exists, git_ok, has_uncommitted_changes, run_git, tag_exists};
use crate::registry::{Repo, GIT_REMOTE_BASE};
use crate::walker::for_each_repo;

/// Checks a `MAJOR.MINOR.PATCH` release version string.
pub fn validate_version(version: &str) -> Result<()> {
    let parts: Vec<&str> = version.split('.').collect();
    let numeric = parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if !numeric {
        bail!("Invalid version: {} (expected MAJOR.MINOR.PATCH)", version);
    }
    Ok(())
}

/// Reminder lines for the generated platform JS a release branch still
/// needs. The JS itself is built by the js repo's own tooling; all this tool
/// knows is where each platform expects the output to land.
fn js_update_reminders(repo: &Repo) -> Vec<String> {
    repo.cordova_js_paths
        .iter()
        .map(|path| format!("  ⚠️  refresh the platform JS at {path} before tagging"))
        .collect()
}

/// The release branch for a version: `3.1.0` releases from `3.1.x`.
pub fn release_branch_name(version: &str) -> Result<String> {
    validate_version(version)?;
    let mut parts = version.split('.');
    // validate_version guarantees three components.
    let major = parts.next().expect("validated");
    let minor = parts.next().expect("validated");
    Ok(format!("{major}.{minor}.x"))
}

/// Creates or checks out the release branch in each repo and stamps the
/// version into the repo's version files. Safe to run multiple times: a
/// second run finds the branch in place and the files unchanged, so nothing
/// is committed.
pub async fn handle_prepare_release_branch_command(
    repos: &[&'static Repo],
    version: &str,
) -> Result<()> {
    let branch = release_branch_name(version)?;

    for_each_repo(repos, |repo| {
        let branch = branch.clone();
        async move {
            println!("Preparing {} in {}", branch, repo.repo_name);

            if branch_exists(Path::new("."), &branch).await {
                git_ok(&["checkout", "-q", &branch]).await?;
            } else {
                git_ok(&["checkout", "-q", "-b", &branch]).await?;
            }

            for file in repo.version_file_paths {
                std::fs::write(file, format!("{version}\n"))
                    .with_context(|| format!("failed to write {} in {}", file, repo.repo_name))?;
            }

            if !repo.version_file_paths.is_empty() && has_uncommitted_changes(Path::new(".")).await
            {
                git_ok(&["commit", "-am", &format!("Set VERSION to {version}")]).await?;
                println!("  🟢 committed VERSION {version}");
            } else {
                println!("  🟢 {branch} ready");
            }
            for line in js_update_reminders(repo) {
                println!("{line}");
            }
            Ok(())
        }
    })
    .await
}

/// Tags each repo with the release version. With `pretend`, prints the
/// commands that would run instead of running them.
pub async fn handle_tag_release_command(
    repos: &[&'static Repo],
    version: &str,
    pretend: bool,
) -> Result<()> {
    validate_version(version)?;

    for_each_repo(repos, |repo| async move {
        if pretend {
            println!("{}: git tag {}", repo.repo_name, version);
            return Ok(());
        }
        if tag_exists(Path::new("."), version).await {
            println!("🟠 {} already tagged {}", repo.repo_name, version);
            return Ok(());
        }
        git_ok(&["tag", version]).await?;
        println!("🟢 {} tagged {}", repo.repo_name, version);
        Ok(())
    })
    .await
}

/// Prints `repo: tag (sha)` for the most recent tag of each repo.
pub async fn handle_print_tags_command(repos: &[&'static Repo]) -> Result<()> {
    for_each_repo(repos, |repo| async move {
        let (success, tag, _) =
            run_git(Path::new("."), &["describe", "--tags", "--abbrev=0"]).await?;
        if !success {
            println!("    {}: no tags", repo.repo_name);
            return Ok(());
        }
        // Peel the tag to the commit it points at.
        let sha = git_ok(&["rev-parse", "--short=10", &format!("{tag}^{{}}")]).await?;
        println!("    {}: {} ({})", repo.repo_name, tag, sha);
        Ok(())
    })
    .await
}

/// Prints the remote URL for each repo's release tag. Works without local
/// clones: the output is derived from the registry alone.
pub fn handle_list_release_urls_command(repos: &[&'static Repo], version: &str) -> Result<()> {
    validate_version(version)?;
    for repo in repos {
        println!("{}/{}/tree/{}", GIT_REMOTE_BASE, repo.repo_name, version);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_branch_drops_the_patch_level() {
        assert_eq!(release_branch_name("3.1.0").unwrap(), "3.1.x");
        assert_eq!(release_branch_name("10.0.7").unwrap(), "10.0.x");
    }

    #[test]
    fn js_reminders_cover_each_configured_path() {
        let android = crate::registry::get_repo_by_id("android", None).expect("registered");
        let reminders = js_update_reminders(android);
        assert_eq!(reminders.len(), android.cordova_js_paths.len());
        assert!(reminders[0].contains("framework/assets/www/cordova.js"));

        let docs = crate::registry::get_repo_by_id("docs", None).expect("registered");
        assert!(js_update_reminders(docs).is_empty());
    }

    #[test]
    fn bad_versions_are_rejected() {
        for bad in ["3.1", "3.1.x", "a.b.c", "", "3.1.0.1"] {
            assert!(release_branch_name(bad).is_err(), "{bad} should be invalid");
        }
    }
}
