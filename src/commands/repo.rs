//! Repository management commands: clone, update, reset, status, push,
//! for-each, and the list-repos reference output.

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::exec::{run_shell, run_tool, CLONE_TIMEOUT_SECS};
use crate::git::{
    branch_exists, git_ok, has_uncommitted_changes, remote_branch_exists, unpushed_commits,
};
use crate::groups::{repo_group, GROUP_NAMES};
use crate::registry::Repo;
use crate::walker::for_each_repo;

const PROGRESS_TEMPLATE: &str = "{bar:40} {pos}/{len} {wide_msg}";
const PROGRESS_CHARS: &str = "##-";

fn clone_progress_bar(total: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_TEMPLATE)?
            .progress_chars(PROGRESS_CHARS),
    );
    Ok(pb)
}

/// Clones every selected repo that is not already present as a directory
/// under the current working directory. svn-backed entries are checked out
/// with svn; everything else with git.
pub async fn handle_clone_command(repos: &[&'static Repo]) -> Result<()> {
    let pb = clone_progress_bar(repos.len())?;

    for repo in repos {
        pb.set_message(format!("cloning {}", repo.repo_name));

        if Path::new(repo.repo_name).exists() {
            pb.println(format!("🟠 {} already cloned", repo.repo_name));
            pb.inc(1);
            continue;
        }

        let url = repo.remote_url();
        let (program, args): (&str, Vec<&str>) = match repo.svn {
            Some(svn_url) => ("svn", vec!["checkout", svn_url, repo.repo_name]),
            None => ("git", vec!["clone", url.as_str()]),
        };

        let (success, _, stderr) =
            run_tool(program, Path::new("."), &args, CLONE_TIMEOUT_SECS).await?;
        if !success {
            pb.finish_and_clear();
            bail!("Failed to clone {}: {}", repo.repo_name, stderr);
        }
        pb.println(format!("🟢 {} cloned", repo.repo_name));
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(())
}

/// Performs `git pull --rebase` for each requested branch in each repo.
pub async fn handle_update_command(repos: &[&'static Repo], branches: &[String]) -> Result<()> {
    let branches = branches.to_vec();
    for_each_repo(repos, |repo| {
        let branches = branches.clone();
        async move {
            println!("Updating {} ({})", repo.title, repo.repo_name);
            git_ok(&["fetch", "origin"]).await?;

            let here = Path::new(".");
            for branch in &branches {
                if !branch_exists(here, branch).await {
                    println!("  🟠 branch {branch} does not exist locally, skipping");
                    continue;
                }
                git_ok(&["checkout", "-q", branch]).await?;
                git_ok(&["pull", "--rebase", "origin", branch]).await?;
                println!("  🟢 {branch} updated");
            }
            Ok(())
        }
    })
    .await
}

/// Discards local state: `git reset --hard origin/<branch>` plus
/// `git clean -f -d` for each requested branch in each repo.
pub async fn handle_reset_command(repos: &[&'static Repo], branches: &[String]) -> Result<()> {
    let branches = branches.to_vec();
    for_each_repo(repos, |repo| {
        let branches = branches.clone();
        async move {
            println!("Resetting {} ({})", repo.title, repo.repo_name);

            let here = Path::new(".");
            for branch in &branches {
                if !branch_exists(here, branch).await || !remote_branch_exists(here, branch).await {
                    println!("  🟠 branch {branch} has no local+remote pair, skipping");
                    continue;
                }
                git_ok(&["checkout", "-q", branch]).await?;
                git_ok(&["reset", "--hard", &format!("origin/{branch}")]).await?;
                git_ok(&["clean", "-f", "-d"]).await?;
                println!("  🟢 {branch} reset to origin/{branch}");
            }
            Ok(())
        }
    })
    .await
}

/// Lists changes that exist locally but have not been pushed: unpushed
/// commits per branch plus a note for dirty work trees. Repos with nothing
/// to report are omitted.
pub async fn handle_status_command(repos: &[&'static Repo], branches: &[String]) -> Result<()> {
    let branches = branches.to_vec();
    for_each_repo(repos, |repo| {
        let branches = branches.clone();
        async move {
            let here = Path::new(".");
            let mut report = Vec::new();

            for branch in &branches {
                if !branch_exists(here, branch).await || !remote_branch_exists(here, branch).await {
                    continue;
                }
                let commits = unpushed_commits(here, branch).await?;
                if !commits.is_empty() {
                    report.push(format!("  {branch} ({} unpushed):", commits.len()));
                    for line in commits {
                        report.push(format!("    {line}"));
                    }
                }
            }
            if has_uncommitted_changes(here).await {
                report.push("  ⚠️  uncommitted changes".to_string());
            }

            if !report.is_empty() {
                println!("{}:", repo.repo_name);
                for line in report {
                    println!("{line}");
                }
            }
            Ok(())
        }
    })
    .await
}

/// Pushes branches that have unpushed commits.
pub async fn handle_push_command(repos: &[&'static Repo], branches: &[String]) -> Result<()> {
    let branches = branches.to_vec();
    for_each_repo(repos, |repo| {
        let branches = branches.clone();
        async move {
            let here = Path::new(".");
            for branch in &branches {
                if !branch_exists(here, branch).await || !remote_branch_exists(here, branch).await {
                    continue;
                }
                let commits = unpushed_commits(here, branch).await?;
                if commits.is_empty() {
                    continue;
                }
                git_ok(&["checkout", "-q", branch]).await?;
                git_ok(&["push", "origin", branch]).await?;
                println!(
                    "🟢 {}: pushed {} commit(s) on {}",
                    repo.repo_name,
                    commits.len(),
                    branch
                );
            }
            Ok(())
        }
    })
    .await
}

/// One `list-repos` line: id, directory, and the issue-tracker component
/// the repo files under, when it has one.
fn repo_line(repo: &Repo) -> String {
    match repo.jira_component_name {
        Some(component) => format!("    {} ({}) [{}]", repo.id, repo.repo_name, component),
        None => format!("    {} ({})", repo.id, repo.repo_name),
    }
}

/// Prints every group and the repos it contains, as valid `-r` values.
pub fn handle_list_repos_command() -> Result<()> {
    println!("Valid values for the -r/--repo flag:\n");
    for name in GROUP_NAMES {
        // GROUP_NAMES only holds built-in groups, so resolution cannot miss.
        let members = repo_group(name).expect("built-in group resolves");
        println!("{name}:");
        for repo in members {
            println!("{}", repo_line(repo));
        }
        println!();
    }
    Ok(())
}

/// Runs a shell command in each repo, streaming its output.
pub async fn handle_for_each_command(repos: &[&'static Repo], command_line: &str) -> Result<()> {
    for_each_repo(repos, |repo| async move {
        println!("{}:", repo.repo_name);
        let ok = run_shell(Path::new("."), command_line).await?;
        if !ok {
            bail!("Command failed in {}: {}", repo.repo_name, command_line);
        }
        Ok(())
    })
    .await
}
