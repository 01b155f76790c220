//! Weekly activity report: git logs from the last seven days, per repo.

use anyhow::Result;
use chrono::{Days, Local};
use std::path::Path;

use crate::git::{get_git_config, run_git};
use crate::registry::Repo;
use crate::walker::for_each_repo;

const LOG_FORMAT: &str = "--format=%h %s (%an)";

/// Prints the commits of the last seven days for each repo. With `me`, only
/// commits authored under the operator's configured `user.email` are shown.
pub async fn handle_last_week_command(repos: &[&'static Repo], me: bool) -> Result<()> {
    let today = Local::now().date_naive();
    let start = today - Days::new(7);
    println!("Commits from {start} to {today}:\n");

    // Resolved once, before the walk: the global config is the same
    // everywhere, and per-repo overrides are not what "--me" means.
    let author = if me {
        get_git_config(Path::new("."), "user.email").await?
    } else {
        None
    };

    for_each_repo(repos, |repo| {
        let author = author.clone();
        async move {
            let author_arg = author.as_ref().map(|email| format!("--author={email}"));
            let mut args = vec!["log", LOG_FORMAT, "--since=7 days ago", "--all"];
            if let Some(author_arg) = &author_arg {
                args.push(author_arg);
            }

            let (success, stdout, _) = run_git(Path::new("."), &args).await?;
            if success && !stdout.is_empty() {
                println!("{}:", repo.repo_name);
                for line in stdout.lines() {
                    println!("    {line}");
                }
                println!();
            }
            Ok(())
        }
    })
    .await
}
