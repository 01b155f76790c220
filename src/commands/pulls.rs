//! GitHub pull-request listing.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::registry::Repo;

const GITHUB_API_BASE: &str = "https://api.github.com/repos/apache";
// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("relman/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Pull {
    number: u64,
    title: String,
    html_url: String,
    user: PullAuthor,
}

#[derive(Debug, Deserialize)]
struct PullAuthor {
    login: String,
}

async fn fetch_pulls(client: &reqwest::Client, repo: &Repo) -> Result<Vec<Pull>> {
    let url = format!("{}/{}/pulls?state=open", GITHUB_API_BASE, repo.repo_name);
    let response = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;

    let response = response
        .error_for_status()
        .with_context(|| format!("GitHub rejected the pulls request for {}", repo.repo_name))?;

    let body = response
        .bytes()
        .await
        .with_context(|| format!("failed to read the pulls response for {}", repo.repo_name))?;
    serde_json::from_slice(&body)
        .with_context(|| format!("unexpected pulls payload for {}", repo.repo_name))
}

/// Prints the open GitHub pull requests for each selected repo. Purely a
/// network operation: no local clone is required, so the walker is not
/// involved.
pub async fn handle_list_pulls_command(repos: &[&'static Repo]) -> Result<()> {
    let client = reqwest::Client::new();

    for repo in repos {
        let pulls = fetch_pulls(&client, repo).await?;
        if pulls.is_empty() {
            continue;
        }
        println!("{} ({} open):", repo.repo_name, pulls.len());
        for pull in pulls {
            println!("    #{} {} ({})", pull.number, pull.title, pull.user.login);
            println!("        {}", pull.html_url);
        }
        println!();
    }
    Ok(())
}
