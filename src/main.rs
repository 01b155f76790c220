//! relman: release and repository management for multi-repo projects.
//!
//! The binary is a thin dispatcher: clap resolves a subcommand, the `-r`
//! flags are expanded against the registry, and the matching handler from
//! the library does the work.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use relman::commands::{archive, audit, last_week, pulls, release, repo};
use relman::registry::{resolve_repo_flags, Repo};
use relman::utils::{set_terminal_title, set_terminal_title_and_flush};

const EXAMPLES: &str = "\
Examples:
    relman repo-clone -r plugins -r mobile-spec -r android -r ios -r cli
    relman repo-update
    relman for-each -r plugins \"git checkout master\"
    relman last-week --me";

#[derive(Parser)]
#[command(
    name = "relman",
    version,
    about = "Release and repository management for multi-repository projects",
    after_help = EXAMPLES
)]
struct Cli {
    /// Run from this directory instead of the current one.
    #[arg(long, global = true, value_name = "DIR")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RepoSelection {
    /// Repo ids or group names to operate on (see `list-repos`).
    #[arg(
        short = 'r',
        long = "repo",
        value_name = "REPO",
        default_value = "auto"
    )]
    repos: Vec<String>,
}

impl RepoSelection {
    fn resolve(&self) -> Result<Vec<&'static Repo>> {
        resolve_repo_flags(&self.repos)
    }
}

#[derive(Args)]
struct BranchSelection {
    /// Branches to operate on.
    #[arg(
        short = 'b',
        long = "branch",
        value_name = "BRANCH",
        default_value = "master"
    )]
    branches: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clones git repositories into the current working directory.
    RepoClone {
        #[command(flatten)]
        repos: RepoSelection,
    },
    /// Performs git pull --rebase on all specified repositories.
    RepoUpdate {
        #[command(flatten)]
        repos: RepoSelection,
        #[command(flatten)]
        branches: BranchSelection,
    },
    /// Performs git reset --hard origin/$BRANCH and git clean -f -d on all
    /// specified repositories.
    RepoReset {
        #[command(flatten)]
        repos: RepoSelection,
        #[command(flatten)]
        branches: BranchSelection,
    },
    /// Lists changes that exist locally but have not yet been pushed.
    RepoStatus {
        #[command(flatten)]
        repos: RepoSelection,
        #[command(flatten)]
        branches: BranchSelection,
    },
    /// Push changes that exist locally but have not yet been pushed.
    RepoPush {
        #[command(flatten)]
        repos: RepoSelection,
        #[command(flatten)]
        branches: BranchSelection,
    },
    /// Shows a list of valid values for the --repo flag.
    ListRepos,
    /// Runs a shell command in each repo.
    #[command(alias = "foreach")]
    ForEach {
        #[command(flatten)]
        repos: RepoSelection,
        /// The shell command to run in each repo.
        command: String,
    },
    /// Branches and updates version files for a release. Safe to run
    /// multiple times.
    PrepareReleaseBranch {
        #[command(flatten)]
        repos: RepoSelection,
        /// Release version (MAJOR.MINOR.PATCH).
        #[arg(long)]
        version: String,
    },
    /// Tags repos for a release.
    TagRelease {
        #[command(flatten)]
        repos: RepoSelection,
        /// Release version (MAJOR.MINOR.PATCH).
        #[arg(long)]
        version: String,
        /// Print the git commands instead of running them.
        #[arg(long)]
        pretend: bool,
    },
    /// Prints out tags & hashes for the given repos. Used in VOTE emails.
    PrintTags {
        #[command(flatten)]
        repos: RepoSelection,
    },
    /// Lists the git repo urls for release artifacts.
    ListReleaseUrls {
        #[command(flatten)]
        repos: RepoSelection,
        /// Release version (MAJOR.MINOR.PATCH).
        #[arg(long)]
        version: String,
    },
    /// Zips up a tag, signs it, and adds checksum files.
    CreateArchive {
        #[command(flatten)]
        repos: RepoSelection,
        /// The tag to archive.
        #[arg(long)]
        tag: String,
        /// Directory the archives are written into.
        #[arg(long, value_name = "DIR", default_value = "release")]
        dest: PathBuf,
    },
    /// Checks that archives are properly signed and hashed.
    VerifyArchive {
        /// Archive .zip files to verify.
        files: Vec<PathBuf>,
    },
    /// Uses Apache RAT to look for missing license headers.
    AuditLicenseHeaders {
        #[command(flatten)]
        repos: RepoSelection,
        /// Path to the Apache RAT jar.
        #[arg(long, value_name = "JAR", default_value = "apache-rat.jar")]
        rat_jar: PathBuf,
    },
    /// Shows a list of GitHub pull requests for all specified repositories.
    ListPulls {
        #[command(flatten)]
        repos: RepoSelection,
    },
    /// Prints out git logs of things that happened last week.
    LastWeek {
        #[command(flatten)]
        repos: RepoSelection,
        /// Only show commits authored under your configured user.email.
        #[arg(long)]
        me: bool,
    },
}

async fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::RepoClone { repos } => repo::handle_clone_command(&repos.resolve()?).await,
        Commands::RepoUpdate { repos, branches } => {
            repo::handle_update_command(&repos.resolve()?, &branches.branches).await
        }
        Commands::RepoReset { repos, branches } => {
            repo::handle_reset_command(&repos.resolve()?, &branches.branches).await
        }
        Commands::RepoStatus { repos, branches } => {
            repo::handle_status_command(&repos.resolve()?, &branches.branches).await
        }
        Commands::RepoPush { repos, branches } => {
            repo::handle_push_command(&repos.resolve()?, &branches.branches).await
        }
        Commands::ListRepos => repo::handle_list_repos_command(),
        Commands::ForEach { repos, command } => {
            repo::handle_for_each_command(&repos.resolve()?, &command).await
        }
        Commands::PrepareReleaseBranch { repos, version } => {
            release::handle_prepare_release_branch_command(&repos.resolve()?, &version).await
        }
        Commands::TagRelease {
            repos,
            version,
            pretend,
        } => release::handle_tag_release_command(&repos.resolve()?, &version, pretend).await,
        Commands::PrintTags { repos } => {
            release::handle_print_tags_command(&repos.resolve()?).await
        }
        Commands::ListReleaseUrls { repos, version } => {
            release::handle_list_release_urls_command(&repos.resolve()?, &version)
        }
        Commands::CreateArchive { repos, tag, dest } => {
            archive::handle_create_archive_command(&repos.resolve()?, &tag, &dest).await
        }
        Commands::VerifyArchive { files } => archive::handle_verify_archive_command(&files).await,
        Commands::AuditLicenseHeaders { repos, rat_jar } => {
            audit::handle_audit_license_headers_command(&repos.resolve()?, &rat_jar).await
        }
        Commands::ListPulls { repos } => pulls::handle_list_pulls_command(&repos.resolve()?).await,
        Commands::LastWeek { repos, me } => {
            last_week::handle_last_week_command(&repos.resolve()?, me).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = &cli.cwd {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change into {}", dir.display()))?;
    }

    set_terminal_title("🚀 relman");
    let result = dispatch(cli.command).await;
    set_terminal_title_and_flush(if result.is_ok() {
        "✅ relman"
    } else {
        "🔴 relman"
    });
    result
}
