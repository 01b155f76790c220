//! Common test utilities and helpers
#![allow(dead_code)]

pub mod git;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

use anyhow::Result;
use tempfile::TempDir;

use relman::registry::Repo;

static TEST_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Acquires a global lock for tests that modify process-wide state (the
/// working directory). The walker and the `auto` group both read it.
pub fn lock_test() -> MutexGuard<'static, ()> {
    // A poisoned lock only means another test failed while holding it.
    match TEST_MUTEX.get_or_init(|| Mutex::new(())).lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// A temporary directory laid out the way the tool expects at runtime:
/// registry repos as sibling directories under one root.
pub struct Workspace {
    pub temp_dir: TempDir,
}

impl Workspace {
    pub fn new() -> Workspace {
        Workspace {
            temp_dir: TempDir::new().expect("failed to create temp workspace"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Creates the repo's directory without git metadata.
    pub fn add_dir(&self, repo: &Repo) -> PathBuf {
        let dir = self.path().join(repo.repo_name);
        std::fs::create_dir_all(&dir).expect("failed to create repo dir");
        dir
    }

    /// Creates the repo's directory as a git repository with one commit.
    pub fn add_git_repo(&self, repo: &Repo) -> Result<PathBuf> {
        let dir = self.add_dir(repo);
        git::setup_git_repo(&dir)?;
        git::create_test_commit(&dir, "README.md", "test repo\n", "initial commit")?;
        Ok(dir)
    }

    /// Creates the repo as a clone of a throwaway local upstream, so the
    /// clone has an `origin` remote and an `origin/<branch>` tracking ref.
    /// Committing in the seed and pushing it to the upstream simulates
    /// remote activity the clone has not seen yet.
    pub fn add_repo_with_origin(&self, repo: &Repo, branch: &str) -> Result<RemoteRepo> {
        let seed = self.path().join(format!("{}-seed", repo.repo_name));
        std::fs::create_dir_all(&seed)?;
        git::setup_git_repo(&seed)?;
        // HEAD is still unborn here, so this just names the first branch.
        git::run(&seed, &["checkout", "-q", "-b", branch])?;
        git::create_test_commit(&seed, "README.md", "seed repo\n", "initial commit")?;

        let upstream = self.path().join(format!("{}.git", repo.repo_name));
        git::run(
            self.path(),
            &[
                "clone",
                "-q",
                "--bare",
                seed.to_str().expect("utf-8 path"),
                upstream.to_str().expect("utf-8 path"),
            ],
        )?;

        let clone = self.path().join(repo.repo_name);
        git::run(
            self.path(),
            &[
                "clone",
                "-q",
                upstream.to_str().expect("utf-8 path"),
                clone.to_str().expect("utf-8 path"),
            ],
        )?;
        // Re-applies the test user config inside the fresh clone.
        git::setup_git_repo(&clone)?;

        Ok(RemoteRepo {
            seed,
            upstream,
            clone,
        })
    }
}

/// A registry repo backed by a local bare upstream, for exercising
/// fetch/pull/push flows without the network.
pub struct RemoteRepo {
    pub seed: PathBuf,
    pub upstream: PathBuf,
    pub clone: PathBuf,
}
