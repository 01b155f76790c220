//! Sequential traversal of repository working directories.
//!
//! Commands operate by walking an ordered list of registry repos, running an
//! async action inside each repo's directory. The walk is strictly
//! sequential: the next repo is not entered until the previous action has
//! completed, so actions never observe another repo's working directory.
//!
//! The working directory is process-global state. Entry and exit of each
//! iteration is treated as a scoped critical section: [`WorkDir`] restores
//! the previous directory on drop, so restoration happens on every exit path
//! including an action failing with `?`. Nested walks carry an explicit
//! [`Walk`] context instead of a shared nesting flag, so an inner walk
//! resolves repos against the same base directory and restores the directory
//! that was current when it started.

use std::env;
use std::future::Future;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::registry::Repo;

/// RAII guard over the process working directory. Changes into `dir` on
/// construction and restores the previous directory on drop.
pub struct WorkDir {
    prev: PathBuf,
}

impl WorkDir {
    pub fn push(dir: &Path) -> Result<Self> {
        let prev = env::current_dir().context("failed to read the current working directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("failed to enter directory: {}", dir.display()))?;
        Ok(Self { prev })
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.prev) {
            // Nothing sensible to do besides warn; the process is likely
            // unwinding already.
            eprintln!(
                "warning: failed to restore working directory to {}: {}",
                self.prev.display(),
                e
            );
        }
    }
}

/// Traversal context: the base directory repository paths resolve against.
///
/// Actions receive a clone of the context, so an action that needs to walk a
/// second repo list nests naturally: the inner walk joins `repo_name` onto
/// the same base rather than guessing how many directory levels deep the
/// process currently is.
#[derive(Clone, Debug)]
pub struct Walk {
    base: PathBuf,
}

impl Walk {
    /// Creates a context rooted at the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let base = env::current_dir().context("failed to read the current working directory")?;
        Ok(Self { base })
    }

    /// Visits each repo in input order, running `action` with the working
    /// directory set inside the repo.
    ///
    /// A repo whose directory is missing aborts the whole walk before its
    /// action runs; repos after it are not visited. Actions run one at a
    /// time; the walk suspends until each action's future completes.
    pub async fn run<F, Fut>(&self, repos: &[&'static Repo], mut action: F) -> Result<()>
    where
        F: FnMut(&'static Repo, Walk) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        for &repo in repos {
            let dir = self.base.join(repo.repo_name);
            if !dir.is_dir() {
                bail!(
                    "Repo directory does not exist: {}. First run `relman repo-clone`.",
                    repo.repo_name
                );
            }
            let _cwd = WorkDir::push(&dir)?;
            action(repo, self.clone()).await?;
        }
        Ok(())
    }
}

/// Visits each repo in order with the working directory scoped inside it.
/// Convenience wrapper over [`Walk::run`] for actions that never nest.
pub async fn for_each_repo<F, Fut>(repos: &[&'static Repo], mut action: F) -> Result<()>
where
    F: FnMut(&'static Repo) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let walk = Walk::from_cwd()?;
    walk.run(repos, |repo, _| action(repo)).await
}
