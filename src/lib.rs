//! # relman
//!
//! `relman` is a release-and-repository-management library for projects that
//! span many component git repositories. It powers the `relman` CLI tool.
//!
//! ## Core Features
//!
//! - **Repository Registry**: A static catalog of every managed repository,
//!   grouped by category (platforms, plugins, docs, tooling, infra).
//! - **Group Resolution**: Named groups (`all`, `active-platform`, `cadence`,
//!   `auto`, ...) computed as views over the registry.
//! - **Sequential Walking**: Visit each selected repository in order with the
//!   working directory scoped around a caller-supplied async action.
//! - **Release Helpers**: Branch preparation, tagging, archive
//!   creation/verification, and license-header auditing.
//!
//! ## Example
//!
//! ```rust,no_run
//! use relman::groups::repo_group;
//! use relman::walker::for_each_repo;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repos = repo_group("auto").expect("auto is a built-in group");
//!     for_each_repo(&repos, |repo| async move {
//!         println!("visiting {}", repo.title);
//!         Ok(())
//!     })
//!     .await
//! }
//! ```

pub mod commands;
pub mod exec;
pub mod git;
pub mod groups;
pub mod registry;
pub mod utils;
pub mod walker;
