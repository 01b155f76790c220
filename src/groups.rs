//! Named repository groups, computed as views over the registry.

use std::path::Path;

use crate::registry::{all_repos, get_repo_by_id, Repo, PLATFORM_REPOS, PLUGIN_REPOS};

/// Every valid `-r` group name, in the order `list-repos` presents them.
pub const GROUP_NAMES: &[&str] = &[
    "all",
    "platform",
    "plugins",
    "active-platform",
    "release-repos",
    "cadence",
    "auto",
];

// Repos that ride along with the active platforms on the release cadence.
const CADENCE_EXTRA_IDS: &[&str] = &["cli", "js", "mobile-spec", "app-hello-world", "docs"];

/// Resolves a group name to its member repositories, in registry order.
///
/// Unknown names return `None` so callers can tell a typo apart from an
/// empty group. Group names are case-sensitive.
pub fn repo_group(name: &str) -> Option<Vec<&'static Repo>> {
    match name {
        "all" => Some(all_repos()),
        "platform" => Some(PLATFORM_REPOS.iter().collect()),
        "plugins" => Some(PLUGIN_REPOS.iter().collect()),
        "active-platform" => Some(active_platform_repos()),
        "release-repos" => Some(all_repos().into_iter().filter(|r| !r.inactive).collect()),
        "cadence" => Some(cadence_repos()),
        "auto" => Some(auto_repos()),
        _ => None,
    }
}

fn active_platform_repos() -> Vec<&'static Repo> {
    PLATFORM_REPOS.iter().filter(|r| !r.inactive).collect()
}

fn cadence_repos() -> Vec<&'static Repo> {
    let mut repos = active_platform_repos();
    for id in CADENCE_EXTRA_IDS {
        // The registry is static, so a miss here is a defect in the catalog.
        let repo = get_repo_by_id(id, None)
            .unwrap_or_else(|| panic!("registry is missing cadence repo: {id}"));
        repos.push(repo);
    }
    repos
}

/// Registry repos whose directory exists under the current working
/// directory. Recomputed from the filesystem on every call; never cached, so
/// a clone performed mid-run shows up in the next access.
fn auto_repos() -> Vec<&'static Repo> {
    all_repos()
        .into_iter()
        .filter(|r| Path::new(r.repo_name).is_dir())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{NON_PLATFORM_REPOS, OTHER_REPOS};

    #[test]
    fn unknown_group_is_none() {
        assert!(repo_group("no-such-group").is_none());
        // Case-sensitive on purpose.
        assert!(repo_group("All").is_none());
    }

    #[test]
    fn all_preserves_category_declaration_order() {
        let repos = repo_group("all").expect("built-in group");
        let expected_len = PLATFORM_REPOS.len()
            + NON_PLATFORM_REPOS.len()
            + PLUGIN_REPOS.len()
            + OTHER_REPOS.len();
        assert_eq!(repos.len(), expected_len);

        let mut offset = 0;
        for category in [PLATFORM_REPOS, NON_PLATFORM_REPOS, PLUGIN_REPOS, OTHER_REPOS] {
            for (i, repo) in category.iter().enumerate() {
                assert_eq!(repos[offset + i].id, repo.id);
            }
            offset += category.len();
        }
    }

    #[test]
    fn platform_and_plugins_match_their_categories() {
        let platform = repo_group("platform").expect("built-in group");
        assert_eq!(platform.len(), PLATFORM_REPOS.len());
        let plugins = repo_group("plugins").expect("built-in group");
        assert_eq!(plugins.len(), PLUGIN_REPOS.len());
    }

    #[test]
    fn active_groups_exclude_inactive_repos() {
        for name in ["active-platform", "release-repos"] {
            let repos = repo_group(name).expect("built-in group");
            assert!(!repos.is_empty());
            assert!(
                repos.iter().all(|r| !r.inactive),
                "{name} contains an inactive repo"
            );
        }
    }

    #[test]
    fn cadence_is_active_platforms_plus_release_tooling() {
        let cadence = repo_group("cadence").expect("built-in group");
        let active = repo_group("active-platform").expect("built-in group");
        assert_eq!(cadence.len(), active.len() + CADENCE_EXTRA_IDS.len());
        for (repo, id) in cadence[active.len()..].iter().zip(CADENCE_EXTRA_IDS) {
            assert_eq!(repo.id, *id);
        }
    }
}
