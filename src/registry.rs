//! Static catalog of the repositories this tool manages.
//!
//! The registry is immutable process-wide data: four category slices declared
//! at compile time plus lookup helpers. Named group views over the registry
//! live in [`crate::groups`].

use anyhow::{bail, Result};
use std::collections::HashSet;

/// Conventional prefix shared by every managed repository directory. Stripped
/// when normalizing an id for lookup, so `-r android` and
/// `-r cordova-android` select the same entry.
pub const REPO_NAME_PREFIX: &str = "cordova-";

/// Base URL the clone and release-url commands resolve git remotes against.
pub const GIT_REMOTE_BASE: &str = "https://github.com/apache";

/// Descriptor for one managed repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repo {
    /// Short identifier used by the `-r` flag, unique across the registry.
    pub id: &'static str,
    /// Human-readable display name.
    pub title: &'static str,
    /// On-disk and remote directory name, expected as a sibling directory of
    /// the tool's working directory.
    pub repo_name: &'static str,
    /// Issue-tracker component this repo maps to, if any.
    pub jira_component_name: Option<&'static str>,
    /// Locations of the generated platform JS inside the repo, used by the
    /// release-branch helper.
    pub cordova_js_paths: &'static [&'static str],
    /// Files that carry the release version string.
    pub version_file_paths: &'static [&'static str],
    /// Extra exclude patterns for the license-header audit.
    pub rat_excludes: &'static [&'static str],
    /// Excluded from the active and release groups.
    pub inactive: bool,
    /// Alternate svn remote for artifacts not hosted in git.
    pub svn: Option<&'static str>,
}

impl Repo {
    /// The URL this repository is cloned from.
    pub fn remote_url(&self) -> String {
        format!("{}/{}.git", GIT_REMOTE_BASE, self.repo_name)
    }
}

// Blank entry so the catalog below only spells out the fields that differ.
const BASE: Repo = Repo {
    id: "",
    title: "",
    repo_name: "",
    jira_component_name: None,
    cordova_js_paths: &[],
    version_file_paths: &[],
    rat_excludes: &[],
    inactive: false,
    svn: None,
};

const ANDROID_RAT_EXCLUDES: &[&str] = &["*.properties", "bin", "gen", "proguard-project.txt"];

pub static PLATFORM_REPOS: &[Repo] = &[
    Repo {
        id: "android",
        title: "Android",
        repo_name: "cordova-android",
        jira_component_name: Some("Android"),
        cordova_js_paths: &["framework/assets/www/cordova.js"],
        rat_excludes: ANDROID_RAT_EXCLUDES,
        ..BASE
    },
    Repo {
        id: "ios",
        title: "iOS",
        repo_name: "cordova-ios",
        jira_component_name: Some("iOS"),
        cordova_js_paths: &["CordovaLib/cordova.js"],
        version_file_paths: &["CordovaLib/VERSION"],
        ..BASE
    },
    Repo {
        id: "blackberry",
        title: "BlackBerry",
        repo_name: "cordova-blackberry",
        jira_component_name: Some("BlackBerry"),
        cordova_js_paths: &["blackberry10/javascript/cordova.blackberry10.js"],
        version_file_paths: &["blackberry10/VERSION"],
        ..BASE
    },
    Repo {
        id: "windows",
        title: "Windows",
        repo_name: "cordova-windows",
        jira_component_name: Some("Windows 8"),
        cordova_js_paths: &["windows8/cordova.js", "windows8/template/www/cordova.js"],
        version_file_paths: &["windows8/VERSION", "windows8/template/VERSION"],
        ..BASE
    },
    Repo {
        id: "wp8",
        title: "Windows Phone 7 & 8",
        repo_name: "cordova-wp8",
        jira_component_name: Some("WP8"),
        cordova_js_paths: &["common/www/cordova.js"],
        ..BASE
    },
    Repo {
        id: "firefoxos",
        title: "Firefox OS",
        repo_name: "cordova-firefoxos",
        jira_component_name: Some("FirefoxOS"),
        cordova_js_paths: &["cordova-lib/cordova.js"],
        ..BASE
    },
    Repo {
        id: "osx",
        title: "Mac OSX",
        repo_name: "cordova-osx",
        jira_component_name: Some("OSX"),
        cordova_js_paths: &["CordovaFramework/cordova.js"],
        inactive: true,
        ..BASE
    },
    Repo {
        id: "ubuntu",
        title: "Ubuntu",
        repo_name: "cordova-ubuntu",
        jira_component_name: Some("Ubuntu"),
        cordova_js_paths: &["www/cordova.js"],
        ..BASE
    },
    Repo {
        id: "amazon-fireos",
        title: "Amazon Fire OS",
        repo_name: "cordova-amazon-fireos",
        jira_component_name: Some("Amazon FireOS"),
        cordova_js_paths: &["framework/assets/www/cordova.js"],
        rat_excludes: ANDROID_RAT_EXCLUDES,
        ..BASE
    },
    Repo {
        id: "bada",
        title: "Bada",
        repo_name: "cordova-bada",
        jira_component_name: Some("Bada"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "bada-wac",
        title: "Bada WAC",
        repo_name: "cordova-bada-wac",
        jira_component_name: Some("Bada"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "webos",
        title: "WebOS",
        repo_name: "cordova-webos",
        jira_component_name: Some("webOS"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "qt",
        title: "QT",
        repo_name: "cordova-qt",
        jira_component_name: Some("Qt"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "tizen",
        title: "Tizen",
        repo_name: "cordova-tizen",
        jira_component_name: Some("Tizen"),
        inactive: true,
        ..BASE
    },
];

pub static NON_PLATFORM_REPOS: &[Repo] = &[
    Repo {
        id: "docs",
        title: "Docs",
        repo_name: "cordova-docs",
        jira_component_name: Some("Docs"),
        ..BASE
    },
    Repo {
        id: "mobile-spec",
        title: "MobileSpec",
        repo_name: "cordova-mobile-spec",
        jira_component_name: Some("mobile-spec"),
        rat_excludes: &["jasmine.*", "html", "uubench.js"],
        ..BASE
    },
    Repo {
        id: "js",
        title: "Cordova JS",
        repo_name: "cordova-js",
        jira_component_name: Some("CordovaJS"),
        ..BASE
    },
    Repo {
        id: "app-hello-world",
        title: "Hello World App",
        repo_name: "cordova-app-hello-world",
        jira_component_name: Some("App Hello World"),
        ..BASE
    },
];

pub static PLUGIN_REPOS: &[Repo] = &[
    Repo {
        id: "plugin-battery-status",
        title: "Plugin - Battery Status",
        repo_name: "cordova-plugin-battery-status",
        jira_component_name: Some("Plugin Battery Status"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-camera",
        title: "Plugin - Camera",
        repo_name: "cordova-plugin-camera",
        jira_component_name: Some("Plugin Camera"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-console",
        title: "Plugin - Console",
        repo_name: "cordova-plugin-console",
        jira_component_name: Some("Plugin Console"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-contacts",
        title: "Plugin - Contacts",
        repo_name: "cordova-plugin-contacts",
        jira_component_name: Some("Plugin Contacts"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-device-motion",
        title: "Plugin - Device Motion",
        repo_name: "cordova-plugin-device-motion",
        jira_component_name: Some("Plugin Device Motion"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-device-orientation",
        title: "Plugin - Device Orientation",
        repo_name: "cordova-plugin-device-orientation",
        jira_component_name: Some("Plugin Device Orientation"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-device",
        title: "Plugin - Device",
        repo_name: "cordova-plugin-device",
        jira_component_name: Some("Plugin Device"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-dialogs",
        title: "Plugin - Dialogs",
        repo_name: "cordova-plugin-dialogs",
        jira_component_name: Some("Plugin Dialogs"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-file-transfer",
        title: "Plugin - File Transfer",
        repo_name: "cordova-plugin-file-transfer",
        jira_component_name: Some("Plugin File Transfer"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-file",
        title: "Plugin - File",
        repo_name: "cordova-plugin-file",
        jira_component_name: Some("Plugin File"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-geolocation",
        title: "Plugin - Geolocation",
        repo_name: "cordova-plugin-geolocation",
        jira_component_name: Some("Plugin Geolocation"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-globalization",
        title: "Plugin - Globalization",
        repo_name: "cordova-plugin-globalization",
        jira_component_name: Some("Plugin Globalization"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-inappbrowser",
        title: "Plugin - InAppBrowser",
        repo_name: "cordova-plugin-inappbrowser",
        jira_component_name: Some("Plugin InAppBrowser"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-media",
        title: "Plugin - Media",
        repo_name: "cordova-plugin-media",
        jira_component_name: Some("Plugin Media"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-media-capture",
        title: "Plugin - Media Capture",
        repo_name: "cordova-plugin-media-capture",
        jira_component_name: Some("Plugin Media Capture"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-network-information",
        title: "Plugin - Network Information",
        repo_name: "cordova-plugin-network-information",
        jira_component_name: Some("Plugin Network Information"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-splashscreen",
        title: "Plugin - Splash Screen",
        repo_name: "cordova-plugin-splashscreen",
        jira_component_name: Some("Plugin SplashScreen"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-vibration",
        title: "Plugin - Vibration",
        repo_name: "cordova-plugin-vibration",
        jira_component_name: Some("Plugin Vibration"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugin-statusbar",
        title: "Plugin - Statusbar",
        repo_name: "cordova-plugin-statusbar",
        jira_component_name: Some("Plugin Statusbar"),
        inactive: true,
        ..BASE
    },
];

pub static OTHER_REPOS: &[Repo] = &[
    Repo {
        id: "cli",
        title: "Cordova CLI",
        repo_name: "cordova-cli",
        jira_component_name: Some("CLI"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "plugman",
        title: "Cordova Plugman",
        repo_name: "cordova-plugman",
        jira_component_name: Some("Plugman"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "medic",
        title: "Cordova Medic",
        repo_name: "cordova-medic",
        inactive: true,
        ..BASE
    },
    Repo {
        id: "app-harness",
        title: "Cordova App Harness",
        repo_name: "cordova-app-harness",
        jira_component_name: Some("AppHarness"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "coho",
        title: "Cordova Coho",
        repo_name: "cordova-coho",
        jira_component_name: Some("Coho"),
        inactive: true,
        ..BASE
    },
    Repo {
        id: "labs",
        title: "Cordova Labs",
        repo_name: "cordova-labs",
        inactive: true,
        ..BASE
    },
    Repo {
        id: "registry-web",
        title: "Cordova Registry Website",
        repo_name: "cordova-registry-web",
        inactive: true,
        ..BASE
    },
    Repo {
        id: "registry",
        title: "Cordova Registry DB",
        repo_name: "cordova-registry",
        inactive: true,
        ..BASE
    },
    Repo {
        id: "dist",
        title: "Apache dist/release/cordova",
        repo_name: "cordova-dist",
        inactive: true,
        svn: Some("https://dist.apache.org/repos/dist/release/cordova"),
        ..BASE
    },
    Repo {
        id: "dist/dev",
        title: "Apache dist/dev/cordova",
        repo_name: "cordova-dist-dev",
        inactive: true,
        svn: Some("https://dist.apache.org/repos/dist/dev/cordova"),
        ..BASE
    },
    Repo {
        id: "website",
        title: "Cordova Website",
        repo_name: "cordova-website",
        inactive: true,
        svn: Some("https://svn.apache.org/repos/asf/cordova/site"),
        ..BASE
    },
];

/// Every registry repo in declaration order: platforms, non-platforms,
/// plugins, then everything else.
pub fn all_repos() -> Vec<&'static Repo> {
    PLATFORM_REPOS
        .iter()
        .chain(NON_PLATFORM_REPOS)
        .chain(PLUGIN_REPOS)
        .chain(OTHER_REPOS)
        .collect()
}

/// Looks up a repository by id, with or without the conventional
/// `cordova-` prefix. Searches `repos` when given, the full registry
/// otherwise. Absence is `None`, never an error; callers decide whether a
/// missing repo is fatal.
pub fn get_repo_by_id(id: &str, repos: Option<&[&'static Repo]>) -> Option<&'static Repo> {
    let id = id.strip_prefix(REPO_NAME_PREFIX).unwrap_or(id);
    match repos {
        Some(set) => set.iter().copied().find(|r| r.id == id),
        None => all_repos().into_iter().find(|r| r.id == id),
    }
}

/// Expands `-r` flag values (group names or repo ids) into an ordered,
/// deduplicated repo list. An unrecognized value is a user-facing error.
pub fn resolve_repo_flags(values: &[String]) -> Result<Vec<&'static Repo>> {
    let mut repos: Vec<&'static Repo> = Vec::new();
    for value in values {
        if let Some(group) = crate::groups::repo_group(value) {
            repos.extend(group);
        } else if let Some(repo) = get_repo_by_id(value, None) {
            repos.push(repo);
        } else {
            bail!(
                "Invalid repo value: {}. Run `relman list-repos` to see valid values.",
                value
            );
        }
    }
    let mut seen = HashSet::new();
    repos.retain(|r| seen.insert(r.id));
    Ok(repos)
}
