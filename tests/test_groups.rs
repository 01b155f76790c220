//! Integration tests for group resolution behavior that touches the
//! filesystem. Pure group properties are unit-tested next to the resolver.

mod common;
use common::{lock_test, Workspace};

use relman::groups::repo_group;
use relman::registry::get_repo_by_id;
use relman::walker::WorkDir;

#[test]
fn auto_reflects_live_filesystem_state() {
    let _lock = lock_test();
    let ws = Workspace::new();
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");

    let auto = repo_group("auto").expect("built-in group");
    assert!(auto.is_empty(), "empty workspace should yield no auto repos");

    let android = get_repo_by_id("android", None).expect("registered");
    ws.add_dir(android);

    // Recomputed on each access, so the new directory shows up immediately.
    let auto = repo_group("auto").expect("built-in group");
    assert_eq!(auto.len(), 1);
    assert_eq!(auto[0].id, "android");

    let docs = get_repo_by_id("docs", None).expect("registered");
    ws.add_dir(docs);

    let auto = repo_group("auto").expect("built-in group");
    assert_eq!(auto.len(), 2);
}

#[test]
fn auto_ignores_plain_files_with_repo_names() {
    let _lock = lock_test();
    let ws = Workspace::new();
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");

    std::fs::write(ws.path().join("cordova-android"), "not a directory").expect("write");
    let auto = repo_group("auto").expect("built-in group");
    assert!(auto.is_empty());
}
