//! Integration tests for the sequential repo walker.
//!
//! The walker mutates the process working directory, so every test takes the
//! global lock and enters a temp workspace through the same `WorkDir` guard
//! the walker itself uses.

mod common;
use common::{lock_test, Workspace};

use std::cell::RefCell;
use std::env;
use std::path::Path;

use relman::registry::get_repo_by_id;
use relman::walker::{for_each_repo, Walk, WorkDir};

fn canonical(path: &Path) -> std::path::PathBuf {
    path.canonicalize().expect("path exists")
}

#[tokio::test]
async fn visits_all_repos_in_order_and_restores_cwd() {
    let _lock = lock_test();
    let android = get_repo_by_id("android", None).expect("registered");
    let ios = get_repo_by_id("ios", None).expect("registered");
    let docs = get_repo_by_id("docs", None).expect("registered");
    let repos = [android, ios, docs];

    let ws = Workspace::new();
    for repo in &repos {
        ws.add_dir(repo);
    }
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");
    let before = env::current_dir().expect("cwd");

    let visited = RefCell::new(Vec::new());
    for_each_repo(&repos, |repo| {
        let visited = &visited;
        async move {
            // The action must observe its own repo directory, nothing else.
            let here = canonical(&env::current_dir()?);
            assert_eq!(here.file_name().unwrap().to_str().unwrap(), repo.repo_name);
            visited.borrow_mut().push(repo.id);
            Ok(())
        }
    })
    .await
    .expect("walk succeeds");

    assert_eq!(*visited.borrow(), vec!["android", "ios", "docs"]);
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[tokio::test]
async fn nested_walk_restores_inner_entry_directory() {
    let _lock = lock_test();
    let android = get_repo_by_id("android", None).expect("registered");
    let ios = get_repo_by_id("ios", None).expect("registered");

    let ws = Workspace::new();
    let android_dir = canonical(&ws.add_dir(android));
    ws.add_dir(ios);
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");

    let walk = Walk::from_cwd().expect("context");
    walk.run(&[android], |_repo, inner| {
        let android_dir = android_dir.clone();
        async move {
            let entry_dir = canonical(&env::current_dir()?);
            assert_eq!(entry_dir, android_dir);

            inner
                .run(&[ios], |repo, _| async move {
                    let here = canonical(&env::current_dir()?);
                    assert_eq!(here.file_name().unwrap().to_str().unwrap(), repo.repo_name);
                    Ok(())
                })
                .await?;

            // Back inside the outer repo, not the workspace root.
            assert_eq!(canonical(&env::current_dir()?), entry_dir);
            Ok(())
        }
    })
    .await
    .expect("nested walk succeeds");
}

#[tokio::test]
async fn missing_directory_halts_walk_before_its_action() {
    let _lock = lock_test();
    let android = get_repo_by_id("android", None).expect("registered");
    let ios = get_repo_by_id("ios", None).expect("registered");
    let docs = get_repo_by_id("docs", None).expect("registered");

    let ws = Workspace::new();
    ws.add_dir(android);
    ws.add_dir(docs);
    // cordova-ios deliberately missing.
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");
    let before = env::current_dir().expect("cwd");

    let visited = RefCell::new(Vec::new());
    let err = for_each_repo(&[android, ios, docs], |repo| {
        let visited = &visited;
        async move {
            visited.borrow_mut().push(repo.id);
            Ok(())
        }
    })
    .await
    .expect_err("walk must fail on the missing repo");

    assert_eq!(*visited.borrow(), vec!["android"]);
    let message = err.to_string();
    assert!(message.contains("cordova-ios"), "unexpected error: {message}");
    assert!(message.contains("repo-clone"), "unexpected error: {message}");
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[tokio::test]
async fn failing_action_still_restores_cwd() {
    let _lock = lock_test();
    let android = get_repo_by_id("android", None).expect("registered");

    let ws = Workspace::new();
    ws.add_dir(android);
    let _cwd = WorkDir::push(ws.path()).expect("enter workspace");
    let before = env::current_dir().expect("cwd");

    let err = for_each_repo(&[android], |_repo| async move {
        anyhow::bail!("action exploded")
    })
    .await
    .expect_err("action error propagates");

    assert!(err.to_string().contains("action exploded"));
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn workdir_guard_restores_on_drop() {
    let _lock = lock_test();
    let ws = Workspace::new();
    let before = env::current_dir().expect("cwd");

    {
        let _guard = WorkDir::push(ws.path()).expect("enter workspace");
        assert_eq!(
            canonical(&env::current_dir().expect("cwd")),
            canonical(ws.path())
        );
    }
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn workdir_push_fails_for_missing_directory() {
    let _lock = lock_test();
    let before = env::current_dir().expect("cwd");
    assert!(WorkDir::push(Path::new("/definitely/not/a/real/dir")).is_err());
    assert_eq!(env::current_dir().expect("cwd"), before);
}
