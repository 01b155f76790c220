//! Release archive creation and verification.
//!
//! Archives are produced by `git archive`, detach-signed with gpg, and
//! paired with a `.sha512` checksum file computed in-process.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha512};
use std::path::{Path, PathBuf};

use crate::exec::{run_tool, TOOL_TIMEOUT_SECS};
use crate::git::{git_ok, tag_exists};
use crate::registry::Repo;
use crate::walker::for_each_repo;

/// Hex sha512 digest of a file, streamed so large archives do not land in
/// memory whole.
pub fn sha512_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut hasher = Sha512::new();
    std::io::copy(&mut file, &mut hasher)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let digest = hasher.finalize();
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

fn checksum_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".sha512");
    PathBuf::from(name)
}

fn signature_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".asc");
    PathBuf::from(name)
}

/// Zips the given tag of each repo into `dest`, signs it, and writes the
/// checksum file.
pub async fn handle_create_archive_command(
    repos: &[&'static Repo],
    tag: &str,
    dest: &Path,
) -> Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    // The walker changes the working directory per repo, so the destination
    // must be absolute before the walk starts.
    let dest = std::fs::canonicalize(dest)
        .with_context(|| format!("failed to resolve {}", dest.display()))?;

    for_each_repo(repos, |repo| {
        let dest = dest.clone();
        async move {
            if !tag_exists(Path::new("."), tag).await {
                bail!("Tag {} does not exist in {}", tag, repo.repo_name);
            }

            let archive = dest.join(format!("{}-{}.zip", repo.repo_name, tag));
            let archive_str = archive.to_string_lossy().into_owned();
            let prefix = format!("--prefix={}/", repo.repo_name);
            git_ok(&["archive", "--format", "zip", &prefix, "-o", &archive_str, tag]).await?;

            let signature = signature_path(&archive);
            let signature_str = signature.to_string_lossy().into_owned();
            let (signed, _, stderr) = run_tool(
                "gpg",
                Path::new("."),
                &["--armor", "--detach-sig", "--output", &signature_str, &archive_str],
                TOOL_TIMEOUT_SECS,
            )
            .await?;
            if !signed {
                bail!("gpg signing failed for {}: {}", archive.display(), stderr);
            }

            let digest = sha512_file(&archive)?;
            let file_name = archive
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| archive_str.clone());
            std::fs::write(checksum_path(&archive), format!("{digest}  {file_name}\n"))
                .with_context(|| format!("failed to write checksum for {}", archive.display()))?;

            println!("🟢 {} archived, signed, and hashed", archive.display());
            Ok(())
        }
    })
    .await
}

/// Verifies the gpg signature and sha512 checksum of each archive file.
/// Fails after checking everything if any archive did not verify.
pub async fn handle_verify_archive_command(archives: &[PathBuf]) -> Result<()> {
    if archives.is_empty() {
        bail!("No archives given. Pass the .zip files to verify.");
    }

    let mut failures = 0;
    for archive in archives {
        match verify_one(archive).await {
            Ok(()) => println!("🟢 {} verified", archive.display()),
            Err(e) => {
                failures += 1;
                println!("🔴 {}: {}", archive.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} archive(s) failed verification", failures, archives.len());
    }
    Ok(())
}

async fn verify_one(archive: &Path) -> Result<()> {
    if !archive.is_file() {
        bail!("archive not found");
    }

    let signature = signature_path(archive);
    let signature_str = signature.to_string_lossy().into_owned();
    let archive_str = archive.to_string_lossy().into_owned();
    let (sig_ok, _, stderr) = run_tool(
        "gpg",
        Path::new("."),
        &["--verify", &signature_str, &archive_str],
        TOOL_TIMEOUT_SECS,
    )
    .await?;
    if !sig_ok {
        bail!("signature verification failed: {}", stderr);
    }

    let checksum_file = checksum_path(archive);
    let recorded = std::fs::read_to_string(&checksum_file)
        .with_context(|| format!("failed to read {}", checksum_file.display()))?;
    let recorded = recorded
        .split_whitespace()
        .next()
        .context("checksum file is empty")?;
    let actual = sha512_file(archive)?;
    if recorded != actual {
        bail!("sha512 mismatch: recorded {recorded}, actual {actual}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha512_of_known_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("input.txt");
        std::fs::write(&file, "abc").expect("write");
        assert_eq!(
            sha512_file(&file).expect("hash"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn sidecar_paths_append_extensions() {
        let archive = Path::new("out/cordova-ios-3.1.0.zip");
        assert_eq!(
            checksum_path(archive),
            Path::new("out/cordova-ios-3.1.0.zip.sha512")
        );
        assert_eq!(
            signature_path(archive),
            Path::new("out/cordova-ios-3.1.0.zip.asc")
        );
    }
}
