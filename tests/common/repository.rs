//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories with the git CLI, so the
//! scanner reads repositories exactly as a developer's checkout would look.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thandie::core::error::{Result, ThandieError};

/// Test repository setup result containing both the temporary directory
/// and the repository path. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    /// Get the repository path as a reference
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs a git command in `dir`, failing when git exits non-zero
pub fn git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(ThandieError::Io)?;

    if !output.status.success() {
        return Err(ThandieError::Io(std::io::Error::other(format!(
            "git {} failed in {}: {}",
            args.join(" "),
            dir.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        ))));
    }
    Ok(())
}

/// Initializes `dir` as a git repository on branch `main`
///
/// Sets user identity and disables commit signing so commits never prompt.
pub fn init_repo(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(ThandieError::Io)?;
    git(dir, &["init"])?;
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(dir, &["config", "user.name", "Test User"])?;
    git(dir, &["config", "user.email", "test@example.com"])?;
    git(dir, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

/// Sets up a fresh git repository in its own temporary directory
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new().map_err(ThandieError::Io)?;
    let repo_path = temp_dir.path().to_path_buf();
    init_repo(&repo_path)?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Creates a file with specified content in the repository
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content).map_err(ThandieError::Io)?;
    Ok(())
}

/// Adds a file to the git index (or "." for all files)
pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])
}

/// Creates a git commit with the specified message
pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])
}

/// Creates and commits `filenames` with sequential content
pub fn commit_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        create_file(repo_path, filename, &format!("content{}\nline 2\n", i + 1))?;
    }
    git_add(repo_path, ".")?;
    git_commit(repo_path, "Initial commit")
}

/// Overwrites tracked files so they show up as modified
pub fn modify_files(repo_path: &Path, filenames: &[&str]) -> Result<()> {
    for (i, filename) in filenames.iter().enumerate() {
        create_file(
            repo_path,
            filename,
            &format!("modified{}\nline 2\nnew line\n", i + 1),
        )?;
    }
    Ok(())
}

/// Replaces HEAD with unparseable content. The repository still opens but its
/// current reference can no longer be resolved.
pub fn corrupt_head(repo_path: &Path) -> Result<()> {
    fs::write(repo_path.join(".git").join("HEAD"), "garbage\n").map_err(ThandieError::Io)
}
