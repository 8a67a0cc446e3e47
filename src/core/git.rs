//! Repository metadata extraction.
//!
//! This module provides [`GitRepo`], a thin wrapper over `git2::Repository` that reads
//! the remote, branch and working-tree state of a single directory, and
//! [`extract_metadata`], which turns that into a [`RepoMetadata`] without ever failing.
//!
//! # Public API
//! - [`GitRepo`]: Opens one directory (no parent search) and queries its state
//! - [`StatusReport`]: Capped list of changed paths plus the true total
//! - [`extract_metadata`]: Best-effort extraction, every failure becomes an empty field
//! - [`MetadataExtractor`] / [`GitExtractor`]: The seam the scanner extracts through
//!
//! # Failure Policy
//! - **Not a repository**: `is_repo = false`, no error
//! - **Remote lookup fails**: `remote_url` left empty
//! - **HEAD unreadable or detached**: `current_branch` left empty
//! - **Status fails**: `has_uncommitted = false`, `status_summary` left empty

use crate::core::{
    error::Result,
    git_status::{format_status_summary, StatusLine, SUMMARY_LIMIT},
    state::RepoMetadata,
};
use git2::{Repository, StatusOptions};
use std::path::Path;

const PREFERRED_REMOTE: &str = "origin";

pub struct GitRepo {
    repo: Repository,
}

/// Changed paths of a working tree, capped at [`SUMMARY_LIMIT`] entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub listed: Vec<StatusLine>,
    pub total: usize,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.total == 0
    }

    pub fn summary(&self) -> String {
        format_status_summary(&self.listed, self.total)
    }
}

impl GitRepo {
    /// Open `path` as a repository. Parent directories are never searched, so a
    /// project folder inside a versioned workspace is not mistaken for a repository.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path)?;
        Ok(GitRepo { repo })
    }

    /// URL of `origin` if configured, otherwise of the first other remote
    pub fn get_remote_url(&self) -> Result<Option<String>> {
        if let Ok(origin) = self.repo.find_remote(PREFERRED_REMOTE) {
            if let Some(url) = origin.url() {
                return Ok(Some(url.to_string()));
            }
        }

        let remotes = self.repo.remotes()?;
        for name in remotes.iter().flatten() {
            if name == PREFERRED_REMOTE {
                continue;
            }
            if let Ok(remote) = self.repo.find_remote(name) {
                if let Some(url) = remote.url() {
                    return Ok(Some(url.to_string()));
                }
            }
        }

        Ok(None)
    }

    /// Short name of the checked-out branch, `None` when HEAD is detached
    pub fn get_current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.head()?;

        if head.is_branch() {
            Ok(head.shorthand().map(str::to_string))
        } else {
            Ok(None)
        }
    }

    /// Working-tree status in the order libgit2 reports it
    pub fn get_status(&self) -> Result<StatusReport> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts.include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let mut report = StatusReport::default();

        for entry in statuses.iter() {
            let flags = entry.status();
            if flags.is_empty() || flags.contains(git2::Status::IGNORED) {
                continue;
            }

            report.total += 1;
            if report.listed.len() < SUMMARY_LIMIT {
                let path = String::from_utf8_lossy(entry.path_bytes()).into_owned();
                report.listed.push(StatusLine::from_git2(flags, path));
            }
        }

        Ok(report)
    }
}

/// Inspect one directory. Never fails: every error degrades to an omitted field.
pub fn extract_metadata(dir: &Path) -> RepoMetadata {
    let git_repo = match GitRepo::open(dir) {
        Ok(repo) => repo,
        Err(e) => {
            log::debug!("not a git repository path={} reason={e}", dir.display());
            return RepoMetadata::not_a_repo();
        }
    };

    let mut metadata = RepoMetadata::repository();

    match git_repo.get_remote_url() {
        Ok(Some(url)) => metadata.remote_url = url,
        Ok(None) => {}
        Err(e) => log::debug!("remote lookup failed path={} error={e}", dir.display()),
    }

    match git_repo.get_current_branch() {
        Ok(Some(branch)) => metadata.current_branch = branch,
        Ok(None) => log::debug!("detached HEAD path={}", dir.display()),
        Err(e) => log::debug!("cannot resolve HEAD path={} error={e}", dir.display()),
    }

    match git_repo.get_status() {
        Ok(report) => {
            metadata.has_uncommitted = !report.is_clean();
            metadata.status_summary = report.summary();
        }
        Err(e) => log::debug!("status query failed path={} error={e}", dir.display()),
    }

    metadata
}

/// Per-directory extraction step used by the scanner
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, dir: &Path) -> RepoMetadata;
}

/// Production extractor backed by `git2`
#[derive(Debug, Clone, Copy, Default)]
pub struct GitExtractor;

impl MetadataExtractor for GitExtractor {
    fn extract(&self, dir: &Path) -> RepoMetadata {
        extract_metadata(dir)
    }
}
