//! Scan result data structures and their on-disk representation.
//!
//! This module defines the records produced by one scan pass and the cache entry
//! format written by [`ResultCache`](crate::core::cache::ResultCache).
//!
//! # Public API
//! - [`RepoMetadata`]: Version-control state of one directory
//! - [`DirectoryRecord`]: One scanned directory with optional metadata
//! - [`Snapshot`]: Immutable result of a complete scan
//! - [`ScanSummary`]: Directory, repository and dirty counts for a snapshot
//! - [`CacheEntry`]: Serialized form, including the deprecated flat path list
//!
//! # Serialization
//! - **JSON field names** match the existing cache files (`is_git_repo`, `git_metadata`,
//!   `directory_infos`)
//! - **Empty fields** are omitted on write and defaulted on read
//! - **Timestamps** are RFC 3339 in UTC

use crate::core::git_status::CLEAN_SUMMARY;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

fn is_false(value: &bool) -> bool {
    !*value
}

/// Paths are written as strings; bytes that are not UTF-8 become U+FFFD
fn serialize_path_lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: serde::Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoMetadata {
    #[serde(rename = "is_git_repo")]
    pub is_repo: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub remote_url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_branch: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub has_uncommitted: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status_summary: String,
}

impl RepoMetadata {
    /// Metadata for a directory that is not version-controlled
    pub fn not_a_repo() -> Self {
        Self::default()
    }

    /// Metadata for a repository whose fields are still to be resolved
    pub fn repository() -> Self {
        Self {
            is_repo: true,
            ..Self::default()
        }
    }

    /// True when a status query ran and found no changes
    pub fn is_clean(&self) -> bool {
        self.status_summary == CLEAN_SUMMARY
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRecord {
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,
    #[serde(
        rename = "git_metadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<RepoMetadata>,
}

impl DirectoryRecord {
    pub fn new(path: impl Into<PathBuf>, metadata: Option<RepoMetadata>) -> Self {
        Self {
            path: path.into(),
            metadata,
        }
    }

    /// Final path component, used for display and log lines
    pub fn name(&self) -> String {
        display_name(&self.path)
    }

    pub fn is_repo(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.is_repo)
    }

    pub fn has_uncommitted(&self) -> bool {
        self.metadata
            .as_ref()
            .is_some_and(|m| m.is_repo && m.has_uncommitted)
    }
}

/// Final path component of `path`, falling back to the whole path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Counts reported at the end of a scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub directories: usize,
    pub repositories: usize,
    pub uncommitted: usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Directories scanned: {}, git repositories: {}, with uncommitted changes: {}",
            self.directories, self.repositories, self.uncommitted
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub workspace_path: String,
    pub scanned_at: DateTime<Utc>,
    pub records: Vec<DirectoryRecord>,
    pub count: usize,
}

impl Snapshot {
    /// Build a snapshot stamped with the current time
    pub fn new(workspace_path: impl Into<String>, records: Vec<DirectoryRecord>) -> Self {
        Self::with_timestamp(workspace_path, Utc::now(), records)
    }

    pub fn with_timestamp(
        workspace_path: impl Into<String>,
        scanned_at: DateTime<Utc>,
        records: Vec<DirectoryRecord>,
    ) -> Self {
        let count = records.len();
        Self {
            workspace_path: workspace_path.into(),
            scanned_at,
            records,
            count,
        }
    }

    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            directories: self.records.len(),
            repositories: self.records.iter().filter(|r| r.is_repo()).count(),
            uncommitted: self.records.iter().filter(|r| r.has_uncommitted()).count(),
        }
    }
}

/// On-disk layout of one cached scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub workspace_path: String,
    pub scanned_at: DateTime<Utc>,
    /// Deprecated: path-only list kept for older readers, use `directory_infos`
    #[serde(default)]
    pub directories: Vec<String>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub directory_infos: Vec<DirectoryRecord>,
}

impl From<&Snapshot> for CacheEntry {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            workspace_path: snapshot.workspace_path.clone(),
            scanned_at: snapshot.scanned_at,
            directories: snapshot
                .records
                .iter()
                .map(|r| r.path.to_string_lossy().into_owned())
                .collect(),
            count: snapshot.records.len(),
            directory_infos: snapshot.records.clone(),
        }
    }
}

impl CacheEntry {
    /// Convert back into a snapshot. Entries written before `directory_infos`
    /// existed are rebuilt from the flat path list without metadata.
    pub fn into_snapshot(self) -> Snapshot {
        let records = if self.directory_infos.is_empty() && !self.directories.is_empty() {
            self.directories
                .into_iter()
                .map(|path| DirectoryRecord::new(path, None))
                .collect()
        } else {
            self.directory_infos
        };

        if records.len() != self.count {
            log::debug!(
                "cache entry count mismatch workspace={} stored={} actual={}",
                self.workspace_path,
                self.count,
                records.len()
            );
        }

        Snapshot::with_timestamp(self.workspace_path, self.scanned_at, records)
    }
}
