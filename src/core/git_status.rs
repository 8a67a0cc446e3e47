//! Two-column git status codes and the status summary format.
//!
//! This module maps `git2` status flags onto the porcelain-style `XY` pair (index
//! column, worktree column) and renders the compact summary stored in
//! [`RepoMetadata::status_summary`](crate::core::state::RepoMetadata).
//!
//! # Public API
//! - [`StatusCode`]: One column of a porcelain status line
//! - [`StatusLine`]: A changed path with both columns
//! - [`format_status_summary`]: Build `"XY path; XY path ... (K more)"` or `"clean"`
//!
//! # Summary Format
//! At most [`SUMMARY_LIMIT`] entries are listed, joined by `"; "`. When more files
//! changed, `" ... (<K> more)"` is appended where `K` is the remainder.

use std::fmt;

/// Number of changed files listed before the overflow suffix kicks in
pub const SUMMARY_LIMIT: usize = 5;

/// Summary value for a repository without changes
pub const CLEAN_SUMMARY: &str = "clean";

/// One column of a porcelain status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// No change in this column (' ')
    Unmodified,
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (?)
    Untracked,
    /// Unmerged/conflicted file (U)
    Unmerged,
}

impl StatusCode {
    /// Index column for the given flags
    pub fn from_git2_index(flags: git2::Status) -> StatusCode {
        if flags.contains(git2::Status::CONFLICTED) {
            return StatusCode::Unmerged;
        }
        if flags.contains(git2::Status::WT_NEW) && !Self::has_index_change(flags) {
            return StatusCode::Untracked;
        }
        if flags.contains(git2::Status::INDEX_NEW) {
            return StatusCode::Added;
        }
        if flags.contains(git2::Status::INDEX_MODIFIED) {
            return StatusCode::Modified;
        }
        if flags.contains(git2::Status::INDEX_DELETED) {
            return StatusCode::Deleted;
        }
        if flags.contains(git2::Status::INDEX_RENAMED) {
            return StatusCode::Renamed;
        }
        if flags.contains(git2::Status::INDEX_TYPECHANGE) {
            return StatusCode::TypeChanged;
        }

        StatusCode::Unmodified
    }

    /// Worktree column for the given flags
    pub fn from_git2_worktree(flags: git2::Status) -> StatusCode {
        if flags.contains(git2::Status::CONFLICTED) {
            return StatusCode::Unmerged;
        }
        if flags.contains(git2::Status::WT_NEW) {
            return StatusCode::Untracked;
        }
        if flags.contains(git2::Status::WT_MODIFIED) {
            return StatusCode::Modified;
        }
        if flags.contains(git2::Status::WT_DELETED) {
            return StatusCode::Deleted;
        }
        if flags.contains(git2::Status::WT_RENAMED) {
            return StatusCode::Renamed;
        }
        if flags.contains(git2::Status::WT_TYPECHANGE) {
            return StatusCode::TypeChanged;
        }

        StatusCode::Unmodified
    }

    fn has_index_change(flags: git2::Status) -> bool {
        flags.intersects(
            git2::Status::INDEX_NEW
                | git2::Status::INDEX_MODIFIED
                | git2::Status::INDEX_DELETED
                | git2::Status::INDEX_RENAMED
                | git2::Status::INDEX_TYPECHANGE,
        )
    }

    /// Single character used in the status summary
    pub fn as_char(&self) -> char {
        match self {
            StatusCode::Unmodified => ' ',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Deleted => 'D',
            StatusCode::Renamed => 'R',
            StatusCode::TypeChanged => 'T',
            StatusCode::Untracked => '?',
            StatusCode::Unmerged => 'U',
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A changed path together with its index and worktree columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub index: StatusCode,
    pub worktree: StatusCode,
    pub path: String,
}

impl StatusLine {
    pub fn new(index: StatusCode, worktree: StatusCode, path: impl Into<String>) -> Self {
        Self {
            index,
            worktree,
            path: path.into(),
        }
    }

    /// Build a line straight from `git2` flags
    pub fn from_git2(flags: git2::Status, path: impl Into<String>) -> Self {
        Self::new(
            StatusCode::from_git2_index(flags),
            StatusCode::from_git2_worktree(flags),
            path,
        )
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.index, self.worktree, self.path)
    }
}

/// Render the summary for `listed` (already capped) out of `total` changed files.
///
/// `total == 0` yields [`CLEAN_SUMMARY`].
pub fn format_status_summary(listed: &[StatusLine], total: usize) -> String {
    if total == 0 || listed.is_empty() {
        return CLEAN_SUMMARY.to_string();
    }

    let mut summary = listed
        .iter()
        .take(SUMMARY_LIMIT)
        .map(StatusLine::to_string)
        .collect::<Vec<_>>()
        .join("; ");

    if total > SUMMARY_LIMIT {
        summary.push_str(&format!(" ... ({} more)", total - SUMMARY_LIMIT));
    }

    summary
}
