//! Top-level directory enumeration for a workspace root.
//!
//! Only immediate children are considered. Entries are kept when they are real
//! directories (symlinks are not followed), their name is not in the ignore set, and
//! they are not dot-prefixed unless hidden entries are requested.
//!
//! The order is whatever the filesystem listing yields; callers that display the
//! result and need a stable order sort it themselves.

use crate::core::error::{Result, ThandieError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names skipped unless the configuration says otherwise
pub const DEFAULT_IGNORE_DIRS: [&str; 3] = [".git", "node_modules", "vendor"];

/// Exact directory names excluded from a scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Name-based filter applied to each entry of the root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanFilter {
    pub ignore: IgnoreSet,
    pub include_hidden: bool,
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self {
            ignore: IgnoreSet::new(DEFAULT_IGNORE_DIRS),
            include_hidden: false,
        }
    }
}

impl ScanFilter {
    pub fn new(ignore: IgnoreSet, include_hidden: bool) -> Self {
        Self {
            ignore,
            include_hidden,
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        if !self.include_hidden && name.starts_with('.') {
            return false;
        }
        !self.ignore.contains(name)
    }
}

/// List the immediate subdirectories of `root` that pass `filter`.
///
/// Fails with [`ThandieError::Enumeration`] when the root (or one of its entries)
/// cannot be read; there is no partial result.
pub fn list_top_level_dirs(root: &Path, filter: &ScanFilter) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root).map_err(|e| ThandieError::enumeration(root, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ThandieError::enumeration(root, e))?;
        let file_type = entry
            .file_type()
            .map_err(|e| ThandieError::enumeration(entry.path(), e))?;

        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !filter.accepts(&name) {
            log::debug!("skipping directory name={name}");
            continue;
        }

        dirs.push(root.join(entry.file_name()));
    }

    log::debug!(
        "enumerated {} candidate directories root={}",
        dirs.len(),
        root.display()
    );
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(dirs: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn workspace(dirs: &[&str], files: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for dir in dirs {
            std::fs::create_dir(temp_dir.path().join(dir)).unwrap();
        }
        for file in files {
            std::fs::write(temp_dir.path().join(file), "x").unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_default_filter_skips_ignored_and_hidden() -> Result<()> {
        let ws = workspace(
            &["api", "web", ".git", ".config", "node_modules", "vendor"],
            &["README.md"],
        );
        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::default())?;
        assert_eq!(names(&dirs), vec!["api", "web"]);
        Ok(())
    }

    #[test]
    fn test_include_hidden_still_honours_ignore_set() -> Result<()> {
        let ws = workspace(&["api", ".git", ".dotfiles"], &[]);
        let filter = ScanFilter::new(IgnoreSet::new(DEFAULT_IGNORE_DIRS), true);
        let dirs = list_top_level_dirs(ws.path(), &filter)?;
        assert_eq!(names(&dirs), vec![".dotfiles", "api"]);
        Ok(())
    }

    #[test]
    fn test_ignore_matches_exact_names_only() -> Result<()> {
        let ws = workspace(&["vendor", "vendored", "my-vendor"], &[]);
        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::default())?;
        assert_eq!(names(&dirs), vec!["my-vendor", "vendored"]);
        Ok(())
    }

    #[test]
    fn test_files_are_skipped() -> Result<()> {
        let ws = workspace(&[], &["a.txt", "b.rs"]);
        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::default())?;
        assert!(dirs.is_empty());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() -> Result<()> {
        let ws = workspace(&["real"], &["file.txt"]);
        std::os::unix::fs::symlink(ws.path().join("real"), ws.path().join("link-dir")).unwrap();
        std::os::unix::fs::symlink(ws.path().join("file.txt"), ws.path().join("link-file"))
            .unwrap();

        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::default())?;
        assert_eq!(names(&dirs), vec!["real"]);
        Ok(())
    }

    #[test]
    fn test_paths_are_joined_to_root() -> Result<()> {
        let ws = workspace(&["project"], &[]);
        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::default())?;
        assert_eq!(dirs, vec![ws.path().join("project")]);
        Ok(())
    }

    #[test]
    fn test_missing_root_is_enumeration_error() {
        let result = list_top_level_dirs(
            Path::new("/tmp/thandie/definitely/missing"),
            &ScanFilter::default(),
        );
        match result {
            Err(ThandieError::Enumeration { path, .. }) => {
                assert_eq!(path, PathBuf::from("/tmp/thandie/definitely/missing"))
            }
            other => panic!("expected enumeration error, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_ignore_set() -> Result<()> {
        let ws = workspace(&["keep", "target", "build"], &[]);
        let mut ignore = IgnoreSet::default();
        ignore.insert("target");
        ignore.insert("build");
        let dirs = list_top_level_dirs(ws.path(), &ScanFilter::new(ignore, false))?;
        assert_eq!(names(&dirs), vec!["keep"]);
        Ok(())
    }
}
