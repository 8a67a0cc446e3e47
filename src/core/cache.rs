//! Persistent store for the most recent snapshot of each workspace.
//!
//! One pretty-printed JSON file per workspace root, named `scan_<key>.json` where the
//! key is the first 16 hex characters of the SHA-256 of the path string. The path is
//! hashed exactly as given: callers that want hits across equivalent spellings must
//! canonicalize first.
//!
//! # Public API
//! - [`ResultCache`]: Handle on a cache directory
//!
//! # Write Strategy
//! - **Atomic**: serialize to a temporary file in the same directory, then rename
//! - **Last write wins**: a save replaces the previous entry for the key
//! - **Temporary names** carry the process id and a per-process counter, so two
//!   concurrent saves never share a file

use crate::core::dirs::get_scan_cache_directory;
use crate::core::error::{Result, ThandieError};
use crate::core::state::{CacheEntry, Snapshot};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const KEY_LEN: usize = 16;
const ENTRY_PREFIX: &str = "scan_";
const ENTRY_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct ResultCache {
    dir: PathBuf,
}

impl ResultCache {
    /// Open the cache under the user cache directory, creating it if needed
    pub fn open() -> Result<Self> {
        Self::with_dir(get_scan_cache_directory()?)
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            log::error!(
                "Failed to create cache directory '{}': {}",
                dir.display(),
                e
            );
            return Err(ThandieError::cache_directory_creation_failed(&dir, e));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Deterministic key for `workspace_path`
    pub fn key(workspace_path: &str) -> String {
        let digest = Sha256::digest(workspace_path.as_bytes());
        let mut key = hex::encode(digest);
        key.truncate(KEY_LEN);
        key
    }

    pub fn entry_path(&self, workspace_path: &str) -> PathBuf {
        self.dir.join(format!(
            "{ENTRY_PREFIX}{}.{ENTRY_EXTENSION}",
            Self::key(workspace_path)
        ))
    }

    pub fn has(&self, workspace_path: &str) -> bool {
        self.entry_path(workspace_path).is_file()
    }

    /// Persist `snapshot` as the entry for `workspace_path`, replacing any previous one
    pub fn save(&self, workspace_path: &str, snapshot: &Snapshot) -> Result<PathBuf> {
        let entry_path = self.entry_path(workspace_path);
        log::debug!(
            "saving scan result workspace={workspace_path} records={} path={}",
            snapshot.count,
            entry_path.display()
        );

        let json = serde_json::to_string_pretty(&CacheEntry::from(snapshot)).map_err(|e| {
            log::error!("Failed to serialize scan result: {e}");
            ThandieError::cache_serialization_failed(e)
        })?;

        let temp_path = self.temp_path(workspace_path);
        if let Err(e) = fs::write(&temp_path, json) {
            log::error!(
                "Failed to write cache file '{}': {}",
                temp_path.display(),
                e
            );
            let _ = fs::remove_file(&temp_path);
            return Err(ThandieError::cache_write_failed(&temp_path, e));
        }

        if let Err(e) = fs::rename(&temp_path, &entry_path) {
            log::error!(
                "Failed to move cache file into place '{}': {}",
                entry_path.display(),
                e
            );
            let _ = fs::remove_file(&temp_path);
            return Err(ThandieError::cache_write_failed(&entry_path, e));
        }

        Ok(entry_path)
    }

    /// Load the entry for `workspace_path`.
    ///
    /// A missing entry is [`ThandieError::CacheNotFound`]; use
    /// [`ThandieError::is_cache_miss`] to tell it apart from real failures.
    pub fn load(&self, workspace_path: &str) -> Result<Snapshot> {
        let entry_path = self.entry_path(workspace_path);
        log::debug!(
            "loading scan result workspace={workspace_path} path={}",
            entry_path.display()
        );

        let content = match fs::read_to_string(&entry_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no cached scan result path={}", entry_path.display());
                return Err(ThandieError::cache_not_found(workspace_path, entry_path));
            }
            Err(e) => {
                log::error!(
                    "Failed to read cache file '{}': {}",
                    entry_path.display(),
                    e
                );
                return Err(ThandieError::cache_read_failed(&entry_path, e));
            }
        };

        let entry: CacheEntry = serde_json::from_str(&content).map_err(|e| {
            log::error!(
                "Failed to parse cache file '{}': {}",
                entry_path.display(),
                e
            );
            ThandieError::cache_decode_failed(&entry_path, e)
        })?;

        Ok(entry.into_snapshot())
    }

    /// Remove every cached entry and leftover temporary file. Returns the number of
    /// entries removed; unrelated files are left alone.
    pub fn clear_all(&self) -> Result<usize> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(ThandieError::cache_clear_failed(&self.dir, e)),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry.map_err(|e| ThandieError::cache_clear_failed(&self.dir, e))?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let is_entry = has_extension(&path, ENTRY_EXTENSION);
            if !is_entry && !is_temp_file(&path) {
                continue;
            }

            fs::remove_file(&path).map_err(|e| ThandieError::cache_clear_failed(&path, e))?;
            if is_entry {
                removed += 1;
            }
        }

        log::debug!(
            "cleared cache entries count={removed} dir={}",
            self.dir.display()
        );
        Ok(removed)
    }

    fn temp_path(&self, workspace_path: &str) -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!(
            ".{ENTRY_PREFIX}{}.{}.{n}.{TEMP_EXTENSION}",
            Self::key(workspace_path),
            std::process::id()
        ))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

fn is_temp_file(path: &Path) -> bool {
    has_extension(path, TEMP_EXTENSION)
        && path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with(&format!(".{ENTRY_PREFIX}")))
}
