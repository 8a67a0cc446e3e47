//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ThandieError`] which covers every failure that can cross the
//! core boundary. It uses `thiserror` for ergonomic error definitions and includes
//! constructor helpers for the common failure scenarios.
//!
//! # Public API
//! - [`ThandieError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ThandieError>`
//!
//! # Error Categories
//! - **Enumeration**: The workspace root cannot be listed (fatal for a scan)
//! - **Cache operations**: Directory, serialization, read/write and miss errors
//! - **Configuration**: Unreadable or malformed config file
//! - **Scan lifecycle**: Cancellation through the blocking entry point, lost worker
//!
//! Per-directory extraction failures never appear here; they collapse to omitted
//! metadata fields inside the extractor.

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for thandie
#[derive(Error, Debug)]
pub enum ThandieError {
    // Scan errors
    #[error("cannot scan {}: {source}", path.display())]
    Enumeration {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Scan was cancelled before completion")]
    ScanCancelled,

    #[error("Scan worker exited without reporting a result")]
    WorkerDisconnected,

    #[error("Workspace path is empty; use --workspace or -w to specify it")]
    EmptyWorkspacePath,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Cache errors
    #[error("Could not find cache directory")]
    CacheDirectoryNotFound,

    #[error("Failed to create cache directory '{}': {source}", path.display())]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize scan result: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{}': {source}", path.display())]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No cached scan result found for workspace: {workspace}")]
    CacheNotFound { workspace: String, path: PathBuf },

    #[error("Failed to read cache file '{}': {source}", path.display())]
    CacheReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse cache file '{}': {source}", path.display())]
    CacheDecodeFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to clear cache directory '{}': {source}", path.display())]
    CacheClearFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Failed to read config file '{}': {source}", path.display())]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    ConfigParseFailed {
        path: PathBuf,
        source: toml::de::Error,
    },

    // JSON serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using ThandieError
pub type Result<T> = std::result::Result<T, ThandieError>;

impl ThandieError {
    /// True for the expected "nothing cached yet" outcome of a cache load
    pub fn is_cache_miss(&self) -> bool {
        matches!(self, Self::CacheNotFound { .. })
    }

    /// Create an enumeration error for an unreadable workspace root
    pub fn enumeration(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Enumeration {
            path: path.into(),
            source,
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache miss error
    pub fn cache_not_found(workspace: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::CacheNotFound {
            workspace: workspace.into(),
            path: path.into(),
        }
    }

    /// Create a cache read failed error
    pub fn cache_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache decode failed error
    pub fn cache_decode_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::CacheDecodeFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache clear failed error
    pub fn cache_clear_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheClearFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}
