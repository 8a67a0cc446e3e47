//! Core functionality for the thandie workspace scanner.
//!
//! This module provides the scan pipeline (enumeration, metadata extraction,
//! orchestration), the result cache, the event channel, and the supporting
//! configuration, logging and output helpers.

pub mod cache;
pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod events;
pub mod git;
pub mod git_status;
pub mod logger;
pub mod output;
pub mod scanner;
pub mod state;
pub mod workspace;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{Result, ThandieError};

// === Directory enumeration ===
pub use workspace::{list_top_level_dirs, IgnoreSet, ScanFilter, DEFAULT_IGNORE_DIRS};

// === Metadata extraction ===
// Per-directory repository inspection, never fails the scan as a whole
pub use git::{extract_metadata, GitExtractor, GitRepo, MetadataExtractor};
pub use git_status::{format_status_summary, StatusCode, StatusLine};

// === Scan results ===
pub use state::{DirectoryRecord, RepoMetadata, ScanSummary, Snapshot};

// === Orchestration and events ===
pub use events::{
    event_channel, CancellationToken, EventReceiver, EventSender, ScanEvent, ScanOutcome,
};
pub use scanner::{ScanHandle, ScanOptions, ScanPhase, Scanner};

// === Persistence ===
pub use cache::ResultCache;

// === Configuration ===
pub use config::{resolve_workspace_path, workspace_path, Config};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_section_header, print_success, print_warning};
