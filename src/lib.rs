//! Thandie - inventory of the project folders in a developer workspace.
//!
//! This library scans the immediate subdirectories of a workspace root, records the
//! version-control state of each one (remote, branch, dirty-file summary) and keeps the
//! latest result in a per-workspace cache so it can be shown without rescanning.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The scan pipeline ([`Scanner`], [`ScanOptions`], [`ScanHandle`])
//! - Live reporting ([`ScanEvent`], [`ScanOutcome`], [`CancellationToken`])
//! - Scan results and their cache ([`Snapshot`], [`ResultCache`])
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    // Scan pipeline
    CancellationToken,
    EventReceiver,
    ScanEvent,
    ScanHandle,
    ScanOptions,
    ScanOutcome,
    Scanner,
    // Metadata extraction
    GitExtractor,
    MetadataExtractor,
    // Results
    DirectoryRecord,
    RepoMetadata,
    Snapshot,
    // Persistence
    ResultCache,
    // Configuration
    Config,
    // Error handling
    Result,
    ThandieError,
};
