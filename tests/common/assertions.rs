//! Common assertion helpers for test output validation
//!
//! Provides predicates for validating thandie command output and error messages.

#![allow(dead_code)]

use predicates::prelude::*;

/// Creates a predicate that checks for the cache-miss message and its scan hint
pub fn cache_miss_hint() -> impl Predicate<str> {
    predicates::str::contains("No cached scan result found")
        .and(predicates::str::contains("thandie scan"))
}

/// Creates a predicate that checks for an unreadable workspace root
pub fn cannot_scan(path: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("cannot scan {path}"))
}

/// Creates a predicate that checks for the end-of-scan counts
pub fn has_summary(
    directories: usize,
    repositories: usize,
    uncommitted: usize,
) -> impl Predicate<str> {
    predicates::str::contains(format!(
        "Directories scanned: {directories}, git repositories: {repositories}, with uncommitted changes: {uncommitted}"
    ))
}

/// Creates a predicate that checks for the age line of a cached listing
pub fn has_age_line() -> impl Predicate<str> {
    predicates::str::contains("Scanned ")
}

/// Creates a predicate that checks for one live scan line
pub fn has_scan_line(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Completed scan of {name}"))
}
