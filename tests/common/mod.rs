//! Consolidated test utilities for thandie
//!
//! This module provides unified testing utilities for integration tests,
//! built on real directories and git repositories created in temp space.

pub mod assertions;
pub mod fixtures;
pub mod repository;
