//! Workspace scenarios and an isolated environment for CLI runs
//!
//! Each scenario builds a temporary workspace root with a known set of top-level
//! directories. [`TestEnv`] points the cache and config directories at scratch
//! locations so tests never touch the real user directories.

#![allow(dead_code)]

use super::repository::*;
use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use thandie::core::cache::ResultCache;
use thandie::core::error::{Result, ThandieError};

pub struct TestWorkspace {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(ThandieError::Io)?;
        let path = fs::canonicalize(temp_dir.path()).map_err(ThandieError::Io)?;
        Ok(Self { temp_dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Root as the string used for cache keys
    pub fn root(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn add_dir(&self, name: &str) -> Result<PathBuf> {
        let dir = self.path.join(name);
        fs::create_dir_all(&dir).map_err(ThandieError::Io)?;
        Ok(dir)
    }

    pub fn add_repo(&self, name: &str) -> Result<PathBuf> {
        let dir = self.path.join(name);
        init_repo(&dir)?;
        Ok(dir)
    }
}

/// Scenario: the documented example workspace
///
/// - `a`: clean repository on `main`
/// - `b`: plain directory
/// - `.git`: excluded by default (ignored and hidden)
/// - `c`: repository on `main` with two modified files
pub fn create_example_workspace() -> Result<TestWorkspace> {
    let ws = TestWorkspace::new()?;

    let a = ws.add_repo("a")?;
    commit_files(&a, &["README.md"])?;

    let b = ws.add_dir("b")?;
    create_file(&b, "notes.txt", "not versioned")?;

    ws.add_dir(".git")?;

    let c = ws.add_repo("c")?;
    commit_files(&c, &["one.txt", "two.txt"])?;
    modify_files(&c, &["one.txt", "two.txt"])?;

    Ok(ws)
}

/// Scenario: `count` plain directories named `dir000`, `dir001`, ...
pub fn create_flat_workspace(count: usize) -> Result<TestWorkspace> {
    let ws = TestWorkspace::new()?;
    for i in 0..count {
        ws.add_dir(&format!("dir{i:03}"))?;
    }
    Ok(ws)
}

/// Scratch cache and config homes for one test
pub struct TestEnv {
    pub home: TempDir,
}

impl TestEnv {
    pub fn new() -> Result<Self> {
        Ok(Self {
            home: TempDir::new().map_err(ThandieError::Io)?,
        })
    }

    pub fn cache_home(&self) -> PathBuf {
        self.home.path().join("cache")
    }

    pub fn config_home(&self) -> PathBuf {
        self.home.path().join("config")
    }

    /// Directory holding scan entries for this environment
    pub fn scan_cache(&self) -> Result<ResultCache> {
        ResultCache::with_dir(self.cache_home().join("thandie").join("cache"))
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        let dir = self.config_home().join("thandie");
        fs::create_dir_all(&dir).map_err(ThandieError::Io)?;
        fs::write(dir.join("config.toml"), content).map_err(ThandieError::Io)
    }

    /// `thandie` with this environment applied
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("thandie")?;
        cmd.env("XDG_CACHE_HOME", self.cache_home())
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("HOME", self.home.path())
            .env_remove("THANDIE_WORKSPACE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        Ok(cmd)
    }
}
