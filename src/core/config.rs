//! User configuration and workspace-root resolution.
//!
//! The config file lives at `<config dir>/thandie/config.toml`. Every section and field
//! has a default, unknown keys are ignored and a missing file is the same as an empty
//! one.
//!
//! # Workspace Root Precedence
//! 1. `--workspace` / `-w` flag
//! 2. `THANDIE_WORKSPACE` environment variable
//! 3. `workspace.default` from the config file
//! 4. `$HOME/Workspace`
//! 5. `.`
//!
//! Empty values are skipped and a leading `~/` is expanded against the home directory.

use crate::core::dirs::get_config_file_path;
use crate::core::error::{Result, ThandieError};
use crate::core::workspace::{IgnoreSet, ScanFilter, DEFAULT_IGNORE_DIRS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const WORKSPACE_ENV: &str = "THANDIE_WORKSPACE";
const CONFIG_VERSION: u32 = 1;
const DEFAULT_WORKSPACE_DIR: &str = "Workspace";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub version: u32,
    pub workspace: WorkspaceConfig,
    pub scanner: ScannerConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            workspace: WorkspaceConfig::default(),
            scanner: ScannerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub default: String,
    pub profiles: Vec<WorkspaceProfile>,
}

/// Named workspace entry. Read and listed, not used for resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceProfile {
    pub name: String,
    pub path: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub include_hidden: bool,
    pub ignore_dirs: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            include_hidden: false,
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ScannerConfig {
    pub fn filter(&self) -> ScanFilter {
        ScanFilter::new(
            IgnoreSet::new(self.ignore_dirs.iter().cloned()),
            self.include_hidden,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub to_file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            to_file: false,
        }
    }
}

impl LoggingConfig {
    /// Configured level, `Info` when the value is not a known level name
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

impl Config {
    /// Load the user config file, falling back to defaults when it does not exist
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no config file, using defaults path={}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ThandieError::config_read_failed(path, e)),
        };

        let config: Config =
            toml::from_str(&content).map_err(|e| ThandieError::config_parse_failed(path, e))?;

        if config.version != CONFIG_VERSION {
            log::warn!(
                "unexpected config version path={} version={}",
                path.display(),
                config.version
            );
        }
        Ok(config)
    }
}

/// Expand a leading `~/` (or a bare `~`) against `home`
pub fn expand_tilde(value: &str, home: Option<&Path>) -> PathBuf {
    match (value, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (v, Some(home)) if v.starts_with("~/") => home.join(&v[2..]),
        (v, _) => PathBuf::from(v),
    }
}

/// Pick the workspace root from the given sources in precedence order
pub fn resolve_workspace_path(
    flag: Option<&str>,
    env: Option<&str>,
    config: &Config,
    home: Option<&Path>,
) -> PathBuf {
    let explicit = [flag, env, Some(config.workspace.default.as_str())]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty());

    if let Some(value) = explicit {
        return expand_tilde(value, home);
    }

    match home {
        Some(home) => home.join(DEFAULT_WORKSPACE_DIR),
        None => PathBuf::from("."),
    }
}

/// [`resolve_workspace_path`] with the environment and home directory of this process
pub fn workspace_path(flag: Option<&str>, config: &Config) -> PathBuf {
    let env = std::env::var(WORKSPACE_ENV).ok();
    let home = dirs::home_dir();
    resolve_workspace_path(flag, env.as_deref(), config, home.as_deref())
}
