use crate::core::error::{Result, ThandieError};
use std::path::PathBuf;

const APP_DIR: &str = "thandie";

pub fn get_config_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|b| b.join(APP_DIR))
        .ok_or(ThandieError::CacheDirectoryNotFound)
}

pub fn get_cache_directory() -> Result<PathBuf> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Caches")),
        _ => dirs::cache_dir(),
    };

    base.map(|b| b.join(APP_DIR))
        .ok_or(ThandieError::CacheDirectoryNotFound)
}

/// Directory holding the `scan_<key>.json` entries
pub fn get_scan_cache_directory() -> Result<PathBuf> {
    Ok(get_cache_directory()?.join("cache"))
}

/// File used when `logging.to_file` is enabled
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(get_cache_directory()?.join("logs").join("thandie.log"))
}

pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_directory()?.join("config.toml"))
}
