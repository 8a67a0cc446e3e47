pub mod cache;
pub mod list;
pub mod scan;

pub use cache::*;
pub use list::*;
pub use scan::*;

use crate::core::{
    config::{workspace_path, Config},
    error::{Result, ThandieError},
};

/// Resolve the workspace root for a command.
///
/// Existing paths are canonicalized so every spelling of a root shares one cache
/// entry; a missing path is passed through and fails later with a scan error.
pub fn resolve_workspace(flag: Option<&str>, config: &Config) -> Result<String> {
    let path = workspace_path(flag, config);
    let path = std::fs::canonicalize(&path).unwrap_or(path);
    let path = path.to_string_lossy().into_owned();

    if path.is_empty() {
        return Err(ThandieError::EmptyWorkspacePath);
    }
    log::debug!("resolved workspace path={path}");
    Ok(path)
}
