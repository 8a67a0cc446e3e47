use crate::core::{cache::ResultCache, error::Result, output::print_success};

/// Print the cache directory and the entry file for `workspace`
pub fn execute_cache_path(workspace: &str) -> Result<()> {
    let cache = ResultCache::open()?;
    let entry = cache.entry_path(workspace);
    let state = if entry.is_file() { "present" } else { "missing" };

    println!("Cache directory: {}", cache.dir().display());
    println!("Workspace entry: {} ({state})", entry.display());
    Ok(())
}

/// Remove every cached scan result
pub fn execute_cache_clear() -> Result<()> {
    let removed = ResultCache::open()?.clear_all()?;
    let noun = if removed == 1 { "entry" } else { "entries" };
    print_success(&format!("Removed {removed} cached scan {noun}"));
    Ok(())
}
