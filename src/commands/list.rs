use crate::core::{
    cache::ResultCache,
    colors::{get_state_label, RepoState},
    error::Result,
    output::{format_age, print_section_header},
    state::{CacheEntry, DirectoryRecord, Snapshot},
};
use chrono::Utc;
use colored::*;

/// Record filters shared by `list` and the final output of `scan`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListArgs {
    pub dirty: bool,
    pub repos: bool,
    pub json: bool,
}

impl ListArgs {
    pub fn accepts(&self, record: &DirectoryRecord) -> bool {
        if self.dirty && !record.has_uncommitted() {
            return false;
        }
        if self.repos && !record.is_repo() {
            return false;
        }
        true
    }
}

pub fn execute_list(workspace: &str, args: &ListArgs) -> Result<()> {
    let cache = ResultCache::open()?;
    let snapshot = cache.load(workspace)?;
    log::debug!(
        "loaded cached scan workspace={workspace} records={}",
        snapshot.count
    );
    print_snapshot(&snapshot, args)
}

/// Print `snapshot` as JSON or as a listing, depending on `args.json`
pub fn print_snapshot(snapshot: &Snapshot, args: &ListArgs) -> Result<()> {
    if args.json {
        let filtered = Snapshot::with_timestamp(
            snapshot.workspace_path.clone(),
            snapshot.scanned_at,
            sorted_records(snapshot, args).into_iter().cloned().collect(),
        );
        println!(
            "{}",
            serde_json::to_string_pretty(&CacheEntry::from(&filtered))?
        );
        return Ok(());
    }

    print_inventory(snapshot, args);
    Ok(())
}

/// Records that pass `args`, sorted by directory name
pub fn sorted_records<'a>(snapshot: &'a Snapshot, args: &ListArgs) -> Vec<&'a DirectoryRecord> {
    let mut records: Vec<&DirectoryRecord> = snapshot
        .records
        .iter()
        .filter(|r| args.accepts(r))
        .collect();
    records.sort_by_key(|r| r.name());
    records
}

pub fn print_inventory(snapshot: &Snapshot, args: &ListArgs) {
    print_section_header(&format!("Workspace {}", snapshot.workspace_path));
    println!(
        "  {}",
        format!(
            "Scanned {} ({})",
            format_age(snapshot.scanned_at, Utc::now()),
            snapshot.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .bright_black()
    );
    println!();

    let records = sorted_records(snapshot, args);
    if records.is_empty() {
        println!("  {}", "No matching directories".bright_black());
    }

    let name_width = records.iter().map(|r| r.name().len()).max().unwrap_or(0);
    for record in &records {
        println!("{}", format_record_line(record, name_width));
    }

    println!("\n{}", snapshot.summary().to_string().white());
}

/// `  <state> <name> <branch> <summary>` for one record
pub fn format_record_line(record: &DirectoryRecord, name_width: usize) -> String {
    let state = RepoState::of(record);
    let name = format!("{:<width$}", record.name(), width = name_width);
    let mut line = format!("  {} {}", get_state_label(state), name.white());

    if let Some(metadata) = record.metadata.as_ref().filter(|m| m.is_repo) {
        let branch = if metadata.current_branch.is_empty() {
            "(no branch)".to_string()
        } else {
            metadata.current_branch.clone()
        };
        line.push_str(&format!("  {}", branch.cyan()));

        if metadata.has_uncommitted {
            line.push_str(&format!("  {}", metadata.status_summary.yellow()));
        }
    }
    line
}
