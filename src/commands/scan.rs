use crate::commands::list::{print_snapshot, ListArgs};
use crate::core::{
    cache::ResultCache,
    config::Config,
    error::{Result, ThandieError},
    events::{CancellationToken, ScanEvent, ScanOutcome},
    output::{print_scan_line, print_warning},
    scanner::{ScanOptions, Scanner},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanArgs {
    pub include_hidden: bool,
    pub ignore: Vec<String>,
    pub quiet: bool,
    pub json: bool,
}

impl ScanArgs {
    /// Config defaults with the command-line overrides applied on top
    pub fn options(&self, config: &Config) -> ScanOptions {
        let mut options = ScanOptions::from_config(&config.scanner);
        if self.include_hidden {
            options = options.include_hidden(true);
        }
        for name in &self.ignore {
            options = options.ignore(name.as_str());
        }
        options
    }
}

/// Ctrl+C handling for a running scan. The first interrupt asks the worker to stop;
/// returns `true` when the scan was already cancelled and the process should exit.
pub fn handle_interrupt(cancel: &CancellationToken) -> bool {
    if cancel.is_cancelled() {
        return true;
    }
    cancel.cancel();
    print_warning("Cancelling scan, press Ctrl+C again to quit immediately");
    false
}

/// Scan `workspace` on a worker thread, streaming its log lines to stderr and
/// printing the inventory once it completes.
pub fn execute_scan(
    workspace: &str,
    config: &Config,
    args: &ScanArgs,
    cancel: CancellationToken,
) -> Result<()> {
    let scanner = Scanner::new(args.options(config), ResultCache::open()?);
    let mut handle = scanner.spawn(workspace, cancel)?;

    let mut outcome = None;
    while let Some(event) = handle.events().recv() {
        match event {
            ScanEvent::Progress {
                current,
                total,
                message,
            } => log::debug!("scan progress {current}/{total} {message}"),
            ScanEvent::Log(line) => {
                if line.starts_with("Warning:") {
                    print_warning(&line);
                } else if !args.quiet {
                    print_scan_line(&line);
                }
            }
            ScanEvent::Complete(o) => outcome = Some(o),
        }
    }
    handle.join()?;

    let snapshot = outcome
        .unwrap_or(ScanOutcome::Failed(ThandieError::WorkerDisconnected))
        .into_result()?;

    print_snapshot(
        &snapshot,
        &ListArgs {
            json: args.json,
            ..ListArgs::default()
        },
    )
}
