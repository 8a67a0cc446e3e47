//! Scan orchestration: enumerate, extract, finalize.
//!
//! A [`Scanner`] walks the candidates produced by the enumerator one at a time, runs
//! the metadata extractor on each and assembles a [`Snapshot`]. It reports through an
//! [`EventSender`] and checks a [`CancellationToken`] before every candidate.
//!
//! # Phases
//! `Idle → Enumerating → Extracting → Finalizing → Completed`, with `Cancelled` reachable
//! from any candidate boundary and `Failed` from enumeration. Every run ends in exactly
//! one terminal [`ScanOutcome`].
//!
//! # Entry Points
//! - [`Scanner::scan`]: blocking, no live consumer
//! - [`Scanner::run`]: on the caller's thread, reporting through a channel
//! - [`Scanner::spawn`]: on a dedicated worker thread, returns a [`ScanHandle`]

use crate::core::cache::ResultCache;
use crate::core::config::ScannerConfig;
use crate::core::error::{Result, ThandieError};
use crate::core::events::{
    event_channel, CancellationToken, EventReceiver, EventSender, ScanEvent, ScanOutcome,
};
use crate::core::git::{GitExtractor, MetadataExtractor};
use crate::core::state::{display_name, DirectoryRecord, Snapshot};
use crate::core::workspace::{list_top_level_dirs, ScanFilter};
use std::path::Path;
use std::thread::{self, JoinHandle};

const WORKER_NAME: &str = "thandie-scan";

/// What to scan under a workspace root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub filter: ScanFilter,
}

impl ScanOptions {
    pub fn from_config(config: &ScannerConfig) -> Self {
        Self {
            filter: config.filter(),
        }
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.filter.include_hidden = include;
        self
    }

    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.filter.ignore.insert(name);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Enumerating,
    Extracting,
    Finalizing,
    Completed,
    Cancelled,
    Failed,
}

fn enter(phase: &mut ScanPhase, next: ScanPhase, root: &str) {
    log::debug!("scan phase {:?} -> {:?} root={root}", *phase, next);
    *phase = next;
}

pub struct Scanner<E: MetadataExtractor = GitExtractor> {
    options: ScanOptions,
    cache: ResultCache,
    extractor: E,
}

impl Scanner<GitExtractor> {
    pub fn new(options: ScanOptions, cache: ResultCache) -> Self {
        Self::with_extractor(options, cache, GitExtractor)
    }
}

impl<E: MetadataExtractor> Scanner<E> {
    pub fn with_extractor(options: ScanOptions, cache: ResultCache, extractor: E) -> Self {
        Self {
            options,
            cache,
            extractor,
        }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Scan `root` to completion without a live consumer
    pub fn scan(&self, root: &str) -> Result<Snapshot> {
        let (mut events, receiver) = event_channel();
        drop(receiver);
        self.execute(root, &CancellationToken::new(), &mut events)
            .into_result()
    }

    /// Scan `root` on the current thread, reporting through `events`. Always ends with
    /// exactly one terminal event.
    pub fn run(&self, root: &str, cancel: &CancellationToken, mut events: EventSender) {
        let outcome = self.execute(root, cancel, &mut events);
        events.complete(outcome);
    }

    fn execute(
        &self,
        root: &str,
        cancel: &CancellationToken,
        events: &mut EventSender,
    ) -> ScanOutcome {
        let mut phase = ScanPhase::Idle;

        enter(&mut phase, ScanPhase::Enumerating, root);
        let candidates = match list_top_level_dirs(Path::new(root), &self.options.filter) {
            Ok(candidates) => candidates,
            Err(e) => {
                log::debug!("enumeration failed root={root} error={e}");
                enter(&mut phase, ScanPhase::Failed, root);
                return ScanOutcome::Failed(e);
            }
        };

        let total = candidates.len();
        enter(&mut phase, ScanPhase::Extracting, root);
        events.progress(0, total, format!("{total} directories to scan"));

        let mut records = Vec::with_capacity(total);
        for (i, dir) in candidates.into_iter().enumerate() {
            if cancel.is_cancelled() {
                log::debug!("scan cancelled root={root} completed={i} total={total}");
                enter(&mut phase, ScanPhase::Cancelled, root);
                return ScanOutcome::Cancelled;
            }

            let name = display_name(&dir);
            events.log(format!("Scanning {name}"));

            let metadata = self.extractor.extract(&dir);
            records.push(DirectoryRecord::new(dir, Some(metadata)));

            let done = format!("Completed scan of {name}");
            events.log(done.clone());
            events.progress(i + 1, total, done);
        }

        if cancel.is_cancelled() {
            log::debug!("scan cancelled before finalizing root={root}");
            enter(&mut phase, ScanPhase::Cancelled, root);
            return ScanOutcome::Cancelled;
        }

        enter(&mut phase, ScanPhase::Finalizing, root);
        let snapshot = Snapshot::new(root, records);
        if let Err(e) = self.cache.save(root, &snapshot) {
            log::warn!("failed to save scan results to cache root={root} error={e}");
            events.log(format!("Warning: failed to save scan results to cache: {e}"));
        }
        events.log(snapshot.summary().to_string());

        enter(&mut phase, ScanPhase::Completed, root);
        ScanOutcome::Completed(snapshot)
    }
}

impl<E: MetadataExtractor + 'static> Scanner<E> {
    /// Run the scan on a dedicated worker thread
    pub fn spawn(self, root: impl Into<String>, cancel: CancellationToken) -> Result<ScanHandle> {
        let root = root.into();
        let (events, receiver) = event_channel();
        let worker_cancel = cancel.clone();

        let join = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || self.run(&root, &worker_cancel, events))?;

        Ok(ScanHandle {
            events: receiver,
            cancel,
            join,
        })
    }
}

/// A scan running on its worker thread
pub struct ScanHandle {
    events: EventReceiver,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

impl ScanHandle {
    pub fn events(&mut self) -> &mut EventReceiver {
        &mut self.events
    }

    /// Ask the worker to stop at the next candidate boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the worker to exit. Use after the terminal event has been taken from
    /// [`events`](Self::events).
    pub fn join(self) -> Result<()> {
        self.join
            .join()
            .map_err(|_| ThandieError::WorkerDisconnected)
    }

    /// Discard remaining progress and log events and return the terminal outcome.
    ///
    /// If the terminal event was already taken through [`events`](Self::events), or the
    /// worker died without one, this yields `Failed(WorkerDisconnected)`.
    pub fn wait(mut self) -> ScanOutcome {
        let mut outcome = None;
        while let Some(event) = self.events.recv() {
            if let ScanEvent::Complete(o) = event {
                outcome = Some(o);
            }
        }

        if self.join.join().is_err() {
            log::error!("scan worker panicked");
        }
        outcome.unwrap_or(ScanOutcome::Failed(ThandieError::WorkerDisconnected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::RepoMetadata;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Treats every directory whose name starts with `repo` as a clean repository
    struct NameExtractor;

    impl MetadataExtractor for NameExtractor {
        fn extract(&self, dir: &Path) -> RepoMetadata {
            if display_name(dir).starts_with("repo") {
                RepoMetadata {
                    is_repo: true,
                    current_branch: "main".to_string(),
                    status_summary: "clean".to_string(),
                    ..RepoMetadata::default()
                }
            } else {
                RepoMetadata::not_a_repo()
            }
        }
    }

    /// Cancels `token` from inside its `cancel_on`-th extraction
    struct CancellingExtractor {
        calls: Arc<AtomicUsize>,
        cancel_on: usize,
        token: CancellationToken,
    }

    impl MetadataExtractor for CancellingExtractor {
        fn extract(&self, _dir: &Path) -> RepoMetadata {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.cancel_on {
                self.token.cancel();
            }
            RepoMetadata::not_a_repo()
        }
    }

    struct Fixture {
        workspace: TempDir,
        cache_dir: TempDir,
    }

    impl Fixture {
        fn new(dirs: &[&str]) -> Self {
            let workspace = TempDir::new().unwrap();
            for dir in dirs {
                std::fs::create_dir(workspace.path().join(dir)).unwrap();
            }
            Self {
                workspace,
                cache_dir: TempDir::new().unwrap(),
            }
        }

        fn root(&self) -> String {
            self.workspace.path().to_string_lossy().into_owned()
        }

        fn cache(&self) -> ResultCache {
            ResultCache::with_dir(self.cache_dir.path()).unwrap()
        }

        fn scanner(&self) -> Scanner<NameExtractor> {
            Scanner::with_extractor(ScanOptions::default(), self.cache(), NameExtractor)
        }
    }

    fn collect(receiver: EventReceiver) -> Vec<ScanEvent> {
        receiver.collect()
    }

    fn logs(events: &[ScanEvent]) -> Vec<&str> {
        events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Log(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_scan_builds_snapshot_and_caches_it() -> Result<()> {
        let fixture = Fixture::new(&["repo-api", "notes", "node_modules"]);
        let scanner = fixture.scanner();

        let snapshot = scanner.scan(&fixture.root())?;
        assert_eq!(snapshot.workspace_path, fixture.root());
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.summary().repositories, 1);
        assert!(snapshot.records.iter().all(|r| r.metadata.is_some()));

        let cached = fixture.cache().load(&fixture.root())?;
        assert_eq!(cached.records, snapshot.records);
        Ok(())
    }

    #[test]
    fn test_empty_workspace_completes_with_empty_snapshot() -> Result<()> {
        let fixture = Fixture::new(&[]);
        let snapshot = fixture.scanner().scan(&fixture.root())?;
        assert_eq!(snapshot.count, 0);
        assert!(snapshot.records.is_empty());
        assert!(fixture.cache().has(&fixture.root()));
        Ok(())
    }

    #[test]
    fn test_run_emits_events_in_order() {
        let fixture = Fixture::new(&["alpha"]);
        let (sender, receiver) = event_channel();
        fixture
            .scanner()
            .run(&fixture.root(), &CancellationToken::new(), sender);

        let events = collect(receiver);
        assert_eq!(
            logs(&events),
            vec![
                "Scanning alpha",
                "Completed scan of alpha",
                "Directories scanned: 1, git repositories: 0, with uncommitted changes: 0",
            ]
        );

        let progress: Vec<(usize, usize, &str)> = events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Progress {
                    current,
                    total,
                    message,
                } => Some((*current, *total, message.as_str())),
                _ => None,
            })
            .collect();
        assert_eq!(
            progress,
            vec![
                (0, 1, "1 directories to scan"),
                (1, 1, "Completed scan of alpha"),
            ]
        );

        assert!(matches!(
            events.last(),
            Some(ScanEvent::Complete(ScanOutcome::Completed(_)))
        ));
    }

    #[test]
    fn test_cancel_after_third_candidate() {
        let names: Vec<String> = (0..100).map(|i| format!("dir{i:03}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let fixture = Fixture::new(&names);

        let token = CancellationToken::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let extractor = CancellingExtractor {
            calls: Arc::clone(&calls),
            cancel_on: 3,
            token: token.clone(),
        };
        let scanner = Scanner::with_extractor(ScanOptions::default(), fixture.cache(), extractor);

        let (sender, receiver) = event_channel();
        scanner.run(&fixture.root(), &token, sender);
        let events = collect(receiver);

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let completes: Vec<&ScanOutcome> = events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Complete(outcome) => Some(outcome),
                _ => None,
            })
            .collect();
        assert_eq!(completes.len(), 1);
        assert!(completes[0].is_cancelled());
        assert!(!fixture.cache().has(&fixture.root()));
        assert_eq!(logs(&events).len(), 6);
    }

    #[test]
    fn test_pre_cancelled_token_extracts_nothing() {
        let fixture = Fixture::new(&["one", "two"]);
        let token = CancellationToken::new();
        token.cancel();

        let (sender, receiver) = event_channel();
        fixture.scanner().run(&fixture.root(), &token, sender);
        let events = collect(receiver);

        assert!(logs(&events).is_empty());
        assert!(matches!(
            events.last(),
            Some(ScanEvent::Complete(ScanOutcome::Cancelled))
        ));
        assert!(!fixture.cache().has(&fixture.root()));
    }

    #[test]
    fn test_enumeration_failure_emits_only_failure() {
        let fixture = Fixture::new(&[]);
        let missing = fixture.workspace.path().join("missing");
        let missing = missing.to_string_lossy().into_owned();

        let (sender, receiver) = event_channel();
        fixture
            .scanner()
            .run(&missing, &CancellationToken::new(), sender);
        let events = collect(receiver);

        assert_eq!(events.len(), 1);
        match &events[0] {
            ScanEvent::Complete(ScanOutcome::Failed(e)) => {
                assert!(e.to_string().starts_with("cannot scan "))
            }
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(!fixture.cache().has(&missing));
    }

    #[test]
    fn test_cache_write_failure_still_completes() -> Result<()> {
        let fixture = Fixture::new(&["repo-web"]);
        let cache_dir = fixture.cache_dir.path().join("entries");
        let cache = ResultCache::with_dir(&cache_dir)?;
        std::fs::remove_dir(&cache_dir)?;
        std::fs::write(&cache_dir, "not a directory")?;

        let scanner = Scanner::with_extractor(ScanOptions::default(), cache, NameExtractor);
        let (sender, receiver) = event_channel();
        scanner.run(&fixture.root(), &CancellationToken::new(), sender);
        let events = collect(receiver);

        assert!(logs(&events)
            .iter()
            .any(|l| l.starts_with("Warning: failed to save scan results to cache")));
        match events.last() {
            Some(ScanEvent::Complete(ScanOutcome::Completed(snapshot))) => {
                assert_eq!(snapshot.count, 1)
            }
            other => panic!("expected completion, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_spawn_and_wait() -> Result<()> {
        let fixture = Fixture::new(&["repo-a", "b"]);
        let handle = fixture
            .scanner()
            .spawn(fixture.root(), CancellationToken::new())?;

        let snapshot = handle.wait().into_result()?;
        assert_eq!(snapshot.count, 2);
        Ok(())
    }

    #[test]
    fn test_spawn_events_then_join() -> Result<()> {
        let fixture = Fixture::new(&["x", "y", "z"]);
        let mut handle = fixture
            .scanner()
            .spawn(fixture.root(), CancellationToken::new())?;

        let mut outcome = None;
        while let Some(event) = handle.events().recv() {
            if let ScanEvent::Complete(o) = event {
                outcome = Some(o);
            }
        }
        handle.join()?;

        assert!(outcome.is_some_and(|o| o.is_completed()));
        Ok(())
    }

    #[test]
    fn test_options_overrides() {
        let options = ScanOptions::from_config(&ScannerConfig::default())
            .include_hidden(true)
            .ignore("target");
        assert!(options.filter.include_hidden);
        assert!(options.filter.ignore.contains("target"));
        assert!(options.filter.ignore.contains("node_modules"));
    }
}
