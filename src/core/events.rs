//! Event channel between a running scan and its consumer.
//!
//! The scan worker is the only producer. It reports through an [`EventSender`] and a
//! consumer drains the matching [`EventReceiver`]. Three bounded `crossbeam-channel`
//! queues back the pair:
//!
//! - **progress** (capacity [`PROGRESS_CAPACITY`]) and **log** (capacity
//!   [`LOG_CAPACITY`]) use `try_send`; a full queue drops the event instead of blocking
//!   the worker.
//! - **complete** (capacity 1) is reserved for the single terminal signal, so that send
//!   never waits and is never dropped.
//!
//! The receiver yields every buffered progress and log event before the terminal
//! [`ScanEvent::Complete`], and nothing after it.

use crate::core::error::{Result, ThandieError};
use crate::core::state::Snapshot;
use crossbeam_channel::{bounded, select, Receiver, Sender, TryRecvError, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub const PROGRESS_CAPACITY: usize = 10;
pub const LOG_CAPACITY: usize = 100;

#[derive(Debug)]
pub enum ScanEvent {
    Progress {
        current: usize,
        total: usize,
        message: String,
    },
    Log(String),
    Complete(ScanOutcome),
}

/// Terminal state of one scan run
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(Snapshot),
    /// Stopped at a candidate boundary. Nothing was persisted.
    Cancelled,
    Failed(ThandieError),
}

impl ScanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Collapse into a `Result`; cancellation becomes [`ThandieError::ScanCancelled`]
    pub fn into_result(self) -> Result<Snapshot> {
        match self {
            Self::Completed(snapshot) => Ok(snapshot),
            Self::Cancelled => Err(ThandieError::ScanCancelled),
            Self::Failed(e) => Err(e),
        }
    }
}

/// Create a connected sender/receiver pair for one scan run
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (progress_tx, progress_rx) = bounded(PROGRESS_CAPACITY);
    let (log_tx, log_rx) = bounded(LOG_CAPACITY);
    let (complete_tx, complete_rx) = bounded(1);

    let sender = EventSender {
        progress: progress_tx,
        log: log_tx,
        complete: complete_tx,
        dropped: 0,
    };
    let receiver = EventReceiver {
        progress: progress_rx,
        log: log_rx,
        complete: complete_rx,
        pending: None,
        finished: false,
    };
    (sender, receiver)
}

/// Producer half, owned by the scan worker
pub struct EventSender {
    progress: Sender<ScanEvent>,
    log: Sender<ScanEvent>,
    complete: Sender<ScanOutcome>,
    dropped: usize,
}

impl EventSender {
    pub fn progress(&mut self, current: usize, total: usize, message: impl Into<String>) {
        let event = ScanEvent::Progress {
            current,
            total,
            message: message.into(),
        };
        if let Err(TrySendError::Full(_)) = self.progress.try_send(event) {
            self.dropped += 1;
        }
    }

    pub fn log(&mut self, message: impl Into<String>) {
        if let Err(TrySendError::Full(_)) = self.log.try_send(ScanEvent::Log(message.into())) {
            self.dropped += 1;
        }
    }

    /// Number of progress and log events discarded because their queue was full
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Send the terminal signal and close the channel
    pub fn complete(self, outcome: ScanOutcome) {
        if self.dropped > 0 {
            log::debug!("scan events dropped count={}", self.dropped);
        }
        if self.complete.try_send(outcome).is_err() {
            log::debug!("no consumer for scan completion");
        }
    }
}

/// Consumer half, read by the presentation layer
pub struct EventReceiver {
    progress: Receiver<ScanEvent>,
    log: Receiver<ScanEvent>,
    complete: Receiver<ScanOutcome>,
    pending: Option<ScanOutcome>,
    finished: bool,
}

impl EventReceiver {
    /// Block until the next event. Returns `None` once the terminal event has been
    /// delivered, or if the producer went away without sending one.
    pub fn recv(&mut self) -> Option<ScanEvent> {
        loop {
            if let Some(event) = self.try_recv() {
                return Some(event);
            }
            if self.finished {
                return None;
            }

            select! {
                recv(self.log) -> msg => if let Ok(event) = msg {
                    return Some(event);
                },
                recv(self.progress) -> msg => if let Ok(event) = msg {
                    return Some(event);
                },
                recv(self.complete) -> msg => if let Ok(outcome) = msg {
                    self.pending = Some(outcome);
                },
            }
        }
    }

    /// Return the next event if one is ready, without blocking
    pub fn try_recv(&mut self) -> Option<ScanEvent> {
        if self.finished {
            return None;
        }
        if let Some(event) = self.try_buffered() {
            return Some(event);
        }

        let outcome = match self.pending.take() {
            Some(outcome) => outcome,
            None => match self.complete.try_recv() {
                Ok(outcome) => outcome,
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    let event = self.try_buffered();
                    if event.is_none() {
                        log::debug!("scan producer exited without a terminal event");
                        self.finished = true;
                    }
                    return event;
                }
            },
        };

        // Events sent before the terminal signal still go out first
        if let Some(event) = self.try_buffered() {
            self.pending = Some(outcome);
            return Some(event);
        }

        self.finished = true;
        Some(ScanEvent::Complete(outcome))
    }

    /// True once the terminal event has been handed out
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn try_buffered(&self) -> Option<ScanEvent> {
        self.log
            .try_recv()
            .or_else(|_| self.progress.try_recv())
            .ok()
    }
}

impl Iterator for EventReceiver {
    type Item = ScanEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.recv()
    }
}

/// Shared flag polled by the scanner at candidate boundaries
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
