//! Document Worker: Dedicated thread owning one revision accumulator.
//!
//! Events arrive in order over a bounded command channel. Fragments only
//! mark the state dirty; a snapshot (with the annotated diff, which is a
//! full recompute) is published at most once per debounce interval.
//! Lifecycle events publish right away. The worker never blocks on the
//! update channel: when it is full, ordinary updates are dropped and
//! lifecycle completions evict the oldest queued snapshot.

use super::messages::{DocumentUpdate, UpdateTrigger, WorkerCommand};
use crate::document::{DocumentEvent, EventOutcome, EventSink, RevisionAccumulator, SinkError};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// How long the loop waits for a command when nothing is pending.
const IDLE_POLL: Duration = Duration::from_millis(16);

/// Configuration for the document worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Minimum time between two delta-triggered updates.
    pub debounce: Duration,
    /// Capacity of the command and update channels.
    pub channel_capacity: usize,
    /// Compute the annotated diff for every update.
    pub annotate: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(50),
            channel_capacity: 256,
            annotate: true,
        }
    }
}

/// Errors from the worker handle.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The OS refused to start the thread.
    #[error("failed to spawn document worker: {0}")]
    Spawn(#[from] std::io::Error),
    /// The worker thread has stopped.
    #[error("document worker has stopped")]
    Disconnected,
    /// The worker thread panicked.
    #[error("document worker panicked")]
    Panicked,
}

/// Handle to a running document worker.
pub struct DocumentWorker {
    /// Handle to the worker thread.
    handle: Option<JoinHandle<RevisionAccumulator>>,
    /// Flag to stop without draining.
    shutdown: Arc<AtomicBool>,
    /// Command sender.
    commands: Sender<WorkerCommand>,
    /// Published updates.
    updates: Receiver<DocumentUpdate>,
}

impl DocumentWorker {
    /// Spawn a worker for an empty document.
    pub fn spawn(config: WorkerConfig) -> Result<Self, WorkerError> {
        Self::spawn_with(RevisionAccumulator::new(), config)
    }

    /// Spawn a worker that continues from an existing accumulator.
    pub fn spawn_with(
        accumulator: RevisionAccumulator,
        config: WorkerConfig,
    ) -> Result<Self, WorkerError> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let capacity = config.channel_capacity.max(1);
        let (command_tx, command_rx) = bounded(capacity);
        let (update_tx, update_rx) = bounded(capacity);

        let backlog = update_rx.clone();
        let handle = thread::Builder::new()
            .name("redline-document".to_string())
            .spawn(move || {
                let mut state = WorkerState::new(accumulator, config, update_tx, backlog);
                state.run_loop(&command_rx, &shutdown_clone);
                state.accumulator
            })?;

        debug!(capacity, "document worker started");

        Ok(Self {
            handle: Some(handle),
            shutdown,
            commands: command_tx,
            updates: update_rx,
        })
    }

    /// Send an event to the worker.
    pub fn send(&self, event: DocumentEvent) -> Result<(), WorkerError> {
        self.command(WorkerCommand::Event(event))
    }

    /// Ask the worker to publish its current state.
    pub fn flush(&self) -> Result<(), WorkerError> {
        self.command(WorkerCommand::Flush)
    }

    fn command(&self, command: WorkerCommand) -> Result<(), WorkerError> {
        self.commands
            .send(command)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Get a reference to the update receiver.
    #[inline]
    pub const fn updates(&self) -> &Receiver<DocumentUpdate> {
        &self.updates
    }

    /// Signal the worker to stop without processing queued commands.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Drain queued commands, stop the worker and return its final state.
    pub fn join(mut self) -> Result<RevisionAccumulator, WorkerError> {
        // The worker may already be gone after `shutdown`.
        let _ = self.commands.send(WorkerCommand::Shutdown);
        let handle = self.handle.take().ok_or(WorkerError::Disconnected)?;
        handle.join().map_err(|_| WorkerError::Panicked)
    }
}

impl Drop for DocumentWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl EventSink for &DocumentWorker {
    fn emit(&mut self, event: DocumentEvent) -> Result<(), SinkError> {
        self.send(event).map_err(|_| SinkError::Disconnected)
    }
}

/// State owned by the worker thread.
struct WorkerState {
    accumulator: RevisionAccumulator,
    config: WorkerConfig,
    updates: Sender<DocumentUpdate>,
    /// Receiving end of `updates`, for evicting stale snapshots.
    backlog: Receiver<DocumentUpdate>,
    /// Content changed since the last publish.
    dirty: bool,
    last_publish: Option<Instant>,
}

impl WorkerState {
    const fn new(
        accumulator: RevisionAccumulator,
        config: WorkerConfig,
        updates: Sender<DocumentUpdate>,
        backlog: Receiver<DocumentUpdate>,
    ) -> Self {
        Self {
            accumulator,
            config,
            updates,
            backlog,
            dirty: false,
            last_publish: None,
        }
    }

    /// Main worker loop.
    fn run_loop(&mut self, commands: &Receiver<WorkerCommand>, shutdown: &AtomicBool) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                debug!("document worker interrupted");
                break;
            }

            match commands.recv_timeout(self.next_timeout()) {
                Ok(WorkerCommand::Event(event)) => self.apply(&event),
                Ok(WorkerCommand::Flush) => self.publish(UpdateTrigger::Flush),
                Ok(WorkerCommand::Shutdown) => {
                    self.finish();
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    self.finish();
                    break;
                }
            }

            if self.dirty && self.debounce_elapsed() {
                self.publish(UpdateTrigger::Delta);
            }
        }
    }

    fn apply(&mut self, event: &DocumentEvent) {
        match self.accumulator.apply(event) {
            EventOutcome::Appended { .. } => self.dirty = true,
            EventOutcome::TitleChanged => self.publish(UpdateTrigger::Title),
            EventOutcome::RevisionStarted { .. } => self.publish(UpdateTrigger::Started),
            EventOutcome::RevisionFinished => self.publish(UpdateTrigger::Finished),
            EventOutcome::Empty | EventOutcome::Ignored => {}
        }
    }

    fn finish(&mut self) {
        if self.dirty {
            self.publish(UpdateTrigger::Final);
        }
        debug!(revision = self.accumulator.revision(), "document worker stopped");
    }

    fn debounce_elapsed(&self) -> bool {
        self.last_publish
            .is_none_or(|at| at.elapsed() >= self.config.debounce)
    }

    fn next_timeout(&self) -> Duration {
        match (self.dirty, self.last_publish) {
            (true, Some(at)) => self.config.debounce.saturating_sub(at.elapsed()),
            (true, None) => Duration::ZERO,
            (false, _) => IDLE_POLL,
        }
    }

    fn publish(&mut self, trigger: UpdateTrigger) {
        let mut update = DocumentUpdate {
            trigger,
            revision: self.accumulator.revision(),
            phase: self.accumulator.phase(),
            document: self.accumulator.document().clone(),
            previous: self.accumulator.previous().to_owned(),
            annotated: self.config.annotate.then(|| self.accumulator.annotated()),
        };
        self.dirty = false;
        self.last_publish = Some(Instant::now());

        loop {
            match self.updates.try_send(update) {
                Ok(()) => {
                    trace!(?trigger, "update published");
                    return;
                }
                Err(TrySendError::Full(rejected)) if trigger.is_critical() => {
                    // Every update is a full snapshot; the oldest one is stale.
                    if let Ok(stale) = self.backlog.try_recv() {
                        warn!(
                            ?trigger,
                            evicted = ?stale.trigger,
                            "update channel full, evicting oldest update"
                        );
                    }
                    update = rejected;
                }
                Err(TrySendError::Full(_)) => {
                    warn!(?trigger, "update channel full, dropping update");
                    return;
                }
                Err(TrySendError::Disconnected(_)) => {
                    trace!(?trigger, "no update listener");
                    return;
                }
            }
        }
    }
}
