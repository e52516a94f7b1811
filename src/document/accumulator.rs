//! Revision Accumulator: Folds a revision event stream into document state.
//!
//! The accumulator owns exactly two pieces of text: the current
//! [`Document`] and the *previous snapshot* (the content as it was before
//! the in-flight revision began). It is a pure reducer: every event is
//! applied synchronously, nothing can fail, and a stream that stops early
//! simply leaves a partially generated document behind.
//!
//! # Lifecycle
//!
//! ```text
//!            clear                 finish
//!   Idle ─────────────▶ Accumulating ─────────▶ Idle
//!                         │    ▲
//!                         └────┘
//!                   clear (restart, keeps the
//!                    original snapshot)
//! ```

use super::{Document, DocumentEvent};
use crate::annotate::annotate;
use tracing::{debug, trace};

/// Lifecycle phase of the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No revision in progress.
    #[default]
    Idle,
    /// Delta events are being appended.
    Accumulating,
}

/// What applying a single event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The title was replaced.
    TitleChanged,
    /// A revision began (or restarted) and the content was emptied.
    RevisionStarted {
        /// `true` if a revision was already in flight; the snapshot taken
        /// at the first clear was kept.
        restarted: bool,
    },
    /// A fragment was appended.
    Appended {
        /// Number of bytes appended.
        bytes: usize,
    },
    /// An empty fragment arrived; nothing changed.
    Empty,
    /// The revision is complete.
    RevisionFinished,
    /// The event carried nothing to apply (unknown kind, or a finish with
    /// no revision in flight).
    Ignored,
}

impl EventOutcome {
    /// Whether the visible document changed.
    pub const fn changed(&self) -> bool {
        matches!(
            self,
            Self::TitleChanged | Self::RevisionStarted { .. } | Self::Appended { .. }
        )
    }
}

/// Deterministic state machine mapping revision events to
/// `(previous snapshot, document)`.
///
/// One accumulator corresponds to one document lifecycle. The host owns it
/// and must deliver events in order; no internal locking is done.
#[derive(Debug, Clone, Default)]
pub struct RevisionAccumulator {
    /// Current document.
    document: Document,
    /// Content captured when the active revision began.
    previous: String,
    /// Current phase.
    phase: Phase,
    /// Revisions started so far.
    revision: u64,
    /// Revisions finished so far.
    finished: u64,
}

impl RevisionAccumulator {
    /// Create an accumulator for an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an accumulator that resumes from an existing document.
    ///
    /// The document is treated as a stable, finished revision.
    pub fn with_document(document: Document) -> Self {
        Self {
            previous: document.content.clone(),
            document,
            phase: Phase::Idle,
            revision: 0,
            finished: 0,
        }
    }

    /// Get the current document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Get the previous snapshot (the "old" side of a diff).
    pub fn previous(&self) -> &str {
        &self.previous
    }

    /// Get the current phase.
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if a revision is in flight.
    pub const fn is_accumulating(&self) -> bool {
        matches!(self.phase, Phase::Accumulating)
    }

    /// Check if the content is a complete revision, usable as a future
    /// "old" side.
    pub const fn is_stable(&self) -> bool {
        matches!(self.phase, Phase::Idle) && self.finished > 0
    }

    /// Number of revisions started (restarts do not count).
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Set the document title.
    ///
    /// Allowed at any point; the content is never touched.
    pub fn on_title(&mut self, text: &str) -> EventOutcome {
        text.clone_into(&mut self.document.title);
        EventOutcome::TitleChanged
    }

    /// Begin a revision.
    ///
    /// From `Idle` the current content becomes the previous snapshot. A
    /// second clear without an intervening finish only empties the content
    /// again, so the snapshot keeps the true "before" baseline.
    pub fn on_clear(&mut self) -> EventOutcome {
        let restarted = self.is_accumulating();
        if restarted {
            debug!(revision = self.revision, "revision restarted");
        } else {
            self.previous = std::mem::take(&mut self.document.content);
            self.phase = Phase::Accumulating;
            self.revision += 1;
            debug!(
                revision = self.revision,
                snapshot_len = self.previous.len(),
                "revision started"
            );
        }
        self.document.content.clear();
        EventOutcome::RevisionStarted { restarted }
    }

    /// Append a fragment to the content.
    ///
    /// Fragments may end mid-word or mid-construct; only arrival order
    /// matters.
    pub fn on_delta(&mut self, text: &str) -> EventOutcome {
        if text.is_empty() {
            return EventOutcome::Empty;
        }

        self.document.content.push_str(text);
        trace!(bytes = text.len(), total = self.document.content.len(), "delta appended");
        EventOutcome::Appended { bytes: text.len() }
    }

    /// Mark the active revision complete.
    pub fn on_finish(&mut self) -> EventOutcome {
        if !self.is_accumulating() {
            return EventOutcome::Ignored;
        }

        self.phase = Phase::Idle;
        self.finished += 1;
        debug!(
            revision = self.revision,
            content_len = self.document.content.len(),
            "revision finished"
        );
        EventOutcome::RevisionFinished
    }

    /// Apply one event.
    pub fn apply(&mut self, event: &DocumentEvent) -> EventOutcome {
        match event {
            DocumentEvent::Title { text } => self.on_title(text),
            DocumentEvent::Clear => self.on_clear(),
            DocumentEvent::Delta { text } => self.on_delta(text),
            DocumentEvent::Finish => self.on_finish(),
            DocumentEvent::Unknown => {
                debug!("ignoring unknown document event");
                EventOutcome::Ignored
            }
        }
    }

    /// Apply a sequence of events in order.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a DocumentEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Render the current content as an annotated diff against the
    /// previous snapshot.
    ///
    /// This recomputes the full diff; call it per render, not per delta.
    pub fn annotated(&self) -> String {
        annotate(&self.previous, &self.document.content)
    }

    /// Consume the accumulator, returning `(previous snapshot, document)`.
    pub fn into_parts(self) -> (String, Document) {
        (self.previous, self.document)
    }
}
