//! Message types for worker communication.

use crate::document::{Document, DocumentEvent, Phase};

/// Commands sent to the document worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerCommand {
    /// Apply a revision event.
    Event(DocumentEvent),
    /// Publish the current state now, even if nothing changed.
    Flush,
    /// Publish any pending changes and stop.
    Shutdown,
}

/// Why an update was published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateTrigger {
    /// The title changed.
    Title,
    /// A revision started or restarted.
    Started,
    /// Debounced content growth.
    Delta,
    /// The revision finished.
    Finished,
    /// Explicit flush request.
    Flush,
    /// The worker is stopping with unpublished changes.
    Final,
}

impl UpdateTrigger {
    /// Critical updates are never dropped; on a full update channel they
    /// replace the oldest queued update.
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Finished | Self::Flush | Self::Final)
    }
}

/// Snapshot of the document state published by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpdate {
    /// What caused this update.
    pub trigger: UpdateTrigger,
    /// Revision counter at publish time.
    pub revision: u64,
    /// Accumulator phase at publish time.
    pub phase: Phase,
    /// Current document.
    pub document: Document,
    /// Content before the active revision.
    pub previous: String,
    /// Annotated diff of `previous` against the content, when enabled.
    pub annotated: Option<String>,
}

impl DocumentUpdate {
    /// Check if the revision was complete when this update was taken.
    pub const fn is_final_revision(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }
}
