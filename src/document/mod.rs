//! Document module: Revision state for a single generated artifact.
//!
//! This module contains:
//! - [`Document`]: The title + markdown body shown to the user
//! - [`DocumentEvent`]: The four-kind revision event protocol
//! - [`RevisionAccumulator`]: The reducer from events to `(snapshot, document)`
//! - [`RevisionWriter`]: The producing side, from fragments to events

#[allow(clippy::module_inception)]
mod document;
mod event;
mod accumulator;
mod producer;

pub use document::Document;
pub use event::DocumentEvent;
pub use accumulator::{EventOutcome, Phase, RevisionAccumulator};
pub use producer::{word_chunks, EventSink, RevisionWriter, SinkError};
