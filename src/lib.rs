//! # Redline
//!
//! Incremental document revisions with markdown-aware redline diffs.
//!
//! A language model streams a document as a small event protocol (`title`,
//! `clear`, `delta`, `finish`). Redline folds those events into the current
//! document plus a snapshot of what it replaced, and renders the pair as
//! markdown with inline `:add[...]` / `:del[...]` directives that still
//! render cleanly: fenced code, headings, lists, tables and inline
//! constructs survive annotation.
//!
//! ## Core Concepts
//!
//! - **Revision accumulator**: A pure reducer from events to `(snapshot, document)`
//! - **Annotator**: Line-first diff with word-level refinement, directives
//!   placed around whole markdown constructs
//! - **Differ**: Myers O(ND) sequence diff with semantic cleanup behind a trait
//! - **Document worker**: Optional thread that serializes events and
//!   debounces re-annotation
//!
//! ## Example
//!
//! ```rust
//! use redline::{DocumentEvent, RevisionAccumulator};
//!
//! let mut acc = RevisionAccumulator::new();
//! acc.apply(&DocumentEvent::title("Greeting"));
//! acc.apply(&DocumentEvent::Clear);
//! acc.apply(&DocumentEvent::delta("Hello world"));
//! acc.apply(&DocumentEvent::Finish);
//!
//! acc.apply(&DocumentEvent::Clear);
//! acc.apply(&DocumentEvent::delta("Hello there"));
//! acc.apply(&DocumentEvent::Finish);
//!
//! assert_eq!(acc.annotated(), "Hello :del[world] :add[there]");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod annotate;
pub mod diff;
pub mod document;
pub mod markdown;
pub mod terminal;

// Re-exports for convenience
pub use actor::{DocumentUpdate, DocumentWorker, WorkerConfig, WorkerError};
pub use annotate::{annotate, render_ops};
pub use diff::{DiffKind, DiffOp, Differ, LineDiffer, WordDiffer};
pub use document::{Document, DocumentEvent, EventOutcome, Phase, RevisionAccumulator, RevisionWriter};
pub use terminal::{strip_directives, write_annotated, DiffPalette};
