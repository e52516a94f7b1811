//! Actor Model: Message-passing host for a live document.
//!
//! The core types are synchronous and single threaded. A host that
//! receives revision events on one thread and renders on another puts a
//! [`DocumentWorker`] in between:
//!
//! ```text
//! ┌──────────────┐  WorkerCommand   ┌──────────────┐  DocumentUpdate  ┌──────────────┐
//! │ Model stream │ ───────────────▶ │ Worker thread│ ───────────────▶ │   Display    │
//! └──────────────┘                  │ (accumulator)│   (debounced)    └──────────────┘
//!                                   └──────────────┘
//! ```

mod messages;
mod worker;

pub use messages::{DocumentUpdate, UpdateTrigger, WorkerCommand};
pub use worker::{DocumentWorker, WorkerConfig, WorkerError};
