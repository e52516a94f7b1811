//! Revision producer: The generation side of a revision stream.
//!
//! A [`RevisionWriter`] wraps a fragment stream coming from a language
//! model, forwards it as [`DocumentEvent`]s to an [`EventSink`] and keeps
//! its own copy of the draft, so the generating side knows the final
//! document without listening to its own events.

use super::{Document, DocumentEvent};
use crossbeam_channel::Sender;
use thiserror::Error;
use tracing::debug;

/// Error returned when an event cannot be delivered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SinkError {
    /// The receiving side has gone away.
    #[error("event sink disconnected")]
    Disconnected,
}

/// Destination for revision events.
pub trait EventSink {
    /// Deliver one event, in order.
    fn emit(&mut self, event: DocumentEvent) -> Result<(), SinkError>;
}

impl EventSink for Vec<DocumentEvent> {
    fn emit(&mut self, event: DocumentEvent) -> Result<(), SinkError> {
        self.push(event);
        Ok(())
    }
}

impl EventSink for Sender<DocumentEvent> {
    fn emit(&mut self, event: DocumentEvent) -> Result<(), SinkError> {
        self.send(event).map_err(|_| SinkError::Disconnected)
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn emit(&mut self, event: DocumentEvent) -> Result<(), SinkError> {
        (**self).emit(event)
    }
}

/// Writes one revision to a sink.
///
/// A create revision emits `title` then `clear`; an update revision emits
/// only `clear`. Every non-empty fragment becomes a `delta`, and
/// [`finish`](Self::finish) emits `finish`.
#[derive(Debug)]
pub struct RevisionWriter<S: EventSink> {
    /// Event destination.
    sink: S,
    /// Draft being generated.
    document: Document,
    /// Fragments forwarded so far.
    fragments: usize,
}

impl<S: EventSink> RevisionWriter<S> {
    /// Start a revision that creates a new document.
    pub fn create(mut sink: S, title: &str) -> Result<Self, SinkError> {
        sink.emit(DocumentEvent::title(title))?;
        sink.emit(DocumentEvent::Clear)?;
        debug!(title, "create revision opened");

        Ok(Self {
            sink,
            document: Document::new(title, ""),
            fragments: 0,
        })
    }

    /// Start a revision that rewrites an existing document.
    ///
    /// The title is kept; the content is regenerated from scratch.
    pub fn update(mut sink: S, document: &Document) -> Result<Self, SinkError> {
        sink.emit(DocumentEvent::Clear)?;
        debug!(title = %document.title, "update revision opened");

        Ok(Self {
            sink,
            document: Document::new(document.title.clone(), ""),
            fragments: 0,
        })
    }

    /// Forward one fragment.
    pub fn push(&mut self, fragment: &str) -> Result<(), SinkError> {
        if fragment.is_empty() {
            return Ok(());
        }

        self.sink.emit(DocumentEvent::delta(fragment))?;
        self.document.content.push_str(fragment);
        self.fragments += 1;
        Ok(())
    }

    /// Forward every fragment of a stream.
    pub fn push_all<I>(&mut self, fragments: I) -> Result<(), SinkError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for fragment in fragments {
            self.push(fragment.as_ref())?;
        }
        Ok(())
    }

    /// Get the draft generated so far.
    pub const fn draft(&self) -> &Document {
        &self.document
    }

    /// Number of fragments forwarded.
    pub const fn fragments(&self) -> usize {
        self.fragments
    }

    /// Close the revision and return the finished document.
    pub fn finish(mut self) -> Result<Document, SinkError> {
        self.sink.emit(DocumentEvent::Finish)?;
        debug!(fragments = self.fragments, "revision closed");
        Ok(self.document)
    }
}

/// Split text into word-sized fragments, the way model output is usually
/// smoothed before streaming.
///
/// Each fragment is a run of non-whitespace followed by the whitespace after
/// it; leading whitespace is its own fragment. Concatenating the fragments
/// gives back `text`.
pub fn word_chunks(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let word_end = if rest.starts_with(char::is_whitespace) {
            0
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };
        let space_end = rest[word_end..]
            .find(|c: char| !c.is_whitespace())
            .map_or(rest.len(), |i| word_end + i);

        let (chunk, tail) = rest.split_at(space_end);
        rest = tail;
        Some(chunk)
    })
}
