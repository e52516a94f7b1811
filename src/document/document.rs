//! Document: The user-visible artifact produced by a conversation turn.

use serde::{Deserialize, Serialize};

/// A generated document: a title plus an authoritative markdown body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Document {
    /// Display title.
    pub title: String,
    /// Markdown content.
    pub content: String,
}

impl Document {
    /// Create a document with the given title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Create an empty document.
    pub const fn empty() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
        }
    }

    /// Check if the document has neither title nor content.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Number of lines in the content (0 for empty content).
    pub fn line_count(&self) -> usize {
        self.content.lines().count()
    }
}
