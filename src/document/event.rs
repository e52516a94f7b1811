//! Event types for document revision streams.
//!
//! These enums define the protocol between the generation side (which
//! produces fragments) and the accumulator (which folds them into a
//! document).

use serde::{Deserialize, Serialize};

/// An event in a document revision stream.
///
/// The vocabulary is fixed to four kinds. On the wire each event is a JSON
/// object tagged by `type` with an optional `data` payload:
///
/// ```json
/// {"type": "title", "data": "Report"}
/// {"type": "clear"}
/// {"type": "delta", "data": "# Intro\n"}
/// {"type": "finish"}
/// ```
///
/// The `data-*` tags emitted by older chat transports are accepted as
/// aliases. Any other tag decodes to [`DocumentEvent::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentEvent {
    /// Set the document title.
    #[serde(rename = "title", alias = "data-title")]
    Title {
        /// The new title.
        #[serde(rename = "data")]
        text: String,
    },

    /// Begin (or restart) a revision: snapshot the content and empty it.
    #[serde(rename = "clear", alias = "data-clear")]
    Clear,

    /// Append a fragment of generated text.
    #[serde(rename = "delta", alias = "data-documentDelta")]
    Delta {
        /// The fragment, appended verbatim.
        #[serde(rename = "data")]
        text: String,
    },

    /// The active revision is complete.
    #[serde(rename = "finish", alias = "data-finish")]
    Finish,

    /// An event kind this version does not know about.
    #[serde(other)]
    Unknown,
}

impl DocumentEvent {
    /// Create a `title` event.
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title { text: text.into() }
    }

    /// Create a `delta` event.
    pub fn delta(text: impl Into<String>) -> Self {
        Self::Delta { text: text.into() }
    }

    /// The wire tag of this event.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Clear => "clear",
            Self::Delta { .. } => "delta",
            Self::Finish => "finish",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this event ends a revision.
    pub const fn is_finish(&self) -> bool {
        matches!(self, Self::Finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            DocumentEvent::title("Report"),
            DocumentEvent::Title { text: "Report".to_string() }
        );
        assert_eq!(DocumentEvent::delta("x").tag(), "delta");
        assert!(DocumentEvent::Finish.is_finish());
        assert!(!DocumentEvent::Clear.is_finish());
    }

    #[test]
    fn test_event_wire_format() {
        let json = serde_json::to_string(&DocumentEvent::delta("Hello")).unwrap();
        assert_eq!(json, r#"{"type":"delta","data":"Hello"}"#);

        let json = serde_json::to_string(&DocumentEvent::Clear).unwrap();
        assert_eq!(json, r#"{"type":"clear"}"#);
    }

    #[test]
    fn test_event_decode() {
        let event: DocumentEvent =
            serde_json::from_str(r#"{"type":"title","data":"Report"}"#).unwrap();
        assert_eq!(event, DocumentEvent::title("Report"));

        let event: DocumentEvent = serde_json::from_str(r#"{"type":"finish"}"#).unwrap();
        assert_eq!(event, DocumentEvent::Finish);
    }

    #[test]
    fn test_event_decode_transport_aliases() {
        let event: DocumentEvent =
            serde_json::from_str(r#"{"type":"data-documentDelta","data":"abc"}"#).unwrap();
        assert_eq!(event, DocumentEvent::delta("abc"));

        let event: DocumentEvent =
            serde_json::from_str(r#"{"type":"data-clear","data":null}"#).unwrap();
        assert_eq!(event, DocumentEvent::Clear);
    }

    #[test]
    fn test_event_decode_unknown() {
        let event: DocumentEvent =
            serde_json::from_str(r#"{"type":"data-appendMessage","data":"hi"}"#).unwrap();
        assert_eq!(event, DocumentEvent::Unknown);
    }
}
