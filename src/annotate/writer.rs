//! Span writer: Owns the directive syntax and the spacing rule.

use crate::diff::DiffKind;

/// Accumulates annotated output.
///
/// Every directive goes through [`push`](Self::push), which keeps
/// whitespace outside the brackets, never emits an empty directive, and
/// separates two directives that would otherwise touch with one space.
#[derive(Debug, Default)]
pub struct SpanWriter {
    out: String,
    last_was_directive: bool,
}

impl SpanWriter {
    /// Create a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            out: String::with_capacity(capacity),
            last_was_directive: false,
        }
    }

    /// Write text verbatim.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.out.push_str(text);
        self.last_was_directive = false;
    }

    /// Write text of the given kind: verbatim when unchanged, otherwise as
    /// a directive.
    pub fn push(&mut self, kind: DiffKind, text: &str) {
        let Some(name) = kind.directive() else {
            self.text(text);
            return;
        };

        let start = text.len() - text.trim_start().len();
        let end = text.trim_end().len().max(start);
        let label = &text[start..end];

        self.text(&text[..start]);
        if label.is_empty() {
            return;
        }

        if self.last_was_directive {
            self.out.push(' ');
        }
        self.out.push(':');
        self.out.push_str(name);
        self.out.push('[');
        self.out.push_str(label);
        self.out.push(']');
        self.last_was_directive = true;

        self.text(&text[end..]);
    }

    /// Get the output written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the writer, returning the output.
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_whitespace_outside_brackets() {
        let mut out = SpanWriter::default();
        out.push(DiffKind::Inserted, "  new words \n");
        assert_eq!(out.as_str(), "  :add[new words] \n");
    }

    #[test]
    fn test_writer_never_wraps_blank() {
        let mut out = SpanWriter::default();
        out.push(DiffKind::Deleted, "");
        out.push(DiffKind::Deleted, " \t\n");
        assert_eq!(out.finish(), " \t\n");
    }

    #[test]
    fn test_writer_separates_adjacent_directives() {
        let mut out = SpanWriter::default();
        out.push(DiffKind::Deleted, "old");
        out.push(DiffKind::Inserted, "new");
        out.push(DiffKind::Inserted, "more");
        assert_eq!(out.finish(), ":del[old] :add[new] :add[more]");
    }

    #[test]
    fn test_writer_text_resets_spacing() {
        let mut out = SpanWriter::default();
        out.push(DiffKind::Inserted, "a");
        out.text("");
        out.push(DiffKind::Inserted, "b");
        out.text("|");
        out.push(DiffKind::Inserted, "c");
        assert_eq!(out.finish(), ":add[a] :add[b]|:add[c]");
    }

    #[test]
    fn test_writer_unchanged_is_verbatim() {
        let mut out = SpanWriter::with_capacity(8);
        out.push(DiffKind::Unchanged, " keep ");
        assert_eq!(out.finish(), " keep ");
    }
}
