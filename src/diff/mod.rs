//! Diff module: Sequence diffing behind a small trait.
//!
//! This module contains:
//! - [`Differ`]: The diff primitive, `diff(old, new) -> Vec<DiffOp>`
//! - [`LineDiffer`] / [`WordDiffer`]: Line and markdown-token granularity
//! - [`Hunk`] + Myers O(ND) search + semantic cleanup, generic over items
//!
//! Markdown awareness lives one level up in [`crate::annotate`]; nothing
//! here knows about directives.

mod cleanup;
mod hunk;
mod myers;

pub use cleanup::cleanup_semantic;
pub use hunk::Hunk;

use crate::markdown::{tokenize, Token};
use serde::{Deserialize, Serialize};

/// What happened to a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present in both versions.
    Unchanged,
    /// Present only in the new version.
    Inserted,
    /// Present only in the old version.
    Deleted,
}

impl DiffKind {
    /// Directive name used to mark text of this kind, if any.
    pub const fn directive(self) -> Option<&'static str> {
        match self {
            Self::Unchanged => None,
            Self::Inserted => Some("add"),
            Self::Deleted => Some("del"),
        }
    }
}

/// One operation of a diff: a kind and the text it covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffOp {
    /// Operation kind.
    pub kind: DiffKind,
    /// Covered text.
    pub text: String,
}

impl DiffOp {
    /// Create an operation.
    pub fn new(kind: DiffKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Diff primitive over text.
pub trait Differ {
    /// Compute the operations turning `old` into `new`.
    ///
    /// Concatenating the non-inserted texts gives `old`; concatenating the
    /// non-deleted texts gives `new`.
    fn diff(&self, old: &str, new: &str) -> Vec<DiffOp>;
}

/// Diffs text line by line. Lines keep their terminators.
#[derive(Debug, Clone, Copy)]
pub struct LineDiffer {
    /// Run semantic cleanup on the result.
    pub semantic_cleanup: bool,
}

impl Default for LineDiffer {
    fn default() -> Self {
        Self {
            semantic_cleanup: true,
        }
    }
}

impl Differ for LineDiffer {
    fn diff(&self, old: &str, new: &str) -> Vec<DiffOp> {
        let hunks = if self.semantic_cleanup {
            line_hunks(old, new)
        } else {
            let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
            let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
            myers::diff(&old_lines, &new_lines)
        };
        into_ops(hunks, |line| *line)
    }
}

/// Line-level diff with semantic cleanup.
pub(crate) fn line_hunks<'a>(old: &'a str, new: &'a str) -> Vec<Hunk<&'a str>> {
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
    cleanup_semantic(myers::diff(&old_lines, &new_lines), |line| line.chars().count())
}

/// Diffs text token by token, keeping inline markdown constructs whole.
#[derive(Debug, Clone, Copy)]
pub struct WordDiffer {
    /// Run semantic cleanup on the result.
    pub semantic_cleanup: bool,
}

impl Default for WordDiffer {
    fn default() -> Self {
        Self {
            semantic_cleanup: true,
        }
    }
}

impl Differ for WordDiffer {
    fn diff(&self, old: &str, new: &str) -> Vec<DiffOp> {
        let old_tokens = tokenize(old, true);
        let new_tokens = tokenize(new, true);

        let hunks = if self.semantic_cleanup {
            token_hunks(&old_tokens, &new_tokens)
        } else {
            myers::diff(&old_tokens, &new_tokens)
        };
        into_ops(hunks, |token| token.text)
    }
}

/// Token-level diff with semantic cleanup.
pub(crate) fn token_hunks<'a>(old: &[Token<'a>], new: &[Token<'a>]) -> Vec<Hunk<Token<'a>>> {
    cleanup_semantic(myers::diff(old, new), |token| token.text.chars().count())
}

fn into_ops<T, F>(hunks: Vec<Hunk<T>>, text: F) -> Vec<DiffOp>
where
    F: Fn(&T) -> &str,
{
    hunks
        .into_iter()
        .map(|hunk| {
            let joined: String = hunk.items.iter().map(&text).collect();
            DiffOp::new(hunk.kind, joined)
        })
        .collect()
}

/// Rebuild the old text from a diff.
pub fn old_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Inserted)
        .map(|op| op.text.as_str())
        .collect()
}

/// Rebuild the new text from a diff.
pub fn new_text(ops: &[DiffOp]) -> String {
    ops.iter()
        .filter(|op| op.kind != DiffKind::Deleted)
        .map(|op| op.text.as_str())
        .collect()
}

/// Size summary of a diff, in characters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Characters kept.
    pub unchanged: usize,
    /// Characters added.
    pub inserted: usize,
    /// Characters removed.
    pub deleted: usize,
}

impl DiffStats {
    /// Summarize a diff.
    pub fn from_ops(ops: &[DiffOp]) -> Self {
        ops.iter().fold(Self::default(), |mut stats, op| {
            let chars = op.text.chars().count();
            match op.kind {
                DiffKind::Unchanged => stats.unchanged += chars,
                DiffKind::Inserted => stats.inserted += chars,
                DiffKind::Deleted => stats.deleted += chars,
            }
            stats
        })
    }

    /// Check if the diff changes anything.
    pub const fn has_changes(&self) -> bool {
        self.inserted > 0 || self.deleted > 0
    }

    /// Fraction of the new text that was kept, in `[0, 1]`.
    #[allow(clippy::cast_precision_loss)]
    pub fn similarity(&self) -> f64 {
        let total = self.unchanged + self.inserted;
        if total == 0 {
            return 1.0;
        }
        self.unchanged as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_line_differ_basic() {
        let ops = LineDiffer::default().diff("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            ops,
            vec![
                DiffOp::new(DiffKind::Unchanged, "a\n"),
                DiffOp::new(DiffKind::Deleted, "b\n"),
                DiffOp::new(DiffKind::Inserted, "x\n"),
                DiffOp::new(DiffKind::Unchanged, "c\n"),
            ]
        );
    }

    #[test]
    fn test_line_differ_missing_final_newline() {
        let ops = LineDiffer::default().diff("a", "a\nb");
        assert_eq!(old_text(&ops), "a");
        assert_eq!(new_text(&ops), "a\nb");
    }

    #[test]
    fn test_word_differ_keeps_constructs() {
        let ops = WordDiffer::default().diff("use **bold** here", "use **strong** here");
        assert!(ops.contains(&DiffOp::new(DiffKind::Deleted, "**bold**")));
        assert!(ops.contains(&DiffOp::new(DiffKind::Inserted, "**strong**")));
    }

    #[test]
    fn test_word_differ_raw_vs_cleaned() {
        let old = "the cat sat on the mat";
        let new = "a dog lay on a rug";
        let raw = WordDiffer { semantic_cleanup: false }.diff(old, new);
        let cleaned = WordDiffer::default().diff(old, new);
        assert!(cleaned.len() < raw.len());
        assert_eq!(new_text(&cleaned), new);
    }

    #[test]
    fn test_diff_stats() {
        let ops = WordDiffer::default().diff("Hello world", "Hello there");
        let stats = DiffStats::from_ops(&ops);
        assert_eq!(stats.unchanged, 6);
        assert_eq!(stats.deleted, 5);
        assert_eq!(stats.inserted, 5);
        assert!(stats.has_changes());
        assert!(!DiffStats::from_ops(&LineDiffer::default().diff("x", "x")).has_changes());
    }

    #[test]
    fn test_diff_op_serde() {
        let op = DiffOp::new(DiffKind::Inserted, "new");
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"kind":"inserted","text":"new"}"#);
        let back: DiffOp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    fn test_directive_names() {
        assert_eq!(DiffKind::Inserted.directive(), Some("add"));
        assert_eq!(DiffKind::Deleted.directive(), Some("del"));
        assert_eq!(DiffKind::Unchanged.directive(), None);
    }

    proptest! {
        #[test]
        fn test_line_differ_round_trip(old in "[ab \n#*`-]{0,40}", new in "[ab \n#*`-]{0,40}") {
            let ops = LineDiffer::default().diff(&old, &new);
            prop_assert_eq!(old_text(&ops), old);
            prop_assert_eq!(new_text(&ops), new);
        }

        #[test]
        fn test_word_differ_round_trip(old in "[ab \n#*`_|-]{0,40}", new in "[ab \n#*`_|-]{0,40}") {
            let ops = WordDiffer::default().diff(&old, &new);
            prop_assert_eq!(old_text(&ops), old);
            prop_assert_eq!(new_text(&ops), new);
        }
    }
}
