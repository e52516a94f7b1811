//! Annotate module: Render a revision as markdown with inline diff
//! directives.
//!
//! [`annotate`] returns the new text with inserted runs wrapped as
//! `:add[...]` and deleted runs restored and wrapped as `:del[...]`, such
//! that the result still renders as sensible markdown:
//! - Fence delimiters are never wrapped, and only the new text's delimiters
//!   are written
//! - Inline constructs (`**bold**`, `` `code` ``, links) are never split
//! - Whitespace stays outside directives and no directive crosses a newline
//!
//! # Policies
//!
//! - **Fresh document** (old side blank): every line of the new text is an
//!   insertion and goes through the line rules.
//! - **Revision**: a line diff finds the change regions; regions that
//!   replace plain text with plain text are refined word by word so that
//!   only the words that changed are marked.

mod line;
mod writer;

pub use writer::SpanWriter;

use crate::diff::{line_hunks, token_hunks, DiffKind, DiffOp, Hunk};
use crate::markdown::{tokenize, FenceTracker, LineRole, Token};
use line::{annotate_line, is_marker, render_tokens};

/// Annotate `new` against `old`.
///
/// Pure and infallible: degenerate input comes back verbatim.
pub fn annotate(old: &str, new: &str) -> String {
    if old == new {
        return new.to_owned();
    }

    let mut out = SpanWriter::with_capacity(new.len() + old.len() / 2 + 16);
    if old.trim().is_empty() {
        annotate_fresh(&mut out, new);
    } else {
        annotate_revision(&mut out, old, new);
    }
    out.finish()
}

/// Render any diff op stream with the directive rules.
///
/// Changed text is re-tokenized so constructs stay whole, and split at
/// newlines so no directive spans two lines.
pub fn render_ops(ops: &[DiffOp]) -> String {
    let capacity = ops.iter().map(|op| op.text.len() + 8).sum();
    let mut out = SpanWriter::with_capacity(capacity);

    for op in ops {
        match op.kind {
            DiffKind::Unchanged => out.text(&op.text),
            kind => render_tokens(&mut out, kind, &tokenize(&op.text, false)),
        }
    }
    out.finish()
}

fn annotate_fresh(out: &mut SpanWriter, new: &str) {
    let mut fences = FenceTracker::new();
    for line in new.split_inclusive('\n') {
        let role = fences.observe(line);
        annotate_line(out, DiffKind::Inserted, line, role);
    }
}

fn annotate_revision(out: &mut SpanWriter, old: &str, new: &str) {
    let hunks = line_hunks(old, new);
    let mut old_fences = FenceTracker::new();
    let mut new_fences = FenceTracker::new();

    let mut deleted: Vec<&str> = Vec::new();
    let mut inserted: Vec<&str> = Vec::new();

    for Hunk { kind, items } in hunks {
        match kind {
            DiffKind::Deleted => deleted.extend(items),
            DiffKind::Inserted => inserted.extend(items),
            DiffKind::Unchanged => {
                render_region(out, &deleted, &inserted, &mut old_fences, &mut new_fences);
                deleted.clear();
                inserted.clear();

                for line in items {
                    old_fences.observe(line);
                    new_fences.observe(line);
                    out.text(line);
                }
            }
        }
    }
    render_region(out, &deleted, &inserted, &mut old_fences, &mut new_fences);
}

/// Regions with more tokens than this are not refined word by word.
const REFINE_TOKEN_LIMIT: usize = 2048;

/// Render one change region: the deleted and inserted lines between two
/// unchanged runs.
fn render_region(
    out: &mut SpanWriter,
    deleted: &[&str],
    inserted: &[&str],
    old_fences: &mut FenceTracker,
    new_fences: &mut FenceTracker,
) {
    let old_roles: Vec<LineRole> = deleted.iter().map(|line| old_fences.observe(line)).collect();
    let new_roles: Vec<LineRole> = inserted.iter().map(|line| new_fences.observe(line)).collect();

    let all_text = old_roles
        .iter()
        .chain(&new_roles)
        .all(|role| *role == LineRole::Text);

    if all_text && !deleted.is_empty() && !inserted.is_empty() {
        let old_text = deleted.concat();
        let new_text = inserted.concat();
        let old_tokens = tokenize(&old_text, true);
        let new_tokens = tokenize(&new_text, true);

        if old_tokens.len() + new_tokens.len() <= REFINE_TOKEN_LIMIT {
            let hunks = token_hunks(&old_tokens, &new_tokens);
            if is_useful_refinement(&hunks) {
                for hunk in &hunks {
                    match hunk.kind {
                        DiffKind::Unchanged => hunk.items.iter().for_each(|t| out.text(t.text)),
                        kind => render_tokens(out, kind, &hunk.items),
                    }
                }
                return;
            }
        }
    }

    // Old fence delimiters are left out; the output keeps the fences of the
    // new text. A replaced delimiter goes first so the old code lines land
    // in the new block.
    let replaced_fence = old_roles.first() == Some(&LineRole::Fence)
        && new_roles.first() == Some(&LineRole::Fence)
        && inserted.first().is_some_and(|line| line.ends_with('\n'));
    let (lead, rest) = inserted.split_at(usize::from(replaced_fence));
    lead.iter().for_each(|line| out.text(line));

    let mut unterminated = false;
    for (line, role) in deleted.iter().zip(old_roles) {
        if role == LineRole::Fence {
            continue;
        }
        annotate_line(out, DiffKind::Deleted, line, role);
        unterminated = !line.ends_with('\n');
    }
    if unterminated && !rest.is_empty() {
        out.text("\n");
    }
    for (line, role) in rest.iter().zip(&new_roles[lead.len()..]) {
        annotate_line(out, DiffKind::Inserted, line, *role);
    }
}

/// A word-level refinement is kept when the two sides share real content
/// and no block marker was added, removed, or changed.
fn is_useful_refinement(hunks: &[Hunk<Token<'_>>]) -> bool {
    let shares_content = hunks
        .iter()
        .filter(|h| h.kind == DiffKind::Unchanged)
        .flat_map(|h| &h.items)
        .any(|t| !t.is_whitespace());

    let markers_stable = hunks
        .iter()
        .filter(|h| h.kind != DiffKind::Unchanged)
        .flat_map(|h| &h.items)
        .all(|t| !is_marker(t));

    shares_content && markers_stable
}
