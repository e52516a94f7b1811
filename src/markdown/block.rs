//! Block structure: Line-level markdown classification.
//!
//! - [`split_block_marker`]: Separate a heading, list, or quote marker from
//!   the line content
//! - [`FenceTracker`]: Follow fenced code blocks across lines

use regex::Regex;
use std::sync::LazyLock;

/// Headings, bullets, ordered items, and quotes at the start of a line.
static BLOCK_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?:(?P<symbol>#+|[*+-]|\d+\.)(?P<spacing>[ \t]+)|(?P<quote>>)(?P<quote_spacing>[ \t]*))",
    )
    .expect("block marker pattern is valid")
});

/// A line split around its block marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMarker<'a> {
    /// Leading spaces or tabs.
    pub indent: &'a str,
    /// The marker itself (`##`, `-`, `12.`, `>`).
    pub symbol: &'a str,
    /// Spaces or tabs after the marker.
    pub spacing: &'a str,
    /// Everything after the spacing, line terminator included.
    pub content: &'a str,
}

impl BlockMarker<'_> {
    /// Length in bytes of `indent + symbol + spacing`.
    pub const fn prefix_len(&self) -> usize {
        self.indent.len() + self.symbol.len() + self.spacing.len()
    }
}

/// Split a block marker off the start of `line`, if it has one.
pub fn split_block_marker(line: &str) -> Option<BlockMarker<'_>> {
    let caps = BLOCK_MARKER.captures(line)?;
    let indent = caps.name("indent").map_or("", |m| m.as_str());
    let (symbol, spacing) = match caps.name("symbol") {
        Some(symbol) => (symbol.as_str(), caps.name("spacing").map_or("", |m| m.as_str())),
        None => (
            caps.name("quote")?.as_str(),
            caps.name("quote_spacing").map_or("", |m| m.as_str()),
        ),
    };
    let end = caps.get(0)?.end();

    Some(BlockMarker {
        indent,
        symbol,
        spacing,
        content: &line[end..],
    })
}

/// Role of a line with respect to fenced code blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Ordinary markdown.
    Text,
    /// An opening or closing fence delimiter.
    Fence,
    /// A line inside a fenced block.
    Code,
}

/// An open fence: delimiter character and run length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenFence {
    ch: char,
    len: usize,
}

/// Tracks fenced code blocks over a sequence of lines.
///
/// A fence opens on a line starting (after indentation) with three or more
/// backticks or tildes, and closes on a bare run of the same character at
/// least as long. An unclosed fence runs to the end of the text, which is
/// the normal state of a document still being generated.
#[derive(Debug, Clone, Copy, Default)]
pub struct FenceTracker {
    open: Option<OpenFence>,
}

impl FenceTracker {
    /// Create a tracker outside of any fence.
    pub const fn new() -> Self {
        Self { open: None }
    }

    /// Check if a fence is currently open.
    pub const fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Classify `line` and advance past it.
    pub fn observe(&mut self, line: &str) -> LineRole {
        let trimmed = line.trim_start();
        let run = fence_run(trimmed);

        match (self.open, run) {
            (None, Some(fence)) => {
                self.open = Some(fence);
                LineRole::Fence
            }
            (Some(open), Some(fence))
                if fence.ch == open.ch
                    && fence.len >= open.len
                    && trimmed[fence.len..].trim().is_empty() =>
            {
                self.open = None;
                LineRole::Fence
            }
            (Some(_), _) => LineRole::Code,
            (None, None) => LineRole::Text,
        }
    }
}

/// Leading fence run of an already left-trimmed line.
fn fence_run(trimmed: &str) -> Option<OpenFence> {
    let ch = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let len = trimmed.len() - trimmed.trim_start_matches(ch).len();
    if len < 3 {
        return None;
    }
    // An info string after backticks may not contain backticks.
    if ch == '`' && trimmed[len..].contains('`') {
        return None;
    }
    Some(OpenFence { ch, len })
}
