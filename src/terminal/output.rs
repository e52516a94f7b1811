//! Output: Write annotated text to a terminal with styled spans.

use super::directive::{parse_directives, SegmentKind};
use super::style::{DiffPalette, Modifiers, SpanStyle};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const ATTRIBUTES: [(Modifiers, Attribute); 6] = [
    (Modifiers::BOLD, Attribute::Bold),
    (Modifiers::DIM, Attribute::Dim),
    (Modifiers::ITALIC, Attribute::Italic),
    (Modifiers::UNDERLINE, Attribute::Underlined),
    (Modifiers::REVERSED, Attribute::Reverse),
    (Modifiers::STRIKETHROUGH, Attribute::CrossedOut),
];

/// Write `text`, rendering each directive label in its palette style.
///
/// Commands are queued; the caller flushes. Attributes are reset after
/// every styled span so plain text is never affected.
pub fn write_annotated<W: Write>(writer: &mut W, text: &str, palette: &DiffPalette) -> io::Result<()> {
    for segment in parse_directives(text) {
        match segment.kind {
            SegmentKind::Plain => queue!(writer, Print(segment.text))?,
            SegmentKind::Added => write_styled(writer, segment.text, &palette.added)?,
            SegmentKind::Deleted => write_styled(writer, segment.text, &palette.deleted)?,
        }
    }
    Ok(())
}

fn write_styled<W: Write>(writer: &mut W, text: &str, style: &SpanStyle) -> io::Result<()> {
    queue!(writer, SetForegroundColor(style.fg.into()))?;
    for (modifier, attribute) in ATTRIBUTES {
        if style.modifiers.contains(modifier) {
            queue!(writer, SetAttribute(attribute))?;
        }
    }
    queue!(
        writer,
        Print(text),
        SetAttribute(Attribute::Reset),
        ResetColor
    )
}

/// Render annotated text to a string of ANSI escape sequences.
pub fn render_annotated(text: &str, palette: &DiffPalette) -> String {
    let mut buf = Vec::with_capacity(text.len() * 2);
    // Writes into a Vec cannot fail.
    if write_annotated(&mut buf, text, palette).is_err() {
        return text.to_owned();
    }
    String::from_utf8_lossy(&buf).into_owned()
}
