//! Line rules: How a whole inserted or deleted line is wrapped.

use super::writer::SpanWriter;
use crate::diff::DiffKind;
use crate::markdown::{split_block_marker, tokenize, LineRole, Token, TokenKind};

/// Write one line (terminator included) entirely as `kind`.
pub(crate) fn annotate_line(out: &mut SpanWriter, kind: DiffKind, line: &str, role: LineRole) {
    if line.trim().is_empty() {
        out.text(line);
        return;
    }

    match role {
        LineRole::Fence => out.text(line),
        LineRole::Code => out.push(kind, line),
        LineRole::Text => match split_block_marker(line) {
            Some(marker) => {
                out.text(&line[..marker.prefix_len()]);
                annotate_block_content(out, kind, marker.content);
            }
            None => render_tokens(out, kind, &tokenize(line, false)),
        },
    }
}

/// Content after a block marker is wrapped as one span, unless it is only
/// syntax (`* * *`, `- ---`).
fn annotate_block_content(out: &mut SpanWriter, kind: DiffKind, content: &str) {
    let tokens = tokenize(content, false);
    if tokens.iter().any(Token::is_wrappable) {
        out.push(kind, content);
    } else {
        out.text(content);
    }
}

/// Write a token run as `kind`, one directive per whitespace-delimited
/// chunk. Whitespace (newlines included) stays outside every directive.
pub(crate) fn render_tokens(out: &mut SpanWriter, kind: DiffKind, tokens: &[Token<'_>]) {
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].is_whitespace() {
            out.text(tokens[i].text);
            i += 1;
            continue;
        }

        let start = i;
        while i < tokens.len() && !tokens[i].is_whitespace() {
            i += 1;
        }
        render_chunk(out, kind, &tokens[start..i]);
    }
}

/// Syntax at either edge of a chunk stays outside the directive; a chunk of
/// pure syntax is written as is.
fn render_chunk(out: &mut SpanWriter, kind: DiffKind, chunk: &[Token<'_>]) {
    let lead = chunk.iter().take_while(|t| !t.is_wrappable()).count();
    if lead == chunk.len() {
        chunk.iter().for_each(|t| out.text(t.text));
        return;
    }
    let trail = chunk[lead..].iter().rev().take_while(|t| !t.is_wrappable()).count();
    let (head, rest) = chunk.split_at(lead);
    let (middle, tail) = rest.split_at(rest.len() - trail);

    head.iter().for_each(|t| out.text(t.text));
    let label: String = middle.iter().map(|t| t.text).collect();
    out.push(kind, &label);
    tail.iter().for_each(|t| out.text(t.text));
}

/// Whether a token is a line-leading block marker.
pub(crate) const fn is_marker(token: &Token<'_>) -> bool {
    matches!(token.kind, TokenKind::Marker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: DiffKind, text: &str, role: LineRole) -> String {
        let mut out = SpanWriter::default();
        annotate_line(&mut out, kind, text, role);
        out.finish()
    }

    fn added(text: &str) -> String {
        line(DiffKind::Inserted, text, LineRole::Text)
    }

    #[test]
    fn test_line_plain_words() {
        assert_eq!(added("Hello world\n"), ":add[Hello] :add[world]\n");
    }

    #[test]
    fn test_line_block_markers() {
        assert_eq!(added("## Getting started\n"), "## :add[Getting started]\n");
        assert_eq!(added("  - item one"), "  - :add[item one]");
        assert_eq!(added("3. step"), "3. :add[step]");
        assert_eq!(added("> quote"), "> :add[quote]");
        assert_eq!(added("* * *"), "* * *");
    }

    #[test]
    fn test_line_constructs_intact() {
        assert_eq!(
            added("see **bold text** and `a b`"),
            ":add[see] :add[**bold text**] :add[and] :add[`a b`]"
        );
        assert_eq!(added("[the docs](https://x.y)."), ":add[[the docs](https://x.y).]");
    }

    #[test]
    fn test_line_table_syntax_outside() {
        assert_eq!(added("| a | b |\n"), "| :add[a] | :add[b] |\n");
        assert_eq!(added("|---|:--:|\n"), "|---|:--:|\n");
        assert_eq!(added("|cell|"), "|:add[cell]|");
    }

    #[test]
    fn test_line_fence_and_code() {
        assert_eq!(line(DiffKind::Inserted, "```rust\n", LineRole::Fence), "```rust\n");
        assert_eq!(
            line(DiffKind::Deleted, "    let x = 1;\n", LineRole::Code),
            "    :del[let x = 1;]\n"
        );
    }

    #[test]
    fn test_line_blank_verbatim() {
        assert_eq!(added("   \n"), "   \n");
        assert_eq!(added(""), "");
    }
}
