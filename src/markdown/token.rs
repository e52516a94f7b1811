//! Tokenizer: Split markdown text into diffable, wrappable pieces.
//!
//! Tokens are the unit of the word-level diff and the unit the annotator
//! wraps. The tokenizer never splits an inline construct (`**bold**`,
//! `*italic*`, `_emphasis_`, `~~strike~~`, `` `code` ``, `[text](url)`), so
//! a diff boundary can never fall inside one.
//!
//! Concatenating the tokens of a text always reproduces the text exactly.

use super::block::split_block_marker;
use regex::Regex;
use std::sync::LazyLock;

/// Whitespace runs, complete inline constructs, and table pipes.
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<ws>\s+)",
        r"|(?P<construct>",
        r"\*\*[^*\s](?:[^*\n]*[^*\s])?\*\*",
        r"|~~[^~\s](?:[^~\n]*[^~\s])?~~",
        r"|\*[^*\s](?:[^*\n]*[^*\s])?\*",
        r"|_[^_\s](?:[^_\n]*[^_\s])?_",
        r"|`[^`\n]+`",
        r"|\[[^\]\n]+\]\([^)\n]*\)",
        r")",
        r"|(?P<pipe>\|)",
    ))
    .expect("inline token pattern is valid")
});

/// Words that are pure markdown syntax and must never be wrapped.
static SYNTAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\||:?-+:|:-+|`{3,}[^`]*|~{3,}.*|[*_`~#>+-])$")
        .expect("syntax pattern is valid")
});

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of whitespace, newlines included.
    Whitespace,
    /// A line-leading block marker (`#`, `-`, `1.`, `>`, ...).
    Marker,
    /// A complete inline construct.
    Construct,
    /// Markdown syntax that carries no text (`|`, `---`, `*`, ...).
    Syntax,
    /// Anything else: a run of non-whitespace text.
    Word,
}

/// A slice of the source text with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token<'a> {
    /// Token class.
    pub kind: TokenKind,
    /// Source text.
    pub text: &'a str,
}

impl<'a> Token<'a> {
    /// Create a token.
    pub const fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    /// Check if this token is whitespace.
    pub const fn is_whitespace(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace)
    }

    /// Check if this token may appear inside a directive label.
    pub const fn is_wrappable(&self) -> bool {
        matches!(self.kind, TokenKind::Construct | TokenKind::Word)
    }
}

/// Check if a whitespace-free word is pure markdown syntax.
pub fn is_syntax(word: &str) -> bool {
    SYNTAX.is_match(word) || is_thematic_break(word)
}

/// `***`, `---`, `___` and longer runs.
fn is_thematic_break(word: &str) -> bool {
    let mut chars = word.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    matches!(first, '-' | '*' | '_') && word.len() >= 3 && chars.all(|c| c == first)
}

/// Tokenize `text`.
///
/// With `markers` set, a block marker at the start of each line is emitted
/// as a [`TokenKind::Marker`] token. Without it the text is treated as
/// inline content only, which is what a fragment taken from the middle of
/// a line needs.
pub fn tokenize(text: &str, markers: bool) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();

    for line in text.split_inclusive('\n') {
        let mut rest = line;

        if markers {
            if let Some(marker) = split_block_marker(line) {
                if !marker.indent.is_empty() {
                    tokens.push(Token::new(TokenKind::Whitespace, marker.indent));
                }
                tokens.push(Token::new(TokenKind::Marker, marker.symbol));
                if !marker.spacing.is_empty() {
                    tokens.push(Token::new(TokenKind::Whitespace, marker.spacing));
                }
                rest = marker.content;
            }
        }

        tokenize_inline(rest, &mut tokens);
    }

    tokens
}

/// Tokenize a piece of text with no block structure.
fn tokenize_inline<'a>(text: &'a str, tokens: &mut Vec<Token<'a>>) {
    let mut last = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };

        if whole.start() > last {
            push_word(&text[last..whole.start()], tokens);
        }

        let kind = if caps.name("ws").is_some() {
            TokenKind::Whitespace
        } else if caps.name("construct").is_some() {
            TokenKind::Construct
        } else {
            TokenKind::Syntax
        };
        tokens.push(Token::new(kind, whole.as_str()));
        last = whole.end();
    }

    if last < text.len() {
        push_word(&text[last..], tokens);
    }
}

fn push_word<'a>(word: &'a str, tokens: &mut Vec<Token<'a>>) {
    let kind = if is_syntax(word) {
        TokenKind::Syntax
    } else {
        TokenKind::Word
    };
    tokens.push(Token::new(kind, word));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str, markers: bool) -> Vec<(TokenKind, &str)> {
        tokenize(text, markers).into_iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_tokenize_words_and_spaces() {
        assert_eq!(
            kinds("Hello  world", false),
            vec![
                (TokenKind::Word, "Hello"),
                (TokenKind::Whitespace, "  "),
                (TokenKind::Word, "world"),
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_constructs_whole() {
        let tokens = kinds("a **full guide** to `cargo run` and [docs](https://x.y/z).", false);
        assert!(tokens.contains(&(TokenKind::Construct, "**full guide**")));
        assert!(tokens.contains(&(TokenKind::Construct, "`cargo run`")));
        assert!(tokens.contains(&(TokenKind::Construct, "[docs](https://x.y/z)")));
        assert!(tokens.contains(&(TokenKind::Word, ".")));
    }

    #[test]
    fn test_tokenize_emphasis_needs_flanking() {
        let tokens = kinds("2 * 3 * 4", false);
        assert!(tokens.iter().all(|(kind, _)| *kind != TokenKind::Construct));
        assert!(tokens.contains(&(TokenKind::Syntax, "*")));
    }

    #[test]
    fn test_tokenize_table_row() {
        assert_eq!(
            kinds("|a|:---:|", false),
            vec![
                (TokenKind::Syntax, "|"),
                (TokenKind::Word, "a"),
                (TokenKind::Syntax, "|"),
                (TokenKind::Syntax, ":---:"),
                (TokenKind::Syntax, "|"),
            ]
        );
    }

    #[test]
    fn test_tokenize_markers() {
        assert_eq!(
            kinds("  - item\n## Head", true),
            vec![
                (TokenKind::Whitespace, "  "),
                (TokenKind::Marker, "-"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "item"),
                (TokenKind::Whitespace, "\n"),
                (TokenKind::Marker, "##"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "Head"),
            ]
        );
        assert!(kinds("- item", false).iter().all(|(k, _)| *k != TokenKind::Marker));
    }

    #[test]
    fn test_tokenize_concatenation_exact() {
        let text = "# Title\n\n> **Note**: *a* _b_ ~~c~~ `d` [e](f)\n| x | y |\n1. one\r\n";
        let joined: String = tokenize(text, true).iter().map(|t| t.text).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_tokens_never_cross_lines() {
        for token in tokenize("**open\nclose** `a\nb`", true) {
            assert!(token.is_whitespace() || !token.text.contains('\n'));
        }
    }

    #[test]
    fn test_is_syntax() {
        for word in ["|", "---", "***", "___", ":--", "--:", ":-:", "```", "```rust", "*", "_", "`"] {
            assert!(is_syntax(word), "{word} should be syntax");
        }
        for word in ["word", "--flag", "a-b", "**", "1.", "https://x"] {
            assert!(!is_syntax(word), "{word} should not be syntax");
        }
    }
}
