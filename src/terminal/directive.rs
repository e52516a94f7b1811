//! Directive parser: Split annotated text back into plain and marked runs.

const ADD_OPEN: &str = ":add[";
const DEL_OPEN: &str = ":del[";

/// Kind of an annotated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Text outside any directive.
    Plain,
    /// Label of an `:add[...]` directive.
    Added,
    /// Label of a `:del[...]` directive.
    Deleted,
}

/// A run of annotated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Run kind.
    pub kind: SegmentKind,
    /// Directive label, or the plain text itself.
    pub text: &'a str,
}

impl<'a> Segment<'a> {
    const fn new(kind: SegmentKind, text: &'a str) -> Self {
        Self { kind, text }
    }
}

/// Parse annotated text into segments.
///
/// Brackets inside a label are matched by depth, so `:add[[docs](url)]`
/// yields the label `[docs](url)`. A directive with no closing bracket on
/// its line is left as plain text.
pub fn parse_directives(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut search = 0;

    while let Some(offset) = text[search..].find(':') {
        let at = search + offset;
        let rest = &text[at..];

        let directive = [(ADD_OPEN, SegmentKind::Added), (DEL_OPEN, SegmentKind::Deleted)]
            .into_iter()
            .find_map(|(open, kind)| {
                let body = rest.strip_prefix(open)?;
                label_end(body).map(|end| (kind, open.len(), end))
            });

        let Some((kind, open_len, end)) = directive else {
            search = at + 1;
            continue;
        };

        if at > plain_start {
            segments.push(Segment::new(SegmentKind::Plain, &text[plain_start..at]));
        }
        let label_start = at + open_len;
        segments.push(Segment::new(kind, &text[label_start..label_start + end]));

        search = label_start + end + 1;
        plain_start = search;
    }

    if plain_start < text.len() {
        segments.push(Segment::new(SegmentKind::Plain, &text[plain_start..]));
    }
    segments
}

/// Byte offset of the bracket closing a label.
fn label_end(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, byte) in body.bytes().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' if depth == 0 => return Some(i),
            b']' => depth -= 1,
            b'\n' => return None,
            _ => {}
        }
    }
    None
}

/// Remove directive markup, keeping every label.
pub fn strip_directives(text: &str) -> String {
    parse_directives(text).into_iter().map(|s| s.text).collect()
}
