//! Markdown module: The slice of markdown structure the differ respects.
//!
//! This is not a markdown parser. It recognizes just enough structure to
//! keep annotations from breaking rendering:
//! - [`tokenize`]: Words, whitespace, and unsplittable inline constructs
//! - [`split_block_marker`]: Line-leading heading, list, and quote markers
//! - [`FenceTracker`]: Fenced code block boundaries

mod block;
mod token;

pub use block::{split_block_marker, BlockMarker, FenceTracker, LineRole};
pub use token::{is_syntax, tokenize, Token, TokenKind};
