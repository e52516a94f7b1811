//! Terminal module: Preview annotated documents in a terminal.
//!
//! This module contains:
//! - [`parse_directives`]: Split annotated text into plain and marked runs
//! - [`DiffPalette`]: Colors and modifiers per span kind
//! - [`write_annotated`]: Styled output through crossterm commands

mod directive;
mod output;
mod style;

pub use directive::{parse_directives, strip_directives, Segment, SegmentKind};
pub use output::{render_annotated, write_annotated};
pub use style::{DiffPalette, Modifiers, Rgb, SpanStyle};
