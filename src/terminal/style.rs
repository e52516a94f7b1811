//! Style: Colors and modifiers for annotated output.

use bitflags::bitflags;

/// True-color RGB value.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create from a 24-bit hex color (e.g., 0x22C55E).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for crossterm::style::Color {
    fn from(rgb: Rgb) -> Self {
        Self::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

bitflags! {
    /// Text style modifiers, combined with bitwise OR.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Italic text
        const ITALIC = 0b0000_0100;
        /// Underlined text
        const UNDERLINE = 0b0000_1000;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0010_0000;
        /// Strikethrough text
        const STRIKETHROUGH = 0b1000_0000;
    }
}

impl std::fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// Style of one kind of span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanStyle {
    /// Foreground color.
    pub fg: Rgb,
    /// Modifiers applied on top of the color.
    pub modifiers: Modifiers,
}

impl SpanStyle {
    /// Create a style.
    pub const fn new(fg: Rgb, modifiers: Modifiers) -> Self {
        Self { fg, modifiers }
    }
}

/// Styles for added and deleted spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffPalette {
    /// Style of `:add[...]` labels.
    pub added: SpanStyle,
    /// Style of `:del[...]` labels.
    pub deleted: SpanStyle,
}

impl DiffPalette {
    /// Green insertions, red struck-through deletions.
    pub const DEFAULT: Self = Self {
        added: SpanStyle::new(Rgb::from_u32(0x22C5_5E), Modifiers::empty()),
        deleted: SpanStyle::new(Rgb::from_u32(0xEF44_44), Modifiers::STRIKETHROUGH),
    };

    /// Palette that also works on terminals without strikethrough.
    pub const HIGH_CONTRAST: Self = Self {
        added: SpanStyle::new(Rgb::from_u32(0x4A_DE80), Modifiers::BOLD),
        deleted: SpanStyle::new(
            Rgb::from_u32(0xF8_7171),
            Modifiers::STRIKETHROUGH.union(Modifiers::DIM),
        ),
    };
}

impl Default for DiffPalette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
