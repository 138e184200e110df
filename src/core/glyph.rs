//! Glyph cells
//!
//! A glyph is one cell of the screen: a code point plus the style it was
//! written with. Colours are stored as concrete RGB so a renderer never has
//! to consult terminal state to draw a cell.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// A Unicode scalar value as received from the byte stream (0 = empty cell)
pub type CodePoint = u32;

/// 24-bit colour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The 16 base SGR colours (30-37, 90-97 and their background forms)
    pub const PALETTE: [Colour; 16] = [
        Colour::new(0, 0, 0),       // black
        Colour::new(177, 22, 22),   // red
        Colour::new(17, 154, 18),   // green
        Colour::new(198, 195, 13),  // yellow
        Colour::new(12, 8, 140),    // blue
        Colour::new(117, 24, 145),  // magenta
        Colour::new(37, 106, 119),  // cyan
        Colour::new(200, 200, 200), // white
        Colour::new(127, 127, 127), // bright black
        Colour::new(248, 24, 24),   // bright red
        Colour::new(18, 237, 18),   // bright green
        Colour::new(233, 237, 18),  // bright yellow
        Colour::new(52, 22, 247),   // bright blue
        Colour::new(207, 23, 214),  // bright magenta
        Colour::new(23, 214, 207),  // bright cyan
        Colour::new(255, 255, 255), // bright white
    ];

    /// Resolve a 256-colour index (`38;5;n` / `48;5;n`)
    pub fn from_index(index: u8) -> Self {
        const CUBE_STEPS: [u8; 6] = [0x00, 0x5f, 0x87, 0xaf, 0xd7, 0xff];

        match index {
            0..=15 => Self::PALETTE[index as usize],
            16..=231 => {
                let n = (index - 16) as usize;
                Self::new(CUBE_STEPS[n / 36], CUBE_STEPS[(n % 36) / 6], CUBE_STEPS[n % 6])
            }
            232..=255 => {
                let grey = 8 + 10 * (index - 232);
                Self::new(grey, grey, grey)
            }
        }
    }
}

bitflags! {
    /// Per-glyph attribute bits
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct GlyphAttributes: u8 {
        /// The row continues on the next line (soft wrap)
        const WRAPS = 1 << 0;
        /// First cell of a double-width character
        const WIDE = 1 << 1;
        /// Placeholder cell covered by the preceding wide character
        const WIDE_DUMMY = 1 << 2;
        const REVERSED = 1 << 3;
        const BOLD = 1 << 4;
    }
}

/// Colours and attributes applied to a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphStyle {
    pub fg: Colour,
    pub bg: Colour,
    pub attrs: GlyphAttributes,
}

impl GlyphStyle {
    pub const DEFAULT_FOREGROUND: Colour = Colour::new(255, 255, 255);
    pub const DEFAULT_BACKGROUND: Colour = Colour::new(0, 0, 0);

    pub const fn new(fg: Colour, bg: Colour) -> Self {
        Self {
            fg,
            bg,
            attrs: GlyphAttributes::empty(),
        }
    }

    /// Same colours, no attributes. Used for blank fill.
    pub fn blank(self) -> Self {
        Self::new(self.fg, self.bg)
    }
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FOREGROUND, Self::DEFAULT_BACKGROUND)
    }
}

/// One screen cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Glyph {
    pub style: GlyphStyle,
    pub code: CodePoint,
}

impl Glyph {
    pub const fn new(code: CodePoint, style: GlyphStyle) -> Self {
        Self { style, code }
    }

    /// An empty cell carrying only the colours of `style`
    pub fn blank(style: GlyphStyle) -> Self {
        Self {
            style: style.blank(),
            code: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.code == 0
    }

    pub fn is_wide(&self) -> bool {
        self.style.attrs.contains(GlyphAttributes::WIDE)
    }

    pub fn is_wide_dummy(&self) -> bool {
        self.style.attrs.contains(GlyphAttributes::WIDE_DUMMY)
    }

    pub fn wraps(&self) -> bool {
        self.style.attrs.contains(GlyphAttributes::WRAPS)
    }

    /// The cell content as a `char`, if it holds a valid scalar value
    pub fn as_char(&self) -> Option<char> {
        if self.code == 0 {
            return None;
        }
        char::from_u32(self.code)
    }
}
