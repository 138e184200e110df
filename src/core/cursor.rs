//! Cursor state management
//!
//! The cursor tracks position, the style applied to newly written glyphs,
//! and the deferred-wrap flag.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::geometry::{Extent, Position};
use super::glyph::GlyphStyle;

bitflags! {
    /// Cursor state bits
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CursorState: u8 {
        /// The cursor sits on the last column and the next write starts a new line
        const WRAP_PENDING = 1 << 0;
    }
}

/// Cursor state including position and current write style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Style applied to new glyphs
    pub style: GlyphStyle,
    pub state: CursorState,
    pub pos: Position,
}

impl Cursor {
    pub fn new(style: GlyphStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    /// Move to `pos` clamped into `size`, dropping any pending wrap
    pub fn move_to(&mut self, pos: Position, size: Extent) {
        self.pos = pos.clamp_to(size);
        self.state.remove(CursorState::WRAP_PENDING);
    }

    pub fn is_wrap_pending(&self) -> bool {
        self.state.contains(CursorState::WRAP_PENDING)
    }

    pub fn set_wrap_pending(&mut self, pending: bool) {
        self.state.set(CursorState::WRAP_PENDING, pending);
    }
}
