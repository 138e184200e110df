//! Terminal Core Module
//!
//! Platform-independent terminal state. This module contains:
//! - Screen buffer with line-handle scrolling and change tracking
//! - Glyph representation with colours and attributes
//! - Cursor state and positioning
//! - Charset translation tables
//! - Deterministic snapshot generation

mod charset;
mod cursor;
mod geometry;
mod glyph;
mod modes;
mod screen;
mod snapshot;
mod width;

pub use charset::{Charset, CharsetSlots};
pub use cursor::{Cursor, CursorState};
pub use geometry::{Extent, Position};
pub use glyph::{CodePoint, Colour, Glyph, GlyphAttributes, GlyphStyle};
pub use modes::{MouseMode, TerminalModes};
pub use screen::Screen;
pub use snapshot::Snapshot;
pub use width::code_point_width;
