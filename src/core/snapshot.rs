//! Deterministic snapshot generation
//!
//! Snapshots capture the terminal state in a serializable format for
//! testing and debugging. Given the same byte stream, however it is
//! chunked, the terminal must produce identical snapshots.

use serde::{Deserialize, Serialize};

use super::glyph::{Colour, GlyphAttributes, GlyphStyle};
use super::modes::{MouseMode, TerminalModes};
use crate::Terminal;

/// A snapshot of the terminal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Screen dimensions
    pub cols: i32,
    pub rows: i32,
    /// Plain text of each row
    pub lines: Vec<String>,
    pub cursor: CursorSnapshot,
    pub modes: ModesSnapshot,
    /// Active charset slot (0-3)
    pub charset_slot: usize,
    /// Rows changed since the last flush
    pub changed_lines: Vec<usize>,
    /// Net scroll since the last flush
    pub scroll_change: i32,
}

/// Snapshot of cursor state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorSnapshot {
    pub col: i32,
    pub row: i32,
    #[serde(default, skip_serializing_if = "is_false")]
    pub wrap_pending: bool,
    pub fg: Colour,
    pub bg: Colour,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reversed: bool,
}

/// Snapshot of terminal modes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesSnapshot {
    #[serde(default, skip_serializing_if = "is_false")]
    pub insert: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub extended_mouse: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bracketed_paste: bool,
    pub mouse_tracking: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl ModesSnapshot {
    fn new(modes: TerminalModes, mouse: MouseMode) -> Self {
        ModesSnapshot {
            insert: modes.contains(TerminalModes::INSERT),
            extended_mouse: modes.contains(TerminalModes::EXTENDED_MOUSE),
            bracketed_paste: modes.contains(TerminalModes::BRACKETED_PASTE),
            mouse_tracking: match mouse {
                MouseMode::None => "none",
                MouseMode::X10 => "x10",
                MouseMode::Button => "button",
                MouseMode::Motion => "motion",
                MouseMode::Many => "many",
            }
            .to_string(),
        }
    }
}

impl CursorSnapshot {
    fn new(col: i32, row: i32, wrap_pending: bool, style: GlyphStyle) -> Self {
        CursorSnapshot {
            col,
            row,
            wrap_pending,
            fg: style.fg,
            bg: style.bg,
            bold: style.attrs.contains(GlyphAttributes::BOLD),
            reversed: style.attrs.contains(GlyphAttributes::REVERSED),
        }
    }
}

impl Snapshot {
    /// Capture the current state of `term`
    pub fn from_terminal(term: &Terminal) -> Self {
        let screen = term.screen();
        let size = screen.size();
        let cursor = term.cursor();

        Snapshot {
            cols: size.width,
            rows: size.height,
            lines: (0..size.height as usize)
                .map(|row| screen.row_text(row))
                .collect(),
            cursor: CursorSnapshot::new(
                cursor.pos.x,
                cursor.pos.y,
                cursor.is_wrap_pending(),
                cursor.style,
            ),
            modes: ModesSnapshot::new(term.modes(), term.mouse_mode()),
            charset_slot: term.charsets().active_slot(),
            changed_lines: screen.changed_lines().collect(),
            scroll_change: screen.changed_scroll(),
        }
    }

    /// Convert snapshot to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse snapshot from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rows joined with newlines, trailing blanks trimmed
    pub fn to_text(&self) -> String {
        let mut result = String::new();
        for line in &self.lines {
            result.push_str(line.trim_end());
            result.push('\n');
        }
        while result.ends_with("\n\n") {
            result.pop();
        }
        result
    }
}
