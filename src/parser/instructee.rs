//! Instruction sink
//!
//! The decoder reports every recognised unit of input by calling one method
//! of an [`Instructee`]. [`crate::Terminal`] is the real implementation;
//! tests substitute a recorder.

use crate::core::{Charset, CodePoint, Colour, MouseMode, Position, TerminalModes};

/// Direction of a relative cursor movement (`CSI A` .. `CSI D`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Forward,
    Back,
}

/// Receiver of decoded terminal instructions.
///
/// Every method defaults to doing nothing, so a sink only has to implement
/// the instructions it cares about. Counts and coordinates are passed as
/// decoded and may be out of range for the receiving screen; implementors
/// clamp them.
#[allow(unused_variables)]
pub trait Instructee {
    /// Print a code point at the cursor
    fn write_char(&mut self, code: CodePoint) {}

    /// `\n`, `\v` and `\f`
    fn line_feed(&mut self) {}

    fn carriage_return(&mut self) {}

    fn backspace(&mut self) {}

    /// `\t`
    fn tab(&mut self) {}

    /// `ESC M`: move up one row, scrolling down at the top
    fn reverse_line_feed(&mut self) {}

    /// Locking shift: make `slot` the active charset slot
    fn use_charset_table(&mut self, slot: usize) {}

    /// Designate `charset` into `slot`
    fn set_charset_table(&mut self, slot: usize, charset: Charset) {}

    /// `CSI 0 J`
    fn clear_to_bottom(&mut self) {}
    /// `CSI 1 J`
    fn clear_from_top(&mut self) {}
    /// `CSI 2 J`
    fn clear_screen(&mut self) {}
    /// `CSI 0 K`
    fn clear_to_end(&mut self) {}
    /// `CSI 1 K`
    fn clear_from_begin(&mut self) {}
    /// `CSI 2 K`
    fn clear_line(&mut self) {}

    /// Absolute move, zero-based
    fn position_cursor(&mut self, pos: Position) {}

    /// Zero-based column on the current row
    fn move_to_column(&mut self, column: i32) {}

    /// Zero-based row in the current column
    fn move_to_row(&mut self, row: i32) {}

    fn move_cursor(&mut self, count: i32, direction: Direction) {}

    /// `CSI h` (`set == true`) or `CSI l`
    fn change_mode_bits(&mut self, set: bool, mode: TerminalModes) {}

    fn delete_chars(&mut self, count: i32) {}
    fn erase_chars(&mut self, count: i32) {}
    fn delete_lines(&mut self, count: i32) {}
    fn insert_blanks(&mut self, count: i32) {}
    fn insert_newline(&mut self, count: i32) {}

    /// SGR 0
    fn reset_style(&mut self) {}
    fn set_foreground(&mut self, colour: Colour) {}
    fn set_background(&mut self, colour: Colour) {}
    /// SGR 39
    fn default_foreground(&mut self) {}
    /// SGR 49
    fn default_background(&mut self) {}
    fn set_bold(&mut self, enable: bool) {}
    fn set_reversed(&mut self, enable: bool) {}

    /// Enable `mode`, or turn mouse reporting off when `set` is false.
    ///
    /// Not produced by the decoder: mouse modes are private CSI sequences,
    /// which are consumed without effect. Hosts call this directly.
    fn set_mouse_mode(&mut self, mode: MouseMode, set: bool) {}

    fn set_mouse_mode_extended(&mut self, set: bool) {}
}
