//! Terminal state machine
//!
//! Owns the screen buffer, cursor, modes and charset slots, and applies
//! decoded instructions to them. [`Terminal`] is itself the
//! [`Instructee`] its decoder reports to, so there is no separate dispatch
//! layer.
//!
//! Every coordinate and count arriving here may be negative or absurdly
//! large. Each operation clamps before touching the screen, and the cursor
//! is inside the screen whenever a public method returns.

use std::mem;

use tracing::{debug, trace};

use crate::config::TerminalConfig;
use crate::core::{
    code_point_width, Charset, CharsetSlots, CodePoint, Colour, Cursor, Extent, Glyph,
    GlyphAttributes, GlyphStyle, MouseMode, Position, Screen, TerminalModes,
};
use crate::error::Result;
use crate::parser::{Decoder, Direction, Instructee};

/// A terminal emulator instance
#[derive(Debug, Clone)]
pub struct Terminal {
    screen: Screen,
    cursor: Cursor,
    modes: TerminalModes,
    mouse: MouseMode,
    charsets: CharsetSlots,
    /// Style restored by `reset_style`
    default_style: GlyphStyle,
    tab_width: i32,
    decoder: Decoder,
}

impl Terminal {
    /// Create a terminal with default settings
    pub fn new(size: Extent) -> Result<Self> {
        Self::with_config(&TerminalConfig::with_extent(size))
    }

    pub fn with_config(config: &TerminalConfig) -> Result<Self> {
        let default_style = config.default_style();
        let screen = Screen::new(config.extent(), Glyph::blank(default_style))?;

        debug!(
            columns = config.columns,
            rows = config.rows,
            "terminal created"
        );

        Ok(Self {
            screen,
            cursor: Cursor::new(default_style),
            modes: TerminalModes::default(),
            mouse: MouseMode::default(),
            charsets: CharsetSlots::new(),
            default_style,
            tab_width: config.tab_width(),
            decoder: Decoder::new(),
        })
    }

    /// Decode `data` and apply it. Input may be split at any byte.
    pub fn process_bytes(&mut self, data: &[u8]) {
        let mut decoder = mem::take(&mut self.decoder);
        decoder.decode(data, self);
        self.decoder = decoder;
    }

    pub fn size(&self) -> Extent {
        self.screen.size()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn modes(&self) -> TerminalModes {
        self.modes
    }

    pub fn mouse_mode(&self) -> MouseMode {
        self.mouse
    }

    pub fn charsets(&self) -> &CharsetSlots {
        &self.charsets
    }

    pub fn default_style(&self) -> GlyphStyle {
        self.default_style
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Flush change tracking. Call once per rendered frame.
    pub fn clear_changes(&mut self) {
        self.screen.clear_changes();
    }

    /// Screen contents as text, one line per row
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for row in 0..self.size().height as usize {
            out.push_str(&self.screen.row_text(row));
            out.push('\n');
        }
        out
    }

    /// Move the cursor to `pos` clamped into the screen
    pub fn move_cursor_to(&mut self, pos: Position) {
        self.cursor.move_to(pos, self.screen.size());
    }

    /// Advance one row, scrolling at the bottom
    pub fn newline(&mut self, first_column: bool) {
        let mut pos = self.cursor.pos;
        if pos.y + 1 >= self.size().height {
            self.scroll_up(0, 1);
        } else {
            pos.y += 1;
        }
        if first_column {
            pos.x = 0;
        }
        self.move_cursor_to(pos);
    }

    /// Scroll rows `[keep_top, height)` up by `count`
    pub fn scroll_up(&mut self, keep_top: i32, count: i32) {
        let height = self.size().height;
        let keep_top = keep_top.clamp(0, height);
        let count = count.clamp(0, height - keep_top);
        if count == 0 {
            return;
        }

        self.screen.rotate_up(keep_top as usize, count as usize);
        let blank = self.blank();
        self.screen
            .fill_rows((height - count) as usize..height as usize, blank);
        self.track_scroll(keep_top, count);
    }

    /// Scroll rows `[keep_top, height)` down by `count`
    pub fn scroll_down(&mut self, keep_top: i32, count: i32) {
        let height = self.size().height;
        let keep_top = keep_top.clamp(0, height);
        let count = count.clamp(0, height - keep_top);
        if count == 0 {
            return;
        }

        self.screen.rotate_down(keep_top as usize, count as usize);
        let blank = self.blank();
        self.screen
            .fill_rows(keep_top as usize..(keep_top + count) as usize, blank);
        self.track_scroll(keep_top, -count);
    }

    /// Record a scroll of `delta` rows below `keep_top`. When most of the
    /// screen moved, a renderer can shift by the scroll delta and redraw
    /// only the fixed top rows; otherwise the moved region is redrawn.
    fn track_scroll(&mut self, keep_top: i32, delta: i32) {
        let height = self.size().height;
        if keep_top < height / 2 {
            self.screen.move_scroll(delta);
            self.screen.mark_dirty(0, keep_top);
        } else {
            self.screen.mark_dirty(keep_top, height);
        }
    }

    /// Blank the cells from `start` to `end` inclusive, in reading order
    pub fn clear(&mut self, start: Position, end: Position) {
        let size = self.size();
        let start = start.clamp_to(size);
        let end = end.clamp_to(size);
        if start.linear(size) > end.linear(size) {
            return;
        }

        let blank = self.blank();
        for y in start.y..=end.y {
            let first = if y == start.y { start.x } else { 0 };
            let last = if y == end.y { end.x } else { size.width - 1 };
            self.break_wide_pair(y, first);
            self.break_wide_pair(y, last + 1);
            if let Some(line) = self.screen.get_line_mut(y as usize) {
                line[first as usize..=last as usize].fill(blank);
            }
        }
        self.screen.mark_dirty(start.y, end.y + 1);
    }

    fn blank(&self) -> Glyph {
        Glyph::blank(self.cursor.style)
    }

    /// Blank both halves of a wide glyph that straddles the boundary
    /// between columns `x - 1` and `x` of row `y`
    fn break_wide_pair(&mut self, y: i32, x: i32) {
        let blank = self.blank();
        let Some(line) = self.screen.get_line_mut(y as usize) else {
            return;
        };
        let Ok(x) = usize::try_from(x) else {
            return;
        };
        if x == 0 || x >= line.len() {
            return;
        }
        if line[x - 1].is_wide() {
            line[x - 1] = blank;
        }
        if line[x].is_wide_dummy() {
            line[x] = blank;
        }
    }

    /// Shift the cursor row right of the cursor by up to `count` cells,
    /// dropping what falls off the end. Returns the clamped count.
    fn shift_right(&mut self, count: i32) -> i32 {
        let width = self.size().width;
        let Position { x, y } = self.cursor.pos;
        let count = count.clamp(0, width - x);
        if count == 0 {
            return 0;
        }

        self.break_wide_pair(y, x);
        self.break_wide_pair(y, width - count);
        if let Some(line) = self.screen.get_line_mut(y as usize) {
            line.copy_within(x as usize..(width - count) as usize, (x + count) as usize);
        }
        self.screen.mark_dirty(y, y + 1);
        count
    }
}

impl PartialEq for Terminal {
    /// Compares visible state: glyph grid, cursor, modes and charsets.
    /// Change tracking and decoder state are ignored.
    fn eq(&self, other: &Self) -> bool {
        let size = self.size();
        size == other.size()
            && self.cursor == other.cursor
            && self.modes == other.modes
            && self.mouse == other.mouse
            && self.charsets == other.charsets
            && self.default_style == other.default_style
            && self.tab_width == other.tab_width
            && (0..size.height as usize)
                .all(|row| self.screen.get_line(row) == other.screen.get_line(row))
    }
}

impl Eq for Terminal {}

impl Instructee for Terminal {
    fn write_char(&mut self, code: CodePoint) {
        let width = code_point_width(code);
        if width < 0 {
            trace!(code, "unprintable code point dropped");
            return;
        }
        // Combining marks are not stored
        if width == 0 {
            trace!(code, "zero-width code point dropped");
            return;
        }

        if self.cursor.is_wrap_pending() {
            if let Some(glyph) = self.screen.get_glyph_mut(self.cursor.pos) {
                glyph.style.attrs.insert(GlyphAttributes::WRAPS);
            }
            self.newline(true);
        }

        if self.modes.contains(TerminalModes::INSERT) {
            self.shift_right(width);
        }

        let size = self.size();
        if self.cursor.pos.x + width > size.width {
            self.newline(true);
        }

        let code = self.charsets.translate(code);
        let pos = self.cursor.pos;
        self.break_wide_pair(pos.y, pos.x);
        self.break_wide_pair(pos.y, pos.x + width);
        let mut style = self.cursor.style;
        if width == 2 {
            style.attrs.insert(GlyphAttributes::WIDE);
        }

        if let Some(glyph) = self.screen.get_glyph_mut(pos) {
            *glyph = Glyph::new(code, style);
        }
        if width == 2 {
            let mut dummy = Glyph::blank(self.cursor.style);
            dummy.style.attrs.insert(GlyphAttributes::WIDE_DUMMY);
            if let Some(glyph) = self.screen.get_glyph_mut(Position::new(pos.x + 1, pos.y)) {
                *glyph = dummy;
            }
        }
        self.screen.mark_dirty(pos.y, pos.y + 1);

        if pos.x + width >= size.width {
            self.cursor.set_wrap_pending(true);
        } else {
            self.cursor.pos.x += width;
        }
    }

    fn line_feed(&mut self) {
        self.newline(false);
    }

    fn carriage_return(&mut self) {
        self.move_cursor_to(Position::new(0, self.cursor.pos.y));
    }

    fn backspace(&mut self) {
        let pos = self.cursor.pos;
        self.move_cursor_to(Position::new(pos.x.saturating_sub(1), pos.y));
    }

    fn tab(&mut self) {
        let pos = self.cursor.pos;
        let next = (pos.x / self.tab_width).saturating_add(1).saturating_mul(self.tab_width);
        self.move_cursor_to(Position::new(next, pos.y));
    }

    fn reverse_line_feed(&mut self) {
        let pos = self.cursor.pos;
        if pos.y == 0 {
            self.scroll_down(0, 1);
        } else {
            self.move_cursor_to(Position::new(pos.x, pos.y - 1));
        }
    }

    fn use_charset_table(&mut self, slot: usize) {
        self.charsets.use_slot(slot);
    }

    fn set_charset_table(&mut self, slot: usize, charset: Charset) {
        self.charsets.set(slot, charset);
    }

    fn clear_to_bottom(&mut self) {
        let last = self.size().last();
        self.clear(self.cursor.pos, last);
    }

    fn clear_from_top(&mut self) {
        self.clear(Position::new(0, 0), self.cursor.pos);
    }

    fn clear_screen(&mut self) {
        let last = self.size().last();
        self.clear(Position::new(0, 0), last);
    }

    fn clear_to_end(&mut self) {
        let pos = self.cursor.pos;
        self.clear(pos, Position::new(self.size().width - 1, pos.y));
    }

    fn clear_from_begin(&mut self) {
        let pos = self.cursor.pos;
        self.clear(Position::new(0, pos.y), pos);
    }

    fn clear_line(&mut self) {
        let y = self.cursor.pos.y;
        self.clear(Position::new(0, y), Position::new(self.size().width - 1, y));
    }

    fn position_cursor(&mut self, pos: Position) {
        self.move_cursor_to(pos);
    }

    fn move_to_column(&mut self, column: i32) {
        self.move_cursor_to(Position::new(column, self.cursor.pos.y));
    }

    fn move_to_row(&mut self, row: i32) {
        self.move_cursor_to(Position::new(self.cursor.pos.x, row));
    }

    fn move_cursor(&mut self, count: i32, direction: Direction) {
        let Position { x, y } = self.cursor.pos;
        let pos = match direction {
            Direction::Up => Position::new(x, y.saturating_sub(count)),
            Direction::Down => Position::new(x, y.saturating_add(count)),
            Direction::Forward => Position::new(x.saturating_add(count), y),
            Direction::Back => Position::new(x.saturating_sub(count), y),
        };
        self.move_cursor_to(pos);
    }

    fn change_mode_bits(&mut self, set: bool, mode: TerminalModes) {
        debug!(?mode, set, "terminal mode changed");
        self.modes.set(mode, set);
    }

    fn delete_chars(&mut self, count: i32) {
        let width = self.size().width;
        let Position { x, y } = self.cursor.pos;
        let count = count.clamp(0, width - x);
        if count == 0 {
            return;
        }

        self.break_wide_pair(y, x);
        self.break_wide_pair(y, x + count);
        if let Some(line) = self.screen.get_line_mut(y as usize) {
            line.copy_within((x + count) as usize.., x as usize);
        }
        self.clear(Position::new(width - count, y), Position::new(width - 1, y));
    }

    fn erase_chars(&mut self, count: i32) {
        let pos = self.cursor.pos;
        let last = pos.x.saturating_add(count.saturating_sub(1));
        self.clear(pos, Position::new(last, pos.y));
    }

    fn delete_lines(&mut self, count: i32) {
        self.scroll_up(self.cursor.pos.y, count);
    }

    fn insert_blanks(&mut self, count: i32) {
        let Position { x, y } = self.cursor.pos;
        let count = self.shift_right(count);
        if count > 0 {
            self.clear(Position::new(x, y), Position::new(x + count - 1, y));
        }
    }

    fn insert_newline(&mut self, count: i32) {
        self.scroll_down(self.cursor.pos.y, count);
    }

    fn reset_style(&mut self) {
        self.cursor.style = self.default_style;
    }

    fn set_foreground(&mut self, colour: Colour) {
        self.cursor.style.fg = colour;
    }

    fn set_background(&mut self, colour: Colour) {
        self.cursor.style.bg = colour;
    }

    fn default_foreground(&mut self) {
        self.cursor.style.fg = self.default_style.fg;
    }

    fn default_background(&mut self) {
        self.cursor.style.bg = self.default_style.bg;
    }

    fn set_bold(&mut self, enable: bool) {
        self.cursor.style.attrs.set(GlyphAttributes::BOLD, enable);
    }

    fn set_reversed(&mut self, enable: bool) {
        self.cursor.style.attrs.set(GlyphAttributes::REVERSED, enable);
    }

    fn set_mouse_mode(&mut self, mode: MouseMode, set: bool) {
        self.mouse = if set { mode } else { MouseMode::None };
        debug!(mouse = ?self.mouse, "mouse mode changed");
    }

    fn set_mouse_mode_extended(&mut self, set: bool) {
        debug!(set, "extended mouse reporting changed");
        self.modes.set(TerminalModes::EXTENDED_MOUSE, set);
    }
}
