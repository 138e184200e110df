//! Screen buffer
//!
//! All glyphs live in one contiguous allocation made at construction. Rows
//! are reached through an array of line handles, so scrolling rotates the
//! handles instead of copying cells and every row keeps its backing storage
//! for the lifetime of the screen. Each handle carries a "changed" flag, and
//! the screen accumulates a net scroll offset; both are cleared only by
//! [`Screen::clear_changes`].

use std::ops::Range;

use tracing::debug;

use super::geometry::{Extent, Position};
use super::glyph::Glyph;
use crate::error::{Error, Result};

/// A reference to one row of backing storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineHandle {
    /// Index of the row's first glyph in the backing store
    start: usize,
    changed: bool,
}

/// The screen buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    size: Extent,
    glyphs: Vec<Glyph>,
    lines: Vec<LineHandle>,
    /// Net vertical shift since the last flush, in `[0, height)`
    scroll_change: i32,
}

impl Screen {
    /// Create a blank screen filled with `blank`
    pub fn new(size: Extent, blank: Glyph) -> Result<Self> {
        let count = size.cell_count().ok_or(Error::InvalidExtent {
            width: size.width,
            height: size.height,
        })?;
        let width = size.width as usize;

        let lines = (0..size.height as usize)
            .map(|row| LineHandle {
                start: row * width,
                changed: true,
            })
            .collect();

        debug!(width = size.width, height = size.height, "screen created");

        Ok(Self {
            size,
            glyphs: vec![blank; count],
            lines,
            scroll_change: 0,
        })
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    fn width(&self) -> usize {
        self.size.width as usize
    }

    fn height(&self) -> usize {
        self.size.height as usize
    }

    /// Get the glyphs of a row
    pub fn get_line(&self, row: usize) -> Option<&[Glyph]> {
        let start = self.lines.get(row)?.start;
        Some(&self.glyphs[start..start + self.width()])
    }

    /// Get the glyphs of a row for modification. Does not mark the row dirty.
    pub fn get_line_mut(&mut self, row: usize) -> Option<&mut [Glyph]> {
        let start = self.lines.get(row)?.start;
        let width = self.width();
        Some(&mut self.glyphs[start..start + width])
    }

    pub fn get_glyph(&self, pos: Position) -> Option<&Glyph> {
        if !self.size.contains(pos) {
            return None;
        }
        self.get_line(pos.y as usize)?.get(pos.x as usize)
    }

    pub fn get_glyph_mut(&mut self, pos: Position) -> Option<&mut Glyph> {
        if !self.size.contains(pos) {
            return None;
        }
        self.get_line_mut(pos.y as usize)?.get_mut(pos.x as usize)
    }

    /// Stable identity of the storage currently shown at `row`
    pub fn line_id(&self, row: usize) -> Option<usize> {
        self.lines.get(row).map(|line| line.start / self.width())
    }

    /// Mark rows `[begin, end)` changed, clamped to the screen
    pub fn mark_dirty(&mut self, begin: i32, end: i32) {
        let height = self.size.height;
        let begin = begin.clamp(0, height) as usize;
        let end = end.clamp(0, height) as usize;
        for line in self.lines.iter_mut().take(end).skip(begin) {
            line.changed = true;
        }
    }

    pub fn is_line_changed(&self, row: usize) -> bool {
        self.lines.get(row).is_some_and(|line| line.changed)
    }

    /// Rows whose changed flag is set
    pub fn changed_lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.changed)
            .map(|(row, _)| row)
    }

    /// Net scroll since the last [`Screen::clear_changes`], in `[0, height)`
    pub fn changed_scroll(&self) -> i32 {
        self.scroll_change
    }

    /// Accumulate `delta` rows of scroll, wrapping modulo the height
    pub fn move_scroll(&mut self, delta: i32) {
        let height = i64::from(self.size.height);
        let total = i64::from(self.scroll_change) + i64::from(delta);
        self.scroll_change = total.rem_euclid(height) as i32;
    }

    /// Reset scroll delta and all changed flags. Call once per rendered frame.
    pub fn clear_changes(&mut self) {
        self.scroll_change = 0;
        for line in &mut self.lines {
            line.changed = false;
        }
    }

    /// Rotate rows `[top, height)` up by `count`; the top `count` rows of the
    /// range end up at the bottom. `count` is clamped to the range.
    pub fn rotate_up(&mut self, top: usize, count: usize) {
        if top >= self.height() {
            return;
        }
        let region = &mut self.lines[top..];
        let count = count.min(region.len());
        region.rotate_left(count);
    }

    /// Rotate rows `[top, height)` down by `count`
    pub fn rotate_down(&mut self, top: usize, count: usize) {
        if top >= self.height() {
            return;
        }
        let region = &mut self.lines[top..];
        let count = count.min(region.len());
        region.rotate_right(count);
    }

    /// Overwrite every glyph in `rows` with `blank` and mark them changed
    pub fn fill_rows(&mut self, rows: Range<usize>, blank: Glyph) {
        let end = rows.end.min(self.height());
        for row in rows.start.min(end)..end {
            if let Some(line) = self.get_line_mut(row) {
                line.fill(blank);
            }
            self.lines[row].changed = true;
        }
    }

    /// Plain text of a row: dummy cells skipped, empty cells as spaces
    pub fn row_text(&self, row: usize) -> String {
        let Some(line) = self.get_line(row) else {
            return String::new();
        };
        line.iter()
            .filter(|glyph| !glyph.is_wide_dummy())
            .map(|glyph| glyph.as_char().unwrap_or(' '))
            .collect()
    }
}
