//! Display width of code points
//!
//! Width data comes from `unicode-width`; the terminal rules on top of it
//! (controls are unprintable, invalid scalars are unprintable) live here.

use unicode_width::UnicodeWidthChar;

use super::glyph::CodePoint;

/// Column width of `code`: 0, 1 or 2, or -1 if it must not be printed.
pub fn code_point_width(code: CodePoint) -> i32 {
    let Some(c) = char::from_u32(code) else {
        return -1;
    };
    if c.is_control() {
        return -1;
    }
    match c.width() {
        Some(width) => width as i32,
        None => -1,
    }
}
