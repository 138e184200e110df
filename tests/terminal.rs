//! Terminal behaviour on a small screen

use tinyvt::core::{Charset, GlyphAttributes, TerminalModes};
use tinyvt::{Extent, Glyph, Position, Terminal};

fn term() -> Terminal {
    Terminal::new(Extent::new(5, 4)).unwrap()
}

fn glyph(term: &Terminal, x: i32, y: i32) -> Glyph {
    *term.screen().get_glyph(Position::new(x, y)).unwrap()
}

fn code_at(term: &Terminal, x: i32, y: i32) -> Option<char> {
    glyph(term, x, y).as_char()
}

#[test]
fn test_fill_first_row() {
    let mut term = term();
    term.process_bytes(b"ABCDE");

    assert_eq!(term.screen().row_text(0), "ABCDE");
    assert_eq!(term.cursor().pos, Position::new(4, 0));
    assert!(term.cursor().is_wrap_pending());

    term.process_bytes(b"F");
    assert_eq!(code_at(&term, 0, 1), Some('F'));
    assert_eq!(term.cursor().pos, Position::new(1, 1));
    assert!(glyph(&term, 4, 0).style.attrs.contains(GlyphAttributes::WRAPS));
}

#[test]
fn test_scroll_when_screen_full() {
    let mut term = term();
    term.process_bytes(b"00000111112222233333");
    assert_eq!(term.cursor().pos, Position::new(4, 3));

    term.process_bytes(b"a");
    assert_eq!(term.cursor().pos, Position::new(1, 3));
    assert_eq!(term.dump(), "11111\n22222\n33333\na    \n");
}

#[test]
fn test_hello_world_wraps() {
    let mut term = term();
    term.process_bytes(b"Hello world!");

    assert_eq!(code_at(&term, 0, 0), Some('H'));
    assert_eq!(code_at(&term, 4, 0), Some('o'));
    assert_eq!(code_at(&term, 0, 1), Some(' '));
    assert_eq!(code_at(&term, 4, 1), Some('l'));
    assert_eq!(code_at(&term, 0, 2), Some('d'));
    assert_eq!(code_at(&term, 1, 2), Some('!'));
    assert_eq!(term.cursor().pos, Position::new(2, 2));
}

#[test]
fn test_backspace() {
    let mut term = term();
    term.process_bytes(b"\x08");
    assert_eq!(term.cursor().pos, Position::new(0, 0));

    term.process_bytes(b"ab\x08");
    assert_eq!(term.cursor().pos, Position::new(1, 0));

    let mut term = self::term();
    term.process_bytes(b"12345 \x08");
    assert_eq!(term.cursor().pos, Position::new(0, 1));
}

#[test]
fn test_carriage_return_and_line_feed() {
    let mut term = term();
    term.process_bytes(b"ab\ncd\r\ne");
    assert_eq!(term.dump(), "ab   \n  cd \ne    \n     \n");
}

#[test]
fn test_line_feed_at_bottom_scrolls() {
    let mut term = term();
    term.process_bytes(b"\n\na\n\nb");
    assert_eq!(term.dump(), "     \na    \n     \n b   \n");
    assert_eq!(term.cursor().pos, Position::new(2, 3));
    assert_eq!(term.screen().changed_scroll(), 1);
}

#[test]
fn test_clear_screen_keeps_cursor() {
    let mut term = term();
    term.process_bytes(b"Hello world!\x1b[2;3H");
    term.process_bytes(b"\x1b[2J");

    assert_eq!(term.cursor().pos, Position::new(2, 1));
    for y in 0..4 {
        for x in 0..5 {
            assert!(glyph(&term, x, y).is_empty());
        }
    }
}

#[test]
fn test_clear_partial() {
    let mut term = term();
    term.process_bytes(b"abcdefghijklmnopqrst");

    term.process_bytes(b"\x1b[2;3H\x1b[K");
    assert_eq!(term.screen().row_text(1), "fg   ");

    term.process_bytes(b"\x1b[1K");
    assert_eq!(term.screen().row_text(1), "     ");

    term.process_bytes(b"\x1b[3;2H\x1b[1J");
    assert_eq!(term.dump(), "     \n     \n  mno\npqrst\n");

    term.process_bytes(b"\x1b[J");
    assert_eq!(term.dump(), "     \n     \n     \n     \n");
}

#[test]
fn test_cursor_movement_is_clamped() {
    let mut term = term();
    term.process_bytes(b"\x1b[99;99H");
    assert_eq!(term.cursor().pos, Position::new(4, 3));

    term.process_bytes(b"\x1b[2A\x1b[3D");
    assert_eq!(term.cursor().pos, Position::new(1, 1));

    term.process_bytes(b"\x1b[100B\x1b[100C");
    assert_eq!(term.cursor().pos, Position::new(4, 3));

    term.process_bytes(b"\x1b[2G\x1b[1d");
    assert_eq!(term.cursor().pos, Position::new(1, 0));

    term.process_bytes(b"\x1b[2147483647A\x1b[2147483647D");
    assert_eq!(term.cursor().pos, Position::new(0, 0));
}

#[test]
fn test_movement_clears_wrap_pending() {
    let mut term = term();
    term.process_bytes(b"ABCDE\x1b[1GX");
    assert_eq!(term.dump(), "XBCDE\n     \n     \n     \n");
    assert_eq!(term.cursor().pos, Position::new(1, 0));
}

#[test]
fn test_delete_and_insert_lines() {
    let mut term = term();
    term.process_bytes(b"aaaaabbbbbcccccdd");

    term.process_bytes(b"\x1b[2;1H\x1b[M");
    assert_eq!(term.dump(), "aaaaa\nccccc\ndd   \n     \n");

    term.process_bytes(b"\x1b[2L");
    assert_eq!(term.dump(), "aaaaa\n     \n     \nccccc\n");
}

#[test]
fn test_delete_lines_overlarge() {
    let mut term = term();
    term.process_bytes(b"aaaaabbbbbcccccddddd\x1b[H\x1b[99M");
    assert_eq!(term.dump(), "     \n     \n     \n     \n");
}

#[test]
fn test_graphic0_charset() {
    let mut term = term();
    term.process_bytes(b"\x1b(0Aq");
    assert_eq!(code_at(&term, 0, 0), Some('↑'));
    assert_eq!(code_at(&term, 1, 0), Some('─'));

    term.process_bytes(b"\x1b(Bq");
    assert_eq!(code_at(&term, 2, 0), Some('q'));
}

#[test]
fn test_locking_shift() {
    let mut term = term();
    term.process_bytes(b"\x1b)0x\x0ex\x0fx");
    assert_eq!(term.screen().row_text(0), "x│x  ");
    assert_eq!(term.charsets().get(1), Some(Charset::Graphic0));
    assert_eq!(term.charsets().active_slot(), 0);

    term.process_bytes(b"\x1bn");
    assert_eq!(term.charsets().active_slot(), 2);
}

#[test]
fn test_wide_char_at_last_column_in_insert_mode() {
    let mut term = term();
    term.process_bytes(b"abcd\x1b[4h");
    assert!(term.modes().contains(TerminalModes::INSERT));

    term.process_bytes("中".as_bytes());
    assert_eq!(code_at(&term, 0, 1), Some('中'));
    assert!(glyph(&term, 1, 1).is_wide_dummy());
}

#[test]
fn test_overwrite_wide_head_blanks_dummy() {
    let mut term = term();
    term.process_bytes("中\ra".as_bytes());

    assert_eq!(term.screen().row_text(0), "a    ");
    assert!(!glyph(&term, 1, 0).is_wide_dummy());
    assert!(glyph(&term, 1, 0).is_empty());
}

#[test]
fn test_overwrite_wide_dummy_blanks_head() {
    let mut term = term();
    term.process_bytes("中\x1b[2Gx".as_bytes());

    assert_eq!(term.screen().row_text(0), " x   ");
    assert!(!glyph(&term, 0, 0).is_wide());
    assert!(glyph(&term, 0, 0).is_empty());
}

#[test]
fn test_wide_over_half_of_wide() {
    let mut term = term();
    term.process_bytes("中中\x1b[2G文".as_bytes());

    assert_eq!(term.screen().row_text(0), " 文  ");
    assert!(glyph(&term, 0, 0).is_empty());
    assert!(glyph(&term, 2, 0).is_wide_dummy());
    assert!(!glyph(&term, 3, 0).is_wide_dummy());
}

#[test]
fn test_delete_chars_splits_wide_pair() {
    let mut term = term();
    term.process_bytes("a中b\x1b[1;3H\x1b[P".as_bytes());
    assert_eq!(term.screen().row_text(0), "a b  ");
}

#[test]
fn test_insert_blanks_drops_wide_pair_at_row_end() {
    let mut term = term();
    term.process_bytes("abc中\x1b[1;1H\x1b[@".as_bytes());

    assert_eq!(term.screen().row_text(0), " abc ");
    assert!(!glyph(&term, 4, 0).is_wide_dummy());
}

#[test]
fn test_erase_line_from_wide_dummy() {
    let mut term = term();
    term.process_bytes("a中\x1b[1;3H\x1b[K".as_bytes());

    assert_eq!(term.screen().row_text(0), "a    ");
    assert!(!glyph(&term, 1, 0).is_wide());
}

#[test]
fn test_change_tracking() {
    let mut term = term();
    term.clear_changes();
    assert_eq!(term.screen().changed_lines().count(), 0);

    term.process_bytes(b"\x1b[3;1Hx");
    assert_eq!(term.screen().changed_lines().collect::<Vec<_>>(), vec![2]);
    assert_eq!(term.screen().changed_scroll(), 0);

    term.process_bytes(b"\n\n");
    assert_eq!(term.screen().changed_scroll(), 1);
    assert!(term.screen().is_line_changed(3));

    term.clear_changes();
    assert_eq!(term.screen().changed_lines().count(), 0);
    assert_eq!(term.screen().changed_scroll(), 0);
}

#[test]
fn test_scroll_preserves_line_identity() {
    let mut term = term();
    let ids: Vec<_> = (0..4).map(|row| term.screen().line_id(row)).collect();

    term.process_bytes(b"\x1b[4;1H\n");
    assert_eq!(term.screen().line_id(0), ids[1]);
    assert_eq!(term.screen().line_id(3), ids[0]);
}
