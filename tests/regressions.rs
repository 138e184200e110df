//! Crash regressions on a 132x80 terminal
//!
//! Each case is an input that once broke an invariant. They must run to
//! completion and leave the cursor on screen.

use tinyvt::{Extent, Position, Terminal};

fn run(input: &[u8]) -> Terminal {
    let mut term = Terminal::new(Extent::new(132, 80)).unwrap();
    term.process_bytes(input);
    let size = term.size();
    assert!(size.contains(term.cursor().pos));
    term
}

#[test]
fn test_negative_scroll() {
    // Negative counts must read as the default
    let term = run(&[0x0c, 0x1b, 0x5b, 0x2d, 0x37, 0x4d]);
    assert_eq!(term.cursor().pos, Position::new(0, 1));
}

#[test]
fn test_large_scroll_down() {
    // Rotation past the end of the line array
    let term = run(&[0x0b, 0x1b, 0x5b, 0x33, 0x33, 0x37, 0x4c]);
    assert!(term.screen().row_text(1).trim().is_empty());
}

#[test]
fn test_graphic0_out_of_bounds_read() {
    let term = run(b"\x1b(0\x7e\x7f\x40");
    assert_eq!(term.screen().row_text(0).chars().next(), Some('\u{b7}'));
    assert_eq!(term.screen().row_text(0).chars().nth(1), Some('@'));
}

#[test]
fn test_huge_parameters() {
    run(b"\x1b[2147483647;2147483647H\x1b[2147483647@\x1b[2147483647P");
    run(b"\x1b[2147483647X\x1b[2147483647L\x1b[2147483647M");
    run(b"\x1b[99999999999999999999999999999999A\x1b[4294967296C");
}

#[test]
fn test_erase_from_last_cell() {
    let term = run(b"\x1b[80;132H\x1b[2147483647Xa\x1b[Pb");
    assert_eq!(term.cursor().pos, Position::new(1, 79));
    assert_eq!(term.screen().row_text(79).trim(), "b");
}

#[test]
fn test_parameter_flood() {
    let mut input = b"\x1b[".to_vec();
    for _ in 0..10_000 {
        input.extend_from_slice(b"1;");
    }
    input.extend_from_slice(b"H");
    run(&input);
}

#[test]
fn test_unterminated_string_sequence() {
    let mut input = b"\x1b]0;".to_vec();
    input.extend(std::iter::repeat(b'x').take(100_000));
    let term = run(&input);
    assert!(term.screen().row_text(0).trim().is_empty());
}

#[test]
fn test_wide_char_in_insert_mode_at_last_column() {
    let term = run("\x1b[4h\x1b[1;132H中\x1b[80;132H中".as_bytes());
    assert_eq!(term.cursor().pos, Position::new(2, 79));
    assert!(term.screen().get_glyph(Position::new(1, 79)).unwrap().is_wide_dummy());
}

#[test]
fn test_stray_bytes_everywhere() {
    run(b"\x1b[\xff\xfe\x80J\x1b(\xc3\x1b\xe4\x1b]\xf0\x07\xed\xa0\x80");
}
