//! Instruction decoder
//!
//! A byte-at-a-time state machine that turns the output of a child process
//! into calls on an [`Instructee`]. All partial state (an unfinished UTF-8
//! sequence, an escape or control sequence in progress) lives in the
//! decoder, so input may be split at any byte boundary across calls to
//! [`Decoder::decode`] without changing the result.
//!
//! Grammar, after one byte in the ground state:
//! - `>= 0x80`: UTF-8 lead byte
//! - `\n \v \f`, `\r`, `\b`, `\t`, `\a`, `SO`, `SI`: controls
//! - `ESC`: escape sequence (charset designation, locking shifts, string
//!   sequences, CSI)
//! - anything else: printed as-is
//!
//! Nothing malformed is ever an error. Unknown sequences are consumed and
//! dropped; incomplete ones wait for more input.

use tracing::{debug, trace};

use super::instructee::{Direction, Instructee};
use super::params::{CsiParams, Param};
use super::utf8::{Utf8Decoder, Utf8Step};
use crate::core::{Charset, Colour, Position, TerminalModes};

const BEL: u8 = 0x07;
const BS: u8 = 0x08;
const HT: u8 = 0x09;
const LF: u8 = 0x0a;
const VT: u8 = 0x0b;
const FF: u8 = 0x0c;
const CR: u8 = 0x0d;
const SO: u8 = 0x0e;
const SI: u8 = 0x0f;
const ESC: u8 = 0x1b;

/// Decoder state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    /// Inside a multi-byte UTF-8 sequence
    Utf8,
    /// After ESC
    Escape,
    /// After `ESC (`, `ESC )`, `ESC *` or `ESC +`: waiting for the charset
    Designate(usize),
    /// DCS, OSC, SOS, PM or APC payload, discarded
    String,
    /// ESC inside a string sequence, possibly the start of `ESC \`
    StringEscape,
    /// After `ESC [`, collecting parameters
    Csi,
}

/// The instruction decoder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoder {
    state: State,
    utf8: Utf8Decoder,
    params: CsiParams,
    /// Bytes consumed by the unit in progress
    pending: usize,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any partial sequence
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of bytes held for an incomplete unit. Zero means every byte
    /// seen so far has been fully decoded.
    pub fn pending_len(&self) -> usize {
        self.pending
    }

    /// Decode `data`, reporting each recognised unit to `sink`
    pub fn decode<I: Instructee + ?Sized>(&mut self, data: &[u8], sink: &mut I) {
        for &byte in data {
            self.advance(byte, sink);
        }
    }

    /// Process a single byte
    pub fn advance<I: Instructee + ?Sized>(&mut self, byte: u8, sink: &mut I) {
        match self.state {
            State::Ground => self.ground(byte, sink),
            State::Utf8 => self.utf8(byte, sink),
            State::Escape => self.escape(byte, sink),
            State::Designate(slot) => self.designate(slot, byte, sink),
            State::String => self.string(byte),
            State::StringEscape => self.string_escape(byte),
            State::Csi => self.csi(byte, sink),
        }

        if self.state == State::Ground {
            self.pending = 0;
        } else {
            self.pending = self.pending.saturating_add(1);
        }
    }

    fn ground<I: Instructee + ?Sized>(&mut self, byte: u8, sink: &mut I) {
        match byte {
            ESC => self.state = State::Escape,
            LF | VT | FF => sink.line_feed(),
            CR => sink.carriage_return(),
            BS => sink.backspace(),
            HT => sink.tab(),
            BEL => {}
            SO => sink.use_charset_table(1),
            SI => sink.use_charset_table(0),
            0x00..=0x7f => sink.write_char(u32::from(byte)),
            _ => match self.utf8.feed(byte) {
                Utf8Step::Pending => self.state = State::Utf8,
                Utf8Step::Complete(code) => sink.write_char(code),
                Utf8Step::Invalid | Utf8Step::Interrupted => {
                    trace!(byte, "invalid UTF-8 lead byte discarded");
                }
            },
        }
    }

    fn utf8<I: Instructee + ?Sized>(&mut self, byte: u8, sink: &mut I) {
        match self.utf8.feed(byte) {
            Utf8Step::Pending => {}
            Utf8Step::Complete(code) => {
                self.state = State::Ground;
                sink.write_char(code);
            }
            Utf8Step::Invalid => {
                trace!("malformed UTF-8 sequence discarded");
                self.state = State::Ground;
            }
            Utf8Step::Interrupted => {
                trace!(byte, "truncated UTF-8 sequence discarded");
                self.state = State::Ground;
                self.pending = 0;
                self.ground(byte, sink);
            }
        }
    }

    fn escape<I: Instructee + ?Sized>(&mut self, byte: u8, sink: &mut I) {
        self.state = State::Ground;
        match byte {
            b'M' => sink.reverse_line_feed(),
            b'n' => sink.use_charset_table(2),
            b'o' => sink.use_charset_table(3),
            b'(' => self.state = State::Designate(0),
            b')' => self.state = State::Designate(1),
            b'*' => self.state = State::Designate(2),
            b'+' => self.state = State::Designate(3),
            b'P' | b']' | b'X' | b'^' | b'_' => self.state = State::String,
            b'[' => {
                self.params.clear();
                self.state = State::Csi;
            }
            _ => trace!(byte, "unknown escape sequence discarded"),
        }
    }

    fn designate<I: Instructee + ?Sized>(&mut self, slot: usize, byte: u8, sink: &mut I) {
        self.state = State::Ground;
        match Charset::from_designation(byte) {
            Some(charset) => {
                debug!(slot, ?charset, "charset designated");
                sink.set_charset_table(slot, charset);
            }
            None => trace!(slot, byte, "unknown charset discarded"),
        }
    }

    fn string(&mut self, byte: u8) {
        match byte {
            BEL => self.state = State::Ground,
            ESC => self.state = State::StringEscape,
            _ => {}
        }
    }

    fn string_escape(&mut self, byte: u8) {
        match byte {
            b'\\' => self.state = State::Ground,
            ESC => {}
            _ => self.state = State::String,
        }
    }

    fn csi<I: Instructee + ?Sized>(&mut self, byte: u8, sink: &mut I) {
        match byte {
            0x30..=0x3f | b'-' => {
                self.params.push_byte(byte);
            }
            // Intermediates do not change dispatch
            0x20..=0x2f => {}
            0x40..=0x7e => {
                self.state = State::Ground;
                self.params.finish();
                dispatch_csi(&self.params, byte, sink);
            }
            ESC => {
                self.state = State::Escape;
                self.pending = 0;
            }
            _ => trace!(byte, "byte ignored inside control sequence"),
        }
    }
}

fn dispatch_csi<I: Instructee + ?Sized>(params: &CsiParams, final_byte: u8, sink: &mut I) {
    if params.is_private() {
        trace!(final_byte, "private control sequence ignored");
        return;
    }

    match final_byte {
        b'J' => match params.selector(0) {
            0 => sink.clear_to_bottom(),
            1 => sink.clear_from_top(),
            2 => sink.clear_screen(),
            n => trace!(n, "unknown erase in display"),
        },
        b'K' => match params.selector(0) {
            0 => sink.clear_to_end(),
            1 => sink.clear_from_begin(),
            2 => sink.clear_line(),
            n => trace!(n, "unknown erase in line"),
        },
        b'G' | b'`' => sink.move_to_column(params.count(0, 1) - 1),
        b'd' => sink.move_to_row(params.count(0, 1) - 1),
        b'H' | b'f' => sink.position_cursor(Position::new(
            params.count(1, 1) - 1,
            params.count(0, 1) - 1,
        )),
        b'h' | b'l' => {
            let set = final_byte == b'h';
            for param in params.as_slice() {
                match param.number().and_then(TerminalModes::from_ansi) {
                    Some(mode) => sink.change_mode_bits(set, mode),
                    None => trace!(?param, set, "unsupported mode"),
                }
            }
        }
        b'A' => sink.move_cursor(params.count(0, 1), Direction::Up),
        b'B' => sink.move_cursor(params.count(0, 1), Direction::Down),
        b'C' => sink.move_cursor(params.count(0, 1), Direction::Forward),
        b'D' => sink.move_cursor(params.count(0, 1), Direction::Back),
        b'P' => sink.delete_chars(params.count(0, 1)),
        b'X' => sink.erase_chars(params.count(0, 1)),
        b'M' => sink.delete_lines(params.count(0, 1)),
        b'@' => sink.insert_blanks(params.count(0, 1)),
        b'L' => sink.insert_newline(params.count(0, 1)),
        b'm' => select_graphic_rendition(params.as_slice(), sink),
        0x70..=0x7e => trace!(final_byte, "control sequence ignored"),
        _ => trace!(final_byte, "unknown control sequence"),
    }
}

/// `CSI ... m`
fn select_graphic_rendition<I: Instructee + ?Sized>(params: &[Param], sink: &mut I) {
    if params.is_empty() {
        sink.reset_style();
        return;
    }

    let mut i = 0;
    while i < params.len() {
        let Some(n) = params[i].value() else {
            i += 1;
            continue;
        };

        match n {
            0 => sink.reset_style(),
            1 => sink.set_bold(true),
            22 => sink.set_bold(false),
            7 => sink.set_reversed(true),
            27 => sink.set_reversed(false),
            30..=37 => sink.set_foreground(Colour::PALETTE[(n - 30) as usize]),
            90..=97 => sink.set_foreground(Colour::PALETTE[(n - 90 + 8) as usize]),
            39 => sink.default_foreground(),
            40..=47 => sink.set_background(Colour::PALETTE[(n - 40) as usize]),
            100..=107 => sink.set_background(Colour::PALETTE[(n - 100 + 8) as usize]),
            49 => sink.default_background(),
            38 | 48 => {
                let (colour, used) = extended_colour(&params[i + 1..]);
                i += used;
                match colour {
                    Some(colour) if n == 38 => sink.set_foreground(colour),
                    Some(colour) => sink.set_background(colour),
                    None => trace!(n, "incomplete extended colour ignored"),
                }
            }
            _ => trace!(n, "unsupported graphic rendition"),
        }
        i += 1;
    }
}

/// Parse the tail of `38;...` / `48;...`. Returns the colour, if complete,
/// and the number of parameters consumed.
fn extended_colour(rest: &[Param]) -> (Option<Colour>, usize) {
    match rest.first().and_then(|p| p.value()) {
        Some(5) => {
            let Some(index) = rest.get(1) else {
                return (None, rest.len());
            };
            let colour = index
                .value()
                .and_then(|n| u8::try_from(n).ok())
                .map(Colour::from_index);
            (colour, 2)
        }
        Some(2) => {
            if rest.len() < 4 {
                return (None, rest.len());
            }
            let component = |p: Param| p.value().unwrap_or(0).clamp(0, 255) as u8;
            let colour = Colour::new(component(rest[1]), component(rest[2]), component(rest[3]));
            (Some(colour), 4)
        }
        _ => (None, rest.len()),
    }
}
