//! Character set handling
//!
//! Four designation slots (G0-G3) each hold a translation table; one slot
//! is active at a time and consulted for every written character.

use serde::{Deserialize, Serialize};

use super::glyph::CodePoint;

/// Translation table held by a charset slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Charset {
    /// US ASCII (identity)
    #[default]
    Usa,
    /// DEC Special Graphics (line drawing)
    Graphic0,
}

impl Charset {
    /// Map a designation final byte (`ESC ( F`) to a charset
    pub fn from_designation(byte: u8) -> Option<Self> {
        match byte {
            b'0' => Some(Charset::Graphic0),
            b'B' => Some(Charset::Usa),
            _ => None,
        }
    }

    pub fn translate(self, code: CodePoint) -> CodePoint {
        match self {
            Charset::Usa => code,
            Charset::Graphic0 => translate_graphic0(code),
        }
    }
}

/// First code point covered by [`GRAPHIC0`]
const GRAPHIC0_FIRST: CodePoint = 0x41;

/// DEC Special Graphics substitutions for 0x41 ('A') through 0x7e ('~').
/// Zero entries pass the original code point through.
const GRAPHIC0: [CodePoint; 62] = [
    0x2191, 0x2193, 0x2192, 0x2190, 0x2588, 0x259a, 0x2603, // A - G
    0, 0, 0, 0, 0, 0, 0, 0, // H - O
    0, 0, 0, 0, 0, 0, 0, 0, // P - W
    0, 0, 0, 0, 0, 0, 0, 0x0020, // X - _
    0x25c6, 0x2592, 0x2409, 0x240c, 0x240d, 0x240a, 0x00b0, 0x00b1, // ` - g
    0x2424, 0x240b, 0x2518, 0x2510, 0x250c, 0x2514, 0x253c, 0x23ba, // h - o
    0x23bb, 0x2500, 0x23bc, 0x23bd, 0x251c, 0x2524, 0x2534, 0x252c, // p - w
    0x2502, 0x2264, 0x2265, 0x03c0, 0x2260, 0x00a3, 0x00b7, // x - ~
];

fn translate_graphic0(code: CodePoint) -> CodePoint {
    let Some(offset) = code.checked_sub(GRAPHIC0_FIRST) else {
        return code;
    };
    match GRAPHIC0.get(offset as usize) {
        Some(&mapped) if mapped != 0 => mapped,
        _ => code,
    }
}

/// The G0-G3 slots plus the active slot index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharsetSlots {
    slots: [Charset; 4],
    active: usize,
}

impl CharsetSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate `charset` into `slot`. Out of range slots are ignored.
    pub fn set(&mut self, slot: usize, charset: Charset) {
        if let Some(entry) = self.slots.get_mut(slot) {
            *entry = charset;
        }
    }

    /// Locking shift to `slot`. Out of range slots are ignored.
    pub fn use_slot(&mut self, slot: usize) {
        if slot < self.slots.len() {
            self.active = slot;
        }
    }

    pub fn get(&self, slot: usize) -> Option<Charset> {
        self.slots.get(slot).copied()
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn current(&self) -> Charset {
        self.slots[self.active]
    }

    pub fn translate(&self, code: CodePoint) -> CodePoint {
        self.current().translate(code)
    }
}
