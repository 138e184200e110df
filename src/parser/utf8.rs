//! Streaming UTF-8 decoding
//!
//! Fed one byte at a time by the decoder once it has seen a byte >= 0x80.
//! A truncated sequence simply stays pending until more input arrives.

use crate::core::CodePoint;

/// Result of feeding one byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Step {
    /// Need more bytes
    Pending,
    /// A complete scalar value
    Complete(CodePoint),
    /// The sequence was malformed and has been dropped, byte included
    Invalid,
    /// A non-continuation byte arrived mid-sequence. The partial sequence
    /// has been dropped; the byte was not consumed.
    Interrupted,
}

/// UTF-8 decoder state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Utf8Decoder {
    /// Bits accumulated so far
    code: u32,
    /// Bytes consumed for the current sequence
    len: u8,
    /// Total length announced by the lead byte
    expected: u8,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_pending(&self) -> bool {
        self.len > 0
    }

    /// Bytes held for the incomplete sequence
    pub fn pending_len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn feed(&mut self, byte: u8) -> Utf8Step {
        if self.len == 0 {
            return self.start(byte);
        }

        if byte & 0b1100_0000 != 0b1000_0000 {
            self.reset();
            return Utf8Step::Interrupted;
        }

        self.code = (self.code << 6) | u32::from(byte & 0b0011_1111);
        self.len += 1;
        if self.len < self.expected {
            return Utf8Step::Pending;
        }

        let code = self.code;
        let min = match self.expected {
            2 => 0x80,
            3 => 0x800,
            _ => 0x1_0000,
        };
        self.reset();

        // Overlong forms, surrogates and values past U+10FFFF
        if code < min || char::from_u32(code).is_none() {
            return Utf8Step::Invalid;
        }
        Utf8Step::Complete(code)
    }

    fn start(&mut self, lead: u8) -> Utf8Step {
        let (expected, bits) = if lead & 0b1110_0000 == 0b1100_0000 {
            (2, lead & 0b0001_1111)
        } else if lead & 0b1111_0000 == 0b1110_0000 {
            (3, lead & 0b0000_1111)
        } else if lead & 0b1111_1000 == 0b1111_0000 {
            (4, lead & 0b0000_0111)
        } else {
            return Utf8Step::Invalid;
        };

        self.code = u32::from(bits);
        self.len = 1;
        self.expected = expected;
        Utf8Step::Pending
    }
}
