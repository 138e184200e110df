//! CSI parameter collection
//!
//! Parameters are gathered byte by byte as the decoder sees them, so a
//! sequence split across reads resumes exactly where it stopped. Storage is
//! a fixed array; parameters past the capacity are consumed and dropped.

use tracing::trace;

/// Maximum number of parameters kept per sequence
pub const MAX_PARAMS: usize = 10;

/// A single CSI parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Param {
    /// Empty field, e.g. the first one in `CSI ;5H`
    #[default]
    Missing,
    Number(i32),
    /// A parameter byte in `0x3c..=0x3f` other than a leading `?`
    Char(u8),
    /// Negative or overflowing number
    Invalid,
}

impl Param {
    /// Numeric value, if this is a well-formed number
    pub fn number(self) -> Option<i32> {
        match self {
            Param::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Numeric value with an empty field reading as 0
    pub fn value(self) -> Option<i32> {
        match self {
            Param::Missing => Some(0),
            Param::Number(n) => Some(n),
            _ => None,
        }
    }
}

/// The field currently being accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Empty,
    Number(i32),
    Char(u8),
    Invalid,
}

impl From<Field> for Param {
    fn from(field: Field) -> Self {
        match field {
            Field::Empty => Param::Missing,
            Field::Number(n) => Param::Number(n),
            Field::Char(c) => Param::Char(c),
            Field::Invalid => Param::Invalid,
        }
    }
}

/// Parameters of one control sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsiParams {
    values: [Param; MAX_PARAMS],
    len: usize,
    field: Field,
    /// Any byte has been collected since [`CsiParams::clear`]
    started: bool,
    private: bool,
}

impl CsiParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    /// Feed one parameter byte (`0x30..=0x3f`) or the `-` intermediate.
    /// Returns false if the byte is not a parameter byte.
    pub fn push_byte(&mut self, byte: u8) -> bool {
        let first = !self.started;
        self.started = true;

        match byte {
            b'0'..=b'9' => {
                let digit = i32::from(byte - b'0');
                self.field = match self.field {
                    Field::Empty => Field::Number(digit),
                    Field::Number(n) => n
                        .checked_mul(10)
                        .and_then(|n| n.checked_add(digit))
                        .map_or(Field::Invalid, Field::Number),
                    Field::Char(c) => {
                        self.finish_field(Field::Char(c));
                        Field::Number(digit)
                    }
                    Field::Invalid => Field::Invalid,
                };
            }
            b':' | b';' => {
                let field = std::mem::take(&mut self.field);
                self.finish_field(field);
            }
            b'?' if first => self.private = true,
            0x3c..=0x3f => {
                if self.field != Field::Empty {
                    let field = self.field;
                    self.finish_field(field);
                }
                self.field = Field::Char(byte);
            }
            b'-' => {
                if self.field == Field::Empty {
                    self.field = Field::Invalid;
                }
            }
            _ => {
                self.started = !first;
                return false;
            }
        }
        true
    }

    fn finish_field(&mut self, field: Field) {
        match self.values.get_mut(self.len) {
            Some(slot) => {
                *slot = field.into();
                self.len += 1;
            }
            None => trace!("CSI parameter dropped past capacity"),
        }
        self.field = Field::Empty;
    }

    /// Close the field in progress. Called once when the final byte arrives.
    pub fn finish(&mut self) {
        if self.started && !(self.private && self.len == 0 && self.field == Field::Empty) {
            let field = std::mem::take(&mut self.field);
            self.finish_field(field);
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Param] {
        &self.values[..self.len]
    }

    /// Parameter at `idx`, `Missing` if absent
    pub fn get(&self, idx: usize) -> Param {
        self.as_slice().get(idx).copied().unwrap_or_default()
    }

    /// Positive count at `idx`, or `default` when absent, zero or invalid
    pub fn count(&self, idx: usize, default: i32) -> i32 {
        match self.get(idx) {
            Param::Number(n) if n > 0 => n,
            _ => default,
        }
    }

    /// Selector value at `idx` (`CSI Ps J`), 0 when absent or invalid
    pub fn selector(&self, idx: usize) -> i32 {
        self.get(idx).number().unwrap_or(0)
    }
}
