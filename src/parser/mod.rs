//! Terminal byte stream decoder
//!
//! A resumable parser that converts bytes into calls on an [`Instructee`].
//! Based on the ECMA-48 escape and control sequence grammar, restricted to
//! the VT100 subset the terminal acts on.

mod decoder;
mod instructee;
mod params;
mod utf8;

pub use decoder::Decoder;
pub use instructee::{Direction, Instructee};
pub use params::{CsiParams, Param, MAX_PARAMS};
pub use utf8::{Utf8Decoder, Utf8Step};
