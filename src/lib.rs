//! tinyvt terminal emulator core
//!
//! Consumes the byte stream a child process writes to its pseudoterminal
//! and maintains the screen it describes:
//!
//! - `core`: Screen buffer, glyphs, cursor, charsets, snapshots
//! - `parser`: Resumable VT100/ECMA-48 decoder and the `Instructee` sink
//! - `terminal`: The state machine applying decoded instructions
//!
//! ```
//! use tinyvt::{Extent, Terminal};
//!
//! let mut term = Terminal::new(Extent::new(5, 4)).unwrap();
//! term.process_bytes(b"Hello world!");
//! assert_eq!(term.screen().row_text(0), "Hello");
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod parser;
pub mod terminal;

pub use config::TerminalConfig;
pub use crate::core::{Extent, Glyph, Position, Screen, Snapshot};
pub use error::{Error, Result};
pub use parser::{Decoder, Instructee};
pub use terminal::Terminal;
