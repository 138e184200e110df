//! Error types
//!
//! Malformed terminal input is never an error; these cover setup only.

use std::io;

use thiserror::Error;

/// Terminal setup error
#[derive(Error, Debug)]
pub enum Error {
    /// Screen dimensions are empty, negative, or too large to allocate
    #[error("invalid screen size {width}x{height}")]
    InvalidExtent { width: i32, height: i32 },

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for terminal setup
pub type Result<T> = std::result::Result<T, Error>;
