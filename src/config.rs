//! Configuration for a terminal instance

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Colour, Extent, GlyphStyle};
use crate::error::Result;

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Screen width in cells
    pub columns: i32,
    /// Screen height in cells
    pub rows: i32,
    /// Foreground restored by SGR 0 and SGR 39
    pub default_foreground: Colour,
    /// Background restored by SGR 0 and SGR 49
    pub default_background: Colour,
    /// Distance between tab stops; values below 1 count as 1
    pub tab_width: i32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 25,
            default_foreground: GlyphStyle::DEFAULT_FOREGROUND,
            default_background: GlyphStyle::DEFAULT_BACKGROUND,
            tab_width: 8,
        }
    }
}

impl TerminalConfig {
    /// Default configuration with the given screen size
    pub fn with_extent(size: Extent) -> Self {
        Self {
            columns: size.width,
            rows: size.height,
            ..Default::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.columns, self.rows)
    }

    pub fn default_style(&self) -> GlyphStyle {
        GlyphStyle::new(self.default_foreground, self.default_background)
    }

    pub fn tab_width(&self) -> i32 {
        self.tab_width.max(1)
    }
}
