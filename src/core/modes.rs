//! Terminal mode flags
//!
//! Modes that affect how written characters are placed, plus the mouse
//! reporting state consumed by whoever encodes host mouse events.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Terminal mode bits
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TerminalModes: u8 {
        /// IRM - written characters shift the rest of the row right
        const INSERT = 1 << 0;
        /// SGR (1006) extended mouse coordinates
        const EXTENDED_MOUSE = 1 << 1;
        /// Bracketed paste (2004)
        const BRACKETED_PASTE = 1 << 2;
    }
}

impl TerminalModes {
    /// ANSI mode number (`CSI Ps h` / `CSI Ps l`) to mode bit
    pub fn from_ansi(mode: i32) -> Option<Self> {
        match mode {
            4 => Some(Self::INSERT),
            _ => None,
        }
    }
}

/// Mouse reporting mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MouseMode {
    /// No mouse reporting
    #[default]
    None,
    /// X10 compatibility mode - report button press only
    X10,
    /// Report button press and release
    Button,
    /// Report motion while a button is held
    Motion,
    /// Report all motion events
    Many,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_default() {
        let modes = TerminalModes::default();
        assert!(!modes.contains(TerminalModes::INSERT));
        assert!(!modes.contains(TerminalModes::BRACKETED_PASTE));
        assert_eq!(MouseMode::default(), MouseMode::None);
    }

    #[test]
    fn test_ansi_modes() {
        assert_eq!(TerminalModes::from_ansi(4), Some(TerminalModes::INSERT));
        assert_eq!(TerminalModes::from_ansi(20), None);
        assert_eq!(TerminalModes::from_ansi(-1), None);
    }

    #[test]
    fn test_set_and_unset() {
        let mut modes = TerminalModes::default();
        modes.set(TerminalModes::INSERT, true);
        modes.set(TerminalModes::BRACKETED_PASTE, true);
        assert!(modes.contains(TerminalModes::INSERT | TerminalModes::BRACKETED_PASTE));

        modes.set(TerminalModes::INSERT, false);
        assert!(!modes.contains(TerminalModes::INSERT));
        assert!(modes.contains(TerminalModes::BRACKETED_PASTE));
    }
}
