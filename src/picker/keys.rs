//! Raw terminal input decoding for the picker.
//!
//! The host hands the picker raw key bytes; this module turns them into the
//! named keys the keybinding map understands. Only the sequences the picker
//! cares about are decoded; anything else comes through as a plain character
//! or is dropped.

/// A decoded key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key name matching the chord vocabulary ("Up", "Enter", "A", ...).
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
}

/// Decode one raw input chunk into a key press.
///
/// Escape sequences for the arrow keys and the common control bytes are
/// recognized; printable characters map to themselves. The shift flag is
/// never inferred for printable keys (the terminal already delivered the
/// shifted character), so chords for picker actions use bare keys or Ctrl
/// combinations.
pub fn decode(raw: &[u8]) -> Option<KeyPress> {
    match raw {
        [] => None,
        // Arrow keys (CSI and SS3 variants)
        [0x1b, b'[', b'A'] | [0x1b, b'O', b'A'] => Some(named("Up")),
        [0x1b, b'[', b'B'] | [0x1b, b'O', b'B'] => Some(named("Down")),
        [0x1b, b'[', b'C'] | [0x1b, b'O', b'C'] => Some(named("Right")),
        [0x1b, b'[', b'D'] | [0x1b, b'O', b'D'] => Some(named("Left")),
        // Bare escape
        [0x1b] => Some(named("Escape")),
        // Alt+key arrives as ESC prefix on a single byte
        [0x1b, rest @ ..] if rest.len() == 1 => decode(rest).map(|mut press| {
            press.alt = true;
            press
        }),
        [b'\r'] | [b'\n'] => Some(named("Enter")),
        [b'\t'] => Some(named("Tab")),
        [b' '] => Some(named("Space")),
        [0x7f] | [0x08] => Some(named("Backspace")),
        // Ctrl+letter control bytes (0x01..=0x1a), minus the ones above
        [byte] if (0x01..=0x1a).contains(byte) => {
            let letter = (byte - 0x01 + b'a') as char;
            Some(KeyPress {
                key: letter.to_string(),
                ctrl: true,
                alt: false,
            })
        }
        // Printable single characters (possibly multi-byte UTF-8)
        _ => {
            let text = std::str::from_utf8(raw).ok()?;
            let mut chars = text.chars();
            let c = chars.next()?;
            if chars.next().is_some() || c.is_control() {
                return None;
            }
            Some(KeyPress {
                key: c.to_string(),
                ctrl: false,
                alt: false,
            })
        }
    }
}

fn named(key: &str) -> KeyPress {
    KeyPress {
        key: key.to_string(),
        ctrl: false,
        alt: false,
    }
}
