use serde::{Deserialize, Serialize};

/// Longest draft, in UTF-16 code units.
pub const MAX_DRAFT_UNITS: usize = 64;

/// Where the session is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Nothing woven for the active day.
    Idle,
    /// The draft changed since the last weave.
    Composing,
    /// Today's weave is on the card.
    Woven,
    /// A stored record of another day is on the card.
    ViewingPastDay,
}

/// A key press in the draft field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A printable character, including space.
    Char(char),
    /// Delete the last character.
    Backspace,
    /// Commit the draft.
    Enter,
    /// Anything else (modifiers, arrows). Updates the timestamp only.
    Other(String),
}

impl Key {
    /// Parse a DOM-style key name: `"Enter"`, `"Backspace"`, or a single character.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::Char(c),
            _ if name == "Enter" => Self::Enter,
            _ if name == "Backspace" => Self::Backspace,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Whether this key contributes a rhythm sample.
    ///
    /// Only characters of one UTF-16 unit count; astral characters are edits but not timed.
    pub fn is_timed(&self) -> bool {
        match self {
            Self::Char(c) => c.len_utf16() == 1,
            Self::Backspace => true,
            Self::Enter | Self::Other(_) => false,
        }
    }
}

/// Number of UTF-16 code units in `s`.
pub fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}

/// `s` cut to at most `max_units` UTF-16 code units, never splitting a character.
pub fn truncate_utf16(s: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (i, c) in s.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return &s[..i];
        }
    }
    s
}

#[cfg(test)]
#[path = "../../tests/unit/app/input.rs"]
mod tests;
