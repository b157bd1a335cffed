//! Keyboard layout and hit-testing.
//!
//! A layout is a pure function of the input mode, letter case and overlay.
//! Drawing and hit-testing both walk [`KeyboardLayout::row_keys`], so a key is
//! always hit exactly where it was drawn.

mod keys;
mod placement;

use serde::Serialize;

use crate::settings::Settings;

pub use keys::layout_for;
pub use placement::{PlacedKey, Rect};

/// Active input mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InputMode {
    Hiragana,
    Katakana,
    Alphabet,
    Symbols,
}

impl InputMode {
    pub const ALL: [InputMode; 4] = [
        InputMode::Hiragana,
        InputMode::Katakana,
        InputMode::Alphabet,
        InputMode::Symbols,
    ];

    /// Legend on the mode-switch key.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hiragana => "かな",
            Self::Katakana => "カナ",
            Self::Alphabet => "ABC",
            Self::Symbols => "記号",
        }
    }

    /// Kana modes route letters through the romaji buffer.
    pub fn is_kana(self) -> bool {
        matches!(self, Self::Hiragana | Self::Katakana)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LetterCase {
    Upper,
    Lower,
}

impl LetterCase {
    pub fn toggled(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }

    pub fn apply(self, c: char) -> char {
        match self {
            Self::Upper => c.to_ascii_uppercase(),
            Self::Lower => c.to_ascii_lowercase(),
        }
    }
}

/// Logical key identity, independent of its legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KeyId {
    /// A character key. Letters are always stored lowercase.
    Char(char),
    Space,
    Backspace,
    Newline,
    CursorLeft,
    CursorRight,
    Mode(InputMode),
    ToggleCase,
    Voice,
    Convert,
    Submit,
    Cancel,
    MemoList,

    // Candidate bar
    /// Slot within the current candidate page.
    Candidate(usize),
    PrevPage,
    NextPage,
    CancelConversion,

    // Memo list
    /// Visible row slot, relative to the list scroll offset.
    MemoRow(usize),
    MemoUp,
    MemoDown,
    MemoScrollUp,
    MemoScrollDown,
    MemoEdit,
    MemoDelete,
    MemoMoveTo,
    MemoBack,
}

impl KeyId {
    /// Key for a typed character from a physical keyboard or a replay script.
    pub fn from_char(c: char) -> KeyId {
        match c {
            ' ' => KeyId::Space,
            '\n' | '\r' => KeyId::Newline,
            '\u{8}' => KeyId::Backspace,
            c if c.is_ascii_alphabetic() => KeyId::Char(c.to_ascii_lowercase()),
            c => KeyId::Char(c),
        }
    }

    pub fn is_candidate_key(self) -> bool {
        matches!(
            self,
            KeyId::Candidate(_) | KeyId::PrevPage | KeyId::NextPage | KeyId::CancelConversion
        )
    }

    pub fn is_memo_list_key(self) -> bool {
        matches!(
            self,
            KeyId::MemoRow(_)
                | KeyId::MemoUp
                | KeyId::MemoDown
                | KeyId::MemoScrollUp
                | KeyId::MemoScrollDown
                | KeyId::MemoEdit
                | KeyId::MemoDelete
                | KeyId::MemoMoveTo
                | KeyId::MemoBack
        )
    }
}

/// Visual class of a key; the renderer maps it to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KeyKind {
    Character,
    Function,
    Accent,
    Danger,
    Voice,
    Candidate,
    MemoRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeySpec {
    pub id: KeyId,
    pub label: String,
    pub width: f32,
    pub kind: KeyKind,
    pub highlighted: bool,
}

/// What occupies the key grid. Only one region is hit-testable at a time.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    /// Normal keyboard.
    Keys,
    /// Conversion candidate bar showing one page of candidates.
    Candidates { labels: &'a [String] },
    /// Memo list: one label per visible row slot, plus the selected slot.
    MemoList {
        rows: &'a [String],
        selected: Option<usize>,
    },
}

/// Fixed geometry shared by every layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geometry {
    pub panel_width: f32,
    pub panel_height: f32,
    pub key_width: f32,
    pub key_height: f32,
    pub gap: f32,
    pub start_y: f32,
}

impl Geometry {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            panel_width: s.panel.width as f32,
            panel_height: s.panel.height as f32,
            key_width: s.keys.key_width,
            key_height: s.keys.key_height,
            gap: s.keys.gap,
            start_y: s.keys.start_y,
        }
    }

    /// Vertical distance between consecutive row tops.
    pub fn row_pitch(&self) -> f32 {
        self.key_height + self.gap
    }
}

/// Rows of keys plus the geometry they are placed with. Empty rows keep
/// their slot in the vertical stacking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardLayout {
    pub rows: Vec<Vec<KeySpec>>,
    pub geometry: Geometry,
}

impl KeyboardLayout {
    pub fn find(&self, id: KeyId) -> Option<PlacedKey<'_>> {
        self.placed_keys().find(|p| p.key.id == id)
    }
}
