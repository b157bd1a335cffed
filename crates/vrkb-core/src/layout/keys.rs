use tracing::debug;

use super::{Geometry, InputMode, KeyId, KeyKind, KeySpec, KeyboardLayout, LetterCase, Overlay};
use crate::settings::Settings;

const DIGITS: &str = "1234567890";
const TOP_LETTERS: &str = "qwertyuiop";
const HOME_LETTERS: &str = "asdfghjkl";
const BOTTOM_LETTERS: &str = "zxcvbnm";

const SYMBOLS_1: &[char] = &['!', '?', '@', '#', '$', '%', '&', '*', '(', ')'];
const SYMBOLS_2: &[char] = &['-', '_', '=', '+', '/', '\\', ':', ';', '\'', '"'];
const SYMBOLS_3: &[char] = &['「', '」', '、', '。', '・', '～', '…', ',', '.', '~'];

/// Build the layout for the given mode, case and overlay.
///
/// Pure: the same inputs always produce the same rows, so the caller can
/// rebuild on every render and every click.
pub fn layout_for(
    mode: InputMode,
    case: LetterCase,
    overlay: Overlay<'_>,
    settings: &Settings,
) -> KeyboardLayout {
    let geometry = Geometry::from_settings(settings);
    let b = RowBuilder::new(geometry.key_width);
    let rows = match overlay {
        Overlay::Keys => main_rows(&b, mode, case),
        Overlay::Candidates { labels } => {
            candidate_rows(&b, labels, settings.candidates.slot_width)
        }
        Overlay::MemoList { rows, selected } => memo_list_rows(
            &b,
            rows,
            selected,
            settings.memo_list.visible_rows,
            settings.memo_list.row_width,
        ),
    };
    debug!(?mode, rows = rows.len(), "layout built");
    KeyboardLayout { rows, geometry }
}

struct RowBuilder {
    key_width: f32,
}

impl RowBuilder {
    fn new(key_width: f32) -> Self {
        Self { key_width }
    }

    fn key(&self, id: KeyId, label: impl Into<String>, kind: KeyKind) -> KeySpec {
        KeySpec {
            id,
            label: label.into(),
            width: self.key_width,
            kind,
            highlighted: false,
        }
    }

    fn char_key(&self, c: char, label: char) -> KeySpec {
        self.key(KeyId::Char(c), label.to_string(), KeyKind::Character)
    }

    fn letters(&self, letters: &str, case: LetterCase) -> Vec<KeySpec> {
        letters
            .chars()
            .map(|c| self.char_key(c, case.apply(c)))
            .collect()
    }

    fn chars(&self, chars: impl IntoIterator<Item = char>) -> Vec<KeySpec> {
        chars.into_iter().map(|c| self.char_key(c, c)).collect()
    }
}

fn main_rows(b: &RowBuilder, mode: InputMode, case: LetterCase) -> Vec<Vec<KeySpec>> {
    let mut rows = Vec::with_capacity(6);
    rows.push(b.chars(DIGITS.chars()));

    match mode {
        InputMode::Symbols => {
            rows.push(b.chars(SYMBOLS_1.iter().copied()));
            rows.push(b.chars(SYMBOLS_2.iter().copied()));
            rows.push(b.chars(SYMBOLS_3.iter().copied()));
        }
        InputMode::Alphabet => {
            rows.push(b.letters(TOP_LETTERS, case));
            rows.push(b.letters(HOME_LETTERS, case));
            let mut bottom = vec![b.key(KeyId::ToggleCase, "⇧", KeyKind::Function)];
            bottom[0].highlighted = case == LetterCase::Upper;
            bottom.extend(b.letters(BOTTOM_LETTERS, case));
            bottom.extend(b.chars([',', '.']));
            rows.push(bottom);
        }
        InputMode::Hiragana | InputMode::Katakana => {
            let mut top = b.letters(TOP_LETTERS, LetterCase::Lower);
            top.push(b.char_key('-', 'ー'));
            rows.push(top);
            rows.push(b.letters(HOME_LETTERS, LetterCase::Lower));
            let mut bottom = b.letters(BOTTOM_LETTERS, LetterCase::Lower);
            bottom.extend(b.chars(['、', '。']));
            rows.push(bottom);
        }
    }

    let mut space = b.key(KeyId::Space, "スペース", KeyKind::Function);
    space.width = b.key_width * 2.0;
    rows.push(vec![
        b.key(KeyId::Voice, "🎤", KeyKind::Voice),
        b.key(KeyId::MemoList, "一覧", KeyKind::Function),
        space,
        b.key(KeyId::Convert, "変換", KeyKind::Function),
        b.key(KeyId::Backspace, "削除", KeyKind::Danger),
        b.key(KeyId::Submit, "完了", KeyKind::Accent),
    ]);

    let mut controls: Vec<KeySpec> = InputMode::ALL
        .iter()
        .map(|&m| {
            let mut k = b.key(KeyId::Mode(m), m.label(), KeyKind::Function);
            k.highlighted = m == mode;
            k
        })
        .collect();
    controls.extend([
        b.key(KeyId::CursorLeft, "←", KeyKind::Function),
        b.key(KeyId::CursorRight, "→", KeyKind::Function),
        b.key(KeyId::Newline, "改行", KeyKind::Function),
        b.key(KeyId::Cancel, "取消", KeyKind::Danger),
    ]);
    rows.push(controls);
    rows
}

fn candidate_rows(b: &RowBuilder, labels: &[String], slot_width: f32) -> Vec<Vec<KeySpec>> {
    let slots = labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut k = b.key(KeyId::Candidate(i), label.as_str(), KeyKind::Candidate);
            k.width = slot_width;
            k
        })
        .collect();
    vec![
        slots,
        vec![
            b.key(KeyId::PrevPage, "◀", KeyKind::Function),
            b.key(KeyId::NextPage, "▶", KeyKind::Function),
            b.key(KeyId::CancelConversion, "✕", KeyKind::Danger),
        ],
    ]
}

fn memo_list_rows(
    b: &RowBuilder,
    labels: &[String],
    selected: Option<usize>,
    visible_rows: usize,
    row_width: f32,
) -> Vec<Vec<KeySpec>> {
    let mut rows: Vec<Vec<KeySpec>> = (0..visible_rows)
        .map(|slot| match labels.get(slot) {
            Some(label) => {
                let mut k = b.key(KeyId::MemoRow(slot), label.as_str(), KeyKind::MemoRow);
                k.width = row_width;
                k.highlighted = selected == Some(slot);
                vec![k]
            }
            None => Vec::new(),
        })
        .collect();
    rows.push(vec![
        b.key(KeyId::MemoUp, "▲", KeyKind::Function),
        b.key(KeyId::MemoDown, "▼", KeyKind::Function),
        b.key(KeyId::MemoScrollUp, "⇡", KeyKind::Function),
        b.key(KeyId::MemoScrollDown, "⇣", KeyKind::Function),
        b.key(KeyId::MemoEdit, "編集", KeyKind::Accent),
        b.key(KeyId::MemoDelete, "削除", KeyKind::Danger),
        b.key(KeyId::MemoMoveTo, "移動", KeyKind::Function),
        b.key(KeyId::MemoBack, "戻る", KeyKind::Function),
    ]);
    rows
}
