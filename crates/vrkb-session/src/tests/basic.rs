use vrkb_core::layout::{InputMode, KeyId, LetterCase};
use vrkb_core::memo::MemoId;

use super::*;

// --- Romaji composition ---

#[test]
fn test_konnichi_trace() {
    let mut s = new_session();
    type_keys(&mut s, "konnichi");
    assert_eq!(s.text(), "こんいち");
    assert_eq!(s.pending(), "");
    assert_eq!(s.cursor(), 4);
}

#[test]
fn test_gemination() {
    let mut s = new_session();
    type_keys(&mut s, "kka");
    assert_eq!(s.text(), "っか");
}

#[test]
fn test_long_vowel_key() {
    let mut s = new_session();
    type_keys(&mut s, "ra-men");
    assert_eq!(s.text(), "らーめ");
    assert_eq!(s.pending(), "n");
    s.handle_key(KeyId::Space);
    assert_eq!(s.text(), "らーめん ");
}

#[test]
fn test_katakana_mode() {
    let mut s = new_session();
    s.handle_key(KeyId::Mode(InputMode::Katakana));
    type_keys(&mut s, "kkonn");
    assert_eq!(s.text(), "ッコン");
}

#[test]
fn test_pending_shown_at_cursor() {
    let mut s = new_session();
    type_keys(&mut s, "kak");
    assert_eq!(s.text(), "か");
    assert_eq!(s.pending(), "k");
    assert_eq!(s.display_text(), ("かk".to_string(), 2));
}

#[test]
fn test_non_letter_flushes_trailing_n() {
    let mut s = new_session();
    type_keys(&mut s, "n1");
    assert_eq!(s.text(), "ん1");
}

#[test]
fn test_mode_switch_drops_unresolved() {
    let mut s = new_session();
    type_keys(&mut s, "ky");
    s.handle_key(KeyId::Mode(InputMode::Alphabet));
    assert_eq!(s.text(), "");
    assert_eq!(s.pending(), "");
    assert_eq!(s.mode(), InputMode::Alphabet);
}

// --- Backspace ---

#[test]
fn test_backspace_removes_pending_first() {
    let mut s = new_session();
    type_keys(&mut s, "kak");
    let resp = s.handle_key(KeyId::Backspace);
    assert!(resp.consumed && resp.render);
    assert_eq!(s.text(), "か");
    assert_eq!(s.pending(), "");
    s.handle_key(KeyId::Backspace);
    assert_eq!(s.text(), "");
}

#[test]
fn test_backspace_at_start_is_noop() {
    let mut s = new_session();
    let resp = s.handle_key(KeyId::Backspace);
    assert!(resp.consumed);
    assert_eq!(s.text(), "");
    assert_eq!(s.cursor(), 0);
}

// --- Other modes ---

#[test]
fn test_alphabet_case_toggle() {
    let mut s = new_session();
    s.handle_key(KeyId::Mode(InputMode::Alphabet));
    type_keys(&mut s, "a");
    s.handle_key(KeyId::ToggleCase);
    assert_eq!(s.letter_case(), LetterCase::Upper);
    type_keys(&mut s, "b");
    assert_eq!(s.text(), "aB");
}

#[test]
fn test_symbols_insert_literally() {
    let mut s = new_session();
    s.handle_key(KeyId::Mode(InputMode::Symbols));
    s.handle_key(KeyId::Char('「'));
    s.handle_key(KeyId::Char('-'));
    assert_eq!(s.text(), "「-");
}

// --- Cursor and viewport ---

#[test]
fn test_insert_mid_buffer() {
    let mut s = new_session();
    s.handle_key(KeyId::Mode(InputMode::Alphabet));
    type_keys(&mut s, "ab");
    s.handle_key(KeyId::CursorLeft);
    type_keys(&mut s, "x");
    assert_eq!(s.text(), "axb");
    assert_eq!(s.cursor(), 2);
}

#[test]
fn test_cursor_clamped() {
    let mut s = new_session();
    s.handle_key(KeyId::CursorLeft);
    assert_eq!(s.cursor(), 0);
    type_keys(&mut s, "a");
    s.handle_key(KeyId::CursorRight);
    s.handle_key(KeyId::CursorRight);
    assert_eq!(s.cursor(), 1);
}

#[test]
fn test_cursor_move_flushes_n() {
    let mut s = new_session();
    type_keys(&mut s, "kan");
    s.handle_key(KeyId::CursorLeft);
    assert_eq!(s.text(), "かん");
    assert_eq!(s.cursor(), 1);
}

#[test]
fn test_scroll_follows_cursor() {
    let mut s = new_session();
    for _ in 0..4 {
        s.handle_key(KeyId::Newline);
    }
    // Five lines, caret on the last, three visible.
    assert_eq!(s.scroll_line(), 2);
    for _ in 0..3 {
        s.handle_key(KeyId::CursorLeft);
    }
    // Caret on line 1: minimum movement puts it at the top of the window.
    assert_eq!(s.scroll_line(), 1);
    s.handle_key(KeyId::CursorRight);
    assert_eq!(s.scroll_line(), 1);
}

#[test]
fn test_scroll_clamped_after_delete() {
    let mut s = new_session();
    for _ in 0..4 {
        s.handle_key(KeyId::Newline);
    }
    for _ in 0..4 {
        s.handle_key(KeyId::Backspace);
    }
    assert_eq!(s.scroll_line(), 0);
}

#[test]
fn test_wrap_long_line() {
    let mut s = InputSession::new(SessionConfig {
        columns: 4,
        ..test_config()
    });
    type_keys(&mut s, "aiueo");
    // Five full-width kana at two columns each: two per line.
    let view = s.panel_view();
    assert_eq!(view.lines, owned(&["あい", "うえ", "お"]));
    assert_eq!(view.caret, Some((2, 1)));
}

#[test]
fn test_panel_view_placeholder() {
    let mut s = new_session();
    assert!(s.panel_view().placeholder.is_some());
    type_keys(&mut s, "k");
    let view = s.panel_view();
    assert!(view.placeholder.is_none());
    assert_eq!(view.lines, owned(&["k"]));
    assert_eq!(view.caret, Some((0, 1)));
}

// --- Submit and cancel ---

#[test]
fn test_submit_once() {
    let mut s = new_session();
    type_keys(&mut s, "nekon");
    let resp = s.handle_key(KeyId::Submit);
    assert!(resp.closed);
    let sub = resp.submit.unwrap();
    assert_eq!(sub.text, "ねこん");
    assert_eq!(sub.target, None);

    let again = s.handle_key(KeyId::Submit);
    assert!(!again.consumed);
    assert!(again.submit.is_none());
    assert!(s.is_finished());
}

#[test]
fn test_submit_edit_target() {
    let mut s = InputSession::for_edit(MemoId(7), "既存", test_config());
    assert_eq!(s.cursor(), 2);
    type_keys(&mut s, "a");
    let sub = s.handle_key(KeyId::Submit).submit.unwrap();
    assert_eq!(sub.text, "既存あ");
    assert_eq!(sub.target, Some(MemoId(7)));
}

#[test]
fn test_cancel_never_submits() {
    let mut s = new_session();
    type_keys(&mut s, "neko");
    let resp = s.handle_key(KeyId::Cancel);
    assert!(resp.closed);
    assert!(resp.submit.is_none());
    assert!(s.handle_key(KeyId::Submit).submit.is_none());
}

#[test]
fn test_memo_keys_not_consumed() {
    let mut s = new_session();
    assert!(!s.handle_key(KeyId::MemoList).consumed);
    assert!(!s.handle_key(KeyId::MemoUp).consumed);
}
