//! Keystroke scripts for replaying input without a headset.
//!
//! Plain characters press the key for that character (`KeyId::from_char`).
//! Named keys go in angle brackets: `<convert>`, `<cand:1>`, `<mode:katakana>`.
//! `<lt>` types a literal `<`.

use vrkb_core::layout::{InputMode, KeyId};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ScriptError {
    #[error("unterminated key name starting at offset {0}")]
    Unterminated(usize),
    #[error("unknown key <{0}>")]
    UnknownKey(String),
    #[error("invalid argument in <{0}>")]
    BadArgument(String),
}

pub fn parse_script(script: &str) -> Result<Vec<KeyId>, ScriptError> {
    let mut keys = Vec::new();
    let mut rest = script.char_indices();
    while let Some((offset, c)) = rest.next() {
        if c != '<' {
            keys.push(KeyId::from_char(c));
            continue;
        }
        let mut name = String::new();
        let mut closed = false;
        for (_, c) in rest.by_ref() {
            if c == '>' {
                closed = true;
                break;
            }
            name.push(c);
        }
        if !closed {
            return Err(ScriptError::Unterminated(offset));
        }
        keys.push(named_key(&name)?);
    }
    Ok(keys)
}

fn named_key(name: &str) -> Result<KeyId, ScriptError> {
    let (head, arg) = match name.split_once(':') {
        Some((h, a)) => (h, Some(a)),
        None => (name, None),
    };
    let index = || -> Result<usize, ScriptError> {
        arg.and_then(|a| a.parse().ok())
            .ok_or_else(|| ScriptError::BadArgument(name.to_string()))
    };
    let key = match head {
        "lt" => KeyId::Char('<'),
        "bs" => KeyId::Backspace,
        "space" => KeyId::Space,
        "enter" => KeyId::Newline,
        "left" => KeyId::CursorLeft,
        "right" => KeyId::CursorRight,
        "case" => KeyId::ToggleCase,
        "voice" => KeyId::Voice,
        "convert" => KeyId::Convert,
        "submit" => KeyId::Submit,
        "cancel" => KeyId::Cancel,
        "list" => KeyId::MemoList,
        "mode" => KeyId::Mode(parse_mode(arg.unwrap_or(""))
            .ok_or_else(|| ScriptError::BadArgument(name.to_string()))?),
        "cand" => KeyId::Candidate(index()?),
        "prev" => KeyId::PrevPage,
        "next" => KeyId::NextPage,
        "nocand" => KeyId::CancelConversion,
        "row" => KeyId::MemoRow(index()?),
        "up" => KeyId::MemoUp,
        "down" => KeyId::MemoDown,
        "scrollup" => KeyId::MemoScrollUp,
        "scrolldown" => KeyId::MemoScrollDown,
        "edit" => KeyId::MemoEdit,
        "delete" => KeyId::MemoDelete,
        "moveto" => KeyId::MemoMoveTo,
        "back" => KeyId::MemoBack,
        _ => return Err(ScriptError::UnknownKey(name.to_string())),
    };
    Ok(key)
}

pub fn parse_mode(s: &str) -> Option<InputMode> {
    match s {
        "hiragana" | "kana" => Some(InputMode::Hiragana),
        "katakana" => Some(InputMode::Katakana),
        "alphabet" | "abc" => Some(InputMode::Alphabet),
        "symbols" => Some(InputMode::Symbols),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_chars() {
        assert_eq!(
            parse_script("Ka 1").unwrap(),
            vec![
                KeyId::Char('k'),
                KeyId::Char('a'),
                KeyId::Space,
                KeyId::Char('1')
            ]
        );
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(
            parse_script("neko<convert><cand:1><submit>").unwrap()[4..],
            [KeyId::Convert, KeyId::Candidate(1), KeyId::Submit]
        );
        assert_eq!(
            parse_script("<mode:katakana><lt>").unwrap(),
            vec![KeyId::Mode(InputMode::Katakana), KeyId::Char('<')]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_script("ab<conv"), Err(ScriptError::Unterminated(2)));
        assert_eq!(
            parse_script("<warp>"),
            Err(ScriptError::UnknownKey("warp".into()))
        );
        assert_eq!(
            parse_script("<cand:x>"),
            Err(ScriptError::BadArgument("cand:x".into()))
        );
        assert_eq!(
            parse_script("<mode>"),
            Err(ScriptError::BadArgument("mode".into()))
        );
    }
}
