use super::table::{RomajiTable, MAX_KEY_LEN};

/// Consonants that produce a small っ when doubled. 'n' is handled by the
/// "nn" rule instead.
pub fn is_gemination_consonant(c: char) -> bool {
    matches!(
        c,
        'b' | 'c'
            | 'd'
            | 'f'
            | 'g'
            | 'h'
            | 'j'
            | 'k'
            | 'l'
            | 'm'
            | 'p'
            | 'q'
            | 'r'
            | 's'
            | 't'
            | 'v'
            | 'w'
            | 'x'
            | 'y'
            | 'z'
    )
}

/// Keys that go through the romaji buffer in kana modes.
pub fn is_romaji_key(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-'
}

/// Append one latin keystroke to `pending` and return the hiragana tokens it
/// resolves, in emission order.
///
/// `pending` only ever holds unresolved latin input; it is cleared whenever a
/// table entry matches.
pub fn feed_latin(pending: &mut String, ch: char, table: &RomajiTable) -> Vec<String> {
    pending.push(ch.to_ascii_lowercase());

    if pending == "nn" {
        pending.clear();
        return vec!["ん".to_string()];
    }

    let mut emitted = Vec::new();

    let chars: Vec<char> = pending.chars().collect();
    if let [.., a, b] = chars.as_slice() {
        if a == b && is_gemination_consonant(*a) {
            emitted.push("っ".to_string());
            *pending = b.to_string();
        }
    }

    let chars: Vec<char> = pending.chars().collect();
    for len in (1..=MAX_KEY_LEN.min(chars.len())).rev() {
        let tail: String = chars[chars.len() - len..].iter().collect();
        // A lone "n" is ambiguous until the next key arrives.
        if tail == "n" {
            continue;
        }
        if let Some(kana) = table.get(&tail) {
            emitted.push(kana.to_string());
            pending.clear();
            break;
        }
    }

    emitted
}

/// Resolve whatever is left in `pending` before a non-romaji action.
///
/// A trailing "n" becomes ん; any other unresolved latin is discarded.
pub fn flush_pending(pending: &mut String) -> Option<&'static str> {
    let trailing_n = pending.ends_with('n');
    pending.clear();
    trailing_n.then_some("ん")
}
