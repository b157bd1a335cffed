use tracing::trace;

use vrkb_core::layout::InputMode;
use vrkb_core::romaji::{feed_latin, flush_pending};
use vrkb_core::unicode::hiragana_to_katakana;

use super::types::KeyResponse;
use super::InputSession;

impl InputSession {
    /// Kana output in the active script.
    fn script(&self, hiragana: &str) -> String {
        if self.mode == InputMode::Katakana {
            hiragana_to_katakana(hiragana)
        } else {
            hiragana.to_string()
        }
    }

    /// Feed one latin keystroke to the romaji buffer; resolved kana is
    /// inserted at the cursor.
    pub fn append_latin(&mut self, ch: char) -> KeyResponse {
        self.cancel_conversion_silently();
        let emitted = feed_latin(&mut self.pending, ch, self.table);
        trace!(?ch, pending = %self.pending, ?emitted, "romaji");
        for kana in emitted {
            let text = self.script(&kana);
            self.buffer.insert(&text);
        }
        self.render_response()
    }

    /// Resolve the romaji buffer before a non-romaji action: a trailing "n"
    /// becomes ん, anything else unresolved is dropped.
    pub(crate) fn flush_romaji(&mut self) {
        if let Some(kana) = flush_pending(&mut self.pending) {
            let text = self.script(kana);
            self.edit_buffer(|b| b.insert(&text));
        }
    }

    pub fn insert_at_cursor(&mut self, text: &str) -> KeyResponse {
        self.flush_romaji();
        self.edit_buffer(|b| b.insert(text));
        self.render_response()
    }

    /// Remove the last pending latin character, or else the character before
    /// the cursor.
    pub fn delete_before_cursor(&mut self) -> KeyResponse {
        self.cancel_conversion_silently();
        if self.pending.pop().is_none() {
            self.edit_buffer(|b| b.delete_before());
        }
        self.render_response()
    }

    pub fn move_cursor(&mut self, delta: isize) -> KeyResponse {
        self.flush_romaji();
        self.edit_buffer(|b| b.move_by(delta));
        self.render_response()
    }

    pub fn insert_newline(&mut self) -> KeyResponse {
        self.insert_at_cursor("\n")
    }

    pub fn set_mode(&mut self, mode: InputMode) -> KeyResponse {
        self.cancel_conversion_silently();
        self.flush_romaji();
        self.mode = mode;
        self.render_response()
    }

    pub fn toggle_case(&mut self) -> KeyResponse {
        self.cancel_conversion_silently();
        self.case = self.case.toggled();
        self.render_response()
    }

    /// Route a character key according to the active mode.
    pub(crate) fn type_char(&mut self, c: char) -> KeyResponse {
        match self.mode {
            InputMode::Hiragana | InputMode::Katakana
                if vrkb_core::romaji::is_romaji_key(c) =>
            {
                self.append_latin(c)
            }
            InputMode::Alphabet if c.is_ascii_alphabetic() => {
                let c = self.case.apply(c);
                self.insert_at_cursor(c.encode_utf8(&mut [0; 4]))
            }
            _ => self.insert_at_cursor(c.encode_utf8(&mut [0; 4])),
        }
    }
}
