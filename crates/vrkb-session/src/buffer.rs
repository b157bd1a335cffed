/// Editable text with a cursor. Positions are character offsets, never bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
    cursor: usize,
}

impl TextBuffer {
    /// Buffer holding `text` with the cursor at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn byte_offset(&self, char_pos: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_pos)
            .map_or(self.text.len(), |(i, _)| i)
    }

    pub fn insert(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Remove the character before the cursor. Returns it, or `None` at the
    /// start of the buffer.
    pub fn delete_before(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        let at = self.byte_offset(self.cursor - 1);
        let removed = self.text.remove(at);
        self.cursor -= 1;
        Some(removed)
    }

    /// Move by `delta` characters, clamped to `[0, len]`.
    pub fn move_by(&mut self, delta: isize) {
        let target = self.cursor as isize + delta;
        self.cursor = target.clamp(0, self.len() as isize) as usize;
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.len());
    }

    /// `len` characters starting at `start`.
    pub fn slice(&self, start: usize, len: usize) -> String {
        self.text.chars().skip(start).take(len).collect()
    }

    /// Replace `len` characters at `start` with `with`; the cursor lands after
    /// the inserted text.
    pub fn replace(&mut self, start: usize, len: usize, with: &str) {
        let start = start.min(self.len());
        let a = self.byte_offset(start);
        let b = self.byte_offset(start + len);
        self.text.replace_range(a..b, with);
        self.cursor = start + with.chars().count();
    }

    /// Start of the run of characters matching `pred` that ends at the cursor.
    pub fn run_start_before_cursor(&self, pred: impl Fn(char) -> bool) -> usize {
        let before: Vec<char> = self.text.chars().take(self.cursor).collect();
        let run = before.iter().rev().take_while(|&&c| pred(c)).count();
        self.cursor - run
    }
}
