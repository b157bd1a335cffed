use vrkb_core::viewport::{cursor_position, follow_cursor, wrap};

use super::types::KeyResponse;
use super::InputSession;

impl InputSession {
    /// Buffer text with pending romaji spliced in at the cursor, and the
    /// caret position after it.
    pub fn display_text(&self) -> (String, usize) {
        let text = self.buffer.text();
        let cursor = self.buffer.cursor();
        if self.pending.is_empty() {
            return (text.to_string(), cursor);
        }
        let at = text
            .char_indices()
            .nth(cursor)
            .map_or(text.len(), |(i, _)| i);
        let display = format!("{}{}{}", &text[..at], self.pending, &text[at..]);
        (display, cursor + self.pending.chars().count())
    }

    /// Keep the caret line inside the visible window.
    pub(crate) fn refresh_scroll(&mut self) {
        let (display, caret) = self.display_text();
        let lines = wrap(&display, self.config.columns);
        let (line, _) = cursor_position(&lines, caret);
        self.scroll_line = follow_cursor(self.scroll_line, line, self.config.visible_lines);
        // Deleting text can shrink the buffer below the window.
        let max_scroll = lines.len().saturating_sub(self.config.visible_lines);
        self.scroll_line = self.scroll_line.min(max_scroll);
    }

    pub(super) fn render_response(&mut self) -> KeyResponse {
        self.refresh_scroll();
        KeyResponse::rendered()
    }
}
