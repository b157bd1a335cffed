use vrkb_core::render::PanelView;
use vrkb_core::viewport::{cursor_position, wrap};

use super::types::{PLACEHOLDER, TITLE};
use super::InputSession;

impl InputSession {
    /// Snapshot of everything the panel draws besides the keys.
    pub fn panel_view(&self) -> PanelView {
        let (display, caret) = self.display_text();
        let chars: Vec<char> = display.chars().collect();
        let lines = wrap(&display, self.config.columns);
        let (caret_line, caret_col) = cursor_position(&lines, caret);

        let first = self.scroll_line.min(lines.len().saturating_sub(1));
        let last = (first + self.config.visible_lines).min(lines.len());
        let window = &lines[first..last];

        let span = self
            .conversion
            .as_ref()
            .map(|c| (c.span_start, c.span_start + c.span_len));

        let mut underline = Vec::new();
        if let Some((s, e)) = span {
            for (i, line) in window.iter().enumerate() {
                let from = s.max(line.start);
                let to = e.min(line.end);
                if from < to {
                    underline.push((i, from - line.start, to - line.start));
                }
            }
        }

        PanelView {
            title: TITLE.to_string(),
            lines: window
                .iter()
                .map(|l| chars[l.start..l.end].iter().collect())
                .collect(),
            caret: (first..last)
                .contains(&caret_line)
                .then_some((caret_line - first, caret_col)),
            underline,
            placeholder: display.is_empty().then(|| PLACEHOLDER.to_string()),
            recording: self.voice.active,
            status: None,
        }
    }
}
