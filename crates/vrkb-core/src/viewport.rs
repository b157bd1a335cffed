//! Visual line wrapping and cursor-following scroll for the text area.
//!
//! Positions are character indices into the displayed text. Logical lines end
//! at '\n'; each logical line is further wrapped at a fixed display-column
//! width measured with `unicode-width` (full-width kana count as 2 columns).

use unicode_width::UnicodeWidthChar;

/// One visual (wrapped) line: `text[start..end]` in characters, excluding
/// any terminating newline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    pub start: usize,
    pub end: usize,
}

/// Wrap `text` into visual lines no wider than `columns`.
///
/// Always returns at least one line, so an empty buffer still has a line for
/// the caret.
pub fn wrap(text: &str, columns: usize) -> Vec<VisualLine> {
    let columns = columns.max(1);
    let mut lines = Vec::new();
    let mut start = 0;
    let mut width = 0;

    for (i, ch) in text.chars().enumerate() {
        if ch == '\n' {
            lines.push(VisualLine { start, end: i });
            start = i + 1;
            width = 0;
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if width + w > columns && i > start {
            lines.push(VisualLine { start, end: i });
            start = i;
            width = 0;
        }
        width += w;
    }

    let total = text.chars().count();
    lines.push(VisualLine { start, end: total });
    lines
}

/// Visual line index and column (in characters) of `cursor`.
///
/// At a soft wrap boundary the caret belongs to the start of the next line.
pub fn cursor_position(lines: &[VisualLine], cursor: usize) -> (usize, usize) {
    let line = lines
        .iter()
        .rposition(|l| l.start <= cursor)
        .unwrap_or(0);
    let col = cursor.saturating_sub(lines.get(line).map_or(0, |l| l.start));
    (line, col)
}

/// Minimum-movement scroll that keeps `cursor_line` inside a window of
/// `visible` lines starting at `scroll`.
pub fn follow_cursor(scroll: usize, cursor_line: usize, visible: usize) -> usize {
    let visible = visible.max(1);
    if cursor_line < scroll {
        cursor_line
    } else if cursor_line >= scroll + visible {
        cursor_line + 1 - visible
    } else {
        scroll
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_empty_text_has_one_line() {
        assert_eq!(wrap("", 10), vec![VisualLine { start: 0, end: 0 }]);
    }

    #[test]
    fn test_hard_breaks() {
        let lines = wrap("ab\ncd\n", 10);
        assert_eq!(
            lines,
            vec![
                VisualLine { start: 0, end: 2 },
                VisualLine { start: 3, end: 5 },
                VisualLine { start: 6, end: 6 },
            ]
        );
    }

    #[test]
    fn test_soft_wrap_counts_wide_chars() {
        // Each kana is two columns wide, so four columns fit two of them.
        let lines = wrap("あいうえ", 4);
        assert_eq!(
            lines,
            vec![
                VisualLine { start: 0, end: 2 },
                VisualLine { start: 2, end: 4 },
            ]
        );
    }

    #[test]
    fn test_cursor_on_hard_break() {
        let lines = wrap("ab\ncd", 10);
        assert_eq!(cursor_position(&lines, 2), (0, 2));
        assert_eq!(cursor_position(&lines, 3), (1, 0));
        assert_eq!(cursor_position(&lines, 5), (1, 2));
    }

    #[test]
    fn test_cursor_on_soft_wrap_goes_to_next_line() {
        let lines = wrap("あいうえ", 4);
        assert_eq!(cursor_position(&lines, 2), (1, 0));
    }

    #[test]
    fn test_follow_cursor_minimum_movement() {
        assert_eq!(follow_cursor(0, 2, 3), 0);
        assert_eq!(follow_cursor(0, 3, 3), 1);
        assert_eq!(follow_cursor(0, 7, 3), 5);
        assert_eq!(follow_cursor(5, 4, 3), 4);
        assert_eq!(follow_cursor(5, 6, 3), 5);
    }

    proptest! {
        #[test]
        fn cursor_line_always_visible(
            scroll in 0usize..50,
            line in 0usize..50,
            visible in 1usize..6,
        ) {
            let s = follow_cursor(scroll, line, visible);
            prop_assert!(s <= line && line < s + visible);
            // Never moves further than needed.
            if line >= scroll && line < scroll + visible {
                prop_assert_eq!(s, scroll);
            }
        }

        #[test]
        fn wrapped_lines_cover_text(text in "[a-zあい\n]{0,40}", columns in 1usize..12) {
            let lines = wrap(&text, columns);
            let total = text.chars().count();
            prop_assert_eq!(lines.first().map(|l| l.start), Some(0));
            prop_assert_eq!(lines.last().map(|l| l.end), Some(total));
            for pair in lines.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }
    }
}
