//! Memo browser selection and scrolling.
//!
//! Selection and scroll are independent: scrolling never moves the
//! selection, but moving the selection scrolls just enough to keep it
//! visible.

use vrkb_core::viewport::follow_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoListSession {
    /// Absolute index into the memo list.
    selected: Option<usize>,
    /// Index of the first visible row.
    scroll: usize,
    visible_rows: usize,
}

impl MemoListSession {
    /// Fresh browser over `len` memos; the first memo is selected if any.
    pub fn open(len: usize, visible_rows: usize) -> Self {
        Self {
            selected: (len > 0).then_some(0),
            scroll: 0,
            visible_rows: visible_rows.max(1),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    fn max_scroll(&self, len: usize) -> usize {
        len.saturating_sub(self.visible_rows)
    }

    /// Visible slot holding the selection, if it is on screen.
    pub fn selected_slot(&self) -> Option<usize> {
        let sel = self.selected?;
        (self.scroll..self.scroll + self.visible_rows)
            .contains(&sel)
            .then(|| sel - self.scroll)
    }

    /// Absolute indices currently on screen.
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.scroll.min(len);
        start..(start + self.visible_rows).min(len)
    }

    /// Move the selection by `delta`, clamped, scrolling minimally to keep
    /// it visible.
    pub fn move_selection(&mut self, delta: isize, len: usize) -> bool {
        if len == 0 {
            self.selected = None;
            return false;
        }
        let current = self.selected.unwrap_or(0) as isize;
        let next = if self.selected.is_none() {
            0
        } else {
            (current + delta).clamp(0, len as isize - 1) as usize
        };
        let changed = self.selected != Some(next);
        self.selected = Some(next);
        self.scroll = follow_cursor(self.scroll, next, self.visible_rows).min(self.max_scroll(len));
        changed
    }

    /// Scroll the window by `delta` rows without touching the selection.
    pub fn scroll_by(&mut self, delta: isize, len: usize) -> bool {
        let target = (self.scroll as isize + delta).clamp(0, self.max_scroll(len) as isize) as usize;
        let changed = target != self.scroll;
        self.scroll = target;
        changed
    }

    /// Select the memo shown in visible `slot`. Empty slots are ignored.
    pub fn select_slot(&mut self, slot: usize, len: usize) -> bool {
        if slot >= self.visible_rows {
            return false;
        }
        let index = self.scroll + slot;
        if index >= len {
            return false;
        }
        self.selected = Some(index);
        true
    }

    /// Re-clamp selection and scroll to a list of `len` entries, e.g. after
    /// a delete or when returning from an edit.
    pub fn reclamp(&mut self, len: usize) {
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => None,
        };
        self.scroll = self.scroll.min(self.max_scroll(len));
        if let Some(sel) = self.selected {
            self.scroll = follow_cursor(self.scroll, sel, self.visible_rows);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_selects_first() {
        assert_eq!(MemoListSession::open(3, 5).selected(), Some(0));
        assert_eq!(MemoListSession::open(0, 5).selected(), None);
    }

    #[test]
    fn test_move_clamps_and_scrolls() {
        let mut list = MemoListSession::open(10, 3);
        list.move_selection(2, 10);
        assert_eq!((list.selected(), list.scroll()), (Some(2), 0));
        list.move_selection(1, 10);
        assert_eq!((list.selected(), list.scroll()), (Some(3), 1));
        list.move_selection(100, 10);
        assert_eq!((list.selected(), list.scroll()), (Some(9), 7));
        list.move_selection(-100, 10);
        assert_eq!((list.selected(), list.scroll()), (Some(0), 0));
        assert!(!list.move_selection(-1, 10));
    }

    #[test]
    fn test_scroll_keeps_selection() {
        let mut list = MemoListSession::open(10, 3);
        assert!(list.scroll_by(4, 10));
        assert_eq!(list.selected(), Some(0));
        assert_eq!(list.selected_slot(), None);
        list.scroll_by(100, 10);
        assert_eq!(list.scroll(), 7);
        assert!(!list.scroll_by(1, 10));
        list.scroll_by(-100, 10);
        assert_eq!(list.scroll(), 0);
    }

    #[test]
    fn test_scroll_short_list() {
        let mut list = MemoListSession::open(2, 5);
        assert!(!list.scroll_by(1, 2));
        assert_eq!(list.scroll(), 0);
    }

    #[test]
    fn test_select_slot() {
        let mut list = MemoListSession::open(4, 3);
        list.scroll_by(1, 4);
        assert!(list.select_slot(2, 4));
        assert_eq!(list.selected(), Some(3));
        assert_eq!(list.selected_slot(), Some(2));
        assert!(!list.select_slot(3, 4));
    }

    #[test]
    fn test_select_empty_slot_ignored() {
        let mut list = MemoListSession::open(2, 5);
        assert!(!list.select_slot(3, 2));
        assert_eq!(list.selected(), Some(0));
    }

    #[test]
    fn test_reclamp_after_delete() {
        let mut list = MemoListSession::open(5, 3);
        list.move_selection(4, 5);
        assert_eq!(list.scroll(), 2);
        list.reclamp(4);
        assert_eq!(list.selected(), Some(3));
        assert_eq!(list.scroll(), 1);
        list.reclamp(0);
        assert_eq!(list.selected(), None);
        assert_eq!(list.scroll(), 0);
    }

    #[test]
    fn test_visible_range() {
        let mut list = MemoListSession::open(7, 5);
        assert_eq!(list.visible_range(7), 0..5);
        list.scroll_by(2, 7);
        assert_eq!(list.visible_range(7), 2..7);
    }
}
