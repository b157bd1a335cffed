use tracing::{debug, debug_span};

use vrkb_core::layout::KeyId;

use super::types::{KeyResponse, Submission};
use super::InputSession;

impl InputSession {
    /// Process one logical key and describe what the caller should do.
    pub fn handle_key(&mut self, key: KeyId) -> KeyResponse {
        let _span = debug_span!("handle_key", ?key).entered();

        if self.finished {
            return KeyResponse::not_consumed();
        }

        // Only the candidate bar talks to an active conversion; anything else
        // cancels it and is then processed normally.
        let mut cancelled = false;
        if self.conversion.is_some() {
            match key {
                KeyId::Candidate(slot) => return self.confirm_slot(slot),
                KeyId::PrevPage => return self.flip_page(-1),
                KeyId::NextPage => return self.flip_page(1),
                KeyId::CancelConversion => return self.cancel_conversion(),
                _ => {
                    self.cancel_conversion_silently();
                    cancelled = true;
                }
            }
        }

        let mut resp = match key {
            KeyId::Char(c) => self.type_char(c),
            KeyId::Space => self.insert_at_cursor(" "),
            KeyId::Backspace => self.delete_before_cursor(),
            KeyId::Newline => self.insert_newline(),
            KeyId::CursorLeft => self.move_cursor(-1),
            KeyId::CursorRight => self.move_cursor(1),
            KeyId::Mode(mode) => self.set_mode(mode),
            KeyId::ToggleCase => self.toggle_case(),
            KeyId::Voice => self.toggle_voice(),
            KeyId::Convert => self.start_conversion(),
            KeyId::Submit => self.submit(),
            KeyId::Cancel => self.cancel(),
            // Stale candidate bar click after the conversion ended.
            KeyId::Candidate(_)
            | KeyId::PrevPage
            | KeyId::NextPage
            | KeyId::CancelConversion => KeyResponse::consumed(),
            // Panel switching and memo browsing belong to the controller.
            KeyId::MemoList
            | KeyId::MemoRow(_)
            | KeyId::MemoUp
            | KeyId::MemoDown
            | KeyId::MemoScrollUp
            | KeyId::MemoScrollDown
            | KeyId::MemoEdit
            | KeyId::MemoDelete
            | KeyId::MemoMoveTo
            | KeyId::MemoBack => KeyResponse::not_consumed(),
        };
        if cancelled {
            resp.render = true;
        }
        resp
    }

    /// Finish the session and hand the text over. The submission is emitted
    /// exactly once; later keys are ignored.
    pub fn submit(&mut self) -> KeyResponse {
        if self.finished {
            return KeyResponse::not_consumed();
        }
        self.cancel_conversion_silently();
        self.flush_romaji();
        self.refresh_scroll();
        let mut resp = self.abort_voice();
        self.finished = true;
        debug!(chars = self.buffer.len(), target = ?self.edit_target, "submit");
        resp.render = true;
        resp.closed = true;
        resp.submit = Some(Submission {
            text: self.buffer.text().to_string(),
            target: self.edit_target,
        });
        resp
    }

    /// Close without submitting.
    pub fn cancel(&mut self) -> KeyResponse {
        if self.finished {
            return KeyResponse::not_consumed();
        }
        self.cancel_conversion_silently();
        let mut resp = self.abort_voice();
        self.pending.clear();
        self.refresh_scroll();
        self.finished = true;
        debug!("cancel");
        resp.render = true;
        resp.closed = true;
        resp
    }
}
