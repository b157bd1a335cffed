//! Keyboard input session: text buffer, romaji composition, conversion and
//! voice state, plus the memo-browsing controller around it.
//!
//! `InputSession` owns the editing state for one keyboard show and processes
//! each key, returning a [`KeyResponse`] describing the side effects the host
//! must perform (redraw, submit, async requests). It never calls out itself.

pub(crate) mod types;

mod buffer;
mod composing;
mod conversion;
mod key_handlers;
mod response;
mod view;
mod voice;

pub mod keyboard;
pub mod memo_list;
pub mod render_gate;

#[cfg(test)]
mod tests;

use vrkb_core::layout::{layout_for, InputMode, KeyboardLayout, LetterCase, Overlay};
use vrkb_core::memo::MemoId;
use vrkb_core::romaji::RomajiTable;
use vrkb_core::settings::Settings;

pub use buffer::TextBuffer;
pub use keyboard::{InputOrigin, Keyboard, PanelState};
pub use memo_list::MemoListSession;
pub use render_gate::{RenderGate, RenderRequest};
pub use types::{
    AsyncCandidateRequest, CandidateError, ConversionSession, KeyResponse, SessionConfig,
    StatusNotice, Submission, VoiceCommand, VoiceError,
};

use types::VoiceState;

/// Editing state for one keyboard session.
pub struct InputSession {
    buffer: TextBuffer,
    /// Unresolved romaji, displayed at the cursor.
    pending: String,
    mode: InputMode,
    case: LetterCase,
    scroll_line: usize,
    voice: VoiceState,
    conversion: Option<ConversionSession>,
    conversion_generation: u64,
    edit_target: Option<MemoId>,
    config: SessionConfig,
    table: &'static RomajiTable,
    /// Set once the session has submitted or cancelled; later keys are ignored.
    finished: bool,
}

impl InputSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            buffer: TextBuffer::default(),
            pending: String::new(),
            mode: InputMode::Hiragana,
            case: LetterCase::Lower,
            scroll_line: 0,
            voice: VoiceState::default(),
            conversion: None,
            conversion_generation: 0,
            edit_target: None,
            config,
            table: RomajiTable::global(),
            finished: false,
        }
    }

    /// Session editing an existing memo: prefilled, cursor at the end.
    pub fn for_edit(id: MemoId, text: &str, config: SessionConfig) -> Self {
        let mut s = Self::new(config);
        s.buffer = TextBuffer::with_text(text);
        s.edit_target = Some(id);
        s.refresh_scroll();
        s
    }

    /// Start both generation counters at `base`, so tokens issued by this
    /// session never collide with those of an earlier session.
    pub fn with_generation_base(mut self, base: u64) -> Self {
        self.conversion_generation = base;
        self.voice.generation = base;
        self
    }

    pub fn with_table(mut self, table: &'static RomajiTable) -> Self {
        self.table = table;
        self
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn letter_case(&self) -> LetterCase {
        self.case
    }

    pub fn scroll_line(&self) -> usize {
        self.scroll_line
    }

    pub fn is_voice_active(&self) -> bool {
        self.voice.active
    }

    pub fn conversion(&self) -> Option<&ConversionSession> {
        self.conversion.as_ref()
    }

    pub fn is_converting(&self) -> bool {
        self.conversion.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn edit_target(&self) -> Option<MemoId> {
        self.edit_target
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Candidates on the visible page, if a conversion is active.
    pub fn candidate_page(&self) -> Option<&[String]> {
        self.conversion
            .as_ref()
            .map(|c| c.page_items(self.config.page_size))
    }

    /// Layout for the current state: the candidate bar replaces the keys
    /// while converting.
    pub fn layout(&self, settings: &Settings) -> KeyboardLayout {
        let overlay = match self.candidate_page() {
            Some(labels) => Overlay::Candidates { labels },
            None => Overlay::Keys,
        };
        layout_for(self.mode, self.case, overlay, settings)
    }

    /// Buffer mutation entry point: any edit invalidates an active conversion.
    fn edit_buffer<R>(&mut self, f: impl FnOnce(&mut TextBuffer) -> R) -> R {
        self.cancel_conversion_silently();
        f(&mut self.buffer)
    }
}
