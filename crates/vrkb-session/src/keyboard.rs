//! Panel controller: which surface is showing, and the memo store writes
//! that follow from submit, edit and delete.

use tracing::{debug, debug_span};

use vrkb_core::geometry::{viewpoint_for, Vec3};
use vrkb_core::layout::{layout_for, InputMode, KeyId, KeyboardLayout, LetterCase, Overlay};
use vrkb_core::memo::{preview, MemoRecord, MemoStore};
use vrkb_core::render::PanelView;
use vrkb_core::settings::Settings;

use crate::memo_list::MemoListSession;
use crate::types::{CandidateError, KeyResponse, SessionConfig, Submission, VoiceError};
use crate::InputSession;

/// What the input session was opened for.
pub enum InputOrigin {
    /// New memo to be created at `position`.
    NewMemo { position: Vec3 },
    /// Editing from the memo browser, which is restored afterwards.
    Edit { list: MemoListSession },
}

pub enum PanelState {
    Hidden,
    Input {
        session: Box<InputSession>,
        origin: InputOrigin,
    },
    MemoList(MemoListSession),
}

/// Generation range reserved for each input session.
const GENERATION_STRIDE: u64 = 1 << 32;

/// Keyboard panel over a memo store.
pub struct Keyboard<S: MemoStore> {
    store: S,
    state: PanelState,
    settings: Settings,
    /// Sessions opened so far; selects the next session's generation range.
    sessions_opened: u64,
}

impl<S: MemoStore> Keyboard<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            store,
            state: PanelState::Hidden,
            settings,
            sessions_opened: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self.state, PanelState::Hidden)
    }

    pub fn session(&self) -> Option<&InputSession> {
        match &self.state {
            PanelState::Input { session, .. } => Some(session.as_ref()),
            _ => None,
        }
    }

    pub fn memo_list(&self) -> Option<&MemoListSession> {
        match &self.state {
            PanelState::MemoList(list) => Some(list),
            _ => None,
        }
    }

    fn config(&self) -> SessionConfig {
        SessionConfig::from_settings(&self.settings)
    }

    /// Give a fresh session its own generation range, so late results
    /// addressed to a closed session cannot match the new one.
    fn open_session(&mut self, session: InputSession) -> Box<InputSession> {
        let base = self.sessions_opened.wrapping_mul(GENERATION_STRIDE);
        self.sessions_opened += 1;
        Box::new(session.with_generation_base(base))
    }

    /// Close whatever is showing. An outstanding voice request is aborted.
    fn close_current(&mut self) -> KeyResponse {
        match std::mem::replace(&mut self.state, PanelState::Hidden) {
            PanelState::Input { mut session, .. } => session.cancel(),
            PanelState::MemoList(_) => {
                let mut resp = KeyResponse::rendered();
                resp.closed = true;
                resp
            }
            PanelState::Hidden => KeyResponse::consumed(),
        }
    }

    /// Open an empty input session for a memo at `position`.
    pub fn show_for_new(&mut self, position: Vec3) -> KeyResponse {
        let resp = self.close_current();
        let session = self.open_session(InputSession::new(self.config()));
        self.state = PanelState::Input {
            session,
            origin: InputOrigin::NewMemo { position },
        };
        debug!(?position, "keyboard shown");
        let mut resp = resp.merge(KeyResponse::rendered());
        resp.closed = false;
        resp
    }

    /// Open the memo browser.
    pub fn show_memo_list(&mut self) -> KeyResponse {
        let resp = self.close_current();
        let list = MemoListSession::open(
            self.store.get_all().len(),
            self.settings.memo_list.visible_rows,
        );
        self.state = PanelState::MemoList(list);
        let mut resp = resp.merge(KeyResponse::rendered());
        resp.closed = false;
        resp
    }

    pub fn hide(&mut self) -> KeyResponse {
        let mut resp = self.close_current();
        resp.closed = true;
        resp.render = true;
        resp
    }

    /// Layout of the visible panel.
    pub fn layout(&self) -> Option<KeyboardLayout> {
        match &self.state {
            PanelState::Hidden => None,
            PanelState::Input { session, .. } => Some(session.layout(&self.settings)),
            PanelState::MemoList(list) => {
                let memos = self.store.get_all();
                let rows = self.row_labels(list, &memos);
                Some(layout_for(
                    InputMode::Hiragana,
                    LetterCase::Lower,
                    Overlay::MemoList {
                        rows: &rows,
                        selected: list.selected_slot(),
                    },
                    &self.settings,
                ))
            }
        }
    }

    fn row_labels(&self, list: &MemoListSession, memos: &[MemoRecord]) -> Vec<String> {
        memos[list.visible_range(memos.len())]
            .iter()
            .map(|m| preview(&m.text, self.settings.memo_list.preview_chars))
            .collect()
    }

    /// Text area contents for the visible panel.
    pub fn panel_view(&self) -> Option<PanelView> {
        match &self.state {
            PanelState::Hidden => None,
            PanelState::Input { session, .. } => Some(session.panel_view()),
            PanelState::MemoList(list) => {
                let count = self.store.get_all().len();
                Some(PanelView {
                    title: "メモ一覧".to_string(),
                    status: Some(match list.selected() {
                        Some(i) => format!("{} / {}", i + 1, count),
                        None => "メモがありません".to_string(),
                    }),
                    ..PanelView::default()
                })
            }
        }
    }

    /// Resolve a panel point and press the key found there.
    pub fn click(&mut self, x: f32, y: f32) -> KeyResponse {
        let Some(layout) = self.layout() else {
            return KeyResponse::not_consumed();
        };
        match layout.hit_test(x, y) {
            Some(key) => self.press(key),
            None => KeyResponse::not_consumed(),
        }
    }

    pub fn press(&mut self, key: KeyId) -> KeyResponse {
        let _span = debug_span!("press", ?key).entered();
        match std::mem::replace(&mut self.state, PanelState::Hidden) {
            PanelState::Hidden => KeyResponse::not_consumed(),
            PanelState::Input { session, origin } => self.press_input(session, origin, key),
            PanelState::MemoList(list) => self.press_memo_list(list, key),
        }
    }

    fn press_input(
        &mut self,
        mut session: Box<InputSession>,
        origin: InputOrigin,
        key: KeyId,
    ) -> KeyResponse {
        if key == KeyId::MemoList {
            let resp = session.cancel();
            let list = match origin {
                InputOrigin::Edit { list } => list,
                InputOrigin::NewMemo { .. } => MemoListSession::open(
                    self.store.get_all().len(),
                    self.settings.memo_list.visible_rows,
                ),
            };
            self.state = PanelState::MemoList(list);
            let mut resp = resp;
            resp.closed = false;
            return resp;
        }

        let mut resp = session.handle_key(key);
        if !resp.closed {
            self.state = PanelState::Input { session, origin };
            return resp;
        }

        if let Some(submission) = &resp.submit {
            self.store_submission(submission, &origin);
        }
        match origin {
            InputOrigin::Edit { mut list } => {
                list.reclamp(self.store.get_all().len());
                self.state = PanelState::MemoList(list);
                // Back in the browser, the panel stays up.
                resp.closed = false;
                resp.render = true;
            }
            InputOrigin::NewMemo { .. } => self.state = PanelState::Hidden,
        }
        resp
    }

    fn store_submission(&mut self, submission: &Submission, origin: &InputOrigin) {
        if submission.text.is_empty() {
            debug!("empty submission not stored");
            return;
        }
        match (submission.target, origin) {
            (Some(id), _) => {
                if !self.store.update(id, &submission.text) {
                    debug!(?id, "edited memo no longer exists");
                }
            }
            (None, InputOrigin::NewMemo { position }) => {
                let id = self.store.create(*position, &submission.text);
                debug!(?id, "memo created");
            }
            (None, InputOrigin::Edit { .. }) => {}
        }
    }

    fn press_memo_list(&mut self, mut list: MemoListSession, key: KeyId) -> KeyResponse {
        let memos = self.store.get_all();
        let len = memos.len();
        let changed = match key {
            KeyId::MemoRow(slot) => list.select_slot(slot, len),
            KeyId::MemoUp => list.move_selection(-1, len),
            KeyId::MemoDown => list.move_selection(1, len),
            KeyId::MemoScrollUp => list.scroll_by(-1, len),
            KeyId::MemoScrollDown => list.scroll_by(1, len),
            KeyId::MemoEdit => {
                let Some(memo) = list.selected().and_then(|i| memos.get(i)) else {
                    self.state = PanelState::MemoList(list);
                    return KeyResponse::consumed();
                };
                let session = InputSession::for_edit(memo.id, &memo.text, self.config());
                let session = self.open_session(session);
                self.state = PanelState::Input {
                    session,
                    origin: InputOrigin::Edit { list },
                };
                return KeyResponse::rendered();
            }
            KeyId::MemoDelete => match list.selected().and_then(|i| memos.get(i)) {
                Some(memo) => {
                    self.store.delete(memo.id);
                    debug!(id = ?memo.id, "memo deleted");
                    list.reclamp(self.store.get_all().len());
                    true
                }
                None => false,
            },
            KeyId::MemoMoveTo => {
                let target = list.selected().and_then(|i| memos.get(i));
                self.state = PanelState::MemoList(list);
                let mut resp = KeyResponse::consumed();
                resp.viewpoint = target.map(|m| {
                    viewpoint_for(m.position, m.rotation, self.settings.viewpoint.distance)
                });
                return resp;
            }
            KeyId::MemoBack => {
                let mut resp = KeyResponse::rendered();
                resp.closed = true;
                return resp;
            }
            _ => {
                self.state = PanelState::MemoList(list);
                return KeyResponse::not_consumed();
            }
        };
        self.state = PanelState::MemoList(list);
        if changed {
            KeyResponse::rendered()
        } else {
            KeyResponse::consumed()
        }
    }

    pub fn receive_candidates(
        &mut self,
        generation: u64,
        result: Result<Vec<String>, CandidateError>,
    ) -> Option<KeyResponse> {
        match &mut self.state {
            PanelState::Input { session, .. } => session.receive_candidates(generation, result),
            _ => None,
        }
    }

    pub fn receive_voice(
        &mut self,
        generation: u64,
        result: Result<String, VoiceError>,
    ) -> Option<KeyResponse> {
        match &mut self.state {
            PanelState::Input { session, .. } => session.receive_voice(generation, result),
            _ => None,
        }
    }
}
