mod basic;

use vrkb_core::geometry::Vec3;
use vrkb_core::layout::KeyId;
use vrkb_core::memo::{MemoId, MemoRecord, MemoStore};
use vrkb_core::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};

use super::{InputSession, KeyResponse, SessionConfig};

pub(super) fn test_config() -> SessionConfig {
    SessionConfig {
        visible_lines: 3,
        columns: 40,
        page_size: 5,
    }
}

pub(super) fn test_settings() -> Settings {
    parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
}

pub(super) fn new_session() -> InputSession {
    InputSession::new(test_config())
}

// Helper: press one key per character, the way a replayed keystroke log does
pub(super) fn type_keys(session: &mut InputSession, s: &str) -> Vec<KeyResponse> {
    s.chars()
        .map(|ch| session.handle_key(KeyId::from_char(ch)))
        .collect()
}

pub(super) fn owned(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// Minimal ordered store for controller tests.
#[derive(Default)]
pub(super) struct VecStore {
    pub(super) memos: Vec<MemoRecord>,
    next_id: u64,
}

impl VecStore {
    pub(super) fn with_texts(texts: &[&str]) -> Self {
        let mut store = Self::default();
        for (i, text) in texts.iter().enumerate() {
            store.create(Vec3::new(i as f32, 0.0, 0.0), text);
        }
        store
    }

    pub(super) fn texts(&self) -> Vec<String> {
        self.memos.iter().map(|m| m.text.clone()).collect()
    }
}

impl MemoStore for VecStore {
    fn create(&mut self, position: Vec3, text: &str) -> MemoId {
        self.next_id += 1;
        let id = MemoId(self.next_id);
        self.memos.push(MemoRecord {
            id,
            text: text.to_string(),
            position,
            rotation: Vec3::default(),
        });
        id
    }

    fn update(&mut self, id: MemoId, text: &str) -> bool {
        match self.memos.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: MemoId) {
        self.memos.retain(|m| m.id != id);
    }

    fn get_all(&self) -> Vec<MemoRecord> {
        self.memos.clone()
    }
}
