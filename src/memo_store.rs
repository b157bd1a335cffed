//! In-memory memo store with JSON save/load.
//!
//! Saved files look like `{"memos": [{"id", "text", "position", "rotation"}, ...]}`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vrkb_core::geometry::Vec3;
use vrkb_core::memo::{MemoId, MemoRecord, MemoStore};

#[derive(Debug, thiserror::Error)]
pub enum MemoStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid memo file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate memo id {0}")]
    DuplicateId(u64),
}

#[derive(Serialize, Deserialize)]
struct SaveFile {
    memos: Vec<MemoRecord>,
}

/// Ordered memo collection. Ids increase monotonically and are never reused.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemoStore {
    memos: Vec<MemoRecord>,
    next_id: u64,
}

impl InMemoryMemoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(memos: Vec<MemoRecord>) -> Result<Self, MemoStoreError> {
        let mut seen = std::collections::HashSet::new();
        for m in &memos {
            if !seen.insert(m.id) {
                return Err(MemoStoreError::DuplicateId(m.id.0));
            }
        }
        let next_id = memos.iter().map(|m| m.id.0).max().unwrap_or(0);
        Ok(Self { memos, next_id })
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub fn get(&self, id: MemoId) -> Option<&MemoRecord> {
        self.memos.iter().find(|m| m.id == id)
    }

    /// Set the orientation a memo faces (radians, Euler XYZ).
    pub fn set_rotation(&mut self, id: MemoId, rotation: Vec3) -> bool {
        match self.memos.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.rotation = rotation;
                true
            }
            None => false,
        }
    }

    pub fn to_json(&self) -> Result<String, MemoStoreError> {
        let file = SaveFile {
            memos: self.memos.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn from_json(json: &str) -> Result<Self, MemoStoreError> {
        let file: SaveFile = serde_json::from_str(json)?;
        Self::from_records(file.memos)
    }

    pub fn save(&self, path: &Path) -> Result<(), MemoStoreError> {
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), count = self.memos.len(), "memos saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, MemoStoreError> {
        let json = fs::read_to_string(path)?;
        let store = Self::from_json(&json)?;
        debug!(path = %path.display(), count = store.memos.len(), "memos loaded");
        Ok(store)
    }
}

impl MemoStore for InMemoryMemoStore {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_monotonic_after_delete() {
        let mut store = InMemoryMemoStore::new();
        let a = store.create(Vec3::default(), "a");
        let b = store.create(Vec3::default(), "b");
        store.delete(b);
        let c = store.create(Vec3::default(), "c");
        assert!(a < c && b < c);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_unknown() {
        let mut store = InMemoryMemoStore::new();
        assert!(!store.update(MemoId(9), "x"));
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memos.json");

        let mut store = InMemoryMemoStore::new();
        let id = store.create(Vec3::new(1.0, 2.0, 3.0), "買い物\n牛乳");
        store.set_rotation(id, Vec3::new(0.0, 1.5, 0.0));
        store.create(Vec3::default(), "会議");
        store.save(&path).unwrap();

        let mut loaded = InMemoryMemoStore::load(&path).unwrap();
        assert_eq!(loaded.get_all(), store.get_all());
        // Ids continue after the highest loaded id.
        assert_eq!(loaded.create(Vec3::default(), "x"), MemoId(3));
    }

    #[test]
    fn test_json_shape() {
        let mut store = InMemoryMemoStore::new();
        store.create(Vec3::new(1.0, 0.0, 0.0), "a");
        let value: serde_json::Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        let memo = &value["memos"][0];
        assert_eq!(memo["id"], 1);
        assert_eq!(memo["text"], "a");
        assert_eq!(memo["position"]["x"], 1.0);
        assert_eq!(memo["rotation"]["z"], 0.0);
    }

    #[test]
    fn test_missing_rotation_defaults() {
        let json = r#"{"memos":[{"id":4,"text":"a","position":{"x":0,"y":0,"z":0}}]}"#;
        let store = InMemoryMemoStore::from_json(json).unwrap();
        assert_eq!(store.get(MemoId(4)).unwrap().rotation, Vec3::default());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"memos":[
            {"id":1,"text":"a","position":{"x":0,"y":0,"z":0}},
            {"id":1,"text":"b","position":{"x":0,"y":0,"z":0}}]}"#;
        assert!(matches!(
            InMemoryMemoStore::from_json(json),
            Err(MemoStoreError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = InMemoryMemoStore::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, MemoStoreError::Io(_)));
    }
}
