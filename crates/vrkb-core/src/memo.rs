//! Memo records and the store interface the keyboard consumes.

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoId(pub u64);

/// A memo as persisted: `{id, text, position:{x,y,z}, rotation:{x,y,z}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoRecord {
    pub id: MemoId,
    pub text: String,
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
}

/// External memo collection. Ordering of `get_all` is the list order shown
/// in the memo browser.
pub trait MemoStore {
    fn create(&mut self, position: Vec3, text: &str) -> MemoId;
    /// Returns false when `id` is unknown.
    fn update(&mut self, id: MemoId, text: &str) -> bool;
    fn delete(&mut self, id: MemoId);
    fn get_all(&self) -> Vec<MemoRecord>;
}

/// Single-line preview of a memo for list rows, at most `max_chars` characters.
pub fn preview(text: &str, max_chars: usize) -> String {
    let first = text.lines().next().unwrap_or("");
    let multiline = text.contains('\n');
    let count = first.chars().count();
    if count > max_chars {
        let cut: String = first.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    } else if multiline {
        format!("{first}…")
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shape() {
        let record = MemoRecord {
            id: MemoId(7),
            text: "ねこ".into(),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Vec3::default(),
        };
        // Core has no JSON dependency; TOML exercises the same serde shape.
        let text = toml::to_string(&record).unwrap();
        assert!(text.contains("id = 7"));
        assert!(text.contains("[position]"));
        assert!(text.contains("[rotation]"));
    }

    #[test]
    fn test_rotation_defaults_when_missing() {
        let record: MemoRecord = toml::from_str(
            r#"
id = 1
text = "x"
[position]
x = 0.0
y = 0.0
z = 0.0
"#,
        )
        .unwrap();
        assert_eq!(record.rotation, Vec3::default());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdefghij", 5), "abcd…");
        assert_eq!(preview("line1\nline2", 10), "line1…");
        assert_eq!(preview("", 10), "");
    }
}
