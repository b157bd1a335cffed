use std::collections::HashMap;
use std::sync::OnceLock;

use super::config::{parse_romaji_toml, RomajiConfigError};

const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

/// Longest romaji key the lookup will try.
pub const MAX_KEY_LEN: usize = 3;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Immutable romaji → kana table.
#[derive(Debug)]
pub struct RomajiTable {
    map: HashMap<String, String>,
}

impl RomajiTable {
    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        let map = parse_romaji_toml(toml_str)?;
        Ok(Self {
            map: map.into_iter().collect(),
        })
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTable {
        static INSTANCE: OnceLock<RomajiTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            RomajiTable::from_toml(toml_str).expect("romaji TOML must be valid")
        })
    }

    pub fn get(&self, romaji: &str) -> Option<&str> {
        self.map.get(romaji).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
