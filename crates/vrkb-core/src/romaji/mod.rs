//! Romaji-to-kana transliteration for the virtual keyboard.
//!
//! Keystrokes accumulate in a pending latin buffer; each keystroke may emit
//! zero or more kana tokens using longest-match lookup against a static table,
//! with gemination (っ) and the "nn" rule handled ahead of the lookup.

mod config;
mod convert;
mod table;

pub use config::{parse_romaji_toml, RomajiConfigError};
pub use convert::{feed_latin, flush_pending, is_gemination_consonant, is_romaji_key};
pub use table::{default_toml, RomajiTable, MAX_KEY_LEN};
