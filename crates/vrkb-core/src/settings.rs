//! Global settings loaded from TOML, following the same OnceLock pattern as the romaji table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Rows the tallest layout stacks (main keyboard and memo list both use six).
pub const MAX_LAYOUT_ROWS: usize = 6;

/// Keys in the widest keyboard row (letters plus the long-vowel key).
pub const MAX_ROW_KEYS: usize = 11;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub panel: PanelSettings,
    pub keys: KeySettings,
    pub text: TextSettings,
    pub candidates: CandidateSettings,
    pub memo_list: MemoListSettings,
    pub viewpoint: ViewpointSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelSettings {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySettings {
    pub key_width: f32,
    pub key_height: f32,
    pub gap: f32,
    pub start_y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextSettings {
    pub visible_lines: usize,
    pub columns: usize,
    pub line_height: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSettings {
    pub page_size: usize,
    pub slot_width: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemoListSettings {
    pub visible_rows: usize,
    pub row_width: f32,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewpointSettings {
    pub distance: f32,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if !(s.$section.$field > Default::default()) {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }

    check_positive!(panel.width);
    check_positive!(panel.height);
    check_positive!(keys.key_width);
    check_positive!(keys.key_height);
    check_positive!(keys.start_y);
    check_positive!(text.visible_lines);
    check_positive!(text.columns);
    check_positive!(text.line_height);
    check_positive!(candidates.page_size);
    check_positive!(candidates.slot_width);
    check_positive!(memo_list.visible_rows);
    check_positive!(memo_list.row_width);
    check_positive!(memo_list.preview_chars);
    check_positive!(viewpoint.distance);

    if s.keys.gap < 0.0 {
        return Err(invalid("keys.gap", "must be non-negative"));
    }

    let width = s.panel.width as f32;
    let widest_row = MAX_ROW_KEYS as f32 * s.keys.key_width + (MAX_ROW_KEYS - 1) as f32 * s.keys.gap;
    if widest_row > width {
        return Err(invalid("keys.key_width", "keyboard row does not fit the panel width"));
    }
    let slots = s.candidates.page_size as f32;
    let bar_width = slots * s.candidates.slot_width + (slots - 1.0) * s.keys.gap;
    if bar_width > width {
        return Err(invalid(
            "candidates.slot_width",
            "candidate page does not fit the panel width",
        ));
    }
    if s.memo_list.row_width > width {
        return Err(invalid("memo_list.row_width", "exceeds panel width"));
    }
    // Memo list stacks its rows plus one control row.
    if s.memo_list.visible_rows + 1 > MAX_LAYOUT_ROWS {
        return Err(invalid(
            "memo_list.visible_rows",
            "memo list cannot have more rows than the keyboard",
        ));
    }
    let text_bottom = crate::render::text_area_bottom(&s.text);
    if s.keys.start_y < text_bottom {
        return Err(invalid(
            "keys.start_y",
            &format!("key grid overlaps the text area (must be at least {text_bottom})"),
        ));
    }
    let grid_bottom =
        s.keys.start_y + MAX_LAYOUT_ROWS as f32 * (s.keys.key_height + s.keys.gap) - s.keys.gap;
    if grid_bottom > s.panel.height as f32 {
        return Err(invalid("keys.start_y", "key grid does not fit the panel height"));
    }

    Ok(())
}
