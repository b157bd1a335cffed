use std::collections::BTreeMap;

use serde::Deserialize;

use super::table::MAX_KEY_LEN;

#[derive(Deserialize)]
struct RomajiConfig {
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("non-ASCII key: {0}")]
    NonAsciiKey(String),
    #[error("key longer than {MAX_KEY_LEN} characters: {0}")]
    KeyTooLong(String),
    #[error("empty key")]
    EmptyKey,
    #[error("empty value for key: {0}")]
    EmptyValue(String),
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a sorted `BTreeMap<romaji, kana>`.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    for (key, value) in &config.mappings {
        if key.is_empty() {
            return Err(RomajiConfigError::EmptyKey);
        }
        if !key.is_ascii() {
            return Err(RomajiConfigError::NonAsciiKey(key.clone()));
        }
        if key.len() > MAX_KEY_LEN {
            return Err(RomajiConfigError::KeyTooLong(key.clone()));
        }
        if value.is_empty() {
            return Err(RomajiConfigError::EmptyValue(key.clone()));
        }
    }

    Ok(config.mappings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_toml() {
        let toml = r#"
[mappings]
a = "あ"
ka = "か"
"#;
        let map = parse_romaji_toml(toml).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "あ");
        assert_eq!(map["ka"], "か");
    }

    #[test]
    fn parse_default_toml() {
        let map = parse_romaji_toml(super::super::table::default_toml()).unwrap();
        assert!(map.len() > 150, "expected 150+ mappings, got {}", map.len());
        assert_eq!(map["kya"], "きゃ");
        assert_eq!(map["-"], "ー");
    }

    #[test]
    fn error_empty_mappings() {
        let err = parse_romaji_toml("[mappings]\n").unwrap_err();
        assert!(matches!(err, RomajiConfigError::Empty));
    }

    #[test]
    fn error_non_ascii_key() {
        let toml = "
[mappings]
\"あ\" = \"a\"
";
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::NonAsciiKey(_)));
    }

    #[test]
    fn error_key_too_long() {
        let toml = r#"
[mappings]
xtsu = "っ"
"#;
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::KeyTooLong(_)));
        assert!(err.to_string().contains("xtsu"));
    }

    #[test]
    fn error_empty_value() {
        let toml = r#"
[mappings]
a = ""
"#;
        let err = parse_romaji_toml(toml).unwrap_err();
        assert!(matches!(err, RomajiConfigError::EmptyValue(_)));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_romaji_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, RomajiConfigError::Parse(_)));
    }
}
