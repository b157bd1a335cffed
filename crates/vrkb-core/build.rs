use toml::Value;

const SETTINGS_SECTIONS: [&str; 6] = [
    "panel",
    "keys",
    "text",
    "candidates",
    "memo_list",
    "viewpoint",
];

fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    println!("cargo:rerun-if-changed=src/romaji/default_romaji.toml");

    let settings = parse("src/default_settings.toml", include_str!("src/default_settings.toml"));
    for section in SETTINGS_SECTIONS {
        if !settings.get(section).is_some_and(Value::is_table) {
            panic!("src/default_settings.toml is missing [{section}]");
        }
    }

    let romaji = parse(
        "src/romaji/default_romaji.toml",
        include_str!("src/romaji/default_romaji.toml"),
    );
    let Some(mappings) = romaji.get("mappings").and_then(Value::as_table) else {
        panic!("src/romaji/default_romaji.toml is missing [mappings]");
    };
    for (key, kana) in mappings {
        // Lookup windows are at most three latin characters.
        if key.is_empty() || key.len() > 3 || !key.is_ascii() {
            panic!("default romaji key {key:?} must be 1-3 ASCII characters");
        }
        if !kana.as_str().is_some_and(|s| !s.is_empty()) {
            panic!("default romaji key {key:?} must map to a non-empty string");
        }
    }
}

fn parse(path: &str, content: &str) -> Value {
    content
        .parse::<Value>()
        .unwrap_or_else(|e| panic!("{path} contains invalid TOML: {e}"))
}
