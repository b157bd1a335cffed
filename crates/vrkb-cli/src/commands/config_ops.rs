use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn romaji_export() {
    print!("{}", vrkb_core::romaji::default_toml());
}

pub fn romaji_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let map = die!(vrkb_core::romaji::parse_romaji_toml(&content), "Error: {}");
    println!("OK: {} mappings", map.len());
}

pub fn settings_export() {
    print!("{}", vrkb_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        vrkb_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: panel={}x{}, key={}x{} gap={}, text.visible_lines={}, candidates.page_size={}",
        s.panel.width,
        s.panel.height,
        s.keys.key_width,
        s.keys.key_height,
        s.keys.gap,
        s.text.visible_lines,
        s.candidates.page_size
    );
}

/// Load settings from `file`, or the embedded defaults.
pub fn load_settings(file: Option<&str>) -> vrkb_core::settings::Settings {
    match file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            die!(
                vrkb_core::settings::parse_settings_toml(&content),
                "Error: {}"
            )
        }
        None => vrkb_core::settings::settings().clone(),
    }
}
