use serde::Serialize;

use vrkb_core::layout::{layout_for, InputMode, KeyId, KeyKind, LetterCase, Overlay, Rect};
use vrkb_core::settings::Settings;

#[derive(Serialize)]
struct KeyDump<'a> {
    row: usize,
    col: usize,
    id: KeyId,
    label: &'a str,
    kind: KeyKind,
    highlighted: bool,
    rect: Rect,
}

pub fn layout_cmd(settings: &Settings, mode: InputMode, upper: bool, json: bool) {
    let case = if upper {
        LetterCase::Upper
    } else {
        LetterCase::Lower
    };
    let layout = layout_for(mode, case, Overlay::Keys, settings);
    if json {
        let keys: Vec<KeyDump> = layout
            .placed_keys()
            .map(|p| KeyDump {
                row: p.row,
                col: p.col,
                id: p.key.id,
                label: &p.key.label,
                kind: p.key.kind,
                highlighted: p.key.highlighted,
                rect: p.rect,
            })
            .collect();
        match serde_json::to_string_pretty(&keys) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Error: {e}"),
        }
        return;
    }
    for (i, row) in layout.rows.iter().enumerate() {
        let labels: Vec<&str> = row.iter().map(|k| k.label.as_str()).collect();
        println!("{i}: {}", labels.join(" | "));
    }
}

pub fn hit_cmd(settings: &Settings, mode: InputMode, x: f32, y: f32) {
    let layout = layout_for(mode, LetterCase::Lower, Overlay::Keys, settings);
    match layout.hit_test(x, y).and_then(|id| layout.find(id)) {
        Some(p) => println!(
            "{:?} \"{}\" row={} col={} at ({}, {}) {}x{}",
            p.key.id, p.key.label, p.row, p.col, p.rect.x, p.rect.y, p.rect.w, p.rect.h
        ),
        None => println!("miss"),
    }
}
