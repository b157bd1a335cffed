//! Panel rendering onto an abstract drawing surface.
//!
//! Key rectangles come from [`KeyboardLayout::placed_keys`], the same walk
//! `hit_test` uses. Text is recorded as draw ops rather than rasterised;
//! [`Raster`] fills and strokes rectangles into an RGBA buffer and keeps the
//! text ops for inspection.

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::layout::{KeyKind, KeyboardLayout, PlacedKey, Rect};
use crate::settings::TextSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b, 255)
    }
}

pub mod palette {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::rgb(0x22, 0x22, 0x22);
    pub const TEXT: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const PLACEHOLDER: Rgba = Rgba::rgb(0x88, 0x88, 0x88);
    pub const INPUT_BOX: Rgba = Rgba::rgb(0x33, 0x33, 0x33);
    pub const INPUT_FRAME: Rgba = Rgba::rgb(0x88, 0x88, 0x88);
    pub const RECORDING: Rgba = Rgba::rgb(0xff, 0x00, 0x00);
    pub const CARET: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const UNDERLINE: Rgba = Rgba::rgb(0xff, 0xeb, 0x3b);

    pub const KEY: Rgba = Rgba::rgb(0x55, 0x55, 0x55);
    pub const KEY_HIGHLIGHT: Rgba = Rgba::rgb(0x1e, 0x88, 0xe5);
    pub const KEY_ACCENT: Rgba = Rgba::rgb(0x4c, 0xaf, 0x50);
    pub const KEY_DANGER: Rgba = Rgba::rgb(0xf4, 0x43, 0x36);
    pub const KEY_VOICE: Rgba = Rgba::rgb(0x9c, 0x27, 0xb0);
    pub const KEY_BORDER: Rgba = Rgba::rgb(0x88, 0x88, 0x88);
}

pub const KEY_BORDER_WIDTH: f32 = 2.0;
const MARGIN: f32 = 20.0;
const TITLE_BASELINE: f32 = 36.0;
const INPUT_TOP: f32 = 60.0;
const INPUT_PADDING: f32 = 8.0;
/// Status baseline below the input box, in line heights.
const STATUS_BASELINE: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Align {
    Left,
    Center,
}

/// A text draw request, recorded verbatim by [`Raster`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOp {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub color: Rgba,
    pub size: f32,
    pub align: Align,
}

pub trait Surface {
    fn size(&self) -> (u32, u32);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32);
    fn draw_text(&mut self, op: TextOp);
}

/// Everything the panel shows besides the keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelView {
    pub title: String,
    /// Visible wrapped lines, already scrolled.
    pub lines: Vec<String>,
    /// Caret as (visible line, character column).
    pub caret: Option<(usize, usize)>,
    /// Conversion span underline pieces: (visible line, start column, end column).
    pub underline: Vec<(usize, usize, usize)>,
    /// Shown when the buffer is empty.
    pub placeholder: Option<String>,
    pub recording: bool,
    pub status: Option<String>,
}

/// Input box rectangle for a panel of `panel_width`.
pub fn input_box(panel_width: f32, text: &TextSettings) -> Rect {
    let h = text.visible_lines as f32 * text.line_height + INPUT_PADDING * 2.0;
    Rect::new(MARGIN, INPUT_TOP, panel_width - MARGIN * 2.0, h)
}

/// Lowest y used by the input box and the status line below it. Keys must
/// start at or below this.
pub fn text_area_bottom(text: &TextSettings) -> f32 {
    let input = input_box(0.0, text);
    input.y + input.h + text.line_height
}

/// Draw the whole panel: background, title, input area, status line and keys.
pub fn draw_panel<S: Surface + ?Sized>(
    surface: &mut S,
    layout: &KeyboardLayout,
    view: &PanelView,
    text: &TextSettings,
) {
    let (w, h) = surface.size();
    surface.fill_rect(Rect::new(0.0, 0.0, w as f32, h as f32), palette::BACKGROUND);

    surface.draw_text(TextOp {
        x: MARGIN,
        y: TITLE_BASELINE,
        text: view.title.clone(),
        color: palette::TEXT,
        size: text.line_height * 0.7,
        align: Align::Left,
    });

    let input = input_box(w as f32, text);
    draw_input(surface, input, view, text);

    let status = if view.recording {
        Some("音声認識中...")
    } else {
        view.status.as_deref()
    };
    if let Some(status) = status {
        surface.draw_text(TextOp {
            x: MARGIN,
            y: input.y + input.h + text.line_height * STATUS_BASELINE,
            text: status.to_string(),
            color: if view.recording {
                palette::RECORDING
            } else {
                palette::PLACEHOLDER
            },
            size: text.line_height * 0.5,
            align: Align::Left,
        });
    }

    for placed in layout.placed_keys() {
        draw_key(surface, &placed, view.recording);
    }
}

fn draw_input<S: Surface + ?Sized>(surface: &mut S, input: Rect, view: &PanelView, text: &TextSettings) {
    surface.fill_rect(input, palette::INPUT_BOX);
    let frame = if view.recording {
        palette::RECORDING
    } else {
        palette::INPUT_FRAME
    };
    surface.stroke_rect(input, frame, KEY_BORDER_WIDTH);

    let left = input.x + INPUT_PADDING;
    let col_width = (input.w - INPUT_PADDING * 2.0) / text.columns as f32;
    let line_top = |line: usize| input.y + INPUT_PADDING + line as f32 * text.line_height;
    let x_at = |line: &str, col: usize| {
        let prefix: String = line.chars().take(col).collect();
        left + prefix.width() as f32 * col_width
    };
    let font = text.line_height * 0.6;

    let empty = view.lines.iter().all(|l| l.is_empty());
    if empty {
        if let Some(placeholder) = &view.placeholder {
            surface.draw_text(TextOp {
                x: left,
                y: line_top(0) + font,
                text: placeholder.clone(),
                color: palette::PLACEHOLDER,
                size: font,
                align: Align::Left,
            });
        }
    }

    for (i, line) in view.lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        surface.draw_text(TextOp {
            x: left,
            y: line_top(i) + font,
            text: line.clone(),
            color: palette::TEXT,
            size: font,
            align: Align::Left,
        });
    }

    for &(line, start, end) in &view.underline {
        let Some(content) = view.lines.get(line) else {
            continue;
        };
        let x0 = x_at(content, start);
        let x1 = x_at(content, end);
        if x1 > x0 {
            let y = line_top(line) + text.line_height - 4.0;
            surface.fill_rect(Rect::new(x0, y, x1 - x0, 2.0), palette::UNDERLINE);
        }
    }

    if let Some((line, col)) = view.caret {
        let content = view.lines.get(line).map(String::as_str).unwrap_or("");
        let x = x_at(content, col);
        surface.fill_rect(
            Rect::new(x, line_top(line) + 4.0, 2.0, text.line_height - 8.0),
            palette::CARET,
        );
    }
}

/// Fill colour for a key.
pub fn key_color(kind: KeyKind, highlighted: bool, recording: bool) -> Rgba {
    match kind {
        KeyKind::Voice if recording => palette::RECORDING,
        KeyKind::Voice => palette::KEY_VOICE,
        KeyKind::Accent => palette::KEY_ACCENT,
        KeyKind::Danger => palette::KEY_DANGER,
        _ if highlighted => palette::KEY_HIGHLIGHT,
        _ => palette::KEY,
    }
}

fn draw_key<S: Surface + ?Sized>(surface: &mut S, placed: &PlacedKey<'_>, recording: bool) {
    let key = placed.key;
    let rect = placed.rect;
    surface.fill_rect(rect, key_color(key.kind, key.highlighted, recording));
    surface.stroke_rect(rect, palette::KEY_BORDER, KEY_BORDER_WIDTH);
    let (cx, cy) = rect.center();
    let size = (rect.h * 0.4).min(24.0);
    let (x, align) = match key.kind {
        KeyKind::MemoRow => (rect.x + 12.0, Align::Left),
        _ => (cx, Align::Center),
    };
    surface.draw_text(TextOp {
        x,
        y: cy + size / 3.0,
        text: key.label.clone(),
        color: palette::TEXT,
        size,
        align,
    });
}

/// Offscreen RGBA surface. Rectangles are clipped to the buffer.
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    texts: Vec<TextOp>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            texts: Vec::new(),
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some(Rgba(p[0], p[1], p[2], p[3]))
    }

    pub fn text_ops(&self) -> &[TextOp] {
        &self.texts
    }

    /// Reset pixels to transparent black and forget recorded text.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.texts.clear();
    }

    /// Binary PPM (P6), alpha dropped.
    pub fn to_ppm(&self) -> Vec<u8> {
        let mut out = format!("P6\n{} {}\n255\n", self.width, self.height).into_bytes();
        out.reserve(self.width as usize * self.height as usize * 3);
        for px in self.pixels.chunks_exact(4) {
            out.extend_from_slice(&px[..3]);
        }
        out
    }

    /// Clip a float rect to integer pixel bounds `[x0, x1) × [y0, y1)`.
    fn clip(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x.max(0.0).round();
        let y0 = rect.y.max(0.0).round();
        let x1 = (rect.x + rect.w).min(self.width as f32).round();
        let y1 = (rect.y + rect.h).min(self.height as f32).round();
        if !(x1 > x0 && y1 > y0) {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        let stride = self.width as usize * 4;
        for y in y0..y1 {
            let row = y as usize * stride;
            for x in x0..x1 {
                let i = row + x as usize * 4;
                self.pixels[i..i + 4].copy_from_slice(&[color.0, color.1, color.2, color.3]);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        let w = width.min(rect.w / 2.0).min(rect.h / 2.0);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y + rect.h - w, rect.w, w), color);
        self.fill_rect(Rect::new(rect.x, rect.y, w, rect.h), color);
        self.fill_rect(Rect::new(rect.x + rect.w - w, rect.y, w, rect.h), color);
    }

    fn draw_text(&mut self, op: TextOp) {
        if !op.text.is_empty() {
            self.texts.push(op);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{layout_for, InputMode, KeyId, LetterCase, Overlay};
    use crate::settings::{parse_settings_toml, Settings, DEFAULT_SETTINGS_TOML};

    fn defaults() -> Settings {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap()
    }

    fn render(view: &PanelView, mode: InputMode) -> (Raster, KeyboardLayout) {
        let s = defaults();
        let layout = layout_for(mode, LetterCase::Lower, Overlay::Keys, &s);
        let mut raster = Raster::new(s.panel.width, s.panel.height);
        draw_panel(&mut raster, &layout, view, &s.text);
        (raster, layout)
    }

    fn at(raster: &Raster, x: f32, y: f32) -> Rgba {
        raster.pixel(x as u32, y as u32).unwrap()
    }

    #[test]
    fn test_keys_drawn_where_hit() {
        let (raster, layout) = render(&PanelView::default(), InputMode::Hiragana);
        for placed in layout.placed_keys() {
            let (cx, cy) = placed.rect.center();
            let expected = key_color(placed.key.kind, placed.key.highlighted, false);
            assert_eq!(at(&raster, cx, cy), expected, "{:?}", placed.key.id);
            assert_eq!(layout.hit_test(cx, cy), Some(placed.key.id));
        }
    }

    #[test]
    fn test_key_border() {
        let (raster, layout) = render(&PanelView::default(), InputMode::Hiragana);
        let q = layout.find(KeyId::Char('q')).unwrap().rect;
        assert_eq!(at(&raster, q.x, q.y + 10.0), palette::KEY_BORDER);
        assert_eq!(at(&raster, q.x + 5.0, q.y + 10.0), palette::KEY);
    }

    #[test]
    fn test_gap_shows_background() {
        let (raster, layout) = render(&PanelView::default(), InputMode::Hiragana);
        let q = layout.find(KeyId::Char('q')).unwrap().rect;
        let gap_x = q.x + q.w + layout.geometry.gap / 2.0;
        assert_eq!(at(&raster, gap_x, q.y + 10.0), palette::BACKGROUND);
    }

    #[test]
    fn test_labels_recorded() {
        let (raster, layout) = render(&PanelView::default(), InputMode::Katakana);
        for placed in layout.placed_keys() {
            assert!(
                raster.text_ops().iter().any(|t| t.text == placed.key.label),
                "missing label {}",
                placed.key.label
            );
        }
    }

    #[test]
    fn test_recording_frame_and_indicator() {
        let s = defaults();
        let view = PanelView {
            recording: true,
            ..PanelView::default()
        };
        let (raster, layout) = render(&view, InputMode::Hiragana);
        let input = input_box(s.panel.width as f32, &s.text);
        assert_eq!(at(&raster, input.x + 1.0, input.y + 20.0), palette::RECORDING);
        assert!(raster.text_ops().iter().any(|t| t.text == "音声認識中..."));
        let voice = layout.find(KeyId::Voice).unwrap().rect;
        let (cx, cy) = voice.center();
        assert_eq!(at(&raster, cx, cy), palette::RECORDING);
    }

    #[test]
    fn test_placeholder_only_when_empty() {
        let mut view = PanelView {
            placeholder: Some("メモを入力".to_string()),
            lines: vec![String::new()],
            ..PanelView::default()
        };
        let (raster, _) = render(&view, InputMode::Hiragana);
        assert!(raster.text_ops().iter().any(|t| t.text == "メモを入力"));

        view.lines = vec!["ねこ".to_string()];
        let (raster, _) = render(&view, InputMode::Hiragana);
        assert!(!raster.text_ops().iter().any(|t| t.text == "メモを入力"));
        assert!(raster.text_ops().iter().any(|t| t.text == "ねこ"));
    }

    #[test]
    fn test_caret_after_wide_chars() {
        let s = defaults();
        let view = PanelView {
            lines: vec!["ねこ".to_string()],
            caret: Some((0, 2)),
            ..PanelView::default()
        };
        let (raster, _) = render(&view, InputMode::Hiragana);
        let input = input_box(s.panel.width as f32, &s.text);
        let col_width = (input.w - 16.0) / s.text.columns as f32;
        // Two full-width characters occupy four columns.
        let x = input.x + 8.0 + 4.0 * col_width;
        let y = input.y + 8.0 + s.text.line_height / 2.0;
        assert_eq!(at(&raster, x + 0.5, y), palette::CARET);
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut raster = Raster::new(4, 4);
        raster.fill_rect(Rect::new(-10.0, -10.0, 12.0, 12.0), palette::KEY);
        assert_eq!(raster.pixel(0, 0), Some(palette::KEY));
        assert_eq!(raster.pixel(1, 1), Some(palette::KEY));
        assert_eq!(raster.pixel(2, 2), Some(Rgba(0, 0, 0, 0)));
        raster.fill_rect(Rect::new(10.0, 10.0, 5.0, 5.0), palette::KEY);
        assert_eq!(raster.pixel(4, 4), None);
    }

    #[test]
    fn test_ppm_header_and_size() {
        let mut raster = Raster::new(3, 2);
        raster.fill_rect(Rect::new(0.0, 0.0, 3.0, 2.0), Rgba::rgb(1, 2, 3));
        let ppm = raster.to_ppm();
        let header = b"P6\n3 2\n255\n";
        assert!(ppm.starts_with(header));
        assert_eq!(ppm.len(), header.len() + 3 * 2 * 3);
        assert_eq!(&ppm[header.len()..header.len() + 3], &[1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut raster = Raster::new(2, 2);
        raster.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), palette::KEY);
        raster.draw_text(TextOp {
            x: 0.0,
            y: 0.0,
            text: "a".to_string(),
            color: palette::TEXT,
            size: 10.0,
            align: Align::Left,
        });
        raster.clear();
        assert_eq!(raster.pixel(0, 0), Some(Rgba(0, 0, 0, 0)));
        assert!(raster.text_ops().is_empty());
    }
}
