use serde::Serialize;

use super::{KeyId, KeySpec, KeyboardLayout};

/// Axis-aligned rectangle in panel pixels, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Half-open containment: the right and bottom edges belong to the
    /// neighbour.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// A key together with the rectangle it occupies.
#[derive(Debug, Clone, Copy)]
pub struct PlacedKey<'a> {
    pub key: &'a KeySpec,
    pub rect: Rect,
    pub row: usize,
    pub col: usize,
}

impl KeyboardLayout {
    /// Total width of a row: key widths plus one gap between neighbours.
    pub fn row_width(&self, row: usize) -> f32 {
        let Some(keys) = self.rows.get(row) else {
            return 0.0;
        };
        let widths: f32 = keys.iter().map(|k| k.width).sum();
        widths + self.geometry.gap * keys.len().saturating_sub(1) as f32
    }

    /// Left edge of a row centred in the panel.
    pub fn row_start_x(&self, row: usize) -> f32 {
        (self.geometry.panel_width - self.row_width(row)) / 2.0
    }

    pub fn row_y(&self, row: usize) -> f32 {
        self.geometry.start_y + row as f32 * self.geometry.row_pitch()
    }

    /// Walk one row left to right. This is the only place key rectangles are
    /// computed; the renderer and `hit_test` both go through it.
    pub fn row_keys(&self, row: usize) -> impl Iterator<Item = PlacedKey<'_>> + '_ {
        let y = self.row_y(row);
        let h = self.geometry.key_height;
        let gap = self.geometry.gap;
        let mut x = self.row_start_x(row);
        self.rows
            .get(row)
            .into_iter()
            .flatten()
            .enumerate()
            .map(move |(col, key)| {
                let rect = Rect::new(x, y, key.width, h);
                x += key.width + gap;
                PlacedKey {
                    key,
                    rect,
                    row,
                    col,
                }
            })
    }

    pub fn placed_keys(&self) -> impl Iterator<Item = PlacedKey<'_>> + '_ {
        (0..self.rows.len()).flat_map(move |row| self.row_keys(row))
    }

    /// Resolve a panel point to the key drawn there. Gaps between keys and
    /// rows hit nothing.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<KeyId> {
        let rel_y = y - self.geometry.start_y;
        if rel_y < 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let row = (rel_y / self.geometry.row_pitch()).floor() as usize;
        if row >= self.rows.len() {
            return None;
        }
        self.row_keys(row)
            .find(|p| p.rect.contains(x, y))
            .map(|p| p.key.id)
    }

    /// Bottom edge of the lowest row.
    pub fn grid_bottom(&self) -> f32 {
        if self.rows.is_empty() {
            return self.geometry.start_y;
        }
        self.row_y(self.rows.len() - 1) + self.geometry.key_height
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Geometry, KeyKind};
    use super::*;

    fn key(id: KeyId, width: f32) -> KeySpec {
        KeySpec {
            id,
            label: String::new(),
            width,
            kind: KeyKind::Character,
            highlighted: false,
        }
    }

    fn small_layout() -> KeyboardLayout {
        KeyboardLayout {
            rows: vec![
                vec![key(KeyId::Char('a'), 80.0), key(KeyId::Char('b'), 80.0)],
                vec![key(KeyId::Space, 160.0)],
            ],
            geometry: Geometry {
                panel_width: 400.0,
                panel_height: 300.0,
                key_width: 80.0,
                key_height: 50.0,
                gap: 10.0,
                start_y: 100.0,
            },
        }
    }

    #[test]
    fn test_row_is_centred() {
        let layout = small_layout();
        assert!((layout.row_width(0) - 170.0).abs() < f32::EPSILON);
        assert!((layout.row_start_x(0) - 115.0).abs() < f32::EPSILON);
        assert!((layout.row_start_x(1) - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_hit_each_key() {
        let layout = small_layout();
        assert_eq!(layout.hit_test(120.0, 110.0), Some(KeyId::Char('a')));
        assert_eq!(layout.hit_test(210.0, 110.0), Some(KeyId::Char('b')));
        assert_eq!(layout.hit_test(200.0, 170.0), Some(KeyId::Space));
    }

    #[test]
    fn test_gap_between_keys_misses() {
        let layout = small_layout();
        // a: 115..195, gap 195..205, b: 205..285
        assert_eq!(layout.hit_test(200.0, 110.0), None);
    }

    #[test]
    fn test_gap_between_rows_misses() {
        let layout = small_layout();
        // row 0: 100..150, gap 150..160
        assert_eq!(layout.hit_test(150.0, 155.0), None);
    }

    #[test]
    fn test_outside_grid_misses() {
        let layout = small_layout();
        assert_eq!(layout.hit_test(150.0, 50.0), None);
        assert_eq!(layout.hit_test(10.0, 110.0), None);
        assert_eq!(layout.hit_test(150.0, 290.0), None);
        assert_eq!(layout.hit_test(f32::NAN, 110.0), None);
    }

    #[test]
    fn test_grid_bottom() {
        let layout = small_layout();
        assert!((layout.grid_bottom() - 210.0).abs() < f32::EPSILON);
    }
}
