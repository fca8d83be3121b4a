use ratatui::{layout::Rect, style::Color, Frame};

use crate::chart::{ChartView, GeoPoint};

/// A sprinkle character painted over the water background.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveGlyph {
    pub ch: char,
    pub fg: Color,
    /// One cell in `density` carries the glyph; the rest stay flat.
    pub density: u8,
}

impl WaveGlyph {
    pub const fn new(ch: char, fg: Color, density: u8) -> Self {
        Self { ch, fg, density }
    }
}

#[derive(Clone, Debug)]
pub struct ChartTheme {
    pub deep: Color,
    pub shallow: Color,
    pub glyphs: [WaveGlyph; 3],
    pub marker: char,
    pub marker_fg: Color,
    pub cursor_bg: Color,
}

impl Default for ChartTheme {
    fn default() -> Self {
        let deep = Color::Rgb(16, 52, 94);
        Self {
            deep,
            shallow: Color::Rgb(24, 78, 120),
            glyphs: [
                WaveGlyph::new('~', adjust_color(deep, 28), 5),
                WaveGlyph::new('\u{2248}', adjust_color(deep, 18), 7), // ≈
                WaveGlyph::new('\'', adjust_color(deep, 10), 9),
            ],
            marker: '\u{2693}', // ⚓
            marker_fg: Color::Rgb(255, 210, 90),
            cursor_bg: Color::Rgb(70, 130, 180),
        }
    }
}

/// Paints a [`ChartView`] one terminal cell per grid cell.
///
/// The water texture is derived from a hash of the absolute grid position,
/// so the same view renders identically frame after frame and in tests.
#[derive(Clone, Debug, Default)]
pub struct ChartRenderer {
    theme: ChartTheme,
}

impl ChartRenderer {
    pub fn new(theme: ChartTheme) -> Self {
        Self { theme }
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        view: &ChartView,
        cursor: Option<(u16, u16)>,
        marker: Option<GeoPoint>,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let cols = view.cols.min(area.width);
        let rows = view.rows.min(area.height);
        let marker_cell = marker.and_then(|point| view.geo_to_cell(point));

        let buf = frame.buffer_mut();
        for row in 0..rows {
            for col in 0..cols {
                let x = area.x + col;
                let y = area.y + row;
                let Some(cell) = buf.cell_mut((x, y)) else {
                    continue;
                };

                let seed = cell_seed(col, row);
                let bg = if seed % 11 == 0 {
                    self.theme.shallow
                } else {
                    self.theme.deep
                };
                let glyph = self.theme.glyphs[(seed % 3) as usize];
                if seed % glyph.density.max(1) as u32 == 0 {
                    cell.set_bg(bg).set_fg(glyph.fg).set_char(glyph.ch);
                } else {
                    cell.set_bg(bg).set_fg(bg).set_char(' ');
                }

                if cursor == Some((col, row)) {
                    cell.set_bg(self.theme.cursor_bg)
                        .set_fg(Color::White)
                        .set_char('+');
                }
                if marker_cell == Some((col, row)) {
                    cell.set_fg(self.theme.marker_fg)
                        .set_char(self.theme.marker);
                }
            }
        }
    }
}

pub fn adjust_color(color: Color, delta: i16) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let clamp = |v: i16| v.max(0).min(255) as u8;
            Color::Rgb(
                clamp(r as i16 + delta),
                clamp(g as i16 + delta),
                clamp(b as i16 + delta),
            )
        }
        other => other,
    }
}

pub fn cell_seed(x: u16, y: u16) -> u32 {
    let mut n = x as u32;
    n = n
        .wrapping_mul(374_761_393)
        .wrapping_add((y as u32).wrapping_mul(668_265_263));
    n ^= n >> 13;
    n = n.wrapping_mul(1_274_126_177);
    n ^= n >> 16;
    n
}
