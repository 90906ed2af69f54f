//! In-memory monochrome surface
//!
//! Stands in for the OLED panel in the native build and in tests. Text is
//! kept as positioned strings with 6x8 glyph cells (the panel's built-in font
//! at size 1) rather than rasterized.

use std::convert::Infallible;

use super::Display;

const GLYPH_W: i32 = 6;
const GLYPH_H: i32 = 8;

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: i32,
    height: i32,
    pixels: Vec<bool>,
    texts: Vec<(i32, i32, String)>,
    presents: u32,
}

impl FrameBuffer {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
            texts: Vec::new(),
            presents: 0,
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Pixel state; off-screen reads as off
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        self.index(x, y).map(|i| self.pixels[i]).unwrap_or(false)
    }

    pub fn lit_count(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Text drawn since the area under it was last cleared
    pub fn texts(&self) -> &[(i32, i32, String)] {
        &self.texts
    }

    /// Number of flushes so far
    pub fn presents(&self) -> u32 {
        self.presents
    }

    /// Render as text, one character per pixel, with strings overlaid
    pub fn to_ascii(&self) -> String {
        let mut grid: Vec<Vec<char>> = (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| if self.pixel(x, y) { '#' } else { '.' })
                    .collect()
            })
            .collect();

        for (x, y, text) in &self.texts {
            let Some(row) = usize::try_from(*y).ok().and_then(|y| grid.get_mut(y)) else {
                continue;
            };
            for (i, ch) in text.chars().enumerate() {
                let col = *x + i as i32;
                if col >= 0 && col < self.width {
                    row[col as usize] = ch;
                }
            }
        }

        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in grid {
            out.extend(row);
            out.push('\n');
        }
        out
    }
}

impl Display for FrameBuffer {
    type Error = Infallible;

    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = on;
        }
    }

    fn measure_text(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * GLYPH_W, GLYPH_H)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.texts.push((x, y, text.to_string()));
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.presents += 1;
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        for row in y.max(0)..(y + h).min(self.height) {
            for col in x.max(0)..(x + w).min(self.width) {
                self.set_pixel(col, row, on);
            }
        }
        if !on {
            self.texts
                .retain(|(tx, ty, _)| !(*tx >= x && *tx < x + w && *ty >= y && *ty < y + h));
        }
    }
}
