//! Presentation side
//!
//! The engine never draws. It emits [`GameEvent`]s, and [`Renderer`] turns
//! them into commands on a [`Display`]: a monochrome surface with pixel, line,
//! rect, bitmap and text primitives plus an explicit flush.

pub mod framebuffer;

pub use framebuffer::FrameBuffer;

use crate::sim::{Frame, GameEvent, GameState, Score, Side};

/// A monochrome drawing surface.
///
/// Only `size`, `set_pixel`, `measure_text`, `draw_text` and `present` are
/// required; the shape helpers default to pixel loops so a driver can override
/// them with accelerated versions.
pub trait Display {
    type Error;

    /// Width and height in pixels
    fn size(&self) -> (i32, i32);

    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Width and height the text would occupy when drawn
    fn measure_text(&self, text: &str) -> (i32, i32);

    /// Draw text with its top-left corner at `(x, y)`
    fn draw_text(&mut self, x: i32, y: i32, text: &str);

    /// Flush the buffer to the panel
    fn present(&mut self) -> Result<(), Self::Error>;

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, on: bool) {
        // Bresenham
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, on);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Vertical line of `len` pixels starting at `(x, y)`
    fn draw_vline(&mut self, x: i32, y: i32, len: i32, on: bool) {
        for row in y..y + len {
            self.set_pixel(x, row, on);
        }
    }

    /// Outline of a `w` x `h` rectangle
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.draw_line(x, y, x + w - 1, y, on);
        self.draw_line(x, y + h - 1, x + w - 1, y + h - 1, on);
        self.draw_vline(x, y, h, on);
        self.draw_vline(x + w - 1, y, h, on);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) {
        for row in y..y + h {
            for col in x..x + w {
                self.set_pixel(col, row, on);
            }
        }
    }

    /// Blank the whole surface
    fn clear(&mut self) {
        let (w, h) = self.size();
        self.fill_rect(0, 0, w, h, false);
    }

    /// Draw a 1bpp bitmap, rows padded to whole bytes, MSB leftmost.
    /// Clear bits are transparent.
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32) {
        let stride = ((w + 7) / 8) as usize;
        for row in 0..h {
            for col in 0..w {
                let index = row as usize * stride + col as usize / 8;
                let Some(byte) = bitmap.get(index) else {
                    return;
                };
                if byte & (0x80 >> (col % 8)) != 0 {
                    self.set_pixel(x + col, y + row, true);
                }
            }
        }
    }
}

/// Translates engine events into draw commands
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    /// Full-screen 1bpp frames shown during the victory celebration
    fireworks: Vec<Vec<u8>>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fireworks(fireworks: Vec<Vec<u8>>) -> Self {
        Self { fireworks }
    }

    /// Number of fireworks frames available; `run_pass` hands this to the game
    pub fn fireworks_len(&self) -> usize {
        self.fireworks.len()
    }

    /// Apply a frame's events and flush if the engine asked for it
    pub fn draw<D: Display>(
        &self,
        display: &mut D,
        state: &GameState,
        frame: &Frame,
    ) -> Result<(), D::Error> {
        for event in &frame.events {
            self.apply(display, state, event);
        }
        if frame.redraw {
            display.present()?;
        }
        Ok(())
    }

    fn apply<D: Display>(&self, display: &mut D, state: &GameState, event: &GameEvent) {
        let (w, h) = display.size();
        match *event {
            GameEvent::CourtReset => {
                display.clear();
                draw_court(display);
                for side in [Side::Cpu, Side::Player] {
                    let paddle = state.paddle(side);
                    display.draw_vline(paddle.x, paddle.y, paddle.length, true);
                }
                display.set_pixel(state.ball.pos.x, state.ball.pos.y, true);
            }
            GameEvent::BallMoved { from, to } => {
                display.set_pixel(from.x, from.y, false);
                display.set_pixel(to.x, to.y, true);
            }
            GameEvent::PaddleMoved { side, from, to } => {
                let paddle = state.paddle(side);
                display.draw_vline(paddle.x, from, paddle.length, false);
                display.draw_vline(paddle.x, to, paddle.length, true);
            }
            GameEvent::Goal { scorer, score } => {
                display.fill_rect(1, 1, w - 2, h - 2, false);
                announce(display, &format!("{} SCORES!", scorer.name()), &score);
            }
            GameEvent::Fireworks { frame, .. } => {
                display.clear();
                if let Some(bitmap) = self.fireworks.get(frame) {
                    display.draw_bitmap(0, 0, bitmap, w, h);
                }
            }
            GameEvent::Victory { winner, score } => {
                display.clear();
                announce(display, &format!("{} WINS!", winner.name()), &score);
            }
            GameEvent::MenuShown => {
                display.clear();
                draw_court(display);
                draw_centered(display, "PONG", -10);
                draw_centered(display, "PRESS ANY BUTTON", 8);
            }
            GameEvent::MenuAcknowledged => {
                display.fill_rect(1, 1, w - 2, h - 2, false);
                draw_centered(display, "GET READY", 0);
            }
        }
    }
}

fn draw_court<D: Display>(display: &mut D) {
    let (w, h) = display.size();
    display.draw_rect(0, 0, w, h, true);
}

/// Headline above, scoreboard below
fn announce<D: Display>(display: &mut D, headline: &str, score: &Score) {
    draw_centered(display, headline, -10);
    draw_centered(display, &score.scoreboard(), 8);
}

/// Center text horizontally, and vertically shifted by `dy`
fn draw_centered<D: Display>(display: &mut D, text: &str, dy: i32) {
    let (w, h) = display.size();
    let (tw, th) = display.measure_text(text);
    display.draw_text((w - tw) / 2, (h - th) / 2 + dy, text);
}
