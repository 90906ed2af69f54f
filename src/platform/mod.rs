//! Platform abstraction layer
//!
//! The engine needs a monotonic millisecond clock and two button levels. On
//! the device those come from the timer and GPIO; natively and under test a
//! manual clock and a scripted button source stand in.

use std::cell::Cell;

use crate::renderer::{Display, Renderer};
use crate::sim::{Buttons, Frame, Game};

/// Monotonic milliseconds since power-on
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Source of debounced button levels
pub trait ButtonSource {
    fn sample(&mut self, now: u64) -> Buttons;
}

/// Sample, update, draw and flush once
///
/// The fireworks sequence always runs for as many frames as `renderer` holds.
pub fn run_pass<C, B, D>(
    game: &mut Game,
    renderer: &Renderer,
    display: &mut D,
    clock: &C,
    buttons: &mut B,
) -> Result<Frame, D::Error>
where
    C: Clock,
    B: ButtonSource,
    D: Display,
{
    let now = clock.now_ms();
    let levels = buttons.sample(now);
    game.set_fireworks_frames(renderer.fireworks_len());
    let frame = game.update(now, levels);
    renderer.draw(display, game.state(), &frame)?;
    Ok(frame)
}

/// Clock advanced by hand
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Buttons held over time windows `[start, end)`
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    presses: Vec<(u64, u64, Buttons)>,
}

impl ScriptedButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(mut self, start: u64, end: u64, buttons: Buttons) -> Self {
        self.presses.push((start, end, buttons));
        self
    }
}

impl ButtonSource for ScriptedButtons {
    fn sample(&mut self, now: u64) -> Buttons {
        self.presses
            .iter()
            .filter(|(start, end, _)| (*start..*end).contains(&now))
            .fold(Buttons::NONE, |acc, (_, _, b)| Buttons {
                up: acc.up || b.up,
                down: acc.down || b.down,
            })
    }
}

/// Constant levels
impl ButtonSource for Buttons {
    fn sample(&mut self, _now: u64) -> Buttons {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::FrameBuffer;
    use crate::settings::Settings;

    #[test]
    fn test_scripted_windows_overlap() {
        let mut script = ScriptedButtons::new()
            .press(10, 20, Buttons::UP)
            .press(15, 30, Buttons::DOWN);
        assert_eq!(script.sample(5), Buttons::NONE);
        assert_eq!(script.sample(12), Buttons::UP);
        assert_eq!(script.sample(17), Buttons::BOTH);
        assert_eq!(script.sample(20), Buttons::DOWN);
    }

    #[test]
    fn test_run_pass_presents_on_redraw() {
        let clock = ManualClock::new(0);
        let mut game = Game::new(Settings::default(), 0).unwrap();
        let renderer = Renderer::new();
        let mut fb = FrameBuffer::new(128, 64);
        let mut buttons = Buttons::NONE;

        run_pass(&mut game, &renderer, &mut fb, &clock, &mut buttons).unwrap();
        assert_eq!(fb.presents(), 0);

        clock.set(1000);
        let frame = run_pass(&mut game, &renderer, &mut fb, &clock, &mut buttons).unwrap();
        assert!(frame.redraw);
        assert_eq!(fb.presents(), 1);
        assert!(fb.pixel(0, 0));
    }
}
