//! Button latch
//!
//! Presses are accumulated between paddle ticks so a tap shorter than one
//! paddle period still moves the paddle. Several taps within one period
//! coalesce into a single step.

/// Button levels sampled on one loop pass (`true` = pressed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Buttons {
    pub up: bool,
    pub down: bool,
}

impl Buttons {
    pub const NONE: Self = Self {
        up: false,
        down: false,
    };
    pub const UP: Self = Self {
        up: true,
        down: false,
    };
    pub const DOWN: Self = Self {
        up: false,
        down: true,
    };
    pub const BOTH: Self = Self {
        up: true,
        down: true,
    };

    pub fn any(&self) -> bool {
        self.up || self.down
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    up_requested: bool,
    down_requested: bool,
    /// Levels from the previous sample, for edge detection
    last: Buttons,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// OR the sampled levels into the pending requests
    pub fn latch(&mut self, levels: Buttons) {
        self.up_requested |= levels.up;
        self.down_requested |= levels.down;
    }

    /// Record a sample and report whether any button went from released to pressed
    pub fn rising_edge(&mut self, levels: Buttons) -> bool {
        let edge = (levels.up && !self.last.up) || (levels.down && !self.last.down);
        self.last = levels;
        edge
    }

    /// Hand the pending requests to a paddle tick and clear them
    pub fn take(&mut self) -> Buttons {
        let requested = Buttons {
            up: self.up_requested,
            down: self.down_requested,
        };
        self.up_requested = false;
        self.down_requested = false;
        requested
    }

    /// Drop pending requests without acting on them
    pub fn clear(&mut self) {
        self.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_survives_until_take() {
        let mut latch = InputLatch::new();
        latch.latch(Buttons::UP);
        latch.latch(Buttons::NONE);
        latch.latch(Buttons::NONE);
        assert_eq!(latch.take(), Buttons::UP);
        assert_eq!(latch.take(), Buttons::NONE);
    }

    #[test]
    fn test_both_accumulate() {
        let mut latch = InputLatch::new();
        latch.latch(Buttons::UP);
        latch.latch(Buttons::DOWN);
        latch.clear();
        assert_eq!(latch.take(), Buttons::NONE);
        latch.latch(Buttons::UP);
        latch.latch(Buttons::DOWN);
        assert_eq!(latch.take(), Buttons::BOTH);
    }

    #[test]
    fn test_rising_edge() {
        let mut latch = InputLatch::new();
        assert!(!latch.rising_edge(Buttons::NONE));
        assert!(latch.rising_edge(Buttons::DOWN));
        // Held, not a new edge
        assert!(!latch.rising_edge(Buttons::DOWN));
        assert!(latch.rising_edge(Buttons::BOTH));
        assert!(!latch.rising_edge(Buttons::NONE));
    }
}
