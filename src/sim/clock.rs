//! Fixed-cadence tick scheduling
//!
//! Ball and paddles each have their own deadline. A due deadline advances by
//! its period rather than snapping to `now`, so time lost elsewhere in the loop
//! does not accumulate as drift.

/// Which subsystems fire on this pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Due {
    pub ball: bool,
    pub paddles: bool,
}

impl Due {
    /// Redraw is needed if either tick ran
    pub fn any(&self) -> bool {
        self.ball | self.paddles
    }
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    ball_period: u64,
    paddle_period: u64,
    ball_due: u64,
    paddle_due: u64,
}

impl Scheduler {
    pub fn new(ball_period: u64, paddle_period: u64, now: u64) -> Self {
        Self {
            ball_period,
            paddle_period,
            ball_due: now,
            paddle_due: now,
        }
    }

    /// Determine which ticks are due at `now` and advance their deadlines.
    ///
    /// A tick is due once `now` is strictly past its deadline. Each deadline
    /// moves forward by at most one period per call.
    pub fn poll(&mut self, now: u64) -> Due {
        let ball = now > self.ball_due;
        if ball {
            self.ball_due += self.ball_period;
        }
        let paddles = now > self.paddle_due;
        if paddles {
            self.paddle_due += self.paddle_period;
        }
        Due { ball, paddles }
    }

    /// Restart both cadences from `now`, discarding any backlog
    pub fn rebase(&mut self, now: u64) {
        log::debug!(
            "Scheduler rebased at {now} ms (ball backlog {}, paddle backlog {})",
            now.saturating_sub(self.ball_due),
            now.saturating_sub(self.paddle_due)
        );
        self.ball_due = now;
        self.paddle_due = now;
    }

    pub fn ball_due(&self) -> u64 {
        self.ball_due
    }

    pub fn paddle_due(&self) -> u64 {
        self.paddle_due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_at_deadline() {
        let mut sched = Scheduler::new(10, 25, 1000);
        assert_eq!(sched.poll(1000), Due::default());
        let due = sched.poll(1001);
        assert!(due.ball && due.paddles);
        assert!(due.any());
    }

    #[test]
    fn test_independent_cadences() {
        let mut sched = Scheduler::new(10, 25, 0);
        sched.poll(1);
        assert_eq!(sched.ball_due(), 10);
        assert_eq!(sched.paddle_due(), 25);

        let due = sched.poll(11);
        assert!(due.ball);
        assert!(!due.paddles);

        let due = sched.poll(26);
        assert!(due.ball);
        assert!(due.paddles);
    }

    #[test]
    fn test_deadline_advances_by_period_not_now() {
        let mut sched = Scheduler::new(10, 25, 0);
        // Late poll: deadline moves one period, so the next poll is immediately due
        sched.poll(57);
        assert_eq!(sched.ball_due(), 10);
        assert!(sched.poll(57).ball);
        assert_eq!(sched.ball_due(), 20);
    }

    #[test]
    fn test_rebase_drops_backlog() {
        let mut sched = Scheduler::new(10, 25, 0);
        sched.rebase(5000);
        assert_eq!(sched.poll(5000), Due::default());
        assert!(sched.poll(5001).ball);
    }
}
