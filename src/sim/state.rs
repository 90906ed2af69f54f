//! Game state and core entity types
//!
//! Everything the engine mutates lives in [`GameState`]; the renderer and the
//! input source only ever see borrowed views or events derived from it.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// One side of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Left paddle, driven by the heuristic
    Cpu,
    /// Right paddle, driven by the buttons
    Player,
}

impl Side {
    pub fn name(&self) -> &'static str {
        match self {
            Side::Cpu => "CPU",
            Side::Player => "Player",
        }
    }
}

/// The ball: a single lit cell moving one cell per tick on both axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: IVec2,
    /// Each component is exactly -1 or +1
    pub dir: IVec2,
}

impl Ball {
    pub fn new(pos: IVec2, dir: IVec2) -> Self {
        debug_assert!(dir.x.abs() == 1 && dir.y.abs() == 1);
        Self { pos, dir }
    }

    /// Cell the ball would occupy after one unobstructed tick
    #[inline]
    pub fn candidate(&self) -> IVec2 {
        self.pos + self.dir
    }
}

/// A vertical paddle on a fixed column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paddle {
    pub x: i32,
    /// Top edge
    pub y: i32,
    pub length: i32,
}

impl Paddle {
    pub fn new(x: i32, y: i32, length: i32) -> Self {
        Self { x, y, length }
    }

    /// Row the CPU heuristic compares the ball against
    #[inline]
    pub fn center(&self) -> i32 {
        self.y + self.length / 2
    }

    /// Whether the cell `(x, y)` deflects off this paddle.
    ///
    /// The span is inclusive of `y + length`, one row past the drawn line.
    #[inline]
    pub fn blocks(&self, cell: IVec2) -> bool {
        cell.x == self.x && cell.y >= self.y && cell.y <= self.y + self.length
    }

    /// Keep the paddle fully inside a court of the given height
    pub fn clamp(&mut self, court_height: i32) {
        let max_y = court_height - 1 - self.length;
        self.y = self.y.clamp(1, max_y);
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub cpu: u32,
    pub player: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Cpu => self.cpu += 1,
            Side::Player => self.player += 1,
        }
    }

    /// Side that has reached `threshold`, if any
    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.player >= threshold {
            Some(Side::Player)
        } else if self.cpu >= threshold {
            Some(Side::Cpu)
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Scoreboard line, e.g. `[CPU 2 : 3 PLAYER]`
    pub fn scoreboard(&self) -> String {
        format!("[CPU {} : {} PLAYER]", self.cpu, self.player)
    }
}

/// Stage of the victory sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryStage {
    /// Showing fireworks frame `frame`, next frame due at `next_at`
    Fireworks { frame: usize, next_at: u64 },
    /// "X WINS!" banner until the deadline
    Banner { until: u64 },
}

/// Whether ticks run, and if not, what is being shown instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Playing,
    GoalCelebration { scorer: Side, until: u64 },
    VictoryCelebration { winner: Side, stage: VictoryStage },
}

/// Outer mode wrapping the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Silent boot pause
    Boot { until: u64 },
    /// Waiting for a button; `ack_until` is set once one is pressed
    Menu { ack_until: Option<u64> },
    Playing,
}

/// Complete engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub cpu: Paddle,
    pub player: Paddle,
    pub score: Score,
    /// CPU reaction horizon in columns
    pub difficulty: i32,
    pub phase: RoundPhase,
    pub mode: GameMode,
}

impl GameState {
    /// Fresh state as it stands right after power-on at `now`
    pub fn new(settings: &Settings, now: u64) -> Self {
        let (cx, cy) = settings.center();
        Self {
            ball: Ball::new(IVec2::new(cx, cy), IVec2::ONE),
            cpu: Paddle::new(settings.cpu_x, settings.paddle_start_y, settings.paddle_length),
            player: Paddle::new(
                settings.player_x,
                settings.paddle_start_y,
                settings.paddle_length,
            ),
            score: Score::default(),
            difficulty: settings.difficulty_start,
            phase: RoundPhase::Playing,
            mode: GameMode::Boot {
                until: now + settings.boot_delay_ms,
            },
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Cpu => &self.cpu,
            Side::Player => &self.player,
        }
    }

    /// Ball and paddle ticks only run in this state
    pub fn is_live(&self) -> bool {
        self.mode == GameMode::Playing && self.phase == RoundPhase::Playing
    }
}
