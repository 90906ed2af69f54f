//! Game settings
//!
//! Defaults reproduce the firmware constants. Any override is validated so the
//! court geometry always satisfies the unit-step reflection rule.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// When the CPU paddle reacts to the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CpuRule {
    /// Ball is within the difficulty horizon of the CPU column
    Horizon,
    /// Ball is within the horizon and not yet behind the CPU column
    #[default]
    HorizonApproaching,
}

/// Which winner gets the fireworks sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FireworksPolicy {
    #[default]
    AnyWinner,
    PlayerOnly,
}

impl CpuRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            CpuRule::Horizon => "horizon",
            CpuRule::HorizonApproaching => "horizon-approaching",
        }
    }
}

/// Settings rejected by [`Settings::validate`] or [`Settings::from_json`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("court {width}x{height} is smaller than the 8x8 minimum")]
    CourtTooSmall { width: i32, height: i32 },
    #[error("paddle column {column} must lie in 2..={max}")]
    PaddleColumn { column: i32, max: i32 },
    #[error("CPU column {cpu} must be left of player column {player}")]
    PaddleOrder { cpu: i32, player: i32 },
    #[error("paddle length {length} does not fit a court of height {height}")]
    PaddleLength { length: i32, height: i32 },
    #[error("paddle start y {start} leaves the court")]
    PaddleStart { start: i32 },
    #[error("{0} period must be non-zero")]
    ZeroPeriod(&'static str),
    #[error("win score must be at least 1")]
    ZeroWinScore,
    #[error("difficulty range {min}..={max} is invalid")]
    DifficultyRange { min: i32, max: i32 },
    #[error("initial difficulty {0} is outside the configured range")]
    DifficultyStart(i32),
    #[error("settings parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Court ===
    pub width: i32,
    pub height: i32,

    // === Cadence (milliseconds) ===
    pub ball_period_ms: u64,
    pub paddle_period_ms: u64,

    // === Paddles ===
    pub paddle_length: i32,
    pub cpu_x: i32,
    pub player_x: i32,
    pub paddle_start_y: i32,

    // === Rules ===
    pub win_score: u32,
    pub cpu_rule: CpuRule,
    /// Smallest and largest CPU horizon picked after a goal
    pub difficulty_min: i32,
    pub difficulty_max: i32,
    pub difficulty_start: i32,

    // === Presentation timings (milliseconds) ===
    pub goal_dwell_ms: u64,
    pub victory_dwell_ms: u64,
    pub fireworks_frame_ms: u64,
    pub fireworks: FireworksPolicy,

    // === Startup ===
    pub boot_delay_ms: u64,
    /// Wait for a button press before the first serve
    pub menu: bool,
    pub menu_ack_ms: u64,

    /// Seed for reset directions and difficulty rerolls
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,

            ball_period_ms: BALL_UPDATE_RATE,
            paddle_period_ms: PADDLE_UPDATE_RATE,

            paddle_length: PADDLE_LENGTH,
            cpu_x: CPU_X,
            player_x: PLAYER_X,
            paddle_start_y: PADDLE_START_Y,

            win_score: WIN_SCORE,
            cpu_rule: CpuRule::default(),
            difficulty_min: DIFFICULTY_MIN,
            difficulty_max: DIFFICULTY_MAX,
            difficulty_start: DIFFICULTY_START,

            goal_dwell_ms: GOAL_DWELL_MS,
            victory_dwell_ms: VICTORY_DWELL_MS,
            fireworks_frame_ms: FIREWORKS_FRAME_MS,
            fireworks: FireworksPolicy::default(),

            boot_delay_ms: BOOT_DELAY_MS,
            menu: false,
            menu_ack_ms: MENU_ACK_MS,

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the geometry and timing constraints the engine relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < 8 || self.height < 8 {
            return Err(SettingsError::CourtTooSmall {
                width: self.width,
                height: self.height,
            });
        }

        // A paddle on column 1 or width-2 would let a reflection land on a boundary
        let max_column = self.width - 3;
        for column in [self.cpu_x, self.player_x] {
            if !(2..=max_column).contains(&column) {
                return Err(SettingsError::PaddleColumn {
                    column,
                    max: max_column,
                });
            }
        }
        if self.cpu_x >= self.player_x {
            return Err(SettingsError::PaddleOrder {
                cpu: self.cpu_x,
                player: self.player_x,
            });
        }

        if self.paddle_length < 1 || self.paddle_length > self.height - 2 {
            return Err(SettingsError::PaddleLength {
                length: self.paddle_length,
                height: self.height,
            });
        }
        if self.paddle_start_y < 1 || self.paddle_start_y + self.paddle_length > self.height - 1 {
            return Err(SettingsError::PaddleStart {
                start: self.paddle_start_y,
            });
        }

        if self.ball_period_ms == 0 {
            return Err(SettingsError::ZeroPeriod("ball"));
        }
        if self.paddle_period_ms == 0 {
            return Err(SettingsError::ZeroPeriod("paddle"));
        }
        if self.win_score == 0 {
            return Err(SettingsError::ZeroWinScore);
        }

        if self.difficulty_min < 0 || self.difficulty_min > self.difficulty_max {
            return Err(SettingsError::DifficultyRange {
                min: self.difficulty_min,
                max: self.difficulty_max,
            });
        }
        if !(self.difficulty_min..=self.difficulty_max).contains(&self.difficulty_start) {
            return Err(SettingsError::DifficultyStart(self.difficulty_start));
        }

        Ok(())
    }

    /// Court center, where the ball is served from
    pub fn center(&self) -> (i32, i32) {
        (self.width / 2, self.height / 2)
    }
}
