//! OLED Pong - a two-paddle ball game for a 128x64 monochrome display
//!
//! Core modules:
//! - `sim`: Deterministic engine (scheduler, physics, paddles, round state machine)
//! - `renderer`: Drawing surface abstraction and event-to-pixel translation
//! - `platform`: Clock/button abstraction and the control loop pass
//! - `settings`: Runtime configuration and validation

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{CpuRule, FireworksPolicy, Settings, SettingsError};

/// Firmware constants
pub mod consts {
    /// Display resolution
    pub const SCREEN_WIDTH: i32 = 128;
    pub const SCREEN_HEIGHT: i32 = 64;

    /// Update cadences (milliseconds)
    pub const BALL_UPDATE_RATE: u64 = 10;
    pub const PADDLE_UPDATE_RATE: u64 = 25;

    /// Paddle geometry
    pub const PADDLE_LENGTH: i32 = 16;
    pub const CPU_X: i32 = 12;
    pub const PLAYER_X: i32 = 115;
    pub const PADDLE_START_Y: i32 = 16;

    /// First side to reach this many points wins the match
    pub const WIN_SCORE: u32 = 5;

    /// Celebration timings (milliseconds)
    pub const GOAL_DWELL_MS: u64 = 2000;
    pub const VICTORY_DWELL_MS: u64 = 3000;
    pub const FIREWORKS_FRAME_MS: u64 = 100;

    /// Boot timings (milliseconds)
    pub const BOOT_DELAY_MS: u64 = 1000;
    pub const MENU_ACK_MS: u64 = 500;

    /// CPU reaction horizon, measured in columns from the CPU paddle
    pub const DIFFICULTY_MIN: i32 = 12;
    pub const DIFFICULTY_MAX: i32 = 30;
    pub const DIFFICULTY_START: i32 = 18;
}
