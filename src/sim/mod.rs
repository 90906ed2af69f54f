//! Deterministic game engine
//!
//! All state lives in `GameState`, owned by `Game`. Nothing here touches
//! hardware, so the whole engine runs under test with a synthetic clock.

pub mod clock;
pub mod input;
pub mod paddle;
pub mod physics;
pub mod round;
pub mod state;
pub mod tick;

pub use clock::{Due, Scheduler};
pub use input::{Buttons, InputLatch};
pub use physics::{BallStep, step_ball};
pub use state::{Ball, GameMode, GameState, Paddle, RoundPhase, Score, Side, VictoryStage};
pub use tick::{Frame, Game, GameEvent};
