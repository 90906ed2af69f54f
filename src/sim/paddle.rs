//! Paddle controllers
//!
//! Both paddles move at most one cell per paddle tick and are clamped back
//! into the court afterwards, every tick.

use glam::IVec2;

use super::input::Buttons;
use super::state::Paddle;
use crate::settings::CpuRule;

/// Whether the CPU paddle reacts to a ball at `ball_x`
pub fn cpu_is_tracking(paddle: &Paddle, ball_x: i32, horizon: i32, rule: CpuRule) -> bool {
    let within = ball_x < paddle.x + horizon;
    match rule {
        CpuRule::Horizon => within,
        // Ignore a ball that is already behind the paddle
        CpuRule::HorizonApproaching => within && ball_x >= paddle.x,
    }
}

/// Move the CPU paddle one cell toward the ball's row.
///
/// Closing speed is capped at one cell per tick, so a fast change of ball row
/// can outrun it.
pub fn step_cpu(paddle: &mut Paddle, ball: IVec2, horizon: i32, rule: CpuRule, court_height: i32) {
    if cpu_is_tracking(paddle, ball.x, horizon, rule) {
        let center = paddle.center();
        if center > ball.y {
            paddle.y -= 1;
        }
        if center < ball.y {
            paddle.y += 1;
        }
    }
    paddle.clamp(court_height);
}

/// Move the player paddle from latched requests.
///
/// Up and down together cancel out.
pub fn step_player(paddle: &mut Paddle, requested: Buttons, court_height: i32) {
    if requested.up {
        paddle.y -= 1;
    }
    if requested.down {
        paddle.y += 1;
    }
    paddle.clamp(court_height);
}
