//! Ball movement and collision resolution
//!
//! The ball always moves exactly one cell per axis per tick. That lets a bounce
//! be resolved by flipping the direction component and stepping the candidate
//! back by twice the new direction: the penetrating step is undone and the
//! outgoing step applied in one move. A variable-speed ball would need a swept
//! test instead.

use glam::IVec2;

use super::state::{GameState, Side};

/// Outcome of one ball tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallStep {
    /// Ball committed to `to`
    Moved { from: IVec2, to: IVec2 },
    /// Ball reached a goal column; position is left uncommitted
    Goal(Side),
}

/// Advance the ball one cell, resolving walls and paddles.
///
/// Check order: goal columns, top/bottom walls, CPU paddle, player paddle.
pub fn step_ball(state: &mut GameState, width: i32, height: i32) -> BallStep {
    let from = state.ball.pos;
    let mut next = state.ball.candidate();

    if next.x == 0 {
        return BallStep::Goal(Side::Player);
    }
    if next.x == width - 1 {
        return BallStep::Goal(Side::Cpu);
    }

    if next.y == 0 || next.y == height - 1 {
        state.ball.dir.y = -state.ball.dir.y;
        next.y += 2 * state.ball.dir.y;
        log::trace!("Wall bounce at x={}", next.x);
    }

    for side in [Side::Cpu, Side::Player] {
        if state.paddle(side).blocks(next) {
            state.ball.dir.x = -state.ball.dir.x;
            next.x += 2 * state.ball.dir.x;
            log::trace!("{} paddle bounce at y={}", side.name(), next.y);
        }
    }

    state.ball.pos = next;
    BallStep::Moved { from, to: next }
}
