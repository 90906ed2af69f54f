//! Round state machine
//!
//! Playing -> GoalCelebration -> (VictoryCelebration ->) Playing.
//!
//! Celebrations are timed phases rather than blocking waits: the control loop
//! keeps polling, ticks are skipped, and the phase advances once its deadline
//! passes.

use glam::IVec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, GameState, RoundPhase, Side, VictoryStage};
use super::tick::GameEvent;
use crate::settings::{FireworksPolicy, Settings};

/// Record a goal and start its celebration
pub fn on_goal(state: &mut GameState, settings: &Settings, scorer: Side, now: u64) -> GameEvent {
    state.score.award(scorer);
    state.phase = RoundPhase::GoalCelebration {
        scorer,
        until: now + settings.goal_dwell_ms,
    };
    log::info!("{} SCORES! {}", scorer.name(), state.score.scoreboard());
    GameEvent::Goal {
        scorer,
        score: state.score,
    }
}

/// Advance a celebration whose deadline may have passed.
///
/// `fireworks_frames` is the length of the renderer's animation; zero skips
/// straight to the banner. Returns `true` when the round has just returned to
/// Playing.
pub fn advance(
    state: &mut GameState,
    settings: &Settings,
    fireworks_frames: usize,
    rng: &mut Pcg32,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> bool {
    match state.phase {
        RoundPhase::Playing => false,

        RoundPhase::GoalCelebration { until, .. } if now >= until => {
            match state.score.winner(settings.win_score) {
                Some(winner) => {
                    start_victory(state, settings, fireworks_frames, winner, now, events);
                    false
                }
                None => {
                    reset_round(state, settings, rng);
                    events.push(GameEvent::CourtReset);
                    true
                }
            }
        }
        RoundPhase::GoalCelebration { .. } => false,

        RoundPhase::VictoryCelebration {
            winner,
            stage: VictoryStage::Fireworks { frame, next_at },
        } if now >= next_at => {
            let frame = frame + 1;
            if frame < fireworks_frames {
                state.phase = RoundPhase::VictoryCelebration {
                    winner,
                    stage: VictoryStage::Fireworks {
                        frame,
                        next_at: now + settings.fireworks_frame_ms,
                    },
                };
                events.push(GameEvent::Fireworks { winner, frame });
            } else {
                show_banner(state, settings, winner, now, events);
            }
            false
        }

        RoundPhase::VictoryCelebration {
            stage: VictoryStage::Banner { until },
            winner,
        } if now >= until => {
            log::info!("Match over, {} won; scores reset", winner.name());
            state.score.reset();
            reset_round(state, settings, rng);
            events.push(GameEvent::CourtReset);
            true
        }
        RoundPhase::VictoryCelebration { .. } => false,
    }
}

fn start_victory(
    state: &mut GameState,
    settings: &Settings,
    fireworks_frames: usize,
    winner: Side,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    let fireworks = fireworks_frames > 0
        && match settings.fireworks {
            FireworksPolicy::AnyWinner => true,
            FireworksPolicy::PlayerOnly => winner == Side::Player,
        };

    if fireworks {
        state.phase = RoundPhase::VictoryCelebration {
            winner,
            stage: VictoryStage::Fireworks {
                frame: 0,
                next_at: now + settings.fireworks_frame_ms,
            },
        };
        events.push(GameEvent::Fireworks { winner, frame: 0 });
    } else {
        show_banner(state, settings, winner, now, events);
    }
}

fn show_banner(
    state: &mut GameState,
    settings: &Settings,
    winner: Side,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    state.phase = RoundPhase::VictoryCelebration {
        winner,
        stage: VictoryStage::Banner {
            until: now + settings.victory_dwell_ms,
        },
    };
    log::info!("{} WINS! {}", winner.name(), state.score.scoreboard());
    events.push(GameEvent::Victory {
        winner,
        score: state.score,
    });
}

/// Serve from the center with a random diagonal, recenter paddles and reroll the CPU horizon
pub fn reset_round(state: &mut GameState, settings: &Settings, rng: &mut Pcg32) {
    let (cx, cy) = settings.center();
    state.ball = Ball::new(IVec2::new(cx, cy), random_diagonal(rng));
    state.cpu.y = settings.paddle_start_y;
    state.player.y = settings.paddle_start_y;
    state.difficulty = rng.random_range(settings.difficulty_min..=settings.difficulty_max);
    state.phase = RoundPhase::Playing;
    log::debug!(
        "Round reset: ball dir ({}, {}), CPU horizon {}",
        state.ball.dir.x,
        state.ball.dir.y,
        state.difficulty
    );
}

fn random_diagonal(rng: &mut Pcg32) -> IVec2 {
    let mut unit = || if rng.random_bool(0.5) { 1 } else { -1 };
    IVec2::new(unit(), unit())
}
