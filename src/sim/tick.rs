//! One pass of the control loop
//!
//! [`Game::update`] is called as often as the host likes with the current time
//! and button levels. It decides which subsystems are due, runs them to
//! completion in order (ball, then paddles) and reports what changed.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::Scheduler;
use super::input::{Buttons, InputLatch};
use super::paddle::{step_cpu, step_player};
use super::physics::{BallStep, step_ball};
use super::round;
use super::state::{GameMode, GameState, RoundPhase, Score, Side};
use crate::settings::{Settings, SettingsError};

/// Something the renderer should reflect on the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Clear everything and redraw court, paddles and ball from state
    CourtReset,
    BallMoved { from: IVec2, to: IVec2 },
    /// Paddle top edge changed (or was redrawn in place)
    PaddleMoved { side: Side, from: i32, to: i32 },
    Goal { scorer: Side, score: Score },
    Fireworks { winner: Side, frame: usize },
    Victory { winner: Side, score: Score },
    MenuShown,
    MenuAcknowledged,
}

/// Result of one [`Game::update`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    /// Flush the display
    pub redraw: bool,
    pub events: Vec<GameEvent>,
}

impl Frame {
    fn push(&mut self, event: GameEvent) {
        self.events.push(event);
        self.redraw = true;
    }
}

/// Owns all engine state
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    state: GameState,
    scheduler: Scheduler,
    latch: InputLatch,
    rng: Pcg32,
    /// Length of the renderer's fireworks animation
    fireworks_frames: usize,
}

impl Game {
    /// Power on at `now`
    pub fn new(settings: Settings, now: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let state = GameState::new(&settings, now);
        let scheduler = Scheduler::new(settings.ball_period_ms, settings.paddle_period_ms, now);
        let rng = Pcg32::seed_from_u64(settings.seed);
        log::info!(
            "Game created: {}x{} court, first to {}, CPU rule {}",
            settings.width,
            settings.height,
            settings.win_score,
            settings.cpu_rule.as_str()
        );
        Ok(Self {
            settings,
            state,
            scheduler,
            latch: InputLatch::new(),
            rng,
            fireworks_frames: 0,
        })
    }

    /// Builder: play `frames` fireworks frames before the victory banner
    pub fn with_fireworks_frames(mut self, frames: usize) -> Self {
        self.set_fireworks_frames(frames);
        self
    }

    /// Match the fireworks sequence to the animation the renderer holds
    pub fn set_fireworks_frames(&mut self, frames: usize) {
        self.fireworks_frames = frames;
    }

    pub fn fireworks_frames(&self) -> usize {
        self.fireworks_frames
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for tests and scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Run one control loop pass at `now` with the sampled button levels
    pub fn update(&mut self, now: u64, levels: Buttons) -> Frame {
        let mut frame = Frame::default();
        let edge = self.latch.rising_edge(levels);

        match self.state.mode {
            GameMode::Boot { until } => {
                if now >= until {
                    frame.push(GameEvent::CourtReset);
                    if self.settings.menu {
                        self.state.mode = GameMode::Menu { ack_until: None };
                        frame.push(GameEvent::MenuShown);
                    } else {
                        self.start_playing(now);
                    }
                }
            }
            GameMode::Menu { ack_until: None } => {
                if edge {
                    self.state.mode = GameMode::Menu {
                        ack_until: Some(now + self.settings.menu_ack_ms),
                    };
                    frame.push(GameEvent::MenuAcknowledged);
                }
            }
            GameMode::Menu {
                ack_until: Some(until),
            } => {
                if now >= until {
                    frame.push(GameEvent::CourtReset);
                    self.start_playing(now);
                }
            }
            GameMode::Playing => self.update_round(now, levels, &mut frame),
        }

        frame
    }

    fn start_playing(&mut self, now: u64) {
        log::info!("Game started at {now} ms");
        self.state.mode = GameMode::Playing;
        self.latch.clear();
        self.scheduler.rebase(now);
    }

    fn update_round(&mut self, now: u64, levels: Buttons, frame: &mut Frame) {
        if self.state.phase != RoundPhase::Playing {
            // Buttons are not polled during celebrations; a press latched
            // before the goal is kept for the first paddle tick after resume
            if round::advance(
                &mut self.state,
                &self.settings,
                self.fireworks_frames,
                &mut self.rng,
                now,
                &mut frame.events,
            ) {
                self.scheduler.rebase(now);
            }
            frame.redraw |= !frame.events.is_empty();
            return;
        }

        self.latch.latch(levels);
        let due = self.scheduler.poll(now);

        if due.ball {
            self.ball_tick(now, frame);
        }
        // A goal ends the round; paddles stay put until the next serve
        if due.paddles && self.state.phase == RoundPhase::Playing {
            self.paddle_tick(frame);
        }

        frame.redraw |= due.any();
    }

    fn ball_tick(&mut self, now: u64, frame: &mut Frame) {
        match step_ball(&mut self.state, self.settings.width, self.settings.height) {
            BallStep::Moved { from, to } => {
                log::trace!("Ball ({}, {}) -> ({}, {})", from.x, from.y, to.x, to.y);
                frame.push(GameEvent::BallMoved { from, to });
            }
            BallStep::Goal(scorer) => {
                let event = round::on_goal(&mut self.state, &self.settings, scorer, now);
                frame.push(event);
            }
        }
    }

    fn paddle_tick(&mut self, frame: &mut Frame) {
        let height = self.settings.height;

        let from = self.state.cpu.y;
        step_cpu(
            &mut self.state.cpu,
            self.state.ball.pos,
            self.state.difficulty,
            self.settings.cpu_rule,
            height,
        );
        frame.push(GameEvent::PaddleMoved {
            side: Side::Cpu,
            from,
            to: self.state.cpu.y,
        });

        let from = self.state.player.y;
        step_player(&mut self.state.player, self.latch.take(), height);
        frame.push(GameEvent::PaddleMoved {
            side: Side::Player,
            from,
            to: self.state.player.y,
        });
    }
}
