//! End-to-end scenarios driving `Game` on a synthetic clock

use glam::IVec2;

use oled_pong::Settings;
use oled_pong::platform::{Clock, ManualClock, ScriptedButtons, run_pass};
use oled_pong::renderer::{FrameBuffer, Renderer};
use oled_pong::sim::{
    Buttons, Game, GameEvent, GameMode, RoundPhase, Score, Side, VictoryStage,
};

/// A game that has finished booting at t=1000
fn started(settings: Settings) -> Game {
    let mut game = Game::new(settings, 0).unwrap();
    game.update(1000, Buttons::NONE);
    assert_eq!(game.state().mode, GameMode::Playing);
    game
}

#[test]
fn test_left_column_is_player_goal() {
    let mut game = started(Settings::default());
    game.state_mut().ball.pos = IVec2::new(1, 32);
    game.state_mut().ball.dir = IVec2::new(-1, -1);

    let frame = game.update(1001, Buttons::NONE);
    assert!(frame.redraw);
    assert_eq!(
        frame.events,
        vec![GameEvent::Goal {
            scorer: Side::Player,
            score: Score { cpu: 0, player: 1 }
        }]
    );
    assert_eq!(game.state().score, Score { cpu: 0, player: 1 });

    let frame = game.update(3001, Buttons::NONE);
    assert_eq!(frame.events, vec![GameEvent::CourtReset]);
    assert_eq!(game.state().ball.pos, IVec2::new(64, 32));
    assert_eq!(game.state().phase, RoundPhase::Playing);
}

#[test]
fn test_cpu_paddle_deflects_approaching_ball() {
    let mut game = started(Settings::default());
    game.state_mut().ball.pos = IVec2::new(11, 20);
    game.state_mut().ball.dir = IVec2::new(1, 1);

    let frame = game.update(1001, Buttons::NONE);
    assert!(!frame.events.iter().any(|e| matches!(e, GameEvent::Goal { .. })));
    assert_eq!(game.state().ball.pos, IVec2::new(10, 21));
    assert_eq!(game.state().ball.dir, IVec2::new(-1, 1));
}

#[test]
fn test_simultaneous_buttons_hold_player_paddle() {
    let mut game = started(Settings::default());
    game.update(1001, Buttons::NONE);
    let before = game.state().player.y;

    game.update(1010, Buttons::UP);
    game.update(1020, Buttons::DOWN);
    game.update(1026, Buttons::NONE);
    assert_eq!(game.state().player.y, before);
}

#[test]
fn test_held_button_moves_one_cell_per_paddle_tick() {
    let mut game = started(Settings::default());
    // Paddle ticks at 1001, 1026, 1051, 1076
    for now in 1001..=1076 {
        game.update(now, Buttons::UP);
    }
    assert_eq!(game.state().player.y, 12);
}

#[test]
fn test_match_win_resets_scores() {
    let mut game = started(Settings::default()).with_fireworks_frames(2);
    game.state_mut().score = Score { cpu: 2, player: 4 };
    game.state_mut().ball.pos = IVec2::new(1, 10);
    game.state_mut().ball.dir = IVec2::new(-1, 1);

    game.update(1001, Buttons::NONE);
    assert_eq!(game.state().score.player, 5);

    let frame = game.update(3001, Buttons::NONE);
    assert_eq!(
        frame.events,
        vec![GameEvent::Fireworks {
            winner: Side::Player,
            frame: 0
        }]
    );
    let frame = game.update(3101, Buttons::NONE);
    assert_eq!(
        frame.events,
        vec![GameEvent::Fireworks {
            winner: Side::Player,
            frame: 1
        }]
    );
    let frame = game.update(3201, Buttons::NONE);
    assert_eq!(
        frame.events,
        vec![GameEvent::Victory {
            winner: Side::Player,
            score: Score { cpu: 2, player: 5 }
        }]
    );
    assert!(matches!(
        game.state().phase,
        RoundPhase::VictoryCelebration {
            stage: VictoryStage::Banner { until: 6201 },
            ..
        }
    ));

    let frame = game.update(6201, Buttons::NONE);
    assert_eq!(frame.events, vec![GameEvent::CourtReset]);
    assert_eq!(game.state().score, Score::default());
    assert_eq!(game.state().phase, RoundPhase::Playing);
    assert_eq!(game.state().ball.pos, IVec2::new(64, 32));
}

#[test]
fn test_difficulty_rerolled_within_range() {
    let settings = Settings {
        difficulty_min: 20,
        difficulty_max: 22,
        difficulty_start: 20,
        win_score: 100,
        ..Default::default()
    };
    let mut game = started(settings);
    let mut now = 1001;
    for _ in 0..10 {
        game.state_mut().ball.pos = IVec2::new(126, 30);
        game.state_mut().ball.dir = IVec2::new(1, 1);
        game.update(now, Buttons::NONE);
        now += 2000;
        game.update(now, Buttons::NONE);
        now += 1;
        assert!((20..=22).contains(&game.state().difficulty));
    }
    assert_eq!(game.state().score.cpu, 10);
}

#[test]
fn test_same_seed_same_game() {
    let run = || {
        let settings = Settings {
            seed: 42,
            ..Default::default()
        };
        let mut game = Game::new(settings, 0).unwrap();
        let mut script = ScriptedButtons::new()
            .press(2000, 2600, Buttons::DOWN)
            .press(5000, 5400, Buttons::UP);
        let clock = ManualClock::new(0);
        let renderer = Renderer::new();
        let mut fb = FrameBuffer::new(128, 64);
        while clock.now_ms() < 30_000 {
            run_pass(&mut game, &renderer, &mut fb, &clock, &mut script).unwrap();
            clock.advance(1);
        }
        (serde_json::to_string(game.state()).unwrap(), fb.to_ascii())
    };
    assert_eq!(run(), run());
}

#[test]
fn test_display_tracks_ball_while_playing() {
    let mut game = Game::new(Settings::default(), 0).unwrap();
    let renderer = Renderer::new();
    let mut fb = FrameBuffer::new(128, 64);
    let clock = ManualClock::new(0);
    let mut buttons = Buttons::NONE;

    while clock.now_ms() < 20_000 {
        run_pass(&mut game, &renderer, &mut fb, &clock, &mut buttons).unwrap();
        if game.state().is_live() {
            let ball = game.state().ball.pos;
            assert!(fb.pixel(ball.x, ball.y));
            let player = game.state().player;
            assert!(fb.pixel(player.x, player.y));
            assert!(fb.pixel(player.x, player.y + player.length - 1));
            assert!(fb.pixel(0, 0));
        }
        clock.advance(1);
    }
}

#[test]
fn test_renderer_fireworks_play_with_default_settings() {
    // Three full-screen frames, one lit column per byte in each
    let frames: Vec<Vec<u8>> = [0x80u8, 0x08, 0x01]
        .iter()
        .map(|&byte| vec![byte; 16 * 64])
        .collect();
    let renderer = Renderer::with_fireworks(frames);
    let mut game = Game::new(Settings::default(), 0).unwrap();
    let mut fb = FrameBuffer::new(128, 64);
    let clock = ManualClock::new(1000);
    let mut buttons = Buttons::NONE;

    run_pass(&mut game, &renderer, &mut fb, &clock, &mut buttons).unwrap();
    game.state_mut().score = Score { cpu: 1, player: 4 };
    game.state_mut().ball.pos = IVec2::new(1, 10);
    game.state_mut().ball.dir = IVec2::new(-1, 1);

    let mut shown = Vec::new();
    let mut victory_at = None;
    while clock.now_ms() < 6301 {
        clock.advance(1);
        let frame = run_pass(&mut game, &renderer, &mut fb, &clock, &mut buttons).unwrap();
        for event in &frame.events {
            match *event {
                GameEvent::Fireworks { winner, frame } => {
                    assert_eq!(winner, Side::Player);
                    assert_eq!(fb.lit_count(), 16 * 64);
                    shown.push((clock.now_ms(), frame));
                }
                GameEvent::Victory { winner, .. } => {
                    assert_eq!(winner, Side::Player);
                    victory_at = Some(clock.now_ms());
                }
                _ => {}
            }
        }
    }

    assert_eq!(shown, vec![(3001, 0), (3101, 1), (3201, 2)]);
    assert_eq!(victory_at, Some(3301));
    assert_eq!(game.fireworks_frames(), 3);
    assert_eq!(game.state().score, Score::default());
    assert_eq!(game.state().phase, RoundPhase::Playing);
}
