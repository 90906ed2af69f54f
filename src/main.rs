//! OLED Pong entry point
//!
//! Natively there is no panel, so this runs the engine headless against an
//! in-memory framebuffer on a simulated clock and prints the last frame.
//!
//! Usage: `oled-pong [settings.json] [seconds]`

use std::process::ExitCode;

use oled_pong::Settings;
use oled_pong::platform::{Clock, ManualClock, ScriptedButtons, run_pass};
use oled_pong::renderer::{FrameBuffer, Renderer};
use oled_pong::sim::{Buttons, Game, GameEvent};

/// Main loop polling interval on the simulated clock
const POLL_MS: u64 = 1;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Bad settings file {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let renderer = Renderer::with_fireworks(fireworks_frames(settings.width, settings.height, 12));

    let clock = ManualClock::new(0);
    let mut game = match Game::new(settings.clone(), clock.now_ms()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut display = FrameBuffer::new(settings.width, settings.height);
    let mut buttons = demo_script(seconds * 1000);

    log::info!("OLED Pong (native) simulating {seconds} s");
    let (mut goals, mut wins) = (0, 0);
    while clock.now_ms() < seconds * 1000 {
        let frame = match run_pass(&mut game, &renderer, &mut display, &clock, &mut buttons) {
            Ok(frame) => frame,
            Err(e) => match e {},
        };
        for event in &frame.events {
            match event {
                GameEvent::Goal { .. } => goals += 1,
                GameEvent::Victory { .. } => wins += 1,
                _ => {}
            }
        }
        clock.advance(POLL_MS);
    }

    println!("{}", display.to_ascii());
    println!(
        "{} goals, {} matches, score now {}, {} flushes",
        goals,
        wins,
        game.state().score.scoreboard(),
        display.presents()
    );
    ExitCode::SUCCESS
}

fn load_settings(path: &str) -> Result<Settings, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Settings::from_json(&json)?)
}

/// The player taps up and down in a fixed rhythm
fn demo_script(total_ms: u64) -> ScriptedButtons {
    let mut script = ScriptedButtons::new();
    let mut t = 1500;
    let mut up = true;
    while t < total_ms {
        let hold = 150 + (t % 7) * 40;
        script = script.press(t, t + hold, if up { Buttons::UP } else { Buttons::DOWN });
        up = !up;
        t += hold + 300;
    }
    script
}

/// Expanding rings, one per frame, as full-screen 1bpp bitmaps
fn fireworks_frames(width: i32, height: i32, count: usize) -> Vec<Vec<u8>> {
    let stride = ((width + 7) / 8) as usize;
    let (cx, cy) = (width / 2, height / 2);
    (0..count)
        .map(|i| {
            let radius = 3 + i as i32 * 3;
            let mut bitmap = vec![0u8; stride * height as usize];
            for y in 0..height {
                for x in 0..width {
                    let d2 = (x - cx).pow(2) + (y - cy).pow(2);
                    if (d2 - radius * radius).abs() <= radius && (x + y) % 3 == 0 {
                        bitmap[y as usize * stride + x as usize / 8] |= 0x80 >> (x % 8);
                    }
                }
            }
            bitmap
        })
        .collect()
}
