//! Neon Breakout entry point
//!
//! The browser build starts the game on `#canvas`. The native build has no
//! window; it plays a seeded headless round with a simple autopilot and prints
//! the result, which is handy for checking the simulation from a terminal.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    match neon_breakout::platform::web::run("canvas").await {
        Ok(handle) => {
            // Keep the game reachable (and alive) from the page
            if let Some(window) = web_sys::window() {
                let _ = js_sys::Reflect::set(
                    &window,
                    &JsValue::from_str("neonBreakout"),
                    &JsValue::from(handle),
                );
            }
        }
        Err(e) => log::error!("Failed to start game: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    // Either a JSON object or a query string like `quality=low&seed=7`
    let arg = std::env::args().nth(1).unwrap_or_default();
    let settings = if arg.trim_start().starts_with('{') {
        match neon_breakout::Settings::from_json(&arg) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("Invalid settings: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        neon_breakout::Settings::from_query(&arg)
    };
    let seed = settings.seed.unwrap_or(1);
    log::info!("Neon Breakout (headless) starting with seed {}", seed);

    let state = autopilot::play(seed, &settings);
    println!(
        "{} after {} frames: score {}, lives {}, bricks left {}",
        state.phase.as_str(),
        state.frame,
        state.score,
        state.lives,
        state.active_bricks()
    );
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use neon_breakout::Settings;
    use neon_breakout::consts::TICKS_PER_SECOND;
    use neon_breakout::sim::{GameEvent, GamePhase, GameState, TickInput, advance_frame, tick};

    /// Five minutes of play
    const MAX_FRAMES: u64 = TICKS_PER_SECOND as u64 * 60 * 5;

    /// Play until the round ends or the frame limit runs out
    pub fn play(seed: u64, settings: &Settings) -> GameState {
        let mut state = GameState::from_settings(seed, settings);

        while state.frame < MAX_FRAMES && !state.phase.is_terminal() {
            let input = steer(&state);
            tick(&mut state, &input);
            advance_frame(&mut state);

            for event in state.drain_events() {
                match event {
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("Frame {}: life lost ({} left)", state.frame, lives_left)
                    }
                    GameEvent::PhaseChanged { from, to } => log::debug!(
                        "Frame {}: {} -> {}",
                        state.frame,
                        from.as_str(),
                        to.as_str()
                    ),
                    other => log::trace!("{:?}", other),
                }
            }
        }

        state
    }

    /// Follow the ball with a drifting aim point so bounces vary
    fn steer(state: &GameState) -> TickInput {
        if state.phase == GamePhase::Ready {
            return TickInput {
                toggle: true,
                ..Default::default()
            };
        }

        let paddle = &state.paddle;
        let offset = ((state.frame / 97) % 5) as f32 / 4.0 - 0.5;
        let aim = paddle.pos.x + paddle.width * (0.5 + offset * 0.8);
        let error = state.ball.pos.x - aim;

        TickInput {
            left: error < -paddle.speed / 2.0,
            right: error > paddle.speed / 2.0,
            ..Default::default()
        }
    }
}
