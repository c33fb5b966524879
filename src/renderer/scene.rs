//! Frame composition
//!
//! Turns the current `GameState` into one triangle list in canvas units. Reads
//! state only; effect aging happens in `sim::advance_frame`.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::vertex::colors::{self, with_alpha};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{BALL_TRAIL_COLOR, GamePhase, GameState, PADDLE_COLOR};

/// Build every vertex for the frame, back to front
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let segments = settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(8192);

    // Background
    vertices.extend(shapes::gradient_rect(
        Vec2::ZERO,
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        colors::BACKGROUND_TOP,
        colors::BACKGROUND_BOTTOM,
    ));

    // Starfield
    for star in &state.effects.stars {
        vertices.extend(shapes::rect(
            star.pos - Vec2::splat(star.size / 2.0),
            Vec2::splat(star.size),
            with_alpha(colors::STAR, star.alpha),
        ));
    }

    for brick in state.bricks.iter().filter(|b| b.active) {
        vertices.extend(shapes::bevel_brick(brick.pos, brick.size, brick.color));
    }

    if settings.particles {
        for p in &state.effects.particles {
            vertices.extend(shapes::circle(
                p.pos,
                p.size / 2.0,
                with_alpha(p.color, p.life),
                6,
            ));
        }
    }

    // Paddle
    let paddle = &state.paddle;
    vertices.extend(shapes::gradient_rect(
        paddle.pos,
        Vec2::new(paddle.width, paddle.height),
        PADDLE_COLOR,
        colors::shade(PADDLE_COLOR, -0.5),
    ));

    // Ball: trail, glow, body, highlight
    let ball = &state.ball;
    if settings.trails {
        vertices.extend(shapes::ball_trail(
            &state.effects.trail,
            ball.radius,
            BALL_TRAIL_COLOR,
        ));
    }
    if settings.glow {
        vertices.extend(shapes::glow(
            ball.pos,
            ball.radius,
            ball.radius * 2.5,
            colors::BALL_GLOW,
            segments,
        ));
    }
    vertices.extend(shapes::circle(ball.pos, ball.radius, colors::BALL, segments));
    vertices.extend(shapes::circle(
        ball.pos - Vec2::splat(ball.radius / 3.0),
        ball.radius / 3.0,
        colors::HIGHLIGHT,
        segments / 2,
    ));

    // Score popups
    for popup in &state.effects.popups {
        vertices.extend(shapes::pixel_text(
            &format!("+{}", popup.value),
            popup.pos,
            2.0,
            with_alpha(colors::POPUP, popup.alpha),
        ));
    }

    // HUD separator
    vertices.extend(shapes::rect(
        Vec2::new(0.0, HUD_HEIGHT - 1.0),
        Vec2::new(CANVAS_WIDTH, 1.0),
        colors::HUD_LINE,
    ));

    if state.phase != GamePhase::Playing {
        vertices.extend(shapes::rect(
            Vec2::ZERO,
            Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
            colors::OVERLAY_DIM,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_overlay_dim_only_when_not_playing() {
        let settings = Settings::default();
        let mut state = GameState::new(9);
        let ready = build_scene(&state, &settings);
        state.phase = GamePhase::Playing;
        let playing = build_scene(&state, &settings);
        assert_eq!(ready.len(), playing.len() + 6);
        assert_eq!(ready.last().unwrap().color, colors::OVERLAY_DIM);
    }

    #[test]
    fn test_inactive_bricks_not_drawn() {
        let settings = Settings::default();
        let mut state = GameState::new(9);
        let full = build_scene(&state, &settings).len();
        state.bricks[10].active = false;
        state.bricks[11].active = false;
        assert_eq!(build_scene(&state, &settings).len(), full - 60);
    }

    #[test]
    fn test_scene_does_not_mutate_effects() {
        let settings = Settings::default();
        let mut state = GameState::new(9);
        tick(&mut state, &TickInput { toggle: true, ..Default::default() });
        state.effects.spawn_popup(Vec2::new(100.0, 100.0), 60);
        let before = format!("{:?}", state.effects);
        build_scene(&state, &settings);
        build_scene(&state, &settings);
        assert_eq!(format!("{:?}", state.effects), before);
    }

    #[test]
    fn test_toggles_remove_effect_layers() {
        let mut state = GameState::new(9);
        state.phase = GamePhase::Playing;
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        state.effects.spawn_explosion(
            &mut state.rng,
            Vec2::new(300.0, 300.0),
            PADDLE_COLOR,
            4,
        );

        let all = build_scene(&state, &Settings::default()).len();
        let plain = Settings {
            trails: false,
            particles: false,
            glow: false,
            ..Settings::default()
        };
        let segments = plain.quality.circle_segments() as usize;
        let removed = 4 * 6 * 3 + 4 * 6 + segments * 6;
        assert_eq!(build_scene(&state, &plain).len(), all - removed);
    }
}
