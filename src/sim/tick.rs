//! Per-frame simulation tick
//!
//! One tick = one display frame. `tick` runs the state machine and, while
//! playing, the physics step. `advance_frame` ages effects and runs every
//! frame regardless of phase.

use super::collision::{
    bounce_paddle, bounce_walls, brick_bounce_velocity, exited_bottom, first_brick_hit,
};
use super::state::{BALL_TRAIL_COLOR, GameEvent, GamePhase, GameState, PADDLE_COLOR};
use crate::consts::*;

/// Input snapshot for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Start / pause / resume (one-shot)
    pub toggle: bool,
    /// Restart after game over or win (one-shot)
    pub restart: bool,
}

impl TickInput {
    /// Paddle direction in -1..=1
    pub fn direction(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }
}

/// Advance the game by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart && state.phase.is_terminal() {
        state.reset();
        return;
    }

    if input.toggle {
        match state.phase {
            GamePhase::Ready | GamePhase::Paused => state.set_phase(GamePhase::Playing),
            GamePhase::Playing => {
                state.set_phase(GamePhase::Paused);
                return;
            }
            GamePhase::GameOver | GamePhase::Win => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    step_physics(state, input);
}

/// Age visual effects and bump the frame counter
pub fn advance_frame(state: &mut GameState) {
    state.frame += 1;
    state.effects.advance();
}

fn step_physics(state: &mut GameState, input: &TickInput) {
    state.effects.record_trail(state.ball.pos);

    state.ball.pos += state.ball.vel;

    let walls = bounce_walls(&mut state.ball);
    for _ in 0..walls.count() {
        state.effects.spawn_explosion(
            &mut state.rng,
            state.ball.pos,
            BALL_TRAIL_COLOR,
            WALL_SPARK_COUNT,
        );
        state.events.push(GameEvent::WallBounce);
    }

    if exited_bottom(&state.ball) {
        lose_life(state);
        return;
    }

    state.paddle.step(input.direction());

    if let Some(hit_position) = bounce_paddle(&mut state.ball, &state.paddle) {
        let contact = glam::Vec2::new(state.ball.pos.x, state.paddle.pos.y);
        state.effects.spawn_explosion(&mut state.rng, contact, PADDLE_COLOR, PADDLE_SPARK_COUNT);
        state.events.push(GameEvent::PaddleHit { hit_position });
    }

    // Only the first overlapping brick is resolved; others wait for the next tick
    if let Some(index) = first_brick_hit(&state.ball, &state.bricks) {
        let brick = &mut state.bricks[index];
        state.ball.vel = brick_bounce_velocity(state.ball.pos, state.ball.vel, brick);
        brick.active = false;
        let (center, color, points) = (brick.center(), brick.color, brick.points);

        state.score += points;
        state.effects.spawn_explosion(&mut state.rng, center, color, BRICK_EXPLOSION_COUNT);
        state.effects.spawn_popup(center, points);
        state.events.push(GameEvent::BrickDestroyed { index, points });
        log::debug!("Brick {} destroyed (+{}), score {}", index, points, state.score);

        if state.active_bricks() == 0 {
            log::info!("All bricks cleared, final score {}", state.score);
            state.set_phase(GamePhase::Win);
        }
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::LifeLost {
        lives_left: state.lives,
    });
    log::debug!("Life lost, {} remaining", state.lives);

    if state.lives == 0 {
        log::info!("Game over, final score {}", state.score);
        state.set_phase(GamePhase::GameOver);
    } else {
        state.reset_ball();
        state.set_phase(GamePhase::Ready);
    }
}
