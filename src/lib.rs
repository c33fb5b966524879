//! Neon Breakout - A brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, game state, visual effects)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input adapter and host glue
//! - `settings`: Quality and effect toggles

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size (drawing units)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;
    /// Reserved band at the top for the HUD; the ball bounces off its lower edge
    pub const HUD_HEIGHT: f32 = 50.0;

    /// Ticks per "second" for effect lifetimes (one tick = one frame)
    pub const TICKS_PER_SECOND: f32 = 60.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_DX: f32 = 4.0;
    pub const BALL_START_DY: f32 = -4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    /// Distance from the bottom of the canvas to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 30.0;
    /// Max deflection either side of vertical is half of this (0.3π ≈ 54°)
    pub const PADDLE_DEFLECTION_SPREAD: f32 = 0.6 * std::f32::consts::PI;

    /// Brick grid
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 8.0;
    pub const BRICK_OFFSET_TOP: f32 = 80.0;
    pub const BRICK_OFFSET_LEFT: f32 =
        (CANVAS_WIDTH - (BRICK_COLS as f32 * (BRICK_WIDTH + BRICK_PADDING) - BRICK_PADDING)) / 2.0;
    /// Points for the bottom row; row `i` is worth `(BRICK_ROWS - i) * BRICK_POINT_STEP`
    pub const BRICK_POINT_STEP: u32 = 10;

    pub const START_LIVES: u32 = 3;

    /// Effect tuning
    pub const TRAIL_LENGTH: usize = 15;
    pub const PARTICLE_GRAVITY: f32 = 0.2;
    pub const WALL_SPARK_COUNT: usize = 8;
    pub const PADDLE_SPARK_COUNT: usize = 5;
    pub const BRICK_EXPLOSION_COUNT: usize = 15;
    pub const POPUP_RISE_SPEED: f32 = 1.0;
    pub const POPUP_FADE_PER_FRAME: f32 = 0.02;
    pub const STAR_MIN_ALPHA: f32 = 0.2;
    pub const STAR_MAX_ALPHA: f32 = 1.0;
}

/// Point on the unit circle for the given angle, scaled
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Ball speed from its velocity components
#[inline]
pub fn speed_of(vel: Vec2) -> f32 {
    vel.length()
}
