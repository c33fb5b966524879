//! Simulation module
//!
//! All gameplay logic lives here, with no rendering or platform dependencies:
//! - One tick per display frame
//! - Seeded RNG for effects
//! - Stable iteration order (brick grid order)

pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;

pub use collision::{Aabb, WallBounce};
pub use effects::{Effects, Particle, ScorePopup, Star, TrailSample};
pub use state::{
    BALL_TRAIL_COLOR, BRICK_COLORS, Ball, Brick, GameEvent, GamePhase, GameState, PADDLE_COLOR,
    Paddle, Rgba, rgb_hex, seed_bricks,
};
pub use tick::{TickInput, advance_frame, tick};
