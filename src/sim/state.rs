//! Game state and core simulation types
//!
//! Everything the loop mutates lives in one `GameState` owned by the host.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::Effects;
use crate::consts::*;

/// Linear RGBA color
pub type Rgba = [f32; 4];

/// Convert a 0xRRGGBB literal to an opaque color
pub const fn rgb_hex(hex: u32) -> Rgba {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Row colors, top to bottom
pub const BRICK_COLORS: [Rgba; BRICK_ROWS] = [
    rgb_hex(0xff2a6d), // Hot pink
    rgb_hex(0xff7b00), // Orange
    rgb_hex(0xffd300), // Yellow
    rgb_hex(0x39ff14), // Neon green
    rgb_hex(0x05d9e8), // Cyan
    rgb_hex(0x9d4edd), // Violet
];

/// Ball trail and wall spark color
pub const BALL_TRAIL_COLOR: Rgba = rgb_hex(0x00f0ff);
/// Paddle body and paddle spark color
pub const PADDLE_COLOR: Rgba = rgb_hex(0xd1f7ff);

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen / between lives, waiting for start input
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
    /// All bricks cleared
    Win,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "ready",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameOver",
            GamePhase::Win => "win",
        }
    }

    /// Ended runs only leave via restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Win)
    }
}

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    BrickDestroyed { index: usize, points: u32 },
    PaddleHit { hit_position: f32 },
    WallBounce,
    LifeLost { lives_left: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
}

/// The ball
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0),
            vel: Vec2::new(BALL_START_DX, BALL_START_DY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn speed(&self) -> f32 {
        crate::speed_of(self.vel)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos - Vec2::splat(self.radius),
            Vec2::splat(self.radius * 2.0),
        )
    }
}

/// The player's paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units per tick while a direction is held
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
                CANVAS_HEIGHT - PADDLE_BOTTOM_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(self.width, self.height))
    }

    /// Move by `direction * speed` (direction in -1..=1) and clamp to the canvas
    pub fn step(&mut self, direction: f32) {
        self.pos.x += direction * self.speed;
        self.clamp_to_canvas();
    }

    pub fn clamp_to_canvas(&mut self) {
        self.pos.x = self.pos.x.clamp(0.0, CANVAS_WIDTH - self.width);
    }
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub color: Rgba,
    pub active: bool,
    pub points: u32,
}

impl Brick {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Build the full brick grid, row-major from the top-left
pub fn seed_bricks() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS * BRICK_COLS);
    for row in 0..BRICK_ROWS {
        for col in 0..BRICK_COLS {
            bricks.push(Brick {
                pos: Vec2::new(
                    BRICK_OFFSET_LEFT + col as f32 * (BRICK_WIDTH + BRICK_PADDING),
                    BRICK_OFFSET_TOP + row as f32 * (BRICK_HEIGHT + BRICK_PADDING),
                ),
                size: Vec2::new(BRICK_WIDTH, BRICK_HEIGHT),
                color: BRICK_COLORS[row],
                active: true,
                points: (BRICK_ROWS - row) as u32 * BRICK_POINT_STEP,
            });
        }
    }
    bricks
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub lives: u32,
    pub score: u32,
    pub phase: GamePhase,
    /// Frames since construction, never reset (drives overlay pulse)
    pub frame: u64,
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: Vec<Brick>,
    /// Visual effects (not gameplay-affecting)
    pub effects: Effects,
    /// Events since the host last drained them
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game with the default particle cap and starfield
    pub fn new(seed: u64) -> Self {
        Self::with_limits(
            seed,
            crate::QualityPreset::default().max_particles(),
            crate::QualityPreset::default().star_count(),
        )
    }

    /// Create a new game from host settings
    pub fn from_settings(seed: u64, settings: &crate::Settings) -> Self {
        Self::with_limits(seed, settings.max_particles(), settings.quality.star_count())
    }

    fn with_limits(seed: u64, max_particles: usize, star_count: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut effects = Effects::new(max_particles);
        effects.seed_stars(&mut rng, star_count);

        Self {
            lives: START_LIVES,
            score: 0,
            phase: GamePhase::Ready,
            frame: 0,
            ball: Ball::default(),
            paddle: Paddle::default(),
            bricks: seed_bricks(),
            effects,
            events: Vec::new(),
            rng,
        }
    }

    /// Full restart: score, lives, bricks, ball, paddle, transient effects
    pub fn reset(&mut self) {
        self.lives = START_LIVES;
        self.score = 0;
        self.bricks = seed_bricks();
        self.ball = Ball::default();
        self.paddle = Paddle::default();
        self.effects.clear_transient();
        self.set_phase(GamePhase::Ready);
        log::info!("Game reset");
    }

    /// Put the ball back at the center after losing a life
    pub fn reset_ball(&mut self) {
        self.ball = Ball::default();
        self.effects.clear_trail();
    }

    pub fn active_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.active).count()
    }

    /// Change phase, recording an event when it actually changes
    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
            self.phase = phase;
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brick_grid_layout() {
        let bricks = seed_bricks();
        assert_eq!(bricks.len(), 60);

        // Row points: 60 at the top down to 10 at the bottom
        assert_eq!(bricks[0].points, 60);
        assert_eq!(bricks[BRICK_COLS].points, 50);
        assert_eq!(bricks[59].points, 10);

        // Grid is horizontally centered and stays below the HUD band
        let first = &bricks[0];
        let last = &bricks[BRICK_COLS - 1];
        let right_margin = CANVAS_WIDTH - (last.pos.x + last.size.x);
        assert!((first.pos.x - right_margin).abs() < 1e-3);
        assert!(first.pos.y > HUD_HEIGHT);
        assert!(bricks.iter().all(|b| b.active));
    }

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.ball.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.effects.stars.len(), 100);
        assert!(state.effects.particles.is_empty());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = GameState::new(5);
        state.score = 420;
        state.lives = 1;
        state.bricks[3].active = false;
        state.paddle.pos.x = 0.0;
        state.effects.spawn_popup(Vec2::ZERO, 10);
        state.phase = GamePhase::GameOver;

        state.reset();
        let first = state.bricks.clone();
        assert_eq!((state.score, state.lives), (0, 3));

        state.reset();
        assert_eq!(state.bricks, first);
        assert_eq!(state.bricks, seed_bricks());
        assert_eq!((state.score, state.lives), (0, 3));
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.effects.popups.is_empty());
        assert_eq!(state.paddle.pos, Paddle::default().pos);
    }

    #[test]
    fn test_paddle_clamp() {
        let mut paddle = Paddle::default();
        for _ in 0..200 {
            paddle.step(-1.0);
        }
        assert_eq!(paddle.pos.x, 0.0);
        for _ in 0..200 {
            paddle.step(1.0);
        }
        assert_eq!(paddle.pos.x, CANVAS_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_set_phase_records_changes_only() {
        let mut state = GameState::new(1);
        state.set_phase(GamePhase::Ready);
        assert!(state.events.is_empty());
        state.set_phase(GamePhase::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Ready,
                to: GamePhase::Playing
            }]
        );
        assert!(state.events.is_empty());
    }
}
