//! Collision detection and response
//!
//! Everything is an axis-aligned box: the ball is tested by its bounding square.

use glam::Vec2;

use super::state::{Ball, Brick, Paddle};
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; touching edges do not count
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) / 2.0
    }
}

/// Which boundaries the ball bounced off this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallBounce {
    pub side: bool,
    pub ceiling: bool,
}

impl WallBounce {
    pub fn count(&self) -> usize {
        self.side as usize + self.ceiling as usize
    }
}

/// Reflect off the side walls and the HUD ceiling by flipping velocity signs
///
/// Pure sign flips, so speed is unchanged. A boundary only reflects a ball
/// still heading into it; one already moving away is left to leave on its own.
pub fn bounce_walls(ball: &mut Ball) -> WallBounce {
    let mut bounce = WallBounce::default();

    let into_right = ball.pos.x + ball.radius > CANVAS_WIDTH && ball.vel.x > 0.0;
    let into_left = ball.pos.x - ball.radius < 0.0 && ball.vel.x < 0.0;
    if into_right || into_left {
        ball.vel.x = -ball.vel.x;
        bounce.side = true;
    }
    if ball.pos.y - ball.radius < HUD_HEIGHT && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        bounce.ceiling = true;
    }

    bounce
}

/// Ball has fully passed the bottom edge
pub fn exited_bottom(ball: &Ball) -> bool {
    ball.pos.y + ball.radius > CANVAS_HEIGHT
}

/// Horizontal contact position on the paddle, 0 = left edge, 1 = right edge
pub fn paddle_hit_position(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.pos.x) / paddle.width).clamp(0.0, 1.0)
}

/// Outgoing velocity for a paddle hit at `hit_position` with the given speed
///
/// Angle from vertical is `(hit - 0.5) * 0.6π`; the result always points up.
pub fn paddle_deflection(hit_position: f32, speed: f32) -> Vec2 {
    let angle = (hit_position - 0.5) * PADDLE_DEFLECTION_SPREAD;
    Vec2::new(angle.sin() * speed, -(angle.cos() * speed).abs())
}

/// Bounce the ball off the paddle if they overlap
///
/// Returns the hit position when a bounce happened. The ball is snapped onto
/// the paddle top so the same contact cannot trigger again next tick.
pub fn bounce_paddle(ball: &mut Ball, paddle: &Paddle) -> Option<f32> {
    if !ball.bounds().overlaps(&paddle.bounds()) {
        return None;
    }

    let hit = paddle_hit_position(ball.pos.x, paddle);
    ball.vel = paddle_deflection(hit, ball.speed());
    ball.pos.y = paddle.pos.y - ball.radius;
    Some(hit)
}

/// Velocity after bouncing off a brick
///
/// Compares the center offset scaled by the opposite half extents to pick the
/// face: top/bottom flips `dy`, left/right flips `dx`. Near corners this can
/// pick the "wrong" face; that is the intended gameplay.
pub fn brick_bounce_velocity(ball_pos: Vec2, vel: Vec2, brick: &Brick) -> Vec2 {
    let bounds = brick.bounds();
    let offset = ball_pos - bounds.center();
    let half = bounds.half_extents();

    if (half.x * offset.y).abs() > (half.y * offset.x).abs() {
        Vec2::new(vel.x, -vel.y)
    } else {
        Vec2::new(-vel.x, vel.y)
    }
}

/// Index of the first active brick overlapping the ball, in grid order
pub fn first_brick_hit(ball: &Ball, bricks: &[Brick]) -> Option<usize> {
    let ball_box = ball.bounds();
    bricks
        .iter()
        .position(|b| b.active && ball_box.overlaps(&b.bounds()))
}
