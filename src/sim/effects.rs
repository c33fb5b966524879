//! Visual effect entities: particles, ball trail, score popups, starfield
//!
//! Pure data mutation. Physics calls the spawn functions on collision events;
//! `Effects::advance` ages everything once per frame.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Rgba;
use crate::consts::*;
use crate::polar_to_cartesian;

/// A particle for explosions and sparks
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Fraction of lifetime remaining (1 → 0)
    pub life: f32,
    /// Lifetime in seconds-equivalent (consumed at 60 frames per unit)
    pub max_life: f32,
    pub color: Rgba,
    pub size: f32,
}

/// One recorded ball position
#[derive(Debug, Clone, Copy)]
pub struct TrailSample {
    pub pos: Vec2,
    pub alpha: f32,
}

/// Floating "+points" text spawned when a brick breaks
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub value: u32,
    pub alpha: f32,
    /// Vertical velocity per frame (negative = up)
    pub vy: f32,
}

/// Background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub alpha: f32,
    /// Alpha change per frame; sign flips at the alpha bounds
    pub twinkle: f32,
}

/// All effect buffers
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub particles: Vec<Particle>,
    /// Oldest first, newest last
    pub trail: Vec<TrailSample>,
    pub popups: Vec<ScorePopup>,
    pub stars: Vec<Star>,
    /// Particle cap; oldest particles are evicted past this
    pub max_particles: usize,
}

impl Effects {
    pub fn new(max_particles: usize) -> Self {
        Self {
            max_particles,
            ..Self::default()
        }
    }

    /// Populate the starfield. Stars persist across game resets.
    pub fn seed_stars(&mut self, rng: &mut Pcg32, count: usize) {
        self.stars.clear();
        self.stars.extend((0..count).map(|_| {
            let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            Star {
                pos: Vec2::new(
                    rng.random_range(0.0..CANVAS_WIDTH),
                    rng.random_range(0.0..CANVAS_HEIGHT),
                ),
                size: rng.random_range(0.5..2.0),
                alpha: rng.random_range(STAR_MIN_ALPHA..STAR_MAX_ALPHA),
                twinkle: rng.random_range(0.005..0.02) * direction,
            }
        }));
    }

    /// Emit `count` particles in an even radial fan around `origin`
    pub fn spawn_explosion(&mut self, rng: &mut Pcg32, origin: Vec2, color: Rgba, count: usize) {
        if self.max_particles == 0 || count == 0 {
            return;
        }

        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count as f32;
            let speed = rng.random_range(2.0..5.0);
            self.particles.push(Particle {
                pos: origin,
                vel: polar_to_cartesian(speed, angle),
                life: 1.0,
                max_life: rng.random_range(0.5..1.0),
                color,
                size: rng.random_range(3.0..6.0),
            });
        }

        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Record a ball position, evicting the oldest sample past capacity
    pub fn record_trail(&mut self, pos: Vec2) {
        self.trail.push(TrailSample { pos, alpha: 0.0 });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
        let count = self.trail.len() as f32;
        for (i, sample) in self.trail.iter_mut().enumerate() {
            sample.alpha = i as f32 / count;
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    pub fn spawn_popup(&mut self, pos: Vec2, value: u32) {
        self.popups.push(ScorePopup {
            pos,
            value,
            alpha: 1.0,
            vy: -POPUP_RISE_SPEED,
        });
    }

    /// Drop particles, trail and popups (stars stay)
    pub fn clear_transient(&mut self) {
        self.particles.clear();
        self.trail.clear();
        self.popups.clear();
    }

    /// Age every effect by one frame
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.pos += p.vel;
            p.vel.y += PARTICLE_GRAVITY;
            p.life -= 1.0 / (p.max_life * TICKS_PER_SECOND);
        }
        self.particles.retain(|p| p.life > 0.0);

        for popup in &mut self.popups {
            popup.pos.y += popup.vy;
            popup.alpha -= POPUP_FADE_PER_FRAME;
        }
        self.popups.retain(|p| p.alpha > 0.0);

        for star in &mut self.stars {
            star.alpha += star.twinkle;
            if star.alpha > STAR_MAX_ALPHA || star.alpha < STAR_MIN_ALPHA {
                star.twinkle = -star.twinkle;
                star.alpha = star.alpha.clamp(STAR_MIN_ALPHA, STAR_MAX_ALPHA);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_explosion_radial_fan() {
        let mut fx = Effects::new(500);
        fx.spawn_explosion(&mut rng(), Vec2::new(100.0, 100.0), WHITE, 4);
        assert_eq!(fx.particles.len(), 4);

        // i = 0 points right, i = 1 points down (+y), evenly spaced
        let dirs: Vec<Vec2> = fx.particles.iter().map(|p| p.vel.normalize()).collect();
        assert!((dirs[0] - Vec2::X).length() < 1e-4);
        assert!((dirs[1] - Vec2::Y).length() < 1e-4);
        assert!((dirs[2] + Vec2::X).length() < 1e-4);

        for p in &fx.particles {
            let speed = p.vel.length();
            assert!((2.0..5.0).contains(&speed));
            assert!((0.5..1.0).contains(&p.max_life));
            assert!((3.0..6.0).contains(&p.size));
            assert_eq!(p.life, 1.0);
            assert_eq!(p.pos, Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn test_particle_aging_and_culling() {
        let mut fx = Effects::new(500);
        fx.spawn_explosion(&mut rng(), Vec2::ZERO, WHITE, 15);

        let before = fx.particles[0].clone();
        fx.advance();
        let after = &fx.particles[0];
        assert_eq!(after.pos, before.pos + before.vel);
        assert!((after.vel.y - (before.vel.y + PARTICLE_GRAVITY)).abs() < 1e-6);
        let expected_life = 1.0 - 1.0 / (before.max_life * 60.0);
        assert!((after.life - expected_life).abs() < 1e-6);

        // Longest possible lifetime is just under 60 frames
        for _ in 0..61 {
            fx.advance();
        }
        assert!(fx.particles.is_empty());
    }

    #[test]
    fn test_particle_cap_evicts_oldest() {
        let mut fx = Effects::new(20);
        fx.spawn_explosion(&mut rng(), Vec2::ZERO, WHITE, 15);
        fx.spawn_explosion(&mut rng(), Vec2::new(50.0, 0.0), WHITE, 15);
        assert_eq!(fx.particles.len(), 20);
        // The ten survivors from the first burst were evicted first
        assert_eq!(fx.particles.last().unwrap().pos, Vec2::new(50.0, 0.0));
        assert_eq!(fx.particles.iter().filter(|p| p.pos == Vec2::ZERO).count(), 5);

        let mut off = Effects::new(0);
        off.spawn_explosion(&mut rng(), Vec2::ZERO, WHITE, 15);
        assert!(off.particles.is_empty());
    }

    #[test]
    fn test_trail_capacity_and_alpha() {
        let mut fx = Effects::default();
        for i in 0..20 {
            fx.record_trail(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(fx.trail.len(), TRAIL_LENGTH);
        // Oldest five were evicted
        assert_eq!(fx.trail[0].pos.x, 5.0);
        assert_eq!(fx.trail[14].pos.x, 19.0);
        for (i, sample) in fx.trail.iter().enumerate() {
            assert!((sample.alpha - i as f32 / 15.0).abs() < 1e-6);
        }

        fx.record_trail(Vec2::ZERO);
        fx.clear_trail();
        fx.record_trail(Vec2::ZERO);
        assert_eq!(fx.trail.len(), 1);
        assert_eq!(fx.trail[0].alpha, 0.0);
    }

    #[test]
    fn test_popup_rises_and_fades() {
        let mut fx = Effects::default();
        fx.spawn_popup(Vec2::new(10.0, 100.0), 60);

        let mut last_alpha = fx.popups[0].alpha;
        fx.advance();
        assert_eq!(fx.popups[0].pos.y, 99.0);
        assert!(fx.popups[0].alpha < last_alpha);
        last_alpha = fx.popups[0].alpha;

        let mut frames = 1;
        while !fx.popups.is_empty() {
            fx.advance();
            frames += 1;
            if let Some(p) = fx.popups.first() {
                assert!(p.alpha < last_alpha);
                last_alpha = p.alpha;
            }
            assert!(frames <= 51);
        }
    }

    #[test]
    fn test_stars_stay_in_bounds() {
        let mut fx = Effects::default();
        fx.seed_stars(&mut rng(), 50);
        assert_eq!(fx.stars.len(), 50);

        let mut flipped = false;
        let initial: Vec<f32> = fx.stars.iter().map(|s| s.twinkle).collect();
        for _ in 0..500 {
            fx.advance();
            for star in &fx.stars {
                assert!((STAR_MIN_ALPHA..=STAR_MAX_ALPHA).contains(&star.alpha));
            }
        }
        for (star, twinkle) in fx.stars.iter().zip(initial) {
            flipped |= star.twinkle != twinkle;
            assert_eq!(star.twinkle.abs(), twinkle.abs());
        }
        assert!(flipped);
        assert_eq!(fx.stars.len(), 50);
    }

    #[test]
    fn test_clear_transient_keeps_stars() {
        let mut fx = Effects::new(100);
        fx.seed_stars(&mut rng(), 10);
        fx.spawn_explosion(&mut rng(), Vec2::ZERO, WHITE, 5);
        fx.spawn_popup(Vec2::ZERO, 10);
        fx.record_trail(Vec2::ZERO);

        fx.clear_transient();
        assert!(fx.particles.is_empty());
        assert!(fx.popups.is_empty());
        assert!(fx.trail.is_empty());
        assert_eq!(fx.stars.len(), 10);
    }
}
